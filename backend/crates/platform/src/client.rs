//! Client identification utilities
//!
//! Derives the originating-client identity used as the rate-limit key.
//! Forwarding headers are client-controlled input; whether they are
//! consulted at all is governed by [`ForwardTrust`].

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Identity used when neither headers nor the transport peer yield one
pub const FALLBACK_CLIENT_IP: &str = "127.0.0.1";

/// Policy for trusting `X-Forwarded-For` / `X-Real-IP`
#[derive(Debug, Clone, Default)]
pub enum ForwardTrust {
    /// Trust forwarding headers from any peer. Only safe behind a
    /// reverse proxy that sanitizes them upstream.
    #[default]
    All,
    /// Trust forwarding headers only when the transport peer is one of
    /// the listed proxy addresses.
    Proxies(Vec<IpAddr>),
    /// Never consult forwarding headers; use the transport peer only.
    Never,
}

impl ForwardTrust {
    fn trusts(&self, peer: Option<IpAddr>) -> bool {
        match self {
            ForwardTrust::All => true,
            ForwardTrust::Proxies(proxies) => peer.is_some_and(|ip| proxies.contains(&ip)),
            ForwardTrust::Never => false,
        }
    }
}

/// Extract client IP address
///
/// Checks the first `X-Forwarded-For` entry, then `X-Real-IP`, then the
/// transport peer address, subject to the forward-trust policy.
pub fn extract_client_ip(
    headers: &HeaderMap,
    peer: Option<IpAddr>,
    trust: &ForwardTrust,
) -> Option<IpAddr> {
    if trust.trusts(peer) {
        if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
            if let Some(first) = xff.split(',').next() {
                if let Ok(ip) = first.trim().parse::<IpAddr>() {
                    return Some(ip);
                }
            }
        }
        if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
            if let Ok(ip) = real_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    peer
}

/// Client identity string for throttling keys
///
/// Falls back to a fixed loopback placeholder so that every request maps
/// to some bucket even when the peer address is unknown.
pub fn client_identity(headers: &HeaderMap, peer: Option<IpAddr>, trust: &ForwardTrust) -> String {
    extract_client_ip(headers, peer, trust)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| FALLBACK_CLIENT_IP.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn xff_headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_xff_first_entry_wins() {
        let headers = xff_headers("192.168.1.1, 10.0.0.1");
        let ip = extract_client_ip(&headers, None, &ForwardTrust::All);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("203.0.113.9"));
        let ip = extract_client_ip(&headers, None, &ForwardTrust::All);
        assert_eq!(ip, Some("203.0.113.9".parse().unwrap()));
    }

    #[test]
    fn test_peer_fallback_on_garbage_header() {
        let headers = xff_headers("not-an-ip");
        let peer: IpAddr = "10.1.2.3".parse().unwrap();
        let ip = extract_client_ip(&headers, Some(peer), &ForwardTrust::All);
        assert_eq!(ip, Some(peer));
    }

    #[test]
    fn test_loopback_placeholder() {
        let headers = HeaderMap::new();
        assert_eq!(
            client_identity(&headers, None, &ForwardTrust::All),
            FALLBACK_CLIENT_IP
        );
    }

    #[test]
    fn test_never_ignores_headers() {
        let headers = xff_headers("192.168.1.1");
        let peer: IpAddr = "10.1.2.3".parse().unwrap();
        let ip = extract_client_ip(&headers, Some(peer), &ForwardTrust::Never);
        assert_eq!(ip, Some(peer));
    }

    #[test]
    fn test_proxies_only_from_listed_peer() {
        let headers = xff_headers("192.168.1.1");
        let proxy: IpAddr = "10.0.0.2".parse().unwrap();
        let stranger: IpAddr = "10.9.9.9".parse().unwrap();
        let trust = ForwardTrust::Proxies(vec![proxy]);

        let ip = extract_client_ip(&headers, Some(proxy), &trust);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));

        let ip = extract_client_ip(&headers, Some(stranger), &trust);
        assert_eq!(ip, Some(stranger));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role captured in the session claim at issuance time.
///
/// The set is closed; a credential carrying any other role string fails
/// claim decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Newcomer,
    Mentor,
    Client,
    Admin,
}

impl Role {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use Role::*;
        match self {
            Newcomer => "newcomer",
            Mentor => "mentor",
            Client => "client",
            Admin => "admin",
        }
    }

    /// Parse a role code.
    ///
    /// Returns `None` for unknown codes: role strings arrive from the
    /// credential payload, which is client-held data.
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use Role::*;
        match code {
            "newcomer" => Some(Newcomer),
            "mentor" => Some(Mentor),
            "client" => Some(Client),
            "admin" => Some(Admin),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_mentor(&self) -> bool {
        matches!(self, Role::Mentor)
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_code() {
        assert_eq!(Role::from_code("newcomer"), Some(Role::Newcomer));
        assert_eq!(Role::from_code("mentor"), Some(Role::Mentor));
        assert_eq!(Role::from_code("client"), Some(Role::Client));
        assert_eq!(Role::from_code("admin"), Some(Role::Admin));
        assert_eq!(Role::from_code("superuser"), None);
        assert_eq!(Role::from_code(""), None);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Newcomer.to_string(), "newcomer");
        assert_eq!(Role::Mentor.to_string(), "mentor");
        assert_eq!(Role::Client.to_string(), "client");
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_role_serde_codes() {
        assert_eq!(serde_json::to_string(&Role::Mentor).unwrap(), "\"mentor\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert!(serde_json::from_str::<Role>("\"root\"").is_err());
    }

    #[test]
    fn test_role_checks() {
        assert!(Role::Mentor.is_mentor());
        assert!(!Role::Client.is_mentor());
        assert!(Role::Admin.is_admin());
        assert!(!Role::Newcomer.is_admin());
    }
}

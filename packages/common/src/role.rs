use serde::{Deserialize, Serialize};
use std::fmt;

/// Access tier derived from a signed-in identity.
///
/// Roles are never stored on the identity itself. They are recomputed from
/// the admin allow-list and the school table on every sign-in and every
/// session rehydration, so a role can never go stale across sign-outs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// No admin listing and no school profile. A signed-in identity can
    /// still carry this role; it only grants access to public routes.
    Anonymous,
    /// A school profile exists for the identity's email.
    School,
    /// The identity's email appears in the admin allow-list.
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::School => "school",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::School).unwrap(), "\"school\"");
    }

    #[test]
    fn test_only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::School.is_admin());
        assert!(!Role::Anonymous.is_admin());
    }
}

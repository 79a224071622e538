use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::ROLE_ADMIN;

/// Identity attached to a request after its bearer token was verified.
///
/// Roles come from the `roles` claim the identity provider signs into
/// the access token. Administrative capability is decided here and
/// nowhere else; in particular it is never inferred from the email
/// address.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Identity provider subject id
    pub id: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if user has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check if user can moderate reports, profiles and the violation
    /// type catalogue
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_is_a_role_claim_not_an_email_match() {
        let user = AuthenticatedUser {
            id: "user-1".to_string(),
            email: "admin@example.com".to_string(),
            roles: Vec::new(),
        };
        // An "admin"-looking email grants nothing without the claim
        assert!(!user.is_admin());

        let moderator = AuthenticatedUser {
            id: "user-2".to_string(),
            email: "jane@example.com".to_string(),
            roles: vec!["admin".to_string()],
        };
        assert!(moderator.is_admin());
    }
}

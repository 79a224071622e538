use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use super::model::AuthenticatedUser;
use crate::core::config::AuthConfig;
use crate::core::error::AppError;

/// Verifies identity-provider access tokens locally.
///
/// The provider signs HS256 JWTs with a shared secret, so no network
/// round-trip is needed per request; every consumer of the session
/// (submission, profile, admin) revalidates the token independently.
pub struct SessionValidator {
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    leeway: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
    #[serde(rename = "iss")]
    _iss: String,
    #[serde(rename = "exp")]
    _exp: u64,
    #[serde(default)]
    email: Option<String>,
    /// Roles the provider vouches for. Administrative capability comes
    /// from here, never from the email address.
    #[serde(default)]
    roles: Vec<String>,
}

impl SessionValidator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            leeway: config.jwt_leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        // Validate algorithm from header
        if header.alg != Algorithm::HS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only HS256 is allowed",
                header.alg
            )));
        }

        // Setup validation
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true; // Validate not-before claim

        // Decode and validate token
        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let claims = token_data.claims;

        Ok(AuthenticatedUser {
            id: claims.sub,
            email: claims.email.unwrap_or_default(),
            roles: claims.roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;
    use std::time::Duration;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        iss: String,
        aud: String,
        exp: u64,
        nbf: u64,
        email: String,
        roles: Vec<String>,
    }

    fn test_config(secret: &str) -> AuthConfig {
        AuthConfig {
            provider_url: "http://auth.local".to_string(),
            jwt_secret: secret.to_string(),
            issuer: "http://auth.local".to_string(),
            audience: "authenticated".to_string(),
            jwt_leeway: Duration::from_secs(60),
        }
    }

    fn sign(claims: &TestClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn now_secs() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn far_future() -> u64 {
        now_secs() + 3600
    }

    #[test]
    fn test_valid_token_yields_user_with_roles() {
        let validator = SessionValidator::new(&test_config("secret"));
        let token = sign(
            &TestClaims {
                sub: "user-1".to_string(),
                iss: "http://auth.local".to_string(),
                aud: "authenticated".to_string(),
                exp: far_future(),
                nbf: now_secs() - 10,
                email: "jane@example.com".to_string(),
                roles: vec!["admin".to_string()],
            },
            "secret",
        );

        let user = validator.validate_token(&token).unwrap();
        assert_eq!(user.id, "user-1");
        assert_eq!(user.email, "jane@example.com");
        assert!(user.is_admin());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let validator = SessionValidator::new(&test_config("secret"));
        let token = sign(
            &TestClaims {
                sub: "user-1".to_string(),
                iss: "http://auth.local".to_string(),
                aud: "authenticated".to_string(),
                exp: far_future(),
                nbf: now_secs() - 10,
                email: String::new(),
                roles: Vec::new(),
            },
            "other-secret",
        );

        assert!(matches!(
            validator.validate_token(&token),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let validator = SessionValidator::new(&test_config("secret"));
        let token = sign(
            &TestClaims {
                sub: "user-1".to_string(),
                iss: "http://evil.local".to_string(),
                aud: "authenticated".to_string(),
                exp: far_future(),
                nbf: now_secs() - 10,
                email: String::new(),
                roles: Vec::new(),
            },
            "secret",
        );

        assert!(matches!(
            validator.validate_token(&token),
            Err(AppError::Auth(_))
        ));
    }
}

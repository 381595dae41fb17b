//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use keygate_core::config::jwt::JwtConfig;
use keygate_core::error::AuthError;

use super::claims::Claims;

/// Validates signed JWT bearer tokens.
///
/// Checks signature, expiry, issuer, and audience; any mismatch makes the
/// whole token invalid — claims are never partially trusted. Revocation is
/// not checked here: the session store is authoritative for that (see
/// `AuthCoordinator::validate_token`).
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from JWT configuration.
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AuthError::invalid_token("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AuthError::invalid_token("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AuthError::invalid_token("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        AuthError::invalid_token("Invalid token issuer")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                        AuthError::invalid_token("Invalid token audience")
                    }
                    _ => AuthError::invalid_token(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use chrono::Utc;
    use keygate_entity::user::{User, UserRole};
    use uuid::Uuid;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret-at-least-32-bytes!!".to_string(),
            issuer: "keygate-test".to_string(),
            audience: "keygate-test-clients".to_string(),
            expiration_minutes: 60,
        }
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            password_hash: "irrelevant".to_string(),
            phone_number: None,
            role: UserRole::Admin,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let config = test_config();
        let user = test_user();
        let (token, expires_at) = JwtEncoder::new(&config).issue(&user).unwrap();

        let claims = JwtDecoder::new(&config).verify(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.name, "Grace Hopper");
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.exp, expires_at.timestamp());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let (token, _) = JwtEncoder::new(&test_config()).issue(&test_user()).unwrap();

        let mut other = test_config();
        other.secret = "a-completely-different-32-byte-key!!".to_string();
        assert!(JwtDecoder::new(&other).verify(&token).is_err());
    }

    #[test]
    fn test_wrong_audience_is_rejected() {
        let (token, _) = JwtEncoder::new(&test_config()).issue(&test_user()).unwrap();

        let mut other = test_config();
        other.audience = "someone-else".to_string();
        assert!(JwtDecoder::new(&other).verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(JwtDecoder::new(&test_config()).verify("not.a.jwt").is_err());
    }
}

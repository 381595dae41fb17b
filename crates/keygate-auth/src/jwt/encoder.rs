//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use keygate_core::config::jwt::JwtConfig;
use keygate_core::error::AuthError;
use keygate_entity::user::User;

use super::claims::Claims;

/// Creates signed JWT bearer tokens.
///
/// Configuration (secret, issuer, audience, TTL) is injected at
/// construction; there is no global signing state.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Value for the `iss` claim.
    issuer: String,
    /// Value for the `aud` claim.
    audience: String,
    /// Token TTL in minutes.
    ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from JWT configuration.
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl_minutes: config.expiration_minutes as i64,
        }
    }

    /// Issues a signed token for the given user.
    ///
    /// Returns the encoded token together with its absolute expiry, which
    /// the caller persists on the matching session row.
    pub fn issue(&self, user: &User) -> Result<(String, DateTime<Utc>), AuthError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::minutes(self.ttl_minutes);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            name: user.display_name(),
            role: user.role,
            jti: uuid::Uuid::new_v4(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::internal(format!("Failed to encode token: {e}")))?;

        Ok((token, expires_at))
    }
}

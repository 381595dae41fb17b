//! Token signing configuration.

use serde::{Deserialize, Serialize};

/// JWT signing and validation configuration.
///
/// Injected into the token encoder and decoder at construction; the secret
/// is never read from a global. A secret of at least 32 bytes is expected
/// for HS256.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_secret")]
    pub secret: String,
    /// Value of the `iss` claim, checked on verification.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Value of the `aud` claim, checked on verification.
    #[serde(default = "default_audience")]
    pub audience: String,
    /// Token TTL in minutes.
    #[serde(default = "default_expiration")]
    pub expiration_minutes: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            issuer: default_issuer(),
            audience: default_audience(),
            expiration_minutes: default_expiration(),
        }
    }
}

fn default_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION_32_BYTES_MIN".to_string()
}

fn default_issuer() -> String {
    "keygate".to_string()
}

fn default_audience() -> String {
    "keygate-clients".to_string()
}

fn default_expiration() -> u64 {
    60
}

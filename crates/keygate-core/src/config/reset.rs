//! Password-reset token configuration.

use serde::{Deserialize, Serialize};

/// Settings for password-reset token issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetConfig {
    /// Reset token TTL in minutes.
    #[serde(default = "default_ttl")]
    pub token_ttl_minutes: u64,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            token_ttl_minutes: default_ttl(),
        }
    }
}

fn default_ttl() -> u64 {
    30
}

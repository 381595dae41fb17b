//! Password-reset token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single-use password-reset token.
///
/// Issued by `forgot_password`, consumed by `reset_password`. A token is
/// usable only while unexpired and unused.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PasswordResetToken {
    /// Unique token record identifier.
    pub id: Uuid,
    /// The user this token was issued for.
    pub user_id: Uuid,
    /// The opaque token value (16 lowercase hex characters).
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// Whether the token has already been consumed.
    pub is_used: bool,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    /// Check whether the token can still be consumed.
    pub fn is_usable(&self) -> bool {
        !self.is_used && self.expires_at > Utc::now()
    }
}

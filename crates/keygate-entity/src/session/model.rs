//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One record per issued bearer token.
///
/// Sessions are created at login and deactivated at logout. Logout never
/// deletes the row; the `is_active` flag is flipped so the audit trail
/// survives revocation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// The issued bearer token (unique).
    pub token: String,
    /// When the session expires (matches the token's embedded expiry).
    pub expires_at: DateTime<Utc>,
    /// Whether the session is still active (false after logout).
    pub is_active: bool,
    /// IP address from which the session was created (audit only).
    pub ip_address: Option<String>,
    /// User-Agent header value (audit only).
    pub user_agent: Option<String>,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Check whether the session is currently valid: active and not expired.
    pub fn is_valid(&self) -> bool {
        self.is_active && self.expires_at > Utc::now()
    }

    /// Check whether the session has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Data required to create a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// The issued bearer token.
    pub token: String,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
    /// IP address of the client.
    pub ip_address: Option<String>,
    /// User-Agent header.
    pub user_agent: Option<String>,
}

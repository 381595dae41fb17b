//! Persistence traits for users, sessions, and reset tokens.
//!
//! Two implementations exist for each trait:
//! - Postgres-backed wrappers over the `keygate-database` repositories
//! - In-memory mutex-guarded stores for single-node use and tests

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use keygate_core::result::AuthResult;
use keygate_entity::reset::PasswordResetToken;
use keygate_entity::session::{CreateSession, Session};
use keygate_entity::user::{CreateUser, User};

pub use memory::{MemoryResetTokenStore, MemorySessionStore, MemoryUserStore};
pub use postgres::{PgResetTokenStore, PgSessionStore, PgUserStore};

/// Persists user identity and profile; enforces email uniqueness at write
/// time.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>>;

    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    /// Check whether a user with the given email exists.
    async fn email_exists(&self, email: &str) -> AuthResult<bool>;

    /// Create a new user. Fails with `DuplicateEmail` if the email is taken,
    /// backed by a storage-level uniqueness guarantee.
    async fn create(&self, user: CreateUser) -> AuthResult<User>;

    /// Replace a user's password hash and bump the update timestamp.
    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> AuthResult<()>;

    /// Record a successful login time.
    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> AuthResult<()>;
}

/// Persists one record per issued bearer token and tracks its
/// active/expired/revoked state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a new session record.
    async fn create(&self, session: CreateSession) -> AuthResult<Session>;

    /// Find a session by its bearer token.
    async fn find_by_token(&self, token: &str) -> AuthResult<Option<Session>>;

    /// Deactivate a session. The record is kept (soft revocation).
    async fn deactivate(&self, id: Uuid) -> AuthResult<()>;

    /// Deactivate every active session belonging to a user. Returns the
    /// number of sessions revoked.
    async fn deactivate_all_for_user(&self, user_id: Uuid) -> AuthResult<u64>;

    /// List all currently valid sessions for a user.
    async fn active_sessions_for_user(&self, user_id: Uuid) -> AuthResult<Vec<Session>>;
}

/// Persists single-use password-reset tokens.
#[async_trait]
pub trait ResetTokenStore: Send + Sync {
    /// Store a newly issued reset token.
    async fn create(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<PasswordResetToken>;

    /// Find an unused, unexpired token for the given user.
    async fn find_usable(&self, user_id: Uuid, token: &str)
    -> AuthResult<Option<PasswordResetToken>>;

    /// Mark a token as consumed.
    async fn mark_used(&self, id: Uuid) -> AuthResult<()>;
}

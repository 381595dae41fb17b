//! Postgres-backed store implementations wrapping the database repositories.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use keygate_core::result::AuthResult;
use keygate_database::repositories::{ResetTokenRepository, SessionRepository, UserRepository};
use keygate_entity::reset::PasswordResetToken;
use keygate_entity::session::{CreateSession, Session};
use keygate_entity::user::{CreateUser, User};

use super::{ResetTokenStore, SessionStore, UserStore};

/// User store backed by the PostgreSQL user repository.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    /// User database repository.
    repo: Arc<UserRepository>,
}

impl PgUserStore {
    /// Creates a new Postgres user store.
    pub fn new(repo: Arc<UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        self.repo.find_by_email(email).await
    }

    async fn email_exists(&self, email: &str) -> AuthResult<bool> {
        self.repo.email_exists(email).await
    }

    async fn create(&self, user: CreateUser) -> AuthResult<User> {
        self.repo.create(&user).await
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> AuthResult<()> {
        self.repo.update_password_hash(id, password_hash).await
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> AuthResult<()> {
        self.repo.update_last_login(id, at).await
    }
}

/// Session store backed by the PostgreSQL session repository.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    /// Session database repository.
    repo: Arc<SessionRepository>,
}

impl PgSessionStore {
    /// Creates a new Postgres session store.
    pub fn new(repo: Arc<SessionRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(&self, session: CreateSession) -> AuthResult<Session> {
        self.repo.create(&session).await
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<Session>> {
        self.repo.find_by_token(token).await
    }

    async fn deactivate(&self, id: Uuid) -> AuthResult<()> {
        self.repo.deactivate(id).await
    }

    async fn deactivate_all_for_user(&self, user_id: Uuid) -> AuthResult<u64> {
        self.repo.deactivate_all_for_user(user_id).await
    }

    async fn active_sessions_for_user(&self, user_id: Uuid) -> AuthResult<Vec<Session>> {
        self.repo.find_active_by_user(user_id).await
    }
}

/// Reset-token store backed by the PostgreSQL reset-token repository.
#[derive(Debug, Clone)]
pub struct PgResetTokenStore {
    /// Reset-token database repository.
    repo: Arc<ResetTokenRepository>,
}

impl PgResetTokenStore {
    /// Creates a new Postgres reset-token store.
    pub fn new(repo: Arc<ResetTokenRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ResetTokenStore for PgResetTokenStore {
    async fn create(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<PasswordResetToken> {
        self.repo.create(user_id, token, expires_at).await
    }

    async fn find_usable(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> AuthResult<Option<PasswordResetToken>> {
        self.repo.find_usable(user_id, token).await
    }

    async fn mark_used(&self, id: Uuid) -> AuthResult<()> {
        self.repo.mark_used(id).await
    }
}

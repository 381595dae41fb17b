//! In-memory stores using Tokio mutexes for single-node deployments and
//! tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use keygate_core::error::AuthError;
use keygate_core::result::AuthResult;
use keygate_entity::reset::PasswordResetToken;
use keygate_entity::session::{CreateSession, Session};
use keygate_entity::user::{CreateUser, User};

use super::{ResetTokenStore, SessionStore, UserStore};

/// In-memory user store keyed by user id.
///
/// Email uniqueness is enforced under the mutex, which gives the same
/// race-safety the unique index provides in PostgreSQL.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    /// Protected user map.
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MemoryUserStore {
    /// Creates an empty in-memory user store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips a user's active flag. Account administration is outside the
    /// authentication core, so this is not part of the [`UserStore`] trait.
    pub async fn set_active(&self, id: Uuid, is_active: bool) {
        let mut users = self.users.lock().await;
        if let Some(user) = users.get_mut(&id) {
            user.is_active = is_active;
            user.updated_at = Utc::now();
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>> {
        Ok(self.users.lock().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> AuthResult<bool> {
        Ok(self.users.lock().await.values().any(|u| u.email == email))
    }

    async fn create(&self, user: CreateUser) -> AuthResult<User> {
        let mut users = self.users.lock().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::duplicate_email(
                "This email address is already in use",
            ));
        }

        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            phone_number: user.phone_number,
            role: user.role,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };

        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> AuthResult<()> {
        let mut users = self.users.lock().await;
        if let Some(user) = users.get_mut(&id) {
            user.password_hash = password_hash.to_string();
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> AuthResult<()> {
        let mut users = self.users.lock().await;
        if let Some(user) = users.get_mut(&id) {
            user.last_login_at = Some(at);
        }
        Ok(())
    }
}

/// In-memory session store keyed by session id.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    /// Protected session map.
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl MemorySessionStore {
    /// Creates an empty in-memory session store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, session: CreateSession) -> AuthResult<Session> {
        let mut sessions = self.sessions.lock().await;

        let created = Session {
            id: Uuid::new_v4(),
            user_id: session.user_id,
            token: session.token,
            expires_at: session.expires_at,
            is_active: true,
            ip_address: session.ip_address,
            user_agent: session.user_agent,
            created_at: Utc::now(),
        };

        sessions.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<Session>> {
        Ok(self
            .sessions
            .lock()
            .await
            .values()
            .find(|s| s.token == token)
            .cloned())
    }

    async fn deactivate(&self, id: Uuid) -> AuthResult<()> {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get_mut(&id) {
            session.is_active = false;
        }
        Ok(())
    }

    async fn deactivate_all_for_user(&self, user_id: Uuid) -> AuthResult<u64> {
        let mut sessions = self.sessions.lock().await;
        let mut revoked = 0;
        for session in sessions.values_mut() {
            if session.user_id == user_id && session.is_active {
                session.is_active = false;
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn active_sessions_for_user(&self, user_id: Uuid) -> AuthResult<Vec<Session>> {
        Ok(self
            .sessions
            .lock()
            .await
            .values()
            .filter(|s| s.user_id == user_id && s.is_valid())
            .cloned()
            .collect())
    }
}

/// In-memory reset-token store keyed by token record id.
#[derive(Debug, Clone, Default)]
pub struct MemoryResetTokenStore {
    /// Protected token map.
    tokens: Arc<Mutex<HashMap<Uuid, PasswordResetToken>>>,
}

impl MemoryResetTokenStore {
    /// Creates an empty in-memory reset-token store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResetTokenStore for MemoryResetTokenStore {
    async fn create(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<PasswordResetToken> {
        let mut tokens = self.tokens.lock().await;

        let created = PasswordResetToken {
            id: Uuid::new_v4(),
            user_id,
            token: token.to_string(),
            expires_at,
            is_used: false,
            created_at: Utc::now(),
        };

        tokens.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_usable(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> AuthResult<Option<PasswordResetToken>> {
        Ok(self
            .tokens
            .lock()
            .await
            .values()
            .find(|t| t.user_id == user_id && t.token == token && t.is_usable())
            .cloned())
    }

    async fn mark_used(&self, id: Uuid) -> AuthResult<()> {
        let mut tokens = self.tokens.lock().await;
        if let Some(token) = tokens.get_mut(&id) {
            token.is_used = true;
        }
        Ok(())
    }
}

//! Session repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use keygate_core::error::{AuthError, ErrorKind};
use keygate_core::result::AuthResult;
use keygate_entity::session::model::{CreateSession, Session};

/// Repository for session CRUD and query operations.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new session and return the created row.
    pub async fn create(&self, session: &CreateSession) -> AuthResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions \
               (id, user_id, token, expires_at, is_active, ip_address, user_agent, created_at) \
             VALUES ($1, $2, $3, $4, TRUE, $5, $6, NOW()) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(session.user_id)
        .bind(&session.token)
        .bind(session.expires_at)
        .bind(&session.ip_address)
        .bind(&session.user_agent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AuthError::with_source(ErrorKind::Database, "Failed to create session", e))
    }

    /// Find a session by its bearer token.
    pub async fn find_by_token(&self, token: &str) -> AuthResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AuthError::with_source(ErrorKind::Database, "Failed to find session by token", e)
            })
    }

    /// Deactivate a session (soft revocation). The row is kept for audit.
    pub async fn deactivate(&self, id: Uuid) -> AuthResult<()> {
        sqlx::query("UPDATE sessions SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AuthError::with_source(ErrorKind::Database, "Failed to deactivate session", e)
            })?;
        Ok(())
    }

    /// Deactivate every active session belonging to a user.
    pub async fn deactivate_all_for_user(&self, user_id: Uuid) -> AuthResult<u64> {
        let result =
            sqlx::query("UPDATE sessions SET is_active = FALSE WHERE user_id = $1 AND is_active")
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AuthError::with_source(
                        ErrorKind::Database,
                        "Failed to deactivate user sessions",
                        e,
                    )
                })?;
        Ok(result.rows_affected())
    }

    /// List all currently valid sessions for a user.
    pub async fn find_active_by_user(&self, user_id: Uuid) -> AuthResult<Vec<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE user_id = $1 AND is_active AND expires_at > NOW() \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AuthError::with_source(ErrorKind::Database, "Failed to find active sessions", e)
        })
    }
}

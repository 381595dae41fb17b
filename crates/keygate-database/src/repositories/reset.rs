//! Password-reset token repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use keygate_core::error::{AuthError, ErrorKind};
use keygate_core::result::AuthResult;
use keygate_entity::reset::PasswordResetToken;

/// Repository for password-reset token operations.
#[derive(Debug, Clone)]
pub struct ResetTokenRepository {
    pool: PgPool,
}

impl ResetTokenRepository {
    /// Create a new reset-token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new reset token and return the created row.
    pub async fn create(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<PasswordResetToken> {
        sqlx::query_as::<_, PasswordResetToken>(
            "INSERT INTO password_reset_tokens \
               (id, user_id, token, expires_at, is_used, created_at) \
             VALUES ($1, $2, $3, $4, FALSE, NOW()) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AuthError::with_source(ErrorKind::Database, "Failed to create reset token", e))
    }

    /// Find an unused, unexpired token for the given user.
    pub async fn find_usable(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> AuthResult<Option<PasswordResetToken>> {
        sqlx::query_as::<_, PasswordResetToken>(
            "SELECT * FROM password_reset_tokens \
             WHERE user_id = $1 AND token = $2 AND NOT is_used AND expires_at > NOW()",
        )
        .bind(user_id)
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::with_source(ErrorKind::Database, "Failed to find reset token", e))
    }

    /// Mark a token as consumed.
    pub async fn mark_used(&self, id: Uuid) -> AuthResult<()> {
        sqlx::query("UPDATE password_reset_tokens SET is_used = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AuthError::with_source(ErrorKind::Database, "Failed to mark reset token used", e)
            })?;
        Ok(())
    }
}

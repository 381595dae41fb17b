//! User repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use keygate_core::error::{AuthError, ErrorKind};
use keygate_core::result::AuthResult;
use keygate_entity::user::model::CreateUser;
use keygate_entity::user::User;

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email. Emails are compared exactly as stored.
    pub async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AuthError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Check whether a user with the given email exists.
    pub async fn email_exists(&self, email: &str) -> AuthResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AuthError::with_source(ErrorKind::Database, "Failed to check email existence", e)
            })
    }

    /// Insert a new user and return the created row.
    ///
    /// A concurrent insert with the same email is caught by the unique index
    /// and surfaces as `DuplicateEmail`; the application-level existence
    /// check alone is not race-safe.
    pub async fn create(&self, user: &CreateUser) -> AuthResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users \
               (id, first_name, last_name, email, password_hash, phone_number, role, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, NOW(), NOW()) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone_number)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AuthError::duplicate_email("This email address is already in use")
            }
            _ => AuthError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Replace a user's password hash and bump the update timestamp.
    pub async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> AuthResult<()> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AuthError::with_source(ErrorKind::Database, "Failed to update password hash", e)
            })?;
        Ok(())
    }

    /// Record a successful login time.
    pub async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> AuthResult<()> {
        sqlx::query("UPDATE users SET last_login_at = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AuthError::with_source(ErrorKind::Database, "Failed to update last login", e)
            })?;
        Ok(())
    }
}

//! Authentication coordinator — the single entry point for the register,
//! login, logout, validate, and password-reset flows.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use keygate_core::config::jwt::JwtConfig;
use keygate_core::config::reset::ResetConfig;
use keygate_core::error::AuthError;
use keygate_core::result::AuthResult;
use keygate_entity::session::CreateSession;
use keygate_entity::user::{CreateUser, User, UserInfo, UserRole};

use crate::jwt::JwtEncoder;
use crate::password::{CredentialHasher, PasswordPolicy};
use crate::store::{ResetTokenStore, SessionStore, UserStore};

/// Registration input. Role strings are parsed into [`UserRole`] before this
/// struct is built; unrecognized roles never reach the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Password confirmation.
    pub confirm_password: String,
    /// Requested role.
    pub role: UserRole,
    /// Phone number (optional).
    pub phone_number: Option<String>,
    /// Client IP, recorded on the created session (audit only).
    pub ip_address: Option<String>,
    /// Client User-Agent, recorded on the created session (audit only).
    pub user_agent: Option<String>,
}

/// Login input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Client IP (audit only).
    pub ip_address: Option<String>,
    /// Client User-Agent (audit only).
    pub user_agent: Option<String>,
}

/// Password-reset input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    /// Email address of the account.
    pub email: String,
    /// Reset token previously issued by `forgot_password`.
    pub token: String,
    /// New plaintext password.
    pub new_password: String,
    /// New password confirmation.
    pub confirm_password: String,
}

/// Successful login or registration payload.
///
/// Carries the public user projection only; the password hash never leaves
/// the store layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The issued bearer token.
    pub token: String,
    /// Absolute token/session expiry.
    pub expires_at: DateTime<Utc>,
    /// Public projection of the authenticated user.
    pub user: UserInfo,
}

/// Orchestrates stores, hasher, and token codec into the five public
/// authentication operations.
///
/// Each operation is a short-lived unit of work; the coordinator holds no
/// mutable state beyond its configuration, so concurrent invocations are
/// independent.
#[derive(Clone)]
pub struct AuthCoordinator {
    /// User persistence.
    users: Arc<dyn UserStore>,
    /// Session persistence.
    sessions: Arc<dyn SessionStore>,
    /// Reset-token persistence.
    reset_tokens: Arc<dyn ResetTokenStore>,
    /// Password hasher.
    hasher: CredentialHasher,
    /// Password strength policy.
    policy: PasswordPolicy,
    /// Token encoder.
    encoder: JwtEncoder,
    /// Reset token TTL in minutes.
    reset_ttl_minutes: i64,
}

impl std::fmt::Debug for AuthCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthCoordinator")
            .field("encoder", &self.encoder)
            .field("reset_ttl_minutes", &self.reset_ttl_minutes)
            .finish()
    }
}

impl AuthCoordinator {
    /// Creates a new coordinator with the given stores and configuration.
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        reset_tokens: Arc<dyn ResetTokenStore>,
        jwt_config: &JwtConfig,
        reset_config: &ResetConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            reset_tokens,
            hasher: CredentialHasher::new(),
            policy: PasswordPolicy::new(),
            encoder: JwtEncoder::new(jwt_config),
            reset_ttl_minutes: reset_config.token_ttl_minutes as i64,
        }
    }

    /// Registers a new user and immediately logs them in.
    ///
    /// The success path reuses [`login`](Self::login) wholesale, so token and
    /// session creation exist in exactly one place.
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<AuthResponse> {
        if !self.policy.is_valid(&request.password) {
            return Err(AuthError::weak_password(self.policy.requirements()));
        }

        if request.password != request.confirm_password {
            return Err(AuthError::password_mismatch(
                "Password and confirmation do not match",
            ));
        }

        // The unique index remains the hard guarantee; this check only
        // produces a friendlier failure for the common case.
        if self.users.email_exists(&request.email).await? {
            return Err(AuthError::duplicate_email(
                "This email address is already in use",
            ));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let user = self
            .users
            .create(CreateUser {
                first_name: request.first_name,
                last_name: request.last_name,
                email: request.email.clone(),
                password_hash,
                phone_number: request.phone_number,
                role: request.role,
            })
            .await?;

        info!(user_id = %user.id, "User registered");

        self.login(LoginRequest {
            email: request.email,
            password: request.password,
            ip_address: request.ip_address,
            user_agent: request.user_agent,
        })
        .await
    }

    /// Authenticates a user and opens a new session.
    ///
    /// Missing user, inactive user, and wrong password all fail with the
    /// same `InvalidCredentials` error so the response does not reveal
    /// whether the account exists. Concurrent logins for one user each get
    /// an independent session.
    pub async fn login(&self, request: LoginRequest) -> AuthResult<AuthResponse> {
        let user = match self.users.find_by_email(&request.email).await? {
            Some(user) if user.is_active => user,
            _ => return Err(AuthError::invalid_credentials()),
        };

        if !self.hasher.verify(&request.password, &user.password_hash) {
            warn!(user_id = %user.id, "Login failed: password mismatch");
            return Err(AuthError::invalid_credentials());
        }

        let (token, expires_at) = self.issue_token(&user)?;

        self.sessions
            .create(CreateSession {
                user_id: user.id,
                token: token.clone(),
                expires_at,
                ip_address: request.ip_address,
                user_agent: request.user_agent,
            })
            .await?;

        // Audit metadata only; a failure here must not fail the login.
        let _ = self.users.update_last_login(user.id, Utc::now()).await;

        info!(user_id = %user.id, "Login successful");

        Ok(AuthResponse {
            token,
            expires_at,
            user: user.to_info(),
        })
    }

    /// Revokes the session behind a bearer token.
    ///
    /// Idempotent: unknown tokens and already-inactive sessions are treated
    /// as "already logged out" and succeed silently.
    pub async fn logout(&self, token: &str) -> AuthResult<()> {
        if let Some(session) = self.sessions.find_by_token(token).await? {
            self.sessions.deactivate(session.id).await?;
            info!(session_id = %session.id, "Session deactivated");
        }
        Ok(())
    }

    /// Checks whether a bearer token is currently authorized.
    ///
    /// The session row is the source of truth for revocation: the token is
    /// valid iff its session exists, is active, and has not expired. The
    /// signed token itself is only the transport artifact here, so logout
    /// takes effect before the embedded expiry.
    pub async fn validate_token(&self, token: &str) -> AuthResult<bool> {
        let session = self.sessions.find_by_token(token).await?;
        Ok(session.is_some_and(|s| s.is_valid()))
    }

    /// Issues a reset token for the given account.
    ///
    /// The token is persisted with a TTL and returned directly to the
    /// caller; no email is sent. Unknown emails fail with `UserNotFound`,
    /// which reveals account existence — a documented weakness kept for
    /// behavioral compatibility.
    pub async fn forgot_password(&self, email: &str) -> AuthResult<String> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::user_not_found("No account is registered with this email"))?;

        let token = Self::generate_reset_token();
        let expires_at = Utc::now() + Duration::minutes(self.reset_ttl_minutes);

        self.reset_tokens
            .create(user.id, &token, expires_at)
            .await?;

        info!(user_id = %user.id, "Password reset token issued");
        Ok(token)
    }

    /// Sets a new password after validating the reset token.
    ///
    /// The token must match an unused, unexpired token issued for this
    /// account and is consumed on success. All of the user's active
    /// sessions are revoked afterwards, so a stolen session does not
    /// survive a password change.
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> AuthResult<()> {
        if !self.policy.is_valid(&request.new_password) {
            return Err(AuthError::weak_password(self.policy.requirements()));
        }

        if request.new_password != request.confirm_password {
            return Err(AuthError::password_mismatch(
                "Password and confirmation do not match",
            ));
        }

        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AuthError::user_not_found("No account is registered with this email"))?;

        if request.token.is_empty() {
            return Err(AuthError::invalid_token("Reset token is required"));
        }

        let reset_token = self
            .reset_tokens
            .find_usable(user.id, &request.token)
            .await?
            .ok_or_else(|| AuthError::invalid_token("Reset token is invalid or has expired"))?;

        let new_hash = self.hasher.hash(&request.new_password)?;
        self.users.update_password_hash(user.id, &new_hash).await?;
        self.reset_tokens.mark_used(reset_token.id).await?;

        let revoked = self.sessions.deactivate_all_for_user(user.id).await?;
        info!(user_id = %user.id, revoked_sessions = revoked, "Password reset completed");

        Ok(())
    }

    /// Lower-level primitive: issues a signed token for a user without
    /// touching the session store.
    pub fn issue_token(&self, user: &User) -> AuthResult<(String, DateTime<Utc>)> {
        self.encoder.issue(user)
    }

    /// Lower-level primitive: generates an opaque 16-character hex reset
    /// token.
    pub fn generate_reset_token() -> String {
        Uuid::new_v4().simple().to_string()[..16].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_reset_token_shape() {
        let token = AuthCoordinator::generate_reset_token();
        assert_eq!(token.len(), 16);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_tokens_are_unique() {
        let a = AuthCoordinator::generate_reset_token();
        let b = AuthCoordinator::generate_reset_token();
        assert_ne!(a, b);
    }
}

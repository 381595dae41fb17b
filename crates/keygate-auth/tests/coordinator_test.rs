//! Integration tests for the authentication flows, driven through
//! `AuthCoordinator` against the in-memory stores.

use std::sync::Arc;

use keygate_auth::jwt::JwtDecoder;
use keygate_auth::{AuthCoordinator, LoginRequest, RegisterRequest, ResetPasswordRequest};
use keygate_auth::store::{MemoryResetTokenStore, MemorySessionStore, MemoryUserStore};
use keygate_core::config::jwt::JwtConfig;
use keygate_core::config::reset::ResetConfig;
use keygate_core::error::ErrorKind;
use keygate_entity::user::UserRole;

const PASSWORD: &str = "Sup3r-Secret!";

/// Everything a test needs: the coordinator plus direct handles on the
/// concrete stores backing it.
struct TestAuth {
    coordinator: AuthCoordinator,
    users: Arc<MemoryUserStore>,
    jwt_config: JwtConfig,
}

impl TestAuth {
    fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let users = Arc::new(MemoryUserStore::new());
        let sessions = Arc::new(MemorySessionStore::new());
        let reset_tokens = Arc::new(MemoryResetTokenStore::new());

        let jwt_config = JwtConfig {
            secret: "integration-test-secret-32-bytes!!!!".to_string(),
            issuer: "keygate-test".to_string(),
            audience: "keygate-test-clients".to_string(),
            expiration_minutes: 60,
        };

        let coordinator = AuthCoordinator::new(
            users.clone(),
            sessions,
            reset_tokens,
            &jwt_config,
            &ResetConfig::default(),
        );

        Self {
            coordinator,
            users,
            jwt_config,
        }
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            password: PASSWORD.to_string(),
            confirm_password: PASSWORD.to_string(),
            role: UserRole::User,
            phone_number: None,
            ip_address: Some("127.0.0.1".to_string()),
            user_agent: Some("tests".to_string()),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            ip_address: None,
            user_agent: None,
        }
    }
}

#[tokio::test]
async fn test_register_then_login_round_trip() {
    let app = TestAuth::new();

    let registered = app
        .coordinator
        .register(TestAuth::register_request("ada@example.com"))
        .await
        .unwrap();
    assert_eq!(registered.user.email, "ada@example.com");

    let login = app
        .coordinator
        .login(TestAuth::login_request("ada@example.com", PASSWORD))
        .await
        .unwrap();
    assert!(app.coordinator.validate_token(&login.token).await.unwrap());
}

#[tokio::test]
async fn test_register_weak_password_rejected() {
    let app = TestAuth::new();

    let mut request = TestAuth::register_request("weak@example.com");
    request.password = "abcdefgh".to_string();
    request.confirm_password = "abcdefgh".to_string();

    let err = app.coordinator.register(request).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::WeakPassword);
}

#[tokio::test]
async fn test_register_password_mismatch_rejected() {
    let app = TestAuth::new();

    let mut request = TestAuth::register_request("mismatch@example.com");
    request.confirm_password = "Different-Pass1!".to_string();

    let err = app.coordinator.register(request).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::PasswordMismatch);
}

#[tokio::test]
async fn test_register_duplicate_email_adds_no_user() {
    let app = TestAuth::new();

    app.coordinator
        .register(TestAuth::register_request("dup@example.com"))
        .await
        .unwrap();

    let err = app
        .coordinator
        .register(TestAuth::register_request("dup@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateEmail);

    // The original account is untouched and still logs in.
    app.coordinator
        .login(TestAuth::login_request("dup@example.com", PASSWORD))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestAuth::new();
    app.coordinator
        .register(TestAuth::register_request("real@example.com"))
        .await
        .unwrap();

    let wrong_password = app
        .coordinator
        .login(TestAuth::login_request("real@example.com", "Wrong-Pass1!"))
        .await
        .unwrap_err();
    let no_such_user = app
        .coordinator
        .login(TestAuth::login_request("ghost@example.com", PASSWORD))
        .await
        .unwrap_err();

    assert_eq!(wrong_password.kind, ErrorKind::InvalidCredentials);
    assert_eq!(no_such_user.kind, ErrorKind::InvalidCredentials);
    assert_eq!(wrong_password.message, no_such_user.message);
}

#[tokio::test]
async fn test_inactive_user_cannot_login() {
    let app = TestAuth::new();
    let registered = app
        .coordinator
        .register(TestAuth::register_request("inactive@example.com"))
        .await
        .unwrap();

    app.users.set_active(registered.user.id, false).await;

    let err = app
        .coordinator
        .login(TestAuth::login_request("inactive@example.com", PASSWORD))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidCredentials);
}

#[tokio::test]
async fn test_logout_revokes_before_embedded_expiry() {
    let app = TestAuth::new();
    let response = app
        .coordinator
        .register(TestAuth::register_request("logout@example.com"))
        .await
        .unwrap();

    assert!(app
        .coordinator
        .validate_token(&response.token)
        .await
        .unwrap());

    app.coordinator.logout(&response.token).await.unwrap();

    // The signed token is still within its embedded expiry, but the
    // session row is authoritative.
    let claims = JwtDecoder::new(&app.jwt_config)
        .verify(&response.token)
        .unwrap();
    assert!(!claims.is_expired());
    assert!(!app
        .coordinator
        .validate_token(&response.token)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let app = TestAuth::new();
    let response = app
        .coordinator
        .register(TestAuth::register_request("twice@example.com"))
        .await
        .unwrap();

    app.coordinator.logout(&response.token).await.unwrap();
    app.coordinator.logout(&response.token).await.unwrap();
    app.coordinator.logout("unknown-token").await.unwrap();
}

#[tokio::test]
async fn test_validate_unknown_token_is_false() {
    let app = TestAuth::new();
    assert!(!app.coordinator.validate_token("never-issued").await.unwrap());
}

#[tokio::test]
async fn test_concurrent_logins_produce_independent_sessions() {
    let app = TestAuth::new();
    app.coordinator
        .register(TestAuth::register_request("parallel@example.com"))
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        app.coordinator
            .login(TestAuth::login_request("parallel@example.com", PASSWORD)),
        app.coordinator
            .login(TestAuth::login_request("parallel@example.com", PASSWORD)),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_ne!(a.token, b.token);
    assert!(app.coordinator.validate_token(&a.token).await.unwrap());
    assert!(app.coordinator.validate_token(&b.token).await.unwrap());

    // Revoking one leaves the other valid.
    app.coordinator.logout(&a.token).await.unwrap();
    assert!(!app.coordinator.validate_token(&a.token).await.unwrap());
    assert!(app.coordinator.validate_token(&b.token).await.unwrap());
}

#[tokio::test]
async fn test_forgot_password_unknown_email() {
    let app = TestAuth::new();
    let err = app
        .coordinator
        .forgot_password("nobody@example.com")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UserNotFound);
}

#[tokio::test]
async fn test_full_password_reset_flow() {
    let app = TestAuth::new();
    app.coordinator
        .register(TestAuth::register_request("reset@example.com"))
        .await
        .unwrap();

    let reset_token = app
        .coordinator
        .forgot_password("reset@example.com")
        .await
        .unwrap();
    assert_eq!(reset_token.len(), 16);

    app.coordinator
        .reset_password(ResetPasswordRequest {
            email: "reset@example.com".to_string(),
            token: reset_token,
            new_password: "Brand-New-Pass2!".to_string(),
            confirm_password: "Brand-New-Pass2!".to_string(),
        })
        .await
        .unwrap();

    // Old password no longer works; new one does.
    let err = app
        .coordinator
        .login(TestAuth::login_request("reset@example.com", PASSWORD))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidCredentials);

    app.coordinator
        .login(TestAuth::login_request(
            "reset@example.com",
            "Brand-New-Pass2!",
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_reset_weak_password_leaves_hash_unchanged() {
    let app = TestAuth::new();
    app.coordinator
        .register(TestAuth::register_request("weakreset@example.com"))
        .await
        .unwrap();

    let reset_token = app
        .coordinator
        .forgot_password("weakreset@example.com")
        .await
        .unwrap();

    let err = app
        .coordinator
        .reset_password(ResetPasswordRequest {
            email: "weakreset@example.com".to_string(),
            token: reset_token,
            new_password: "weak".to_string(),
            confirm_password: "weak".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::WeakPassword);

    // The stored hash is untouched: the old password still logs in.
    app.coordinator
        .login(TestAuth::login_request("weakreset@example.com", PASSWORD))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_reset_rejects_empty_and_unknown_tokens() {
    let app = TestAuth::new();
    app.coordinator
        .register(TestAuth::register_request("badtoken@example.com"))
        .await
        .unwrap();

    let empty = app
        .coordinator
        .reset_password(ResetPasswordRequest {
            email: "badtoken@example.com".to_string(),
            token: String::new(),
            new_password: "Brand-New-Pass2!".to_string(),
            confirm_password: "Brand-New-Pass2!".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(empty.kind, ErrorKind::InvalidToken);

    let unknown = app
        .coordinator
        .reset_password(ResetPasswordRequest {
            email: "badtoken@example.com".to_string(),
            token: "0123456789abcdef".to_string(),
            new_password: "Brand-New-Pass2!".to_string(),
            confirm_password: "Brand-New-Pass2!".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(unknown.kind, ErrorKind::InvalidToken);
}

#[tokio::test]
async fn test_reset_token_is_single_use() {
    let app = TestAuth::new();
    app.coordinator
        .register(TestAuth::register_request("once@example.com"))
        .await
        .unwrap();

    let reset_token = app
        .coordinator
        .forgot_password("once@example.com")
        .await
        .unwrap();

    let request = ResetPasswordRequest {
        email: "once@example.com".to_string(),
        token: reset_token,
        new_password: "Brand-New-Pass2!".to_string(),
        confirm_password: "Brand-New-Pass2!".to_string(),
    };

    app.coordinator.reset_password(request.clone()).await.unwrap();

    let err = app.coordinator.reset_password(request).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);
}

#[tokio::test]
async fn test_reset_revokes_existing_sessions() {
    let app = TestAuth::new();
    let response = app
        .coordinator
        .register(TestAuth::register_request("revoke@example.com"))
        .await
        .unwrap();
    assert!(app
        .coordinator
        .validate_token(&response.token)
        .await
        .unwrap());

    let reset_token = app
        .coordinator
        .forgot_password("revoke@example.com")
        .await
        .unwrap();
    app.coordinator
        .reset_password(ResetPasswordRequest {
            email: "revoke@example.com".to_string(),
            token: reset_token,
            new_password: "Brand-New-Pass2!".to_string(),
            confirm_password: "Brand-New-Pass2!".to_string(),
        })
        .await
        .unwrap();

    assert!(!app
        .coordinator
        .validate_token(&response.token)
        .await
        .unwrap());
}

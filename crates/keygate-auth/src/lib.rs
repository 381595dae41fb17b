//! # keygate-auth
//!
//! The authentication core for Keygate: password policy and hashing, JWT
//! issuance and validation, session lifecycle tracking, password-reset
//! tokens, and the coordinator that ties them into the public operations.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and strength policy
//! - `jwt` — JWT token creation and validation
//! - `store` — User/session/reset-token store traits with Postgres and
//!   in-memory implementations
//! - `coordinator` — register, login, logout, validate, reset orchestration

pub mod coordinator;
pub mod jwt;
pub mod password;
pub mod store;

pub use coordinator::{
    AuthCoordinator, AuthResponse, LoginRequest, RegisterRequest, ResetPasswordRequest,
};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{CredentialHasher, PasswordPolicy};
pub use store::{ResetTokenStore, SessionStore, UserStore};

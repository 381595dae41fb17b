//! Password-reset token domain entities.

pub mod model;

pub use model::PasswordResetToken;

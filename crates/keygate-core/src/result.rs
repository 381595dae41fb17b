//! Convenience result type alias for Keygate.

use crate::error::AuthError;

/// A specialized `Result` type for Keygate operations.
///
/// This is defined as a convenience so that every crate does not need to
/// write `Result<T, AuthError>` explicitly.
pub type AuthResult<T> = Result<T, AuthError>;

//! # keygate-core
//!
//! Core crate for Keygate. Contains configuration schemas and the unified
//! error system shared by every other crate.
//!
//! This crate has **no** internal dependencies on other Keygate crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AuthError;
pub use result::AuthResult;

//! Password hashing and strength policy.

pub mod hasher;
pub mod policy;

pub use hasher::CredentialHasher;
pub use policy::PasswordPolicy;

//! # keygate-database
//!
//! PostgreSQL connection management and concrete repository implementations
//! for the Keygate entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;

//! User domain entities.

pub mod model;
pub mod role;

pub use model::{CreateUser, User, UserInfo};
pub use role::UserRole;

//! Concrete repository implementations.

pub mod reset;
pub mod session;
pub mod user;

pub use reset::ResetTokenRepository;
pub use session::SessionRepository;
pub use user::UserRepository;

//! Domain layer - Core business entities
//!
//! Models that represent business concepts independent of
//! infrastructure concerns.

pub mod password;
pub mod user;

pub use password::Password;
pub use user::{CreatedUser, PasswordChanged, User, UserId, UserResponse};

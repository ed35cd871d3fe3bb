//! Application services layer - Use cases and business logic.
//!
//! Services depend on the repository trait, never on a concrete store,
//! so any implementation can be injected.

mod user_service;

pub use user_service::{UserManager, UserService};

//! User API - user management REST endpoints
//!
//! List, fetch, create, update and delete users, and change passwords,
//! over an injected user store.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: User entity, response bodies, password hashing
//! - **services**: The rules behind each endpoint
//! - **infra**: Database, migrations and the SeaORM user store
//! - **api**: HTTP handlers, extractors and routes
//! - **errors**: Tagged errors and their HTTP translation
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{Password, User};
pub use errors::{AppError, AppResult};
pub use infra::{UserRepository, UserStore};
pub use services::{UserManager, UserService};

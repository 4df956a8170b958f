//! # Rollcall Config
//!
//! Configuration types for the Rollcall API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`server`]: bind address for the HTTP listener
//! - [`database`]: Postgres connection settings
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! # Example
//!
//! ```ignore
//! use rollcall_config::{CorsConfig, DatabaseConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env()?;
//! let database = DatabaseConfig::from_env()?;
//! let cors = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Reads a boolean flag, treating `false` and `0` as off.
pub(crate) fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v.to_lowercase() != "false" && v != "0")
        .unwrap_or(default)
}

//! Shared errors, configuration, and token handling for QRKot.
//!
//! This crate provides common pieces used by the api and binary crates:
//! - Application-wide error types
//! - Configuration management
//! - JWT bearer token claims and validation

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};

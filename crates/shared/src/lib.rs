//! Shared types, errors, and configuration for Kontor.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management and role routing
//! - JWT claims for the acting-user role context

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::{AppConfig, RoleRouting};
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};

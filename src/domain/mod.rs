//! Domain layer - Pure business abstractions
//!
//! Entities as the rest of the application sees them, repository traits and
//! domain error types. No Axum here.

pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::*;

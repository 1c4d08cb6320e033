//! # Quill Core
//!
//! The domain layer of the Quill posts API.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

#[cfg(feature = "factory")]
pub mod factory;

pub use error::DomainError;
pub use validation::FieldErrors;

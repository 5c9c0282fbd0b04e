//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the content entities, the entity managers that enforce their write-time
//! rules, and the ports infrastructure must implement.

pub mod domain;
pub mod error;
pub mod manager;
pub mod ports;

pub use error::DomainError;

//! # Quill Shared
//!
//! Wire types shared between the admin server and its clients.
//! Kept free of domain and infrastructure dependencies so it can be compiled
//! for WASM front-ends as well.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse, ListResponse};

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Typed Rust HTTP client for the Contentful Content Management API
//!
//! Maps spaces, environments, entries, assets, and content types to typed
//! resources, handles bearer authentication and collection pagination, and
//! classifies every non-2xx response into a [`cma_core::ApiError`] with a
//! multi-line diagnostic message.

mod client;
pub mod error;
pub mod types;

pub use client::CmaClient;
pub use cma_core::{ApiError, ErrorKind};
pub use error::{CmaClientError, Result};
pub use types::*;

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Transport-free error classification for the Contentful Content Management API
//!
//! Turns a failed HTTP response (status code, headers, body) into an
//! [`ApiError`] carrying a multi-line diagnostic message. Classification is a
//! pure function of the response and never fails itself: malformed or absent
//! error bodies degrade to a status-level default message.

mod compose;
mod error;
mod kind;
mod response;

pub use compose::compose;
pub use error::{ApiError, classify};
pub use kind::ErrorKind;
pub use response::{ErrorResponse, RATE_LIMIT_RESET_HEADER};

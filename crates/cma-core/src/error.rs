use thiserror::Error;

use crate::compose::compose;
use crate::kind::ErrorKind;
use crate::response::ErrorResponse;

/// A classified API error
///
/// Built exactly once per failed call and never mutated. `message` is the
/// composed multi-line diagnostic; `kind` is for programmatic branching
/// (e.g. retry-later on [`ErrorKind::RateLimitExceeded`] using
/// `reset_time`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status code of the failed response
    pub status_code: u16,
    /// Which variant the status mapped to
    pub kind: ErrorKind,
    /// Multi-line human-readable diagnostic, never empty
    pub message: String,
    /// Seconds until the rate limit resets, rate-limit variant only
    pub reset_time: Option<u64>,
}

/// Classify a failed response into an [`ApiError`]
///
/// Never fails: unparseable bodies and unexpected detail shapes degrade to
/// the status-level default message, so callers always receive a
/// descriptive error rather than a secondary parse failure masking the
/// original one.
pub fn classify(response: &ErrorResponse) -> ApiError {
    let kind = ErrorKind::from_status(response.status);

    let reset_time = if kind == ErrorKind::RateLimitExceeded {
        response.rate_limit_reset()
    } else {
        None
    };

    ApiError {
        status_code: response.status,
        kind,
        message: compose(response, kind),
        reset_time,
    }
}

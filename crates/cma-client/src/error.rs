use cma_core::ApiError;

/// Client-specific result type
pub type Result<T> = std::result::Result<T, CmaClientError>;

/// Errors from the management client
#[derive(Debug, thiserror::Error)]
pub enum CmaClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error response, classified by status code
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A success response carried a body we could not decode
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CmaClientError {
    /// The classified API error, when this is an API failure
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }
}

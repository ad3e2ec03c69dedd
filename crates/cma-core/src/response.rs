use http::HeaderMap;

/// Header carrying the seconds until the rate limit resets
pub const RATE_LIMIT_RESET_HEADER: &str = "x-contentful-ratelimit-reset";

/// A failed HTTP response, decoupled from any transport
///
/// The client layer drains whatever response type its HTTP stack produces
/// into this shape before classification. Header lookup is case-insensitive
/// by construction of [`HeaderMap`].
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body text
    pub body: String,
}

impl ErrorResponse {
    /// Build from the parts of a drained response
    pub const fn new(status: u16, headers: HeaderMap, body: String) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Attempt to parse the body as JSON
    ///
    /// Parse failure is an ordinary value here; callers decide how to
    /// degrade when the body is absent or malformed.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Look up a header value as text
    ///
    /// Returns `None` for absent headers and for values that are not valid
    /// visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Seconds until the rate limit resets, when the server sent them
    ///
    /// A non-integral header value is treated as absent.
    pub fn rate_limit_reset(&self) -> Option<u64> {
        self.header(RATE_LIMIT_RESET_HEADER)?.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    fn response_with_reset(value: &'static str) -> ErrorResponse {
        let mut headers = HeaderMap::new();
        headers.insert(RATE_LIMIT_RESET_HEADER, HeaderValue::from_static(value));
        ErrorResponse::new(429, headers, String::new())
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Contentful-RateLimit-Reset",
            HeaderValue::from_static("12"),
        );
        let response = ErrorResponse::new(429, headers, String::new());

        assert_eq!(response.header(RATE_LIMIT_RESET_HEADER), Some("12"));
        assert_eq!(response.rate_limit_reset(), Some(12));
    }

    #[test]
    fn empty_body_is_a_parse_failure() {
        let response = ErrorResponse::new(500, HeaderMap::new(), String::new());
        assert!(response.json().is_err());
    }

    #[test]
    fn non_integral_reset_header_is_absent() {
        assert_eq!(response_with_reset("soon").rate_limit_reset(), None);
    }

    #[test]
    fn missing_reset_header_is_absent() {
        let response = ErrorResponse::new(429, HeaderMap::new(), String::new());
        assert_eq!(response.rate_limit_reset(), None);
    }
}

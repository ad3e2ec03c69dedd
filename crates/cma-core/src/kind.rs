use serde_json::Value;

use crate::response::ErrorResponse;

/// Error variant keyed by HTTP status code
///
/// Each variant customizes the default message, the rendering of the
/// semi-structured `details` payload, and any extra diagnostic lines. The
/// per-variant formatters are total: an unexpected payload shape falls back
/// to stringifying the whole value rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    AccessDenied,
    /// 404
    NotFound,
    /// 409
    VersionMismatch,
    /// 422
    UnprocessableEntity,
    /// 429
    RateLimitExceeded,
    /// 500
    Server,
    /// 502
    BadGateway,
    /// 503
    ServiceUnavailable,
    /// Any other status code
    Generic,
}

impl ErrorKind {
    /// Select the variant for a status code
    ///
    /// Unknown codes map to [`Self::Generic`], including success codes
    /// handed in by mistake.
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::AccessDenied,
            404 => Self::NotFound,
            409 => Self::VersionMismatch,
            422 => Self::UnprocessableEntity,
            429 => Self::RateLimitExceeded,
            500 => Self::Server,
            502 => Self::BadGateway,
            503 => Self::ServiceUnavailable,
            _ => Self::Generic,
        }
    }

    /// Message used when the body carries none of its own
    pub fn default_message(self, response: &ErrorResponse) -> String {
        match self {
            Self::BadRequest => {
                "The request was malformed or missing a required parameter.".to_owned()
            }
            Self::Unauthorized => "The authorization token was invalid.".to_owned(),
            Self::AccessDenied => {
                "The specified token does not have access to the requested resource.".to_owned()
            }
            Self::NotFound => {
                "The requested resource or endpoint could not be found.".to_owned()
            }
            Self::VersionMismatch => "Version mismatch error. The version you specified was \
                                      incorrect. This may be due to someone else editing the \
                                      content."
                .to_owned(),
            Self::UnprocessableEntity => "The resource you sent in the body is invalid.".to_owned(),
            Self::RateLimitExceeded => "Rate limit exceeded. Too many requests.".to_owned(),
            Self::Server => "Internal server error.".to_owned(),
            Self::BadGateway => "The requested space is hibernated.".to_owned(),
            // The API documents 503 with the same wording as 400. Kept
            // verbatim so consumers matching on message text keep working.
            Self::ServiceUnavailable => {
                "The request was malformed or missing a required parameter.".to_owned()
            }
            Self::Generic => {
                format!("The following error was received: {}", response.body)
            }
        }
    }

    /// Render the `details` payload of an error body
    pub fn format_details(self, details: &Value) -> String {
        match self {
            Self::BadRequest => format_bad_request(details),
            Self::AccessDenied => format_access_denied(details),
            Self::NotFound => format_not_found(details),
            Self::UnprocessableEntity => format_unprocessable(details),
            _ => stringify(details),
        }
    }

    /// Extra diagnostic lines derived from the response itself
    ///
    /// Independent of whether the body parsed; currently only the
    /// rate-limit variant contributes anything.
    pub fn extra_info(self, response: &ErrorResponse) -> Vec<String> {
        if self == Self::RateLimitExceeded
            && let Some(reset) = response.rate_limit_reset()
        {
            return vec![format!("Time until reset (seconds): {reset}")];
        }
        Vec::new()
    }
}

/// Render a JSON value as bare text, strings without surrounding quotes
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// 400 details: a plain string, or a list of per-parameter problems
fn format_bad_request(details: &Value) -> String {
    if let Some(text) = details.as_str() {
        return text.to_owned();
    }

    if let Some(errors) = details.get("errors").and_then(Value::as_array) {
        let inner: Vec<String> = errors.iter().filter_map(bad_request_entry).collect();
        return inner.join("\n\t");
    }

    stringify(details)
}

/// A single 400 error entry: strings pass through, objects contribute their
/// `details` sub-field, anything else is skipped
fn bad_request_entry(entry: &Value) -> Option<String> {
    if let Some(text) = entry.as_str() {
        return Some(text.to_owned());
    }

    entry
        .get("details")
        .filter(|detail| !detail.is_null())
        .map(stringify)
}

/// 403 details: an indented list of denial reasons
fn format_access_denied(details: &Value) -> String {
    match details.get("reasons").and_then(Value::as_array) {
        Some(reasons) => {
            let joined = reasons
                .iter()
                .map(stringify)
                .collect::<Vec<_>>()
                .join("\n\t\t");
            format!("\n\tReasons:\n\t\t{joined}")
        }
        None => stringify(details),
    }
}

/// 404 details: the missing resource's type and, when known, its id
fn format_not_found(details: &Value) -> String {
    if let Some(text) = details.as_str() {
        return text.to_owned();
    }

    let Some(resource_type) = details.get("type") else {
        return stringify(details);
    };

    let mut message = format!("The requested {} could not be found.", stringify(resource_type));
    if let Some(id) = details.get("id").filter(|id| !id.is_null()) {
        message.push_str(&format!(" ID: {}.", stringify(id)));
    }

    message
}

/// 422 details: one line per validation error
fn format_unprocessable(details: &Value) -> String {
    let Some(errors) = details.get("errors").and_then(Value::as_array) else {
        return stringify(details);
    };

    let lines: Vec<String> = errors.iter().map(unprocessable_line).collect();
    format!("\n{}", lines.join("\n"))
}

fn unprocessable_line(entry: &Value) -> String {
    let mut line = match (entry.get("name"), entry.get("path")) {
        (Some(name), Some(path)) => {
            format!("\t* Name: {} - Path: '{}'", stringify(name), stringify(path))
        }
        _ => "The resource you sent in the body is invalid.".to_owned(),
    };

    if let Some(value) = entry.get("value") {
        line.push_str(&format!(" - Value: '{}'", stringify(value)));
    }

    line
}

use serde_json::Value;

use crate::kind::ErrorKind;
use crate::response::ErrorResponse;

/// Assemble the multi-line diagnostic message for a failed response
///
/// Line order is fixed: status code, message, details, request id, then any
/// variant-specific extras. When the body is not valid JSON only the status
/// and default-message lines appear; the extras are derived from headers and
/// are appended either way.
pub fn compose(response: &ErrorResponse, kind: ErrorKind) -> String {
    let mut lines = vec![format!("HTTP status code: {}", response.status)];

    match response.json() {
        Ok(body) => {
            match body.get("message").and_then(Value::as_str) {
                Some(message) => lines.push(format!("Message: {message}")),
                None => lines.push(format!("Message: {}", kind.default_message(response))),
            }

            if let Some(details) = body.get("details").filter(|details| !details.is_null()) {
                lines.push(format!("Details: {}", kind.format_details(details)));
            }

            if let Some(request_id) = body.get("requestId").filter(|id| !id.is_null()) {
                lines.push(format!("Request ID: {}", crate::kind::stringify(request_id)));
            }
        }
        Err(_) => lines.push(format!("Message: {}", kind.default_message(response))),
    }

    lines.extend(kind.extra_info(response));
    lines.join("\n")
}

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Error payload returned by the service on a non-success status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    /// Extra diagnostics some failures carry. Logged, never displayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Failure of a single request to the forecasting service.
///
/// `Display` yields the bare message; views prefix it with `Error: `.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// The request never produced a response (no connectivity, DNS, CORS...).
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// A success body that could not be decoded.
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl RequestError {
    /// Builds a service error from a non-success response.
    ///
    /// The message is the first usable of: the `error` field of a structured
    /// body, the transport's status text, the raw body, the numeric status.
    pub fn from_response(status: u16, status_text: &str, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) if !parsed.error.trim().is_empty() => {
                if let Some(details) = &parsed.details {
                    debug!(status, details = %details, "Service error details");
                }
                parsed.error
            }
            _ if !status_text.trim().is_empty() => status_text.to_string(),
            _ if !body.trim().is_empty() => body.trim().to_string(),
            _ => format!("HTTP error: {}", status),
        };

        warn!(status, message = %message, "Service returned an error");
        RequestError::Service { status, message }
    }

    /// The text shown to the user, without the `Error: ` prefix.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status for service errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_error_body_wins() {
        let err = RequestError::from_response(500, "Internal Server Error", r#"{"error":"model failed"}"#);
        assert_eq!(err.message(), "model failed");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_details_are_not_part_of_message() {
        let body = r#"{"error":"Model training/loading failed","details":"out of memory"}"#;
        let err = RequestError::from_response(500, "Internal Server Error", body);
        assert_eq!(err.message(), "Model training/loading failed");
    }

    #[test]
    fn test_falls_back_to_status_text() {
        let err = RequestError::from_response(502, "Bad Gateway", "<html>proxy error</html>");
        assert_eq!(err.message(), "Bad Gateway");
    }

    #[test]
    fn test_empty_error_field_falls_back_to_status_text() {
        let err = RequestError::from_response(400, "Bad Request", r#"{"error":""}"#);
        assert_eq!(err.message(), "Bad Request");
    }

    #[test]
    fn test_falls_back_to_raw_body() {
        let err = RequestError::from_response(500, "", "upstream exploded\n");
        assert_eq!(err.message(), "upstream exploded");
    }

    #[test]
    fn test_last_resort_is_status_code() {
        let err = RequestError::from_response(503, "", "");
        assert_eq!(err.message(), "HTTP error: 503");
    }

    #[test]
    fn test_transport_message_is_verbatim() {
        let err = RequestError::Transport("network down".to_string());
        assert_eq!(err.to_string(), "network down");
        assert_eq!(err.status(), None);
    }
}

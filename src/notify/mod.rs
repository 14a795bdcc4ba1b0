//! Mapping from API errors to user-facing notices.
//!
//! The presentation layer decides how a notice is shown; this module only
//! decides what it says. Status-coded titles, server-supplied messages when
//! present, aggregated field errors for validation failures, and a debug
//! payload that is attached only in development builds.

use crate::api::ApiError;

/// A user-facing error notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    /// Extra detail: validation breakdown, or (dev only) the raw exchange.
    pub details: Option<String>,
}

impl Notice {
    /// Build the notice for `error`. `dev` attaches the technical payload
    /// (request target, status, raw response) when no other detail exists.
    pub fn from_api_error(error: &ApiError, dev: bool) -> Self {
        match error {
            ApiError::Http {
                status,
                method,
                url,
                body,
            } => {
                let server_message = error.server_message().map(str::to_string);
                let (title, message) = match *status {
                    400 => (
                        "Invalid Request".to_string(),
                        server_message.unwrap_or_else(|| "The request was invalid".to_string()),
                    ),
                    401 => (
                        "Authentication Required".to_string(),
                        "Please log in to continue".to_string(),
                    ),
                    403 => (
                        "Access Denied".to_string(),
                        "You do not have permission to perform this action".to_string(),
                    ),
                    404 => (
                        "Not Found".to_string(),
                        server_message
                            .unwrap_or_else(|| "The requested resource was not found".to_string()),
                    ),
                    422 => (
                        "Validation Error".to_string(),
                        server_message
                            .unwrap_or_else(|| "Please check your input and try again".to_string()),
                    ),
                    429 => (
                        "Too Many Requests".to_string(),
                        "Please wait a moment before trying again".to_string(),
                    ),
                    500 => (
                        "Server Error".to_string(),
                        "A server error occurred. Please try again later".to_string(),
                    ),
                    _ => (
                        format!("Error {status}"),
                        server_message.unwrap_or_else(|| format!("HTTP {status} error occurred")),
                    ),
                };

                let mut details = validation_details(error);
                if dev && details.is_none() {
                    details = Some(format!(
                        "{method} {url}\nStatus: {status}\nResponse: {}",
                        serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
                    ));
                }

                Self {
                    title,
                    message,
                    details,
                }
            }

            ApiError::Network(source) => {
                let details = if dev {
                    let url = source
                        .url()
                        .map(|u| u.to_string())
                        .unwrap_or_else(|| "<unknown>".to_string());
                    Some(format!("Network request failed\nURL: {url}"))
                } else {
                    None
                };
                Self {
                    title: "Network Error".to_string(),
                    message:
                        "Unable to connect to the server. Please check your internet connection"
                            .to_string(),
                    details,
                }
            }

            ApiError::Request(_) | ApiError::Decode(_) => Self {
                title: "Application Error".to_string(),
                message: "An unexpected error occurred".to_string(),
                details: dev.then(|| error.to_string()),
            },
        }
    }
}

/// Aggregate 422 field errors as `field: msg, msg` lines, one per field.
fn validation_details(error: &ApiError) -> Option<String> {
    let errors = error.validation_errors()?;
    if errors.is_empty() {
        return None;
    }
    let lines: Vec<String> = errors
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect();
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn http_error(status: u16, body: Value) -> ApiError {
        ApiError::Http {
            status,
            method: "GET".to_string(),
            url: "http://localhost:8000/api/equipment".to_string(),
            body,
        }
    }

    #[test]
    fn test_status_coded_titles() {
        let cases = [
            (400, "Invalid Request"),
            (401, "Authentication Required"),
            (403, "Access Denied"),
            (404, "Not Found"),
            (422, "Validation Error"),
            (429, "Too Many Requests"),
            (500, "Server Error"),
        ];
        for (status, title) in cases {
            let notice = Notice::from_api_error(&http_error(status, Value::Null), false);
            assert_eq!(notice.title, title, "status {status}");
        }

        let other = Notice::from_api_error(&http_error(503, Value::Null), false);
        assert_eq!(other.title, "Error 503");
        assert_eq!(other.message, "HTTP 503 error occurred");
    }

    #[test]
    fn test_server_message_preferred() {
        let notice = Notice::from_api_error(
            &http_error(404, json!({"message": "No such equipment"})),
            false,
        );
        assert_eq!(notice.message, "No such equipment");
    }

    #[test]
    fn test_validation_details_aggregated() {
        let error = http_error(
            422,
            json!({
                "message": "The given data was invalid.",
                "errors": {
                    "name": ["required", "too short"],
                    "email": ["must be valid"]
                }
            }),
        );

        let notice = Notice::from_api_error(&error, false);
        // Fields come out sorted; messages joined with ", " per field,
        // fields joined with newlines.
        assert_eq!(
            notice.details.as_deref(),
            Some("email: must be valid\nname: required, too short")
        );
    }

    #[test]
    fn test_dev_details_attached_only_in_dev() {
        let error = http_error(500, json!({"message": "boom"}));

        let prod = Notice::from_api_error(&error, false);
        assert_eq!(prod.details, None);

        let dev = Notice::from_api_error(&error, true);
        let details = dev.details.unwrap();
        assert!(details.contains("GET http://localhost:8000/api/equipment"));
        assert!(details.contains("Status: 500"));
        assert!(details.contains("boom"));
    }

    #[test]
    fn test_validation_details_win_over_dev_payload() {
        let error = http_error(422, json!({"errors": {"name": ["required"]}}));
        let notice = Notice::from_api_error(&error, true);
        assert_eq!(notice.details.as_deref(), Some("name: required"));
    }
}

//! API error taxonomy.
//!
//! Four failure shapes, matching what callers need to distinguish:
//! construction failures never left the client, network failures got no
//! response, HTTP failures carry the server's status and body, decode
//! failures got a success status with an unreadable body.
//!
//! Validation errors (422) and auth errors (401) are HTTP failures with
//! extra meaning; helpers below expose them without extra variants.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be built; nothing was sent.
    #[error("request construction failed: {0}")]
    Request(String),

    /// No response reached us (connectivity, DNS, timeout).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server responded with a failure status.
    #[error("HTTP {status} from {method} {url}")]
    Http {
        status: u16,
        method: String,
        url: String,
        body: Value,
    },

    /// The server responded with success but the body did not decode.
    #[error("response decode failed: {0}")]
    Decode(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            Self::Request(error.to_string())
        } else if error.is_decode() {
            Self::Decode(error)
        } else {
            Self::Network(error)
        }
    }
}

impl ApiError {
    /// Server status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is a rejected-credentials response (session was cleared).
    pub fn is_auth(&self) -> bool {
        self.status() == Some(401)
    }

    /// Whether this is a field-validation failure.
    pub fn is_validation(&self) -> bool {
        self.status() == Some(422)
    }

    /// Human-readable message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } => body.get("message").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Field-level validation messages from a 422 body
    /// (`{"errors": {"field": ["msg", ...]}}`), keyed by field.
    pub fn validation_errors(&self) -> Option<BTreeMap<String, Vec<String>>> {
        if !self.is_validation() {
            return None;
        }
        let Self::Http { body, .. } = self else {
            return None;
        };
        let errors = body.get("errors")?.as_object()?;

        let mut by_field = BTreeMap::new();
        for (field, messages) in errors {
            let messages: Vec<String> = match messages {
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                Value::String(single) => vec![single.clone()],
                _ => Vec::new(),
            };
            if !messages.is_empty() {
                by_field.insert(field.clone(), messages);
            }
        }
        Some(by_field)
    }
}

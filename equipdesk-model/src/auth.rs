//! Login response payload.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Response body of `POST /auth/login`.
///
/// `token_expires_at` is kept as the raw backend string; clients store it
/// verbatim and parse it when checking session validity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,

    /// Token expiry timestamp (RFC 3339)
    pub token_expires_at: String,

    /// The authenticated user
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_round_trip() {
        let response = LoginResponse {
            token: "tok-123".to_string(),
            token_expires_at: "2030-01-01T00:00:00Z".to_string(),
            user: User {
                id: 1,
                name: "Admin".to_string(),
                email: "admin@example.com".to_string(),
                role: Some("admin".to_string()),
            },
        };

        let json = serde_json::to_string(&response).unwrap();
        let deserialized: LoginResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(response, deserialized);
    }
}

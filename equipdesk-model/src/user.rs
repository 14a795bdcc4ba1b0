//! User records as returned by the backend.

use serde::{Deserialize, Serialize};

/// A user account.
///
/// Appears both as a top-level record (user management, login response)
/// and nested inside assignments and movement requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Backend identifier
    pub id: u64,

    /// Display name
    pub name: String,

    /// Login email
    pub email: String,

    /// Role label (e.g., "admin"), when the endpoint includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

//! Movement (transfer) requests and their status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::equipment::Equipment;
use crate::user::User;

/// A request to move or transfer a piece of equipment.
///
/// Requests are created elsewhere (by the requesting user); the console only
/// lists pending ones and transitions them via approve/deny.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovementRequest {
    /// Backend identifier
    pub id: u64,

    /// The equipment the request is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Equipment>,

    /// Who filed the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<User>,

    /// Current lifecycle status
    #[serde(default)]
    pub status: RequestStatus,

    /// Requester-supplied justification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// When the request was filed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request status lifecycle: pending -> approved | denied.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Denied => write!(f, "denied"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&RequestStatus::Denied).unwrap(),
            "\"denied\""
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(RequestStatus::Pending.to_string(), "pending");
        assert_eq!(RequestStatus::Approved.to_string(), "approved");
    }

    #[test]
    fn test_request_defaults_to_pending() {
        let request: MovementRequest = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
        assert!(request.equipment.is_none());
    }

    #[test]
    fn test_request_round_trip() {
        let request = MovementRequest {
            id: 12,
            equipment: None,
            requested_by: Some(User {
                id: 4,
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
                role: None,
            }),
            status: RequestStatus::Pending,
            reason: Some("Team change".to_string()),
            created_at: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        let deserialized: MovementRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, deserialized);
    }
}

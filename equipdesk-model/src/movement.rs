//! Movement history entries (the recent-activity feed).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::equipment::Equipment;
use crate::user::User;

/// One completed movement of a piece of equipment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movement {
    /// Backend identifier
    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Equipment>,

    /// Previous holder, absent when the item came out of storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_user: Option<User>,

    /// New holder, absent when the item went back to storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_user: Option<User>,

    /// Movement kind label (e.g., "assignment", "transfer", "return")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_sparse_payload() {
        let movement: Movement =
            serde_json::from_str(r#"{"id": 99, "movement_type": "return"}"#).unwrap();
        assert_eq!(movement.id, 99);
        assert_eq!(movement.movement_type.as_deref(), Some("return"));
        assert!(movement.from_user.is_none());
    }
}

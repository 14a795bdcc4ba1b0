//! Equipment, assignment, and availability types.
//!
//! Availability is a tri-state classification derived from the optional
//! `current_assignment` on each item. It drives both the dashboard stats
//! tally and the available-equipment filter, so both go through the single
//! classifier here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::User;

/// A piece of tracked equipment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Equipment {
    /// Backend identifier
    pub id: u64,

    /// Display name (e.g., "ThinkPad X1 #42")
    pub name: String,

    /// Manufacturer serial number, when recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    /// Category label (e.g., "laptop", "monitor")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Current assignment, if any. Absent means the item sits unassigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_assignment: Option<Assignment>,
}

/// An equipment assignment record.
///
/// An assignment with no `user` means the item is booked to a location
/// (warehouse, storage shelf) rather than a person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    /// Backend identifier of the assignment itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// The assignee. `None` = reserved/in-warehouse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    /// Free-form location label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// When the assignment was made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<DateTime<Utc>>,
}

/// Tri-state availability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    /// No assignment at all
    Available,
    /// Assignment present but no assignee (reserved / in-warehouse)
    Reserved,
    /// Assignment present with an assignee
    Assigned,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Reserved => write!(f, "reserved"),
            Self::Assigned => write!(f, "assigned"),
        }
    }
}

impl Equipment {
    /// Classify this item by its assignment state.
    pub fn availability(&self) -> Availability {
        match &self.current_assignment {
            None => Availability::Available,
            Some(assignment) if assignment.user.is_none() => Availability::Reserved,
            Some(_) => Availability::Assigned,
        }
    }

    /// Whether the item counts as available for new assignment.
    ///
    /// Reserved items (assignment without assignee) count as available;
    /// only items assigned to a person do not.
    pub fn is_available(&self) -> bool {
        self.availability() != Availability::Assigned
    }
}

/// Aggregate equipment counts shown on the dashboard.
///
/// `available + assigned` always equals the number of classified items.
/// `pending` is sourced from the movement-request queue, not from equipment,
/// so [`EquipmentStats::tally`] leaves it at zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EquipmentStats {
    /// Items with no assignee (unassigned or reserved)
    pub available: usize,

    /// Items assigned to a person
    pub assigned: usize,

    /// Pending movement requests (filled in from the request queue)
    pub pending: usize,
}

impl EquipmentStats {
    /// Count availability over a full equipment collection.
    pub fn tally(items: &[Equipment]) -> Self {
        let mut stats = Self::default();
        for item in items {
            if item.is_available() {
                stats.available += 1;
            } else {
                stats.assigned += 1;
            }
        }
        stats
    }

    /// Total number of classified items.
    pub fn total(&self) -> usize {
        self.available + self.assigned
    }
}

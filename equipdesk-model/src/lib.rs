//! Shared wire types for the EquipDesk equipment API.
//!
//! This crate defines the payloads that cross the boundary between the
//! EquipDesk backend and its clients:
//! - the console core (`equipdesk`) - the primary consumer
//! - any other tooling that speaks the same REST API
//!
//! # Modules
//! - [`equipment`] - Equipment, assignments, and availability classification
//! - [`request`] - Movement (transfer) requests and their status lifecycle
//! - [`movement`] - Movement history entries
//! - [`user`] - User records
//! - [`auth`] - Login response payload
//! - [`envelope`] - The `{ "data": [...] }` collection envelope

pub mod auth;
pub mod envelope;
pub mod equipment;
pub mod movement;
pub mod request;
pub mod user;

// Re-export commonly used types at crate root
pub use auth::LoginResponse;
pub use envelope::ListEnvelope;
pub use equipment::{Assignment, Availability, Equipment, EquipmentStats};
pub use movement::Movement;
pub use request::{MovementRequest, RequestStatus};
pub use user::User;

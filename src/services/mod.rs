//! Domain service layer: one async call per backend endpoint.

pub mod auth;
pub mod dashboard;

pub use auth::AuthService;
pub use dashboard::{DashboardApi, HttpDashboardApi, RECENT_ACTIVITY_LIMIT};

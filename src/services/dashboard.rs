//! Dashboard service layer.
//!
//! Fetch functions for the four dashboard data categories plus the
//! approve/deny actions. The aggregation store consumes these through the
//! [`DashboardApi`] trait so tests can substitute doubles.

use async_trait::async_trait;
use equipdesk_model::{Equipment, EquipmentStats, ListEnvelope, Movement, MovementRequest};
use serde_json::{json, Value};

use crate::api::{ApiClient, ApiError};

/// Fixed cap for the recent-activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// The dashboard's view of the backend.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Aggregate equipment counts. `pending` is left at zero; it belongs to
    /// the request queue.
    async fn equipment_stats(&self) -> Result<EquipmentStats, ApiError>;

    /// Movement requests, server-side filtered to pending only.
    async fn movement_requests(&self) -> Result<Vec<MovementRequest>, ApiError>;

    /// Equipment currently available for assignment.
    async fn available_equipment(&self) -> Result<Vec<Equipment>, ApiError>;

    /// The most recent movements, capped at [`RECENT_ACTIVITY_LIMIT`].
    async fn recent_activity(&self) -> Result<Vec<Movement>, ApiError>;

    async fn approve_request(&self, id: u64) -> Result<(), ApiError>;

    async fn deny_request(&self, id: u64, reason: &str) -> Result<(), ApiError>;
}

/// HTTP implementation backed by [`ApiClient`].
pub struct HttpDashboardApi {
    api: ApiClient,
}

impl HttpDashboardApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Raw `/admin/dashboard` summary payload.
    pub async fn dashboard_summary(&self) -> Result<Value, ApiError> {
        self.api.get("/admin/dashboard").await
    }

    async fn all_equipment(&self) -> Result<Vec<Equipment>, ApiError> {
        let envelope: ListEnvelope<Equipment> = self.api.get("/equipment").await?;
        Ok(envelope.into_inner())
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn equipment_stats(&self) -> Result<EquipmentStats, ApiError> {
        // Full fetch and O(n) classification on every call; the fleet is
        // small enough that incremental counting isn't worth carrying.
        let equipment = self.all_equipment().await?;
        Ok(EquipmentStats::tally(&equipment))
    }

    async fn movement_requests(&self) -> Result<Vec<MovementRequest>, ApiError> {
        let envelope: ListEnvelope<MovementRequest> =
            self.api.get("/requests?status=pending").await?;
        Ok(envelope.into_inner())
    }

    async fn available_equipment(&self) -> Result<Vec<Equipment>, ApiError> {
        // Same classifier as the stats tally, so the two can never disagree.
        let equipment = self.all_equipment().await?;
        Ok(equipment
            .into_iter()
            .filter(Equipment::is_available)
            .collect())
    }

    async fn recent_activity(&self) -> Result<Vec<Movement>, ApiError> {
        let envelope: ListEnvelope<Movement> = self
            .api
            .get(&format!("/movements?limit={RECENT_ACTIVITY_LIMIT}"))
            .await?;
        Ok(envelope.into_inner())
    }

    async fn approve_request(&self, id: u64) -> Result<(), ApiError> {
        self.api
            .put_unit(&format!("/requests/{id}/approve"), None)
            .await
    }

    async fn deny_request(&self, id: u64, reason: &str) -> Result<(), ApiError> {
        self.api
            .put_unit(
                &format!("/requests/{id}/deny"),
                Some(json!({ "reason": reason })),
            )
            .await
    }
}

//! Dashboard aggregation store.
//!
//! Owns the four dashboard collections and their per-category load state.
//! [`DashboardStore::load_dashboard_data`] runs all four loads concurrently;
//! a category that fails records its error and leaves the others alone, so
//! the dashboard renders partial data instead of failing wholesale.
//!
//! Approve/deny propagate their errors to the caller, unlike the bulk
//! loads: the user took an explicit action and expects a definite outcome.

use std::sync::Arc;

use equipdesk_model::{Equipment, EquipmentStats, Movement, MovementRequest};
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::api::ApiError;
use crate::services::dashboard::DashboardApi;

/// The four independently tracked load categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Stats,
    Requests,
    Equipment,
    Activity,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stats => write!(f, "stats"),
            Self::Requests => write!(f, "requests"),
            Self::Equipment => write!(f, "equipment"),
            Self::Activity => write!(f, "activity"),
        }
    }
}

/// Per-category load state: idle -> loading -> loaded | error, re-entrant.
#[derive(Debug, Clone, Default)]
pub struct LoadState {
    pub in_flight: bool,
    pub error: Option<String>,
    /// Bumped on every load start; a finished load whose generation no
    /// longer matches is stale and gets discarded.
    generation: u64,
}

#[derive(Default)]
struct CategoryLoads {
    stats: LoadState,
    requests: LoadState,
    equipment: LoadState,
    activity: LoadState,
}

impl CategoryLoads {
    fn get(&self, category: Category) -> &LoadState {
        match category {
            Category::Stats => &self.stats,
            Category::Requests => &self.requests,
            Category::Equipment => &self.equipment,
            Category::Activity => &self.activity,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut LoadState {
        match category {
            Category::Stats => &mut self.stats,
            Category::Requests => &mut self.requests,
            Category::Equipment => &mut self.equipment,
            Category::Activity => &mut self.activity,
        }
    }

    fn any_in_flight(&self) -> bool {
        self.stats.in_flight
            || self.requests.in_flight
            || self.equipment.in_flight
            || self.activity.in_flight
    }
}

#[derive(Default)]
struct DashboardState {
    stats: EquipmentStats,
    pending_requests: Vec<MovementRequest>,
    available_equipment: Vec<Equipment>,
    recent_activity: Vec<Movement>,
    loads: CategoryLoads,
}

/// Aggregated dashboard state over an injected service layer.
///
/// Constructed once and shared; clones see the same state.
#[derive(Clone)]
pub struct DashboardStore {
    api: Arc<dyn DashboardApi>,
    state: Arc<RwLock<DashboardState>>,
}

impl DashboardStore {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(DashboardState::default())),
        }
    }

    /// Load all four categories concurrently and wait for every one to
    /// settle. Never fails: per-category errors are recorded and logged.
    pub async fn load_dashboard_data(&self) {
        tokio::join!(
            self.load_stats(),
            self.load_movement_requests(),
            self.load_available_equipment(),
            self.load_recent_activity(),
        );
    }

    /// Alias kept for callers that think in terms of refreshing.
    pub async fn refresh(&self) {
        self.load_dashboard_data().await;
    }

    pub async fn load_stats(&self) {
        let generation = self.begin(Category::Stats).await;
        let result = self.api.equipment_stats().await;
        self.finish(Category::Stats, generation, result, |state, stats| {
            state.stats = stats;
        })
        .await;
    }

    pub async fn load_movement_requests(&self) {
        let generation = self.begin(Category::Requests).await;
        let result = self.api.movement_requests().await;
        self.finish(Category::Requests, generation, result, |state, requests| {
            state.pending_requests = requests;
        })
        .await;
    }

    pub async fn load_available_equipment(&self) {
        let generation = self.begin(Category::Equipment).await;
        let result = self.api.available_equipment().await;
        self.finish(Category::Equipment, generation, result, |state, equipment| {
            state.available_equipment = equipment;
        })
        .await;
    }

    pub async fn load_recent_activity(&self) {
        let generation = self.begin(Category::Activity).await;
        let result = self.api.recent_activity().await;
        self.finish(Category::Activity, generation, result, |state, movements| {
            state.recent_activity = movements;
        })
        .await;
    }

    /// Approve a pending request.
    ///
    /// On success the request leaves the local pending collection
    /// immediately, then stats, equipment, and activity are re-loaded to
    /// pick up the downstream effects. The pending collection itself is not
    /// re-fetched. Failure leaves everything untouched and propagates.
    pub async fn approve_request(&self, id: u64) -> Result<(), ApiError> {
        if let Err(e) = self.api.approve_request(id).await {
            error!(request_id = id, error = %e, "failed to approve movement request");
            return Err(e);
        }

        self.remove_pending(id).await;
        tokio::join!(
            self.load_stats(),
            self.load_available_equipment(),
            self.load_recent_activity(),
        );
        Ok(())
    }

    /// Deny a pending request. Optimistic removal on success, no re-fetch;
    /// failure leaves the pending collection untouched and propagates.
    pub async fn deny_request(&self, id: u64, reason: &str) -> Result<(), ApiError> {
        if let Err(e) = self.api.deny_request(id, reason).await {
            error!(request_id = id, error = %e, "failed to deny movement request");
            return Err(e);
        }

        self.remove_pending(id).await;
        Ok(())
    }

    async fn remove_pending(&self, id: u64) {
        let mut state = self.state.write().await;
        state.pending_requests.retain(|request| request.id != id);
    }

    /// Mark a load started: in-flight on, error cleared, generation bumped.
    async fn begin(&self, category: Category) -> u64 {
        let mut state = self.state.write().await;
        let load = state.loads.get_mut(category);
        load.in_flight = true;
        load.error = None;
        load.generation += 1;
        load.generation
    }

    /// Apply a finished load, unless a newer load of the same category has
    /// started since. Stale results are discarded without touching the
    /// newer load's flags.
    async fn finish<T>(
        &self,
        category: Category,
        generation: u64,
        result: Result<T, ApiError>,
        apply: impl FnOnce(&mut DashboardState, T),
    ) {
        let mut state = self.state.write().await;
        if state.loads.get(category).generation != generation {
            debug!(category = %category, "discarding stale load result");
            return;
        }

        match result {
            Ok(value) => {
                apply(&mut state, value);
                state.loads.get_mut(category).in_flight = false;
            }
            Err(e) => {
                error!(category = %category, error = %e, "dashboard load failed");
                let load = state.loads.get_mut(category);
                load.in_flight = false;
                load.error = Some(e.to_string());
            }
        }
    }

    /// Current stats, with `pending` filled from the in-memory request
    /// queue rather than re-queried.
    pub async fn stats(&self) -> EquipmentStats {
        let state = self.state.read().await;
        EquipmentStats {
            pending: state.pending_requests.len(),
            ..state.stats
        }
    }

    pub async fn pending_requests(&self) -> Vec<MovementRequest> {
        self.state.read().await.pending_requests.clone()
    }

    pub async fn available_equipment(&self) -> Vec<Equipment> {
        self.state.read().await.available_equipment.clone()
    }

    pub async fn recent_activity(&self) -> Vec<Movement> {
        self.state.read().await.recent_activity.clone()
    }

    /// Pending-request count for the navigation badge.
    pub async fn pending_count(&self) -> usize {
        self.state.read().await.pending_requests.len()
    }

    /// Whether any category is currently loading.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loads.any_in_flight()
    }

    pub async fn load_state(&self, category: Category) -> LoadState {
        self.state.read().await.loads.get(category).clone()
    }

    /// Drop every recorded load error.
    pub async fn clear_errors(&self) {
        let mut state = self.state.write().await;
        for category in [
            Category::Stats,
            Category::Requests,
            Category::Equipment,
            Category::Activity,
        ] {
            state.loads.get_mut(category).error = None;
        }
    }
}

//! Route table and pre-navigation authorization guard.
//!
//! Every view transition goes through [`NavigationGuard::before_each`]:
//! unauthenticated users are sent to the login page, authenticated users
//! are kept off it, and successful navigations opportunistically populate
//! the pending-request badge before the view renders.

use tracing::debug;

use crate::session::SessionStore;
use crate::store::{Category, DashboardStore};

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_LANDING_PATH: &str = "/";

/// A route known to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Path pattern; `:param` segments match any value.
    pub path: &'static str,
    pub name: &'static str,
    /// Authentication is the default; only the login page opts out.
    pub requires_auth: bool,
}

/// The full route table. Order matters: literal segments are listed before
/// `:param` patterns that would also match.
pub const ROUTES: &[Route] = &[
    Route {
        path: "/login",
        name: "login",
        requires_auth: false,
    },
    Route {
        path: "/",
        name: "dashboard",
        requires_auth: true,
    },
    Route {
        path: "/assign",
        name: "assign-equipment",
        requires_auth: true,
    },
    Route {
        path: "/equipment",
        name: "equipment-list",
        requires_auth: true,
    },
    Route {
        path: "/equipment/create",
        name: "equipment-create",
        requires_auth: true,
    },
    Route {
        path: "/equipment/:id",
        name: "equipment-detail",
        requires_auth: true,
    },
    Route {
        path: "/equipment/:id/edit",
        name: "equipment-edit",
        requires_auth: true,
    },
    Route {
        path: "/equipment/:id/transfer",
        name: "equipment-transfer",
        requires_auth: true,
    },
    Route {
        path: "/requests",
        name: "requests",
        requires_auth: true,
    },
    Route {
        path: "/movements",
        name: "movements",
        requires_auth: true,
    },
    Route {
        path: "/users",
        name: "users",
        requires_auth: true,
    },
    Route {
        path: "/users/create",
        name: "user-create",
        requires_auth: true,
    },
    Route {
        path: "/users/:id/edit",
        name: "user-edit",
        requires_auth: true,
    },
];

/// Resolve a concrete path against the route table.
pub fn resolve(path: &str) -> Option<&'static Route> {
    ROUTES
        .iter()
        .find(|route| matches_pattern(route.path, path))
}

fn matches_pattern(pattern: &str, path: &str) -> bool {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    pattern_segments.len() == path_segments.len()
        && pattern_segments
            .iter()
            .zip(&path_segments)
            .all(|(pattern_seg, path_seg)| {
                pattern_seg.starts_with(':') || pattern_seg == path_seg
            })
}

/// Outcome of a guarded navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Proceed,
    Redirect(&'static str),
}

pub struct NavigationGuard {
    session: SessionStore,
    store: DashboardStore,
}

impl NavigationGuard {
    pub fn new(session: SessionStore, store: DashboardStore) -> Self {
        Self { session, store }
    }

    /// Resolve and guard a navigation to `path`. Unknown paths redirect to
    /// the default landing page.
    pub async fn navigate(&self, path: &str) -> NavigationOutcome {
        match resolve(path) {
            Some(route) => self.before_each(route).await,
            None => NavigationOutcome::Redirect(DEFAULT_LANDING_PATH),
        }
    }

    /// The pre-navigation decision table, evaluated in order.
    pub async fn before_each(&self, to: &Route) -> NavigationOutcome {
        let authenticated = self.session.is_authenticated();

        if to.requires_auth && !authenticated {
            debug!(route = to.name, "unauthenticated, redirecting to login");
            return NavigationOutcome::Redirect(LOGIN_PATH);
        }

        if to.name == "login" && authenticated {
            debug!("already authenticated, redirecting to dashboard");
            return NavigationOutcome::Redirect(DEFAULT_LANDING_PATH);
        }

        if to.requires_auth && authenticated {
            // Populate the nav badge when nothing is loaded or loading yet.
            // The store records (and logs) a failed load; navigation never
            // blocks on it beyond this single await.
            let needs_badge_data = self.store.pending_count().await == 0
                && !self.store.load_state(Category::Requests).await.in_flight;
            if needs_badge_data {
                debug!(route = to.name, "pre-fetching pending requests for nav badge");
                self.store.load_movement_requests().await;
            }
        }

        NavigationOutcome::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::services::dashboard::DashboardApi;
    use crate::session::MemoryStorage;
    use async_trait::async_trait;
    use equipdesk_model::{
        Equipment, EquipmentStats, LoginResponse, Movement, MovementRequest, RequestStatus, User,
    };
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    /// Minimal service double: scripted pending requests, call counter,
    /// optional failure.
    #[derive(Default)]
    struct BadgeApi {
        requests: Vec<MovementRequest>,
        fail_requests: bool,
        request_calls: Mutex<usize>,
    }

    impl BadgeApi {
        fn request_calls(&self) -> usize {
            *self.request_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl DashboardApi for BadgeApi {
        async fn equipment_stats(&self) -> Result<EquipmentStats, ApiError> {
            Ok(EquipmentStats::default())
        }

        async fn movement_requests(&self) -> Result<Vec<MovementRequest>, ApiError> {
            *self.request_calls.lock().unwrap() += 1;
            if self.fail_requests {
                return Err(ApiError::Http {
                    status: 500,
                    method: "GET".to_string(),
                    url: "http://localhost:8000/api/requests?status=pending".to_string(),
                    body: Value::Null,
                });
            }
            Ok(self.requests.clone())
        }

        async fn available_equipment(&self) -> Result<Vec<Equipment>, ApiError> {
            Ok(Vec::new())
        }

        async fn recent_activity(&self) -> Result<Vec<Movement>, ApiError> {
            Ok(Vec::new())
        }

        async fn approve_request(&self, _id: u64) -> Result<(), ApiError> {
            Ok(())
        }

        async fn deny_request(&self, _id: u64, _reason: &str) -> Result<(), ApiError> {
            Ok(())
        }
    }

    fn request(id: u64) -> MovementRequest {
        MovementRequest {
            id,
            equipment: None,
            requested_by: None,
            status: RequestStatus::Pending,
            reason: None,
            created_at: None,
        }
    }

    fn session() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStorage::new()))
    }

    fn log_in(session: &SessionStore) {
        session.set_session(&LoginResponse {
            token: "tok-1".to_string(),
            token_expires_at: "2030-01-01T00:00:00Z".to_string(),
            user: User {
                id: 1,
                name: "Admin".to_string(),
                email: "admin@example.com".to_string(),
                role: Some("admin".to_string()),
            },
        });
    }

    fn guard_with(api: BadgeApi, session: &SessionStore) -> (NavigationGuard, Arc<BadgeApi>) {
        let api = Arc::new(api);
        let store = DashboardStore::new(api.clone());
        (NavigationGuard::new(session.clone(), store), api)
    }

    #[test]
    fn test_route_resolution() {
        assert_eq!(resolve("/").unwrap().name, "dashboard");
        assert_eq!(resolve("/login").unwrap().name, "login");
        // Literal segment wins over the :id pattern
        assert_eq!(resolve("/equipment/create").unwrap().name, "equipment-create");
        assert_eq!(resolve("/equipment/42").unwrap().name, "equipment-detail");
        assert_eq!(resolve("/equipment/42/edit").unwrap().name, "equipment-edit");
        assert_eq!(resolve("/users/7/edit").unwrap().name, "user-edit");
        assert!(resolve("/no-such-page").is_none());
        assert!(resolve("/equipment/42/destroy").is_none());
    }

    #[tokio::test]
    async fn test_unauthenticated_is_redirected_to_login() {
        let session = session();
        let (guard, api) = guard_with(BadgeApi::default(), &session);

        assert_eq!(
            guard.navigate("/equipment").await,
            NavigationOutcome::Redirect(LOGIN_PATH)
        );
        // No badge pre-fetch for a redirected navigation
        assert_eq!(api.request_calls(), 0);
    }

    #[tokio::test]
    async fn test_unauthenticated_may_visit_login() {
        let session = session();
        let (guard, _api) = guard_with(BadgeApi::default(), &session);

        assert_eq!(
            guard.navigate("/login").await,
            NavigationOutcome::Proceed
        );
    }

    #[tokio::test]
    async fn test_authenticated_login_redirects_to_dashboard() {
        let session = session();
        log_in(&session);
        let (guard, _api) = guard_with(BadgeApi::default(), &session);

        assert!(session.is_authenticated());
        assert_eq!(
            guard.navigate("/login").await,
            NavigationOutcome::Redirect(DEFAULT_LANDING_PATH)
        );
    }

    #[tokio::test]
    async fn test_badge_prefetch_runs_once() {
        let session = session();
        log_in(&session);
        let (guard, api) = guard_with(
            BadgeApi {
                requests: vec![request(1), request(2)],
                ..BadgeApi::default()
            },
            &session,
        );

        assert_eq!(guard.navigate("/").await, NavigationOutcome::Proceed);
        assert_eq!(api.request_calls(), 1);

        // Second navigation finds the badge data already present
        assert_eq!(
            guard.navigate("/equipment").await,
            NavigationOutcome::Proceed
        );
        assert_eq!(api.request_calls(), 1);
    }

    #[tokio::test]
    async fn test_badge_prefetch_failure_never_blocks_navigation() {
        let session = session();
        log_in(&session);
        let (guard, api) = guard_with(
            BadgeApi {
                fail_requests: true,
                ..BadgeApi::default()
            },
            &session,
        );

        assert_eq!(guard.navigate("/movements").await, NavigationOutcome::Proceed);
        assert_eq!(api.request_calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_path_redirects_to_landing() {
        let session = session();
        log_in(&session);
        let (guard, _api) = guard_with(BadgeApi::default(), &session);

        assert_eq!(
            guard.navigate("/no-such-page").await,
            NavigationOutcome::Redirect(DEFAULT_LANDING_PATH)
        );
    }
}

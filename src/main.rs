//! EquipDesk console - headless dashboard client.
//!
//! Restores or establishes a session, runs one guarded navigation to the
//! dashboard, loads all four data categories concurrently, and logs the
//! aggregated result.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use equipdesk::api::ApiClient;
use equipdesk::config;
use equipdesk::guard::{NavigationGuard, NavigationOutcome, DEFAULT_LANDING_PATH};
use equipdesk::notify::Notice;
use equipdesk::services::auth::AuthService;
use equipdesk::services::dashboard::HttpDashboardApi;
use equipdesk::session::{FileStorage, SessionStore};
use equipdesk::store::{Category, DashboardStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "equipdesk=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting EquipDesk console");

    // Load configuration
    let config = config::load_config()?;
    tracing::info!(api_base_url = %config.api_base_url, "Configuration loaded");

    // One session store shared by the HTTP client and the guard
    let session = SessionStore::new(Arc::new(FileStorage::open(
        config::get_config_dir().join("session.json"),
    )));
    let api = ApiClient::new(&config.api_base_url, session.clone())?;
    let auth = AuthService::new(api.clone());
    let dashboard_api = Arc::new(HttpDashboardApi::new(api.clone()));
    let store = DashboardStore::new(dashboard_api.clone());
    let guard = NavigationGuard::new(session.clone(), store.clone());

    if !auth.is_authenticated() {
        match &config.auth {
            Some(credentials) => {
                if let Err(e) = auth.login(&credentials.email, &credentials.password).await {
                    let notice = Notice::from_api_error(&e, config.dev_mode);
                    tracing::error!(title = %notice.title, message = %notice.message, "Login failed");
                    return Err(e.into());
                }
                tracing::info!(email = %credentials.email, "Logged in");
            }
            None => tracing::warn!(
                "No stored session and no credentials configured \
                 (set EQUIPDESK_AUTH__EMAIL and EQUIPDESK_AUTH__PASSWORD)"
            ),
        }
    }

    match guard.navigate(DEFAULT_LANDING_PATH).await {
        NavigationOutcome::Proceed => {}
        NavigationOutcome::Redirect(path) => {
            tracing::warn!(redirect = path, "Navigation redirected, nothing to show");
            return Ok(());
        }
    }

    store.load_dashboard_data().await;

    let stats = store.stats().await;
    tracing::info!(
        available = stats.available,
        assigned = stats.assigned,
        pending = stats.pending,
        "Equipment stats"
    );
    tracing::info!(
        pending_requests = store.pending_count().await,
        recent_movements = store.recent_activity().await.len(),
        available_equipment = store.available_equipment().await.len(),
        "Dashboard loaded"
    );

    for category in [
        Category::Stats,
        Category::Requests,
        Category::Equipment,
        Category::Activity,
    ] {
        if let Some(error) = store.load_state(category).await.error {
            tracing::warn!(category = %category, error = %error, "Category failed to load");
        }
    }

    // Backend-side summary, when the deployment exposes it
    match dashboard_api.dashboard_summary().await {
        Ok(summary) => tracing::debug!(%summary, "Server dashboard summary"),
        Err(e) => tracing::debug!(error = %e, "No server dashboard summary"),
    }

    Ok(())
}

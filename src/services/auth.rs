//! Authentication service: login, logout, current user.

use equipdesk_model::{LoginResponse, User};
use serde_json::json;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError};
use crate::session::SessionStore;

pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn session(&self) -> &SessionStore {
        self.api.session()
    }

    /// Log in and persist the session (token, expiry, user as a unit).
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        info!(email, "logging in");

        let response: LoginResponse = self
            .api
            .post("/auth/login", json!({ "email": email, "password": password }))
            .await?;

        self.session().set_session(&response);
        Ok(response)
    }

    /// Log out. The backend call is best-effort; the local session is
    /// cleared no matter what.
    pub async fn logout(&self) {
        if let Err(e) = self.api.post_unit("/auth/logout", None).await {
            warn!(error = %e, "logout request failed");
        }
        self.session().clear();
    }

    /// Fetch the authenticated user's profile from the backend.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.api.get("/auth/user").await
    }

    /// Session validity, read through the shared session provider.
    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    /// The locally cached user record, if any.
    pub fn user(&self) -> Option<User> {
        self.session().user()
    }
}

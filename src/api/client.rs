//! Thin JSON client over reqwest.
//!
//! Stateless apart from the shared [`SessionStore`]: every request picks up
//! the current bearer token, and any 401 response clears the whole session
//! before the error propagates. Navigation in reaction to a cleared session
//! is the route guard's job, not ours.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::api::error::ApiError;
use crate::session::SessionStore;

/// Fixed per-request timeout; a request that exceeds it fails as a network
/// error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Build a client for `base_url` (e.g., `http://localhost:8000/api`).
    pub fn new(base_url: &str, session: SessionStore) -> Result<Self, ApiError> {
        Url::parse(base_url)
            .map_err(|e| ApiError::Request(format!("invalid API base URL {base_url:?}: {e}")))?;

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    "Failed to build HTTP client with custom config: {}. Using default.",
                    e
                );
                Client::default()
            });

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// The session this client reads tokens from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// GET `path` and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, None).await
    }

    /// POST `body` to `path` and decode the JSON response.
    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, ApiError> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// POST to `path`, ignoring any response payload.
    pub async fn post_unit(&self, path: &str, body: Option<Value>) -> Result<(), ApiError> {
        self.execute(Method::POST, path, body).await.map(|_| ())
    }

    /// PUT to `path`, ignoring any response payload.
    pub async fn put_unit(&self, path: &str, body: Option<Value>) -> Result<(), ApiError> {
        self.execute(Method::PUT, path, body).await.map(|_| ())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let response = self.execute(method, path, body).await?;
        response.json::<T>().await.map_err(ApiError::from)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        debug!(method = %method, url = %url, "API request");

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if status.is_success() {
            debug!(method = %method, url = %url, status = status.as_u16(), "API response");
            return Ok(response);
        }

        // Read the failure body as JSON when possible, raw text otherwise.
        let body = match response.text().await {
            Ok(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
            Err(_) => Value::Null,
        };

        Err(self.error_for_response(&method, &url, status, body))
    }

    /// Turn a failure response into an [`ApiError`], applying the global
    /// session invalidation on 401.
    fn error_for_response(
        &self,
        method: &Method,
        url: &str,
        status: StatusCode,
        body: Value,
    ) -> ApiError {
        if status == StatusCode::UNAUTHORIZED {
            // Token rejected: the whole session is invalid, not just this
            // call. The guard handles the redirect on the next navigation.
            debug!("401 response, clearing stored session");
            self.session.clear();
        }

        ApiError::Http {
            status: status.as_u16(),
            method: method.to_string(),
            url: url.to_string(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStorage;
    use equipdesk_model::{LoginResponse, User};
    use std::sync::Arc;

    fn authenticated_client() -> ApiClient {
        let session = SessionStore::new(Arc::new(MemoryStorage::new()));
        session.set_session(&LoginResponse {
            token: "tok-1".to_string(),
            token_expires_at: "2030-01-01T00:00:00Z".to_string(),
            user: User {
                id: 1,
                name: "Admin".to_string(),
                email: "admin@example.com".to_string(),
                role: None,
            },
        });
        ApiClient::new("http://localhost:8000/api/", session).unwrap()
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let session = SessionStore::new(Arc::new(MemoryStorage::new()));
        assert!(matches!(
            ApiClient::new("not a url", session),
            Err(ApiError::Request(_))
        ));
    }

    #[test]
    fn test_trailing_slash_trimmed_from_base_url() {
        let client = authenticated_client();
        assert_eq!(client.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn test_401_clears_session_globally() {
        let client = authenticated_client();
        assert!(client.session().token().is_some());

        let error = client.error_for_response(
            &Method::GET,
            "http://localhost:8000/api/equipment",
            StatusCode::UNAUTHORIZED,
            Value::Null,
        );

        assert!(error.is_auth());
        // Token, expiry, and user are gone as a unit
        assert!(client.session().token().is_none());
        assert!(client.session().expires_at().is_none());
        assert!(client.session().user().is_none());
    }

    #[test]
    fn test_other_statuses_leave_session_alone() {
        let client = authenticated_client();

        let error = client.error_for_response(
            &Method::PUT,
            "http://localhost:8000/api/requests/5/approve",
            StatusCode::FORBIDDEN,
            Value::Null,
        );

        assert_eq!(error.status(), Some(403));
        assert!(client.session().token().is_some());
    }
}

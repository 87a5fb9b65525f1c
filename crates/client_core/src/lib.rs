//! HTTP client for the auction platform admin API.
//!
//! The console talks to the platform through a small surface: admin login,
//! the user directory (list + status update), and the dashboard overview.
//! Everything network-facing lives here so the GUI crates never touch
//! `reqwest` directly.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::{
    domain::{RegistrationStatus, UserId},
    error::ApiErrorBody,
    protocol::{
        AdminLoginRequest, AdminLoginResponse, AdminProfile, DashboardOverview, ListUsersResponse,
        StatusUpdateAck, UpdateStatusRequest,
    },
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

/// Initial user-directory fetch failed. Blocks the users screen.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct LoadError(pub String);

/// A per-user status save failed. The persisted record is unchanged.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct UpdateError(pub String);

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct AuthError(pub String);

/// The user directory collaborator: the two operations the user-management
/// screen depends on. Implemented by [`AdminApiClient`]; test doubles stand
/// in for it in the GUI crate.
#[async_trait]
pub trait UserDirectoryService: Send + Sync {
    async fn list_users(&self) -> Result<ListUsersResponse, LoadError>;

    async fn update_status(
        &self,
        user_id: &UserId,
        status: RegistrationStatus,
    ) -> Result<StatusUpdateAck, UpdateError>;
}

#[derive(Debug, Default)]
struct AuthState {
    base_url: Option<String>,
    token: Option<String>,
}

pub struct AdminApiClient {
    http: Client,
    auth: Mutex<AuthState>,
}

impl AdminApiClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            http: Client::new(),
            auth: Mutex::new(AuthState::default()),
        })
    }

    /// Point the client at a server without signing in. Used at startup when
    /// a server URL is prefilled, and by tests.
    pub async fn set_base_url(&self, base_url: impl Into<String>) {
        let mut auth = self.auth.lock().await;
        auth.base_url = Some(normalize_base_url(base_url.into()));
        auth.token = None;
    }

    /// `POST /admin/login`. On success the bearer token is retained in
    /// memory for the rest of the session; it is never written to disk.
    pub async fn login(
        &self,
        server_url: &str,
        admin_id: &str,
        password: &str,
    ) -> Result<AdminProfile, AuthError> {
        let base_url = normalize_base_url(server_url.to_string());
        let res = self
            .http
            .post(format!("{base_url}/admin/login"))
            .json(&AdminLoginRequest {
                admin_id: admin_id.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(|err| AuthError(err.to_string()))?;

        if !res.status().is_success() {
            return Err(AuthError(failure_message(res, "Login failed.").await));
        }

        let body: AdminLoginResponse = res
            .json()
            .await
            .map_err(|err| AuthError(format!("malformed login response: {err}")))?;

        let mut auth = self.auth.lock().await;
        auth.base_url = Some(base_url);
        auth.token = Some(body.admin.token.clone());
        debug!(admin_id = %body.admin.admin_id, "admin session established");
        Ok(body.admin)
    }

    pub async fn dashboard_overview(&self) -> Result<DashboardOverview, LoadError> {
        let (url, token) = self.endpoint("/admin/dashboard/overview").await?;
        let mut req = self.http.get(url);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let res = req.send().await.map_err(|err| LoadError(err.to_string()))?;
        if !res.status().is_success() {
            return Err(LoadError(
                failure_message(res, "Failed to load dashboard.").await,
            ));
        }
        res.json()
            .await
            .map_err(|err| LoadError(format!("malformed dashboard response: {err}")))
    }

    async fn endpoint(&self, path: &str) -> Result<(String, Option<String>), LoadError> {
        let auth = self.auth.lock().await;
        let base_url = auth
            .base_url
            .as_ref()
            .ok_or_else(|| LoadError("not connected to a server".to_string()))?;
        Ok((format!("{base_url}{path}"), auth.token.clone()))
    }
}

#[async_trait]
impl UserDirectoryService for AdminApiClient {
    /// `GET /users/list` -> `{ count, users }`.
    async fn list_users(&self) -> Result<ListUsersResponse, LoadError> {
        let (url, token) = self.endpoint("/users/list").await?;
        let mut req = self.http.get(url);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let res = req.send().await.map_err(|err| LoadError(err.to_string()))?;
        if !res.status().is_success() {
            return Err(LoadError(
                failure_message(res, "Failed to load users.").await,
            ));
        }
        res.json()
            .await
            .map_err(|err| LoadError(format!("malformed user list response: {err}")))
    }

    /// `PATCH /users/status/{id}` with `{ "registrationStatus": ... }`.
    async fn update_status(
        &self,
        user_id: &UserId,
        status: RegistrationStatus,
    ) -> Result<StatusUpdateAck, UpdateError> {
        let (url, token) = self
            .endpoint(&format!("/users/status/{user_id}"))
            .await
            .map_err(|LoadError(message)| UpdateError(message))?;
        let mut req = self.http.patch(url).json(&UpdateStatusRequest {
            registration_status: status,
        });
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let res = req
            .send()
            .await
            .map_err(|err| UpdateError(err.to_string()))?;
        let status_code = res.status();
        if !status_code.is_success() {
            return Err(UpdateError(
                failure_message(res, "Failed to update status.").await,
            ));
        }
        if status_code == StatusCode::NO_CONTENT {
            return Ok(StatusUpdateAck::default());
        }
        res.json()
            .await
            .map_err(|err| UpdateError(format!("malformed update response: {err}")))
    }
}

/// Prefer the `message` in the server's error body; fall back to the HTTP
/// status when the body is not the documented shape.
async fn failure_message(res: Response, fallback: &str) -> String {
    let status = res.status();
    match res.json::<ApiErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => format!("{fallback} (HTTP {status})"),
    }
}

fn normalize_base_url(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

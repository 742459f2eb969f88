use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{RouteRequest, RouteResponse},
    error::RouteError,
    protocol::{HealthResponse, RouteErrorBody, RouteRequestBody},
};
use tracing::{info, warn};

use crate::{endpoint, RoutingBackend};

/// Client of the safety-routing backend (`POST /api/route`).
pub struct RouteServiceClient {
    http: Client,
    base_url: String,
}

impl RouteServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RoutingBackend for RouteServiceClient {
    async fn compute_route(&self, request: &RouteRequest) -> Result<RouteResponse, RouteError> {
        let url = endpoint(&self.base_url, "api/route")
            .map_err(|err| RouteError::Transport(format!("invalid routing url: {err}")))?;
        let body = RouteRequestBody::from(request);
        info!(
            start_lat = body.start_lat,
            start_lon = body.start_lon,
            end_lat = body.end_lat,
            end_lon = body.end_lon,
            lambda = body.lambda,
            "route: requesting"
        );

        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|err| RouteError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = RouteErrorBody::message_from(&text);
            warn!(%status, "route: backend rejected request: {message}");
            return Err(RouteError::Service(message));
        }

        response
            .json::<RouteResponse>()
            .await
            .map_err(|err| RouteError::Transport(err.to_string()))
    }

    /// Probes `GET /health`.
    async fn health(&self) -> Result<String> {
        let url = endpoint(&self.base_url, "health")
            .with_context(|| format!("invalid routing url '{}'", self.base_url))?;
        let body: HealthResponse = self
            .http
            .get(url)
            .send()
            .await
            .context("routing backend unreachable")?
            .error_for_status()?
            .json()
            .await
            .context("failed to decode health response")?;
        Ok(body.status)
    }
}

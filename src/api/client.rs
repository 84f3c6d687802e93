use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::{ApiError, MatchBackend};
use crate::monitor::model::MatchSnapshot;

/// HTTP client for the simulation backend's live-match admin endpoints.
#[derive(Clone)]
pub struct AdminApiClient {
    http: Client,
    base_url: String,
    api_token: Option<String>,
}

impl AdminApiClient {
    pub fn new(base_url: &str, api_token: Option<String>, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(AdminApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// POST to an action endpoint and check for an ack.
    async fn post_action(&self, path: &str) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        info!("POST {}", url);

        let resp = self.request(self.http.post(&url)).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        Ok(())
    }
}

#[async_trait]
impl MatchBackend for AdminApiClient {
    fn name(&self) -> &str {
        "admin-api"
    }

    async fn fetch_all(&self) -> Result<Vec<MatchSnapshot>, ApiError> {
        let url = format!("{}/live-match/all", self.base_url);
        debug!("Fetching match snapshots from {}", url);

        let resp = self.request(self.http.get(&url)).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        resp.json::<Vec<MatchSnapshot>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn force_finish(&self, match_id: i64) -> Result<(), ApiError> {
        self.post_action(&format!("/live-match/{}/finish", match_id))
            .await
    }

    async fn reset_match(&self, match_id: i64) -> Result<(), ApiError> {
        self.post_action(&format!("/live-match/{}/reset", match_id))
            .await
    }
}

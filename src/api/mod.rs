pub mod client;

pub use client::AdminApiClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::monitor::model::MatchSnapshot;

/// Errors surfaced by the backend admin API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection failure or request timeout.
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("backend error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Backend answered 2xx but the payload did not parse.
    #[error("malformed backend response: {0}")]
    Decode(String),
}

/// Trait over the simulation backend's admin surface. The HTTP client
/// implements it for production; tests substitute an in-memory fake.
#[async_trait]
pub trait MatchBackend: Send + Sync {
    /// Return the full set of live and recently finished match snapshots.
    /// An empty set is a valid success. Backend ordering is preserved.
    async fn fetch_all(&self) -> Result<Vec<MatchSnapshot>, ApiError>;

    /// Force the given match to finish immediately.
    async fn force_finish(&self, match_id: i64) -> Result<(), ApiError>;

    /// Reset the given match's simulation.
    async fn reset_match(&self, match_id: i64) -> Result<(), ApiError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

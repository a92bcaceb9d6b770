//! Access to the Trello REST API and to the snapshots of its responses kept on disk.

pub mod cache;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

pub const API_ORIGIN: &str = "https://api.trello.com";

/// Pre-issued API key and token pair.
#[derive(Clone)]
pub struct Credentials {
    pub key: String,
    pub token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("token", &"***")
            .finish()
    }
}

/// Raw board API responses. They are kept as [Value] so snapshots store exactly what the
/// service returned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardClient: Send + Sync {
    /// Boards of a member.
    async fn boards(&self, user: &str) -> Result<Value>;

    /// Latest `commentCard` actions of a board, newest first.
    async fn actions(&self, board_id: &str, limit: u32) -> Result<Value>;

    /// Every open card of a board together with its labels.
    async fn cards(&self, board_id: &str) -> Result<Value>;
}

pub struct TrelloClient {
    http: reqwest::Client,
    origin: String,
    credentials: Credentials,
}

impl TrelloClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_origin(credentials, API_ORIGIN)
    }

    pub fn with_origin(credentials: Credentials, origin: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            origin: origin.into(),
            credentials,
        }
    }

    #[instrument(skip(self))]
    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{path}", self.origin);
        debug!("Get url: {url}");
        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.credentials.key.as_str()),
                ("token", self.credentials.token.as_str()),
            ])
            .query(params)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("Request to {url} was rejected"))?;
        response
            .json::<Value>()
            .await
            .with_context(|| format!("Response of {url} is not json"))
    }
}

#[async_trait]
impl BoardClient for TrelloClient {
    async fn boards(&self, user: &str) -> Result<Value> {
        self.get(&format!("/1/members/{user}/boards"), &[]).await
    }

    async fn actions(&self, board_id: &str, limit: u32) -> Result<Value> {
        self.get(
            &format!("/1/boards/{board_id}/actions"),
            &[
                ("limit", limit.to_string()),
                ("filter", "commentCard".to_string()),
            ],
        )
        .await
    }

    async fn cards(&self, board_id: &str) -> Result<Value> {
        self.get(&format!("/1/boards/{board_id}/cards"), &[]).await
    }
}

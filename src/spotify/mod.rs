//! # Spotify Integration Module
//!
//! Thin client over the parts of the Spotify Web API the backend needs.
//!
//! ```text
//! Route handlers / RecommendationEngine
//!          ↓
//! SpotifyClient (Bearer auth, pass-through JSON)
//!     ├── auth      token endpoint: code exchange, refresh, client credentials
//!     ├── features  audio features and recommendations
//!     └── library   playlists, top tracks, recently played, search
//!          ↓
//! Spotify Web API
//! ```
//!
//! Resource responses are returned as raw [`serde_json::Value`] so the
//! handlers can hand them back to the caller verbatim. A non-2xx status
//! becomes [`ApiError::Upstream`]; an empty body becomes
//! [`ApiError::Unavailable`]. Nothing is retried.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - code exchange, refresh, client credentials
//! - `GET /audio-features` - batch audio features (max 100 ids)
//! - `GET /recommendations` - seeded recommendations with `target_*` tuning
//! - `GET /me/playlists`, `GET /playlists/{id}/tracks`
//! - `GET /me/top/tracks`, `GET /me/player/recently-played`
//! - `GET /search`

use std::sync::Arc;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::{config::Config, error::ApiError, management::TokenManager, warning};

pub mod auth;
pub mod features;
pub mod library;

#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Arc<TokenManager>,
}

impl SpotifyClient {
    pub fn new(config: &Config, http: Client, tokens: Arc<TokenManager>) -> Self {
        Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Performs an authenticated GET against `endpoint` (relative to the API
    /// base URL) and returns the decoded JSON body.
    pub async fn get_resource<Q>(&self, endpoint: &str, params: &Q) -> Result<Value, ApiError>
    where
        Q: Serialize + ?Sized,
    {
        let token = self.tokens.get_valid_token().await?;
        let url = format!("{}/{}", self.api_url, endpoint);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warning!("GET {} failed with {}: {}", endpoint, status, body);
            return Err(ApiError::Upstream {
                status,
                endpoint: endpoint.to_string(),
            });
        }

        let json: Value = response.json().await?;
        if is_empty(&json) {
            return Err(ApiError::Unavailable(format!(
                "Spotify returned no data for {endpoint}"
            )));
        }
        Ok(json)
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

use serde_json::Value;

use super::SpotifyClient;
use crate::{error::ApiError, types::RecommendationQuery};

impl SpotifyClient {
    /// Fetches audio features for up to 100 tracks in one request.
    ///
    /// The response keeps Spotify's shape: `{"audio_features": [...]}` with a
    /// `null` entry for every id that has no features.
    pub async fn audio_features(&self, track_ids: &[String]) -> Result<Value, ApiError> {
        self.get_resource("audio-features", &[("ids", track_ids.join(","))])
            .await
    }

    pub async fn recommendations(&self, query: &RecommendationQuery) -> Result<Value, ApiError> {
        self.get_resource("recommendations", &query.to_params()).await
    }
}

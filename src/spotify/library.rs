use serde_json::Value;

use super::SpotifyClient;
use crate::error::ApiError;

const NO_PARAMS: &[(&str, &str)] = &[];

impl SpotifyClient {
    pub async fn user_playlists(&self) -> Result<Value, ApiError> {
        self.get_resource("me/playlists", NO_PARAMS).await
    }

    pub async fn playlist_tracks(&self, playlist_id: &str) -> Result<Value, ApiError> {
        let endpoint = format!("playlists/{playlist_id}/tracks");
        self.get_resource(&endpoint, NO_PARAMS).await
    }

    /// `time_range` is one of `short_term`, `medium_term` or `long_term`;
    /// Spotify rejects anything else.
    pub async fn top_tracks(&self, limit: u32, time_range: &str) -> Result<Value, ApiError> {
        self.get_resource(
            "me/top/tracks",
            &[("limit", limit.to_string()), ("time_range", time_range.to_string())],
        )
        .await
    }

    pub async fn recently_played(&self, limit: u32) -> Result<Value, ApiError> {
        self.get_resource("me/player/recently-played", &[("limit", limit.to_string())])
            .await
    }

    pub async fn search(&self, query: &str, kind: &str, limit: u32) -> Result<Value, ApiError> {
        self.get_resource(
            "search",
            &[
                ("q", query.to_string()),
                ("type", kind.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }
}

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    config::{self, Preset},
    error::ApiError,
    info,
    spotify::SpotifyClient,
    types::{FeatureVector, RecommendationOptions, RecommendationQuery},
    warning,
};

/// Spotify accepts at most this many ids per audio-features request.
pub const FEATURE_BATCH_SIZE: usize = 100;
/// Spotify accepts at most five seeds per recommendation request.
pub const MAX_SEED_TRACKS: usize = 5;
pub const DEFAULT_LIMIT: u32 = 20;

/// Features forwarded to the recommendation endpoint as `target_<name>`.
pub const TARGET_FEATURES: [&str; 8] = [
    "valence",
    "energy",
    "danceability",
    "acousticness",
    "instrumentalness",
    "tempo",
    "loudness",
    "speechiness",
];

/// Averages the numeric fields of a list of audio-feature objects.
///
/// Each key is divided by the number of entries that reported it, not by the
/// number of entries. `null` entries and non-numeric fields (`id`, `uri`,
/// ...) are skipped. Returns `None` when nothing numeric was found.
pub fn mean_features(entries: &[Value]) -> Option<FeatureVector> {
    let mut sums: BTreeMap<String, (f64, u32)> = BTreeMap::new();

    for entry in entries.iter().filter_map(Value::as_object) {
        for (key, value) in entry {
            if let Some(number) = value.as_f64() {
                let slot = sums.entry(key.clone()).or_insert((0.0, 0));
                slot.0 += number;
                slot.1 += 1;
            }
        }
    }

    if sums.is_empty() {
        return None;
    }

    Some(
        sums.into_iter()
            .map(|(key, (sum, count))| (key, sum / count as f64))
            .collect(),
    )
}

/// Overwrites the features named by the mood preset. Features missing from
/// `vector` are not added; unknown moods leave it untouched.
pub fn apply_mood_weights(vector: &mut FeatureVector, mood: &str) {
    match config::mood_preset(mood) {
        Some(preset) => apply_preset(vector, preset),
        None => warning!("Unknown mood '{}', no weights applied", mood),
    }
}

/// Same as [`apply_mood_weights`] for activities. Range values such as a
/// tempo band are applied as their midpoint.
pub fn apply_activity_weights(vector: &mut FeatureVector, activity: &str) {
    match config::activity_preset(activity) {
        Some(preset) => apply_preset(vector, preset),
        None => warning!("Unknown activity '{}', no weights applied", activity),
    }
}

fn apply_preset(vector: &mut FeatureVector, preset: Preset) {
    for (feature, value) in preset {
        if let Some(slot) = vector.get_mut(*feature) {
            *slot = value.target();
        }
    }
}

/// Maps a target vector onto recommendation query parameters.
///
/// Keeps the first [`MAX_SEED_TRACKS`] seeds and only the
/// [`TARGET_FEATURES`] present in `vector`.
pub fn build_recommendation_request(
    vector: &FeatureVector,
    seed_track_ids: &[String],
    limit: u32,
) -> RecommendationQuery {
    let targets = TARGET_FEATURES
        .iter()
        .filter_map(|feature| {
            vector
                .get(*feature)
                .map(|value| (format!("target_{feature}"), *value))
        })
        .collect();

    RecommendationQuery {
        seed_tracks: seed_track_ids
            .iter()
            .take(MAX_SEED_TRACKS)
            .cloned()
            .collect(),
        limit,
        targets,
    }
}

/// Derives recommendations from seed tracks, a playlist or the user's top
/// tracks.
///
/// Any empty or failed upstream step fails the whole request; partial
/// results are never returned.
pub struct RecommendationEngine {
    spotify: SpotifyClient,
}

impl RecommendationEngine {
    pub fn new(spotify: SpotifyClient) -> Self {
        Self { spotify }
    }

    /// Fetches audio features in batches of [`FEATURE_BATCH_SIZE`] and
    /// averages them with [`mean_features`].
    ///
    /// `Ok(None)` means no track reported any feature. A failed batch aborts
    /// the whole aggregation.
    pub async fn average_features(
        &self,
        track_ids: &[String],
    ) -> Result<Option<FeatureVector>, ApiError> {
        if track_ids.is_empty() {
            return Ok(None);
        }

        let mut entries = Vec::with_capacity(track_ids.len());
        for batch in track_ids.chunks(FEATURE_BATCH_SIZE) {
            let response = self.spotify.audio_features(batch).await?;
            let Some(items) = response.get("audio_features").and_then(Value::as_array) else {
                return Err(ApiError::Unavailable(
                    "Audio features missing from Spotify response".to_string(),
                ));
            };
            entries.extend(items.iter().filter(|item| !item.is_null()).cloned());
        }

        Ok(mean_features(&entries))
    }

    pub async fn recommend_for_tracks(
        &self,
        track_ids: &[String],
        options: &RecommendationOptions,
    ) -> Result<Value, ApiError> {
        let Some(mut target) = self.average_features(track_ids).await? else {
            return Err(ApiError::Unavailable(
                "No audio features available for the seed tracks".to_string(),
            ));
        };

        if let Some(mood) = options.mood.as_deref() {
            apply_mood_weights(&mut target, mood);
        }
        if let Some(activity) = options.activity.as_deref() {
            apply_activity_weights(&mut target, activity);
        }
        if let Some(language) = options.language.as_deref() {
            info!("Language filter '{}' is not supported, ignoring", language);
        }

        let query = build_recommendation_request(&target, track_ids, options.limit);
        self.spotify.recommendations(&query).await
    }

    /// Uses the ids of the playlist's tracks as seeds. Removed or local
    /// entries without an id are skipped.
    pub async fn recommend_for_playlist(
        &self,
        playlist_id: &str,
        options: &RecommendationOptions,
    ) -> Result<Value, ApiError> {
        let playlist = self.spotify.playlist_tracks(playlist_id).await?;
        let Some(items) = playlist.get("items").and_then(Value::as_array) else {
            return Err(ApiError::Unavailable(format!(
                "Playlist {playlist_id} has no items"
            )));
        };

        let track_ids: Vec<String> = items
            .iter()
            .filter_map(|item| item.get("track")?.get("id")?.as_str())
            .map(str::to_string)
            .collect();

        self.recommend_for_tracks(&track_ids, options).await
    }

    /// Seeds with the user's five most played tracks.
    pub async fn recommend_for_mood(&self, options: &RecommendationOptions) -> Result<Value, ApiError> {
        let top_tracks = self
            .spotify
            .top_tracks(MAX_SEED_TRACKS as u32, "medium_term")
            .await?;
        let Some(items) = top_tracks.get("items").and_then(Value::as_array) else {
            return Err(ApiError::Unavailable(
                "Top tracks missing from Spotify response".to_string(),
            ));
        };

        let track_ids: Vec<String> = items
            .iter()
            .filter_map(|track| track.get("id")?.as_str())
            .map(str::to_string)
            .collect();

        self.recommend_for_tracks(&track_ids, options).await
    }
}

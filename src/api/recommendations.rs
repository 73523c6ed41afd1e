use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;

use super::present;
use crate::{
    error::ApiError,
    management::DEFAULT_LIMIT,
    server::AppState,
    types::{
        MoodRecommendationRequest, PlaylistRecommendationRequest, RecommendationOptions,
        TrackRecommendationRequest,
    },
};

const UNAVAILABLE: &str = "Could not generate recommendations";

fn options(
    mood: Option<String>,
    activity: Option<String>,
    language: Option<String>,
    limit: Option<u32>,
) -> RecommendationOptions {
    RecommendationOptions {
        mood: present(mood),
        activity: present(activity),
        language: present(language),
        limit: limit.unwrap_or(DEFAULT_LIMIT),
    }
}

fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

pub async fn recommend_tracks(
    State(state): State<AppState>,
    body: Result<Json<TrackRecommendationRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = parse_body(body)?;
    let Some(track_ids) = body.track_ids.filter(|ids| !ids.is_empty()) else {
        return Err(ApiError::MissingParameter(
            "Track IDs are required".to_string(),
        ));
    };
    let options = options(body.mood, body.activity, body.language, body.limit);

    state
        .engine
        .recommend_for_tracks(&track_ids, &options)
        .await
        .map(Json)
        .map_err(|e| e.or_unavailable(UNAVAILABLE))
}

pub async fn recommend_playlist(
    State(state): State<AppState>,
    body: Result<Json<PlaylistRecommendationRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = parse_body(body)?;
    let Some(playlist_id) = present(body.playlist_id) else {
        return Err(ApiError::MissingParameter(
            "Playlist ID is required".to_string(),
        ));
    };
    let options = options(body.mood, body.activity, body.language, body.limit);

    state
        .engine
        .recommend_for_playlist(&playlist_id, &options)
        .await
        .map(Json)
        .map_err(|e| e.or_unavailable(UNAVAILABLE))
}

pub async fn recommend_mood(
    State(state): State<AppState>,
    body: Result<Json<MoodRecommendationRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = parse_body(body)?;
    if present(body.mood.clone()).is_none() {
        return Err(ApiError::MissingParameter("Mood is required".to_string()));
    }
    let options = options(body.mood, body.activity, body.language, body.limit);

    state
        .engine
        .recommend_for_mood(&options)
        .await
        .map(Json)
        .map_err(|e| e.or_unavailable(UNAVAILABLE))
}

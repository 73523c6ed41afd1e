use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde_json::Value;

use super::{parse_query, present};
use crate::{
    error::ApiError,
    server::AppState,
    types::{LimitQuery, SearchQuery, TopTracksQuery},
};

pub async fn recently_played(
    State(state): State<AppState>,
    params: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let params = parse_query(params)?;
    state
        .spotify
        .recently_played(params.limit.unwrap_or(20))
        .await
        .map(Json)
        .map_err(|e| e.or_unavailable("Could not fetch recently played tracks"))
}

pub async fn playlists(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state
        .spotify
        .user_playlists()
        .await
        .map(Json)
        .map_err(|e| e.or_unavailable("Could not fetch playlists"))
}

pub async fn top_tracks(
    State(state): State<AppState>,
    params: Result<Query<TopTracksQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let params = parse_query(params)?;
    let time_range = present(params.time_range).unwrap_or_else(|| "medium_term".to_string());

    state
        .spotify
        .top_tracks(params.limit.unwrap_or(20), &time_range)
        .await
        .map(Json)
        .map_err(|e| e.or_unavailable("Could not fetch top tracks"))
}

pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let params = parse_query(params)?;
    let Some(query) = present(params.q) else {
        return Err(ApiError::MissingParameter(
            "Query parameter 'q' is required".to_string(),
        ));
    };
    let kind = present(params.kind).unwrap_or_else(|| "track".to_string());

    state
        .spotify
        .search(&query, &kind, params.limit.unwrap_or(10))
        .await
        .map(Json)
        .map_err(|e| e.or_unavailable("Search failed"))
}

//! In-process stand-in for the Spotify accounts service and Web API.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};

use moodrec::config::Config;

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const GOOD_CODE: &str = "good-code";

#[derive(Default)]
pub struct Provider {
    pub token_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub client_credential_calls: AtomicUsize,
    pub feature_calls: AtomicUsize,
    pub recommendation_calls: AtomicUsize,
    pub resource_calls: AtomicUsize,
    pub fail_refresh: bool,
    pub fail_recommendations: bool,
    /// 1-based audio-features call that answers 500.
    pub fail_feature_call: Option<usize>,
    /// Refresh responses carry a new refresh token.
    pub rotate_refresh: bool,
    /// `expires_in` of issued tokens, 3600 when unset.
    pub token_lifetime: Option<i64>,
    pub features: HashMap<String, Value>,
    pub last_recommendation_query: Mutex<Option<HashMap<String, String>>>,
    pub bearer_tokens: Mutex<Vec<String>>,
}

impl Provider {
    pub fn with_features(features: &[(&str, Value)]) -> Self {
        Self {
            features: features
                .iter()
                .map(|(id, value)| (id.to_string(), value.clone()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> HashMap<String, String> {
        self.last_recommendation_query
            .lock()
            .unwrap()
            .clone()
            .expect("no recommendation request recorded")
    }
}

/// Starts the provider on an ephemeral port and returns a config pointing at it.
pub async fn spawn(provider: Provider) -> (Config, Arc<Provider>) {
    let provider = Arc::new(provider);
    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/audio-features", get(audio_features))
        .route("/v1/recommendations", get(recommendations))
        .route("/v1/me/top/tracks", get(top_tracks))
        .route("/v1/me/playlists", get(user_playlists))
        .route("/v1/me/player/recently-played", get(recently_played))
        .route("/v1/playlists/{id}/tracks", get(playlist_tracks))
        .route("/v1/search", get(search))
        .with_state(Arc::clone(&provider));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = Config::with_base_url(&format!("http://{addr}"), CLIENT_ID, CLIENT_SECRET);
    (config, provider)
}

fn expected_basic() -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{CLIENT_ID}:{CLIENT_SECRET}"))
    )
}

async fn token(
    State(provider): State<Arc<Provider>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    provider.token_calls.fetch_add(1, Ordering::SeqCst);

    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected_basic());
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid_client"}))).into_response();
    }

    let expires_in = provider.token_lifetime.unwrap_or(3600);
    match form.get("grant_type").map(String::as_str) {
        Some("authorization_code") if form.get("code").map(String::as_str) == Some(GOOD_CODE) => {
            Json(json!({
                "access_token": "code-access",
                "token_type": "Bearer",
                "scope": "user-top-read",
                "expires_in": expires_in,
                "refresh_token": "code-refresh"
            }))
            .into_response()
        }
        Some("refresh_token") => {
            provider.refresh_calls.fetch_add(1, Ordering::SeqCst);
            if provider.fail_refresh {
                return (StatusCode::BAD_REQUEST, Json(json!({"error": "invalid_grant"})))
                    .into_response();
            }
            let mut body = json!({
                "access_token": "refreshed-access",
                "token_type": "Bearer",
                "expires_in": expires_in
            });
            if provider.rotate_refresh {
                body["refresh_token"] = json!("rotated-refresh");
            }
            Json(body).into_response()
        }
        Some("client_credentials") => {
            provider.client_credential_calls.fetch_add(1, Ordering::SeqCst);
            Json(json!({
                "access_token": "client-access",
                "token_type": "Bearer",
                "expires_in": expires_in
            }))
            .into_response()
        }
        _ => (StatusCode::BAD_REQUEST, Json(json!({"error": "invalid_grant"}))).into_response(),
    }
}

fn record_bearer(provider: &Provider, headers: &HeaderMap) -> bool {
    let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    else {
        return false;
    };
    provider.bearer_tokens.lock().unwrap().push(token.to_string());
    provider.resource_calls.fetch_add(1, Ordering::SeqCst);
    true
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"error": {"status": 401}}))).into_response()
}

async fn audio_features(
    State(provider): State<Arc<Provider>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !record_bearer(&provider, &headers) {
        return unauthorized();
    }
    let call = provider.feature_calls.fetch_add(1, Ordering::SeqCst) + 1;
    if provider.fail_feature_call == Some(call) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": {"status": 500}})))
            .into_response();
    }

    let ids = params.get("ids").cloned().unwrap_or_default();
    let features: Vec<Value> = ids
        .split(',')
        .map(|id| provider.features.get(id).cloned().unwrap_or(Value::Null))
        .collect();
    Json(json!({ "audio_features": features })).into_response()
}

async fn recommendations(
    State(provider): State<Arc<Provider>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !record_bearer(&provider, &headers) {
        return unauthorized();
    }
    provider.recommendation_calls.fetch_add(1, Ordering::SeqCst);
    *provider.last_recommendation_query.lock().unwrap() = Some(params);

    if provider.fail_recommendations {
        return (StatusCode::TOO_MANY_REQUESTS, Json(json!({"error": {"status": 429}})))
            .into_response();
    }
    Json(json!({
        "tracks": [{ "id": "rec-1", "name": "Recommended" }],
        "seeds": []
    }))
    .into_response()
}

async fn top_tracks(
    State(provider): State<Arc<Provider>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !record_bearer(&provider, &headers) {
        return unauthorized();
    }
    Json(json!({
        "items": [{ "id": "t1" }, { "id": "t2" }],
        "limit": params.get("limit"),
        "time_range": params.get("time_range")
    }))
    .into_response()
}

async fn user_playlists(State(provider): State<Arc<Provider>>, headers: HeaderMap) -> Response {
    if !record_bearer(&provider, &headers) {
        return unauthorized();
    }
    Json(json!({ "items": [{ "id": "p1", "name": "Mine" }] })).into_response()
}

async fn recently_played(
    State(provider): State<Arc<Provider>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !record_bearer(&provider, &headers) {
        return unauthorized();
    }
    Json(json!({ "items": [{ "track": { "id": "t1" } }], "limit": params.get("limit") }))
        .into_response()
}

async fn playlist_tracks(
    State(provider): State<Arc<Provider>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !record_bearer(&provider, &headers) {
        return unauthorized();
    }
    match id.as_str() {
        "p1" => Json(json!({
            "items": [
                { "track": { "id": "t1" } },
                { "track": null },
                { "track": { "id": null } },
                { "track": { "id": "t2" } }
            ]
        }))
        .into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"error": {"status": 404}}))).into_response(),
    }
}

async fn search(
    State(provider): State<Arc<Provider>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !record_bearer(&provider, &headers) {
        return unauthorized();
    }
    Json(json!({
        "query": params.get("q"),
        "type": params.get("type"),
        "limit": params.get("limit")
    }))
    .into_response()
}

use axum::{
    Router,
    routing::{get, post},
};
use reqwest::Client;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tower_http::cors::CorsLayer;

use crate::{
    Res, api,
    config::Config,
    info,
    management::{RecommendationEngine, TokenManager},
    spotify::SpotifyClient,
};

/// Everything a handler may need, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tokens: Arc<TokenManager>,
    pub spotify: SpotifyClient,
    pub engine: Arc<RecommendationEngine>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let http = Client::new();
        let tokens = Arc::new(TokenManager::new(Arc::clone(&config), http.clone()));
        Self::with_tokens(config, http, tokens)
    }

    /// State around an existing token manager, e.g. one seeded with a token.
    pub fn with_tokens(config: Arc<Config>, http: Client, tokens: Arc<TokenManager>) -> Self {
        let spotify = SpotifyClient::new(&config, http, Arc::clone(&tokens));
        let engine = Arc::new(RecommendationEngine::new(spotify.clone()));
        Self {
            config,
            tokens,
            spotify,
            engine,
        }
    }
}

pub fn make_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/health", get(api::health))
        .route("/presets", get(api::presets))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/recommendations/tracks", post(api::recommend_tracks))
        .route("/recommendations/playlist", post(api::recommend_playlist))
        .route("/recommendations/mood", post(api::recommend_mood))
        .route("/user/recently-played", get(api::recently_played))
        .route("/user/playlists", get(api::playlists))
        .route("/user/top-tracks", get(api::top_tracks))
        .route("/search", get(api::search))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = SocketAddr::from_str(&config.server_addr)?;
    let app = make_app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

//! # API Module
//!
//! HTTP handlers of the recommendation backend. Every handler validates its
//! required parameters, delegates to the token manager, the Spotify client or
//! the recommendation engine, and returns the provider's JSON untouched.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - `GET /login`, 302 to the Spotify authorization page
//! - [`callback`] - `GET /callback?code=`, completes the code exchange
//!
//! ### Recommendations
//!
//! - [`recommend_tracks`] - `POST /recommendations/tracks`
//! - [`recommend_playlist`] - `POST /recommendations/playlist`
//! - [`recommend_mood`] - `POST /recommendations/mood`
//!
//! ### Pass-through
//!
//! - [`recently_played`], [`playlists`], [`top_tracks`], [`search`]
//!
//! ### Service
//!
//! - [`home`], [`health`], [`presets`]
//!
//! ## Status codes
//!
//! Missing parameters answer 400, authentication failures 401 and every
//! other failure 500, always with an `{"error": "..."}` body. See
//! [`crate::error::ApiError`].

use axum::extract::{Query, rejection::QueryRejection};

use crate::error::ApiError;

mod callback;
mod health;
mod recommendations;
mod user;

pub use callback::callback;
pub use callback::login;
pub use health::health;
pub use health::home;
pub use health::presets;
pub use recommendations::recommend_mood;
pub use recommendations::recommend_playlist;
pub use recommendations::recommend_tracks;
pub use user::playlists;
pub use user::recently_played;
pub use user::search;
pub use user::top_tracks;

/// Turns an unparseable query string into a JSON 400.
fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Treats blank strings the same as a missing value.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

//! Configuration management for the recommendation backend.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files, and holds the static mood and activity weight presets.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)
//!
//! Credentials are never validated here. A missing client id or secret only
//! shows up as a failed token exchange on the first network call.

use std::{env, path::PathBuf};

use crate::types::PresetValue;

pub const DEFAULT_SCOPE: &str =
    "user-library-read user-top-read playlist-read-private user-read-recently-played";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";

/// Loads environment variables from `.env` files.
///
/// Reads `.env` from the working directory first, then `moodrec/.env` from the
/// platform-specific local data directory:
/// - Linux: `~/.local/share/moodrec/.env`
/// - macOS: `~/Library/Application Support/moodrec/.env`
/// - Windows: `%LOCALAPPDATA%/moodrec/.env`
///
/// Variables that are already set are never overwritten, so the real
/// environment always wins. Both files are optional.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or if an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    dotenv::dotenv().ok();

    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    }
    Ok(())
}

/// Location of the `.env` file inside the local data directory.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodrec/.env");
    path
}

/// Runtime configuration, read once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub session_secret: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Call [`load_env`] first if `.env` files should be honoured.
    pub fn from_env() -> Self {
        Self {
            client_id: var_or("SPOTIFY_CLIENT_ID", ""),
            client_secret: var_or("SPOTIFY_CLIENT_SECRET", ""),
            redirect_uri: var_or("SPOTIFY_REDIRECT_URI", ""),
            session_secret: var_or("SECRET_KEY", ""),
            scope: var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: var_or("SPOTIFY_API_URL", DEFAULT_API_URL),
            server_addr: var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
        }
    }

    /// Configuration pointing every Spotify endpoint at `base`.
    ///
    /// The token endpoint becomes `{base}/api/token`, the authorize endpoint
    /// `{base}/authorize` and the Web API `{base}/v1`. Used to run against a
    /// local stand-in of the provider.
    pub fn with_base_url(base: &str, client_id: &str, client_secret: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_uri: "http://127.0.0.1:5000/callback".to_string(),
            session_secret: String::new(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: format!("{base}/authorize"),
            token_url: format!("{base}/api/token"),
            api_url: format!("{base}/v1"),
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// A named set of feature overrides.
pub type Preset = &'static [(&'static str, PresetValue)];

pub const MOOD_PRESETS: &[(&str, Preset)] = &[
    (
        "happy",
        &[
            ("valence", PresetValue::Scalar(0.8)),
            ("energy", PresetValue::Scalar(0.7)),
            ("danceability", PresetValue::Scalar(0.7)),
        ],
    ),
    (
        "sad",
        &[
            ("valence", PresetValue::Scalar(0.2)),
            ("energy", PresetValue::Scalar(0.3)),
            ("acousticness", PresetValue::Scalar(0.6)),
        ],
    ),
    (
        "energetic",
        &[
            ("energy", PresetValue::Scalar(0.9)),
            ("danceability", PresetValue::Scalar(0.8)),
            ("loudness", PresetValue::Scalar(0.7)),
        ],
    ),
    (
        "calm",
        &[
            ("energy", PresetValue::Scalar(0.3)),
            ("valence", PresetValue::Scalar(0.5)),
            ("acousticness", PresetValue::Scalar(0.7)),
        ],
    ),
];

pub const ACTIVITY_PRESETS: &[(&str, Preset)] = &[
    (
        "working",
        &[
            ("instrumentalness", PresetValue::Scalar(0.7)),
            ("energy", PresetValue::Scalar(0.5)),
            ("speechiness", PresetValue::Scalar(0.2)),
        ],
    ),
    (
        "relaxing",
        &[
            ("energy", PresetValue::Scalar(0.3)),
            ("valence", PresetValue::Scalar(0.6)),
            ("tempo", PresetValue::Range(60.0, 100.0)),
        ],
    ),
    (
        "partying",
        &[
            ("energy", PresetValue::Scalar(0.9)),
            ("danceability", PresetValue::Scalar(0.9)),
            ("loudness", PresetValue::Scalar(0.8)),
        ],
    ),
    (
        "exercising",
        &[
            ("energy", PresetValue::Scalar(0.8)),
            ("tempo", PresetValue::Range(120.0, 180.0)),
            ("valence", PresetValue::Scalar(0.7)),
        ],
    ),
];

pub fn mood_preset(label: &str) -> Option<Preset> {
    find_preset(MOOD_PRESETS, label)
}

pub fn activity_preset(label: &str) -> Option<Preset> {
    find_preset(ACTIVITY_PRESETS, label)
}

fn find_preset(table: &[(&str, Preset)], label: &str) -> Option<Preset> {
    table
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, preset)| *preset)
}

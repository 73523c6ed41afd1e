use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Named numeric audio attributes of a track, or an average of several.
pub type FeatureVector = BTreeMap<String, f64>;

/// Access token as held by the token manager.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: String,
    pub expires_at: DateTime<Utc>,
}

impl Token {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Whole seconds left until expiry, zero once expired.
    pub fn expires_in(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}

/// Body of a successful token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub scope: Option<String>,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenResponse {
    /// Turns the response into a token, falling back to `previous_refresh`
    /// when the provider did not rotate the refresh token.
    ///
    /// Fails when `expires_in` does not fit a timestamp.
    pub fn into_token(self, previous_refresh: Option<String>) -> Result<Token, String> {
        let expires_at = TimeDelta::try_seconds(self.expires_in)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| format!("token lifetime out of range: {}s", self.expires_in))?;

        Ok(Token {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh),
            scope: self.scope.unwrap_or_default(),
            expires_at,
        })
    }
}

/// A preset override value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresetValue {
    Scalar(f64),
    /// Inclusive band, applied as its midpoint.
    Range(f64, f64),
}

impl PresetValue {
    pub fn target(&self) -> f64 {
        match *self {
            PresetValue::Scalar(v) => v,
            PresetValue::Range(low, high) => (low + high) / 2.0,
        }
    }
}

impl std::fmt::Display for PresetValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresetValue::Scalar(v) => write!(f, "{v}"),
            PresetValue::Range(low, high) => write!(f, "{low}-{high}"),
        }
    }
}

impl Serialize for PresetValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            PresetValue::Scalar(v) => serializer.serialize_f64(v),
            PresetValue::Range(low, high) => [low, high].serialize(serializer),
        }
    }
}

/// Knobs shared by every recommendation request.
#[derive(Debug, Clone, Default)]
pub struct RecommendationOptions {
    pub mood: Option<String>,
    pub activity: Option<String>,
    pub language: Option<String>,
    pub limit: u32,
}

/// Recommendation query derived from a feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    pub seed_tracks: Vec<String>,
    pub limit: u32,
    /// `target_*` parameter name to value.
    pub targets: BTreeMap<String, f64>,
}

impl RecommendationQuery {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("limit".to_string(), self.limit.to_string())];
        if !self.seed_tracks.is_empty() {
            params.push(("seed_tracks".to_string(), self.seed_tracks.join(",")));
        }
        params.extend(
            self.targets
                .iter()
                .map(|(name, value)| (name.clone(), value.to_string())),
        );
        params
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackRecommendationRequest {
    pub track_ids: Option<Vec<String>>,
    pub mood: Option<String>,
    pub activity: Option<String>,
    pub language: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistRecommendationRequest {
    pub playlist_id: Option<String>,
    pub mood: Option<String>,
    pub activity: Option<String>,
    pub language: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoodRecommendationRequest {
    pub mood: Option<String>,
    pub activity: Option<String>,
    pub language: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallbackResponse {
    pub message: String,
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    /// Set by Spotify instead of `code` when the user declines.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksQuery {
    pub limit: Option<u32>,
    pub time_range: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Tabled)]
pub struct PresetTableRow {
    pub kind: String,
    pub label: String,
    pub overrides: String,
}

#[derive(Tabled)]
pub struct ConfigTableRow {
    pub variable: String,
    pub value: String,
}

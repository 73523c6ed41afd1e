use std::collections::BTreeMap;

use axum::response::Json;
use serde_json::{Value, json};

use crate::{
    config::{ACTIVITY_PRESETS, MOOD_PRESETS, Preset},
    types::PresetValue,
};

pub async fn home() -> &'static str {
    "Mood recommendation backend for Spotify"
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Mood and activity labels with the features they override.
pub async fn presets() -> Json<Value> {
    Json(json!({
        "moods": preset_table(MOOD_PRESETS),
        "activities": preset_table(ACTIVITY_PRESETS),
    }))
}

fn preset_table(
    table: &[(&'static str, Preset)],
) -> BTreeMap<&'static str, BTreeMap<&'static str, PresetValue>> {
    table
        .iter()
        .map(|(label, preset)| (*label, preset.iter().copied().collect()))
        .collect()
}

use tabled::Table;

use crate::{
    config::{self, ACTIVITY_PRESETS, Config, MOOD_PRESETS, Preset},
    info,
    types::{ConfigTableRow, PresetTableRow},
};

/// Prints the mood and activity presets as a table.
pub fn presets() {
    let rows: Vec<PresetTableRow> = preset_rows("mood", MOOD_PRESETS)
        .chain(preset_rows("activity", ACTIVITY_PRESETS))
        .collect();

    println!("{}", Table::new(rows));
}

fn preset_rows(
    kind: &'static str,
    table: &'static [(&'static str, Preset)],
) -> impl Iterator<Item = PresetTableRow> {
    table.iter().map(move |(label, preset)| PresetTableRow {
        kind: kind.to_string(),
        label: label.to_string(),
        overrides: preset
            .iter()
            .map(|(feature, value)| format!("{feature}={value}"))
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Prints the effective configuration. Secrets are only reported as set or
/// missing.
pub fn show_config() {
    let config = Config::from_env();
    info!("Reading .env from {}", config::env_path().display());

    let rows = vec![
        row("SPOTIFY_CLIENT_ID", config.client_id.clone()),
        row("SPOTIFY_CLIENT_SECRET", mask(&config.client_secret)),
        row("SPOTIFY_REDIRECT_URI", config.redirect_uri.clone()),
        row("SECRET_KEY", mask(&config.session_secret)),
        row("SPOTIFY_API_AUTH_SCOPE", config.scope.clone()),
        row("SPOTIFY_API_AUTH_URL", config.auth_url.clone()),
        row("SPOTIFY_API_TOKEN_URL", config.token_url.clone()),
        row("SPOTIFY_API_URL", config.api_url.clone()),
        row("SERVER_ADDRESS", config.server_addr.clone()),
    ];

    println!("{}", Table::new(rows));
}

fn row(variable: &str, value: String) -> ConfigTableRow {
    ConfigTableRow {
        variable: variable.to_string(),
        value: if value.is_empty() {
            "<missing>".to_string()
        } else {
            value
        },
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "<set>".to_string()
    }
}

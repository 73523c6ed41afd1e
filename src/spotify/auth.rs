use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, Url, header::AUTHORIZATION};

use crate::{
    config::Config,
    error::ApiError,
    types::{Token, TokenResponse},
};

/// Builds the Spotify authorization URL the user is redirected to.
///
/// Query parameters are URL-encoded, so scopes may be given space separated
/// as Spotify documents them.
///
/// # Example
///
/// ```
/// let url = authorization_url(&config)?;
/// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
/// ```
pub fn authorization_url(config: &Config) -> Result<String, ApiError> {
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", config.scope.as_str()),
        ],
    )
    .map_err(|e| {
        ApiError::Unavailable(format!(
            "Invalid authorization endpoint '{}': {}",
            config.auth_url, e
        ))
    })?;
    Ok(url.into())
}

/// `base64(client_id:client_secret)` as used by the token endpoint's Basic auth.
pub fn basic_credentials(config: &Config) -> String {
    STANDARD.encode(format!("{}:{}", config.client_id, config.client_secret))
}

/// Exchanges an authorization code for an access and refresh token.
///
/// Any failure, transport or non-2xx, is reported as
/// [`ApiError::Authentication`].
pub async fn exchange_code(http: &Client, config: &Config, code: &str) -> Result<Token, ApiError> {
    let form = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", config.redirect_uri.as_str()),
    ];

    request_token(http, config, &form)
        .await
        .and_then(|res| res.into_token(None))
        .map_err(|e| ApiError::Authentication(format!("Could not authenticate client: {e}")))
}

/// Exchanges a refresh token for a fresh access token.
///
/// Spotify may or may not rotate the refresh token; when it does not, the
/// returned token keeps `refresh_token`.
pub async fn refresh_token(
    http: &Client,
    config: &Config,
    refresh_token: &str,
) -> Result<Token, ApiError> {
    let form = [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
    ];

    request_token(http, config, &form)
        .await
        .and_then(|res| res.into_token(Some(refresh_token.to_string())))
        .map_err(|e| ApiError::TokenRefresh(format!("Could not refresh token: {e}")))
}

/// Obtains an app-only token through the client-credentials grant.
///
/// Such a token carries no refresh token and cannot read user data.
pub async fn client_credentials(http: &Client, config: &Config) -> Result<Token, ApiError> {
    let form = [("grant_type", "client_credentials")];

    request_token(http, config, &form)
        .await
        .and_then(|res| res.into_token(None))
        .map_err(|e| ApiError::Authentication(format!("Could not authenticate client: {e}")))
}

async fn request_token(
    http: &Client,
    config: &Config,
    form: &[(&str, &str)],
) -> Result<TokenResponse, String> {
    let res = http
        .post(&config.token_url)
        .header(AUTHORIZATION, format!("Basic {}", basic_credentials(config)))
        .form(form)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(format!("token endpoint responded with {status}: {body}"));
    }

    res.json::<TokenResponse>().await.map_err(|e| e.to_string())
}

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::Mutex;

use crate::{config::Config, error::ApiError, info, spotify, types::Token};

/// Owns the OAuth credentials and the access-token lifecycle.
///
/// One instance is shared by every request through the router state. The
/// token lives behind an async mutex that stays locked across
/// check-and-refresh, so requests racing an expired token wait for a single
/// refresh instead of each issuing their own.
pub struct TokenManager {
    config: Arc<Config>,
    http: Client,
    token: Mutex<Option<Token>>,
}

impl TokenManager {
    pub fn new(config: Arc<Config>, http: Client) -> Self {
        Self {
            config,
            http,
            token: Mutex::new(None),
        }
    }

    pub fn with_token(config: Arc<Config>, http: Client, token: Token) -> Self {
        Self {
            config,
            http,
            token: Mutex::new(Some(token)),
        }
    }

    pub fn authorization_url(&self) -> Result<String, ApiError> {
        spotify::auth::authorization_url(&self.config)
    }

    /// Exchanges an authorization code and stores the resulting token.
    ///
    /// On failure the previously stored token, if any, is left untouched.
    pub async fn complete_authorization(&self, code: &str) -> Result<Token, ApiError> {
        let token = spotify::auth::exchange_code(&self.http, &self.config, code).await?;
        *self.token.lock().await = Some(token.clone());
        Ok(token)
    }

    /// Returns an access token that is valid right now.
    ///
    /// Evaluated on every call, in order:
    /// 1. the stored token, if it has not expired
    /// 2. a refreshed token, if a refresh token is stored
    /// 3. a new client-credentials token
    pub async fn get_valid_token(&self) -> Result<String, ApiError> {
        let mut current = self.token.lock().await;

        if let Some(token) = current.as_ref() {
            if !token.is_expired() {
                return Ok(token.access_token.clone());
            }
        }

        let refresh_token = current.as_ref().and_then(|t| t.refresh_token.clone());
        let token = match refresh_token {
            Some(refresh_token) => {
                info!("Access token expired, refreshing");
                spotify::auth::refresh_token(&self.http, &self.config, &refresh_token).await?
            }
            None => {
                info!("No user token, requesting client credentials");
                spotify::auth::client_credentials(&self.http, &self.config).await?
            }
        };

        let access_token = token.access_token.clone();
        *current = Some(token);
        Ok(access_token)
    }

    pub async fn current_token(&self) -> Option<Token> {
        self.token.lock().await.clone()
    }
}

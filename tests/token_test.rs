mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use reqwest::{Client, Url};

use common::{CLIENT_ID, CLIENT_SECRET, GOOD_CODE, Provider};
use moodrec::{
    config::{Config, DEFAULT_SCOPE},
    error::ApiError,
    management::TokenManager,
    spotify::auth::{authorization_url, basic_credentials},
    types::{Token, TokenResponse},
};

fn token(expires_in_secs: i64, refresh_token: Option<&str>) -> Token {
    Token {
        access_token: "stored-access".to_string(),
        refresh_token: refresh_token.map(str::to_string),
        scope: String::new(),
        expires_at: Utc::now() + Duration::seconds(expires_in_secs),
    }
}

fn manager(config: Config, token: Option<Token>) -> TokenManager {
    let config = Arc::new(config);
    match token {
        Some(token) => TokenManager::with_token(config, Client::new(), token),
        None => TokenManager::new(config, Client::new()),
    }
}

#[test]
fn test_basic_credentials() {
    let config = Config::with_base_url("http://localhost", "id", "secret");

    // base64("id:secret")
    assert_eq!(basic_credentials(&config), "aWQ6c2VjcmV0");
}

#[test]
fn test_authorization_url() {
    let config = Config::with_base_url("http://localhost:9999", CLIENT_ID, CLIENT_SECRET);

    let url = Url::parse(&authorization_url(&config).unwrap()).unwrap();
    let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();

    assert_eq!(url.path(), "/authorize");
    assert_eq!(params["client_id"], CLIENT_ID);
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["redirect_uri"], config.redirect_uri);
    assert_eq!(params["scope"], DEFAULT_SCOPE);
}

#[test]
fn test_malformed_authorize_endpoint_is_a_server_error() {
    let mut config = Config::with_base_url("http://localhost:9999", CLIENT_ID, CLIENT_SECRET);
    config.auth_url = "not a url".to_string();

    let err = authorization_url(&config).unwrap_err();

    assert!(matches!(err, ApiError::Unavailable(_)));
    assert_eq!(
        err.status_code(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_token_lifetime_out_of_range() {
    let response = TokenResponse {
        access_token: "access".to_string(),
        scope: None,
        expires_in: i64::MAX,
        refresh_token: None,
    };

    assert!(response.into_token(None).is_err());
}

#[test]
fn test_token_expiry() {
    assert!(token(-1, None).is_expired());
    assert!(!token(60, None).is_expired());
    assert_eq!(token(-30, None).expires_in(), 0);
    assert!(token(120, None).expires_in() > 100);
}

#[tokio::test]
async fn test_valid_token_is_returned_without_network() {
    let (config, provider) = common::spawn(Provider::default()).await;
    let tokens = manager(config, Some(token(3600, Some("refresh"))));

    assert_eq!(tokens.get_valid_token().await.unwrap(), "stored-access");
    assert_eq!(Provider::count(&provider.token_calls), 0);
}

#[tokio::test]
async fn test_expired_token_is_refreshed_once() {
    let (config, provider) = common::spawn(Provider::default()).await;
    let tokens = manager(config, Some(token(-10, Some("stored-refresh"))));

    assert_eq!(tokens.get_valid_token().await.unwrap(), "refreshed-access");
    assert_eq!(tokens.get_valid_token().await.unwrap(), "refreshed-access");

    assert_eq!(Provider::count(&provider.refresh_calls), 1);
    assert_eq!(Provider::count(&provider.token_calls), 1);

    // the provider did not rotate the refresh token
    let current = tokens.current_token().await.unwrap();
    assert_eq!(current.refresh_token.as_deref(), Some("stored-refresh"));
    assert!(!current.is_expired());
}

#[tokio::test]
async fn test_rotated_refresh_token_replaces_stored_one() {
    let (config, provider) = common::spawn(Provider {
        rotate_refresh: true,
        ..Default::default()
    })
    .await;
    let tokens = manager(config, Some(token(-10, Some("stored-refresh"))));

    assert_eq!(tokens.get_valid_token().await.unwrap(), "refreshed-access");

    assert_eq!(Provider::count(&provider.refresh_calls), 1);
    let current = tokens.current_token().await.unwrap();
    assert_eq!(current.refresh_token.as_deref(), Some("rotated-refresh"));
}

#[tokio::test]
async fn test_concurrent_callers_share_one_refresh() {
    let (config, provider) = common::spawn(Provider::default()).await;
    let tokens = Arc::new(manager(config, Some(token(-10, Some("stored-refresh")))));

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let tokens = Arc::clone(&tokens);
            tokio::spawn(async move { tokens.get_valid_token().await })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "refreshed-access");
    }

    assert_eq!(Provider::count(&provider.refresh_calls), 1);
}

#[tokio::test]
async fn test_failed_refresh_is_a_refresh_error() {
    let (config, provider) = common::spawn(Provider {
        fail_refresh: true,
        ..Default::default()
    })
    .await;
    let tokens = manager(config, Some(token(-10, Some("stored-refresh"))));

    let err = tokens.get_valid_token().await.unwrap_err();

    assert!(matches!(err, ApiError::TokenRefresh(_)));
    assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    assert_eq!(Provider::count(&provider.refresh_calls), 1);
    assert_eq!(
        tokens.current_token().await.unwrap().access_token,
        "stored-access"
    );
}

#[tokio::test]
async fn test_without_token_falls_back_to_client_credentials() {
    let (config, provider) = common::spawn(Provider::default()).await;
    let tokens = manager(config, None);

    assert_eq!(tokens.get_valid_token().await.unwrap(), "client-access");
    assert_eq!(Provider::count(&provider.client_credential_calls), 1);
    assert_eq!(Provider::count(&provider.refresh_calls), 0);

    let current = tokens.current_token().await.unwrap();
    assert!(current.refresh_token.is_none());
}

#[tokio::test]
async fn test_expired_token_without_refresh_uses_client_credentials() {
    let (config, provider) = common::spawn(Provider::default()).await;
    let tokens = manager(config, Some(token(-10, None)));

    assert_eq!(tokens.get_valid_token().await.unwrap(), "client-access");
    assert_eq!(Provider::count(&provider.client_credential_calls), 1);
}

#[tokio::test]
async fn test_complete_authorization_stores_token() {
    let (config, _provider) = common::spawn(Provider::default()).await;
    let tokens = manager(config, None);

    let token = tokens.complete_authorization(GOOD_CODE).await.unwrap();

    assert_eq!(token.access_token, "code-access");
    assert_eq!(token.refresh_token.as_deref(), Some("code-refresh"));
    assert_eq!(token.scope, "user-top-read");
    assert_eq!(tokens.get_valid_token().await.unwrap(), "code-access");
}

#[tokio::test]
async fn test_complete_authorization_with_bad_code() {
    let (config, _provider) = common::spawn(Provider::default()).await;
    let tokens = manager(config, None);

    let err = tokens.complete_authorization("bad-code").await.unwrap_err();

    assert!(matches!(err, ApiError::Authentication(_)));
    assert!(tokens.current_token().await.is_none());
}

#[tokio::test]
async fn test_wrong_client_secret_fails_authentication() {
    let (mut config, _provider) = common::spawn(Provider::default()).await;
    config.client_secret = "wrong".to_string();
    let tokens = manager(config, None);

    let err = tokens.get_valid_token().await.unwrap_err();

    assert!(matches!(err, ApiError::Authentication(_)));
}

#[tokio::test]
async fn test_out_of_range_lifetime_fails_the_grant() {
    let (config, provider) = common::spawn(Provider {
        token_lifetime: Some(i64::MAX),
        ..Default::default()
    })
    .await;

    let refreshing = manager(config.clone(), Some(token(-10, Some("stored-refresh"))));
    let err = refreshing.get_valid_token().await.unwrap_err();
    assert!(matches!(err, ApiError::TokenRefresh(_)));
    assert_eq!(
        refreshing.current_token().await.unwrap().access_token,
        "stored-access"
    );

    let fresh = manager(config, None);
    let err = fresh.get_valid_token().await.unwrap_err();
    assert!(matches!(err, ApiError::Authentication(_)));
    assert!(fresh.current_token().await.is_none());

    assert_eq!(Provider::count(&provider.refresh_calls), 1);
    assert_eq!(Provider::count(&provider.client_credential_calls), 1);
}

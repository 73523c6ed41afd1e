use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::{parse_query, present};
use crate::{
    error::ApiError,
    server::AppState,
    success,
    types::{CallbackQuery, CallbackResponse},
    warning,
};

pub async fn login(State(state): State<AppState>) -> Result<Response, ApiError> {
    let auth_url = state.tokens.authorization_url()?;
    Ok((StatusCode::FOUND, [(header::LOCATION, auth_url)]).into_response())
}

pub async fn callback(
    State(state): State<AppState>,
    params: Result<Query<CallbackQuery>, QueryRejection>,
) -> Result<Json<CallbackResponse>, ApiError> {
    let params = parse_query(params)?;

    if let Some(reason) = present(params.error) {
        warning!("Authorization was denied: {}", reason);
        return Err(ApiError::Authentication(format!(
            "Authorization denied: {reason}"
        )));
    }

    let Some(code) = present(params.code) else {
        return Err(ApiError::MissingParameter(
            "Authorization code not provided".to_string(),
        ));
    };

    match state.tokens.complete_authorization(&code).await {
        Ok(token) => {
            success!("Authenticated with Spotify");
            Ok(Json(CallbackResponse {
                message: "Successfully authenticated with Spotify".to_string(),
                expires_in: token.expires_in(),
                access_token: token.access_token,
            }))
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Err(ApiError::Authentication("Authentication failed".to_string()))
        }
    }
}

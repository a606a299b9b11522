//! Login, logout and current-user endpoints.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    domain::AccessError,
    infrastructure::dto::http::{LoginRequest, LoginResponse, UserResponse},
    ui::{
        error::ApiError,
        extractor::{ApiJson, Caller},
        state::AppState,
    },
};

/// `POST /api/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (token, user) = state
        .auth_usecase
        .login(&body.username, &body.password)
        .await?;

    Ok(Json(LoginResponse {
        token: token.as_str().to_string(),
        user: user.into(),
    }))
}

/// `POST /api/logout`
pub async fn logout(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> Result<StatusCode, ApiError> {
    let token = match (caller.user(), caller.token()) {
        (Some(_), Some(token)) => token,
        _ => return Err(AccessError::Unauthorized.into()),
    };
    state.auth_usecase.logout(token).await;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/user`
pub async fn current_user(caller: Caller) -> Result<Json<UserResponse>, ApiError> {
    let user = caller.user().ok_or(AccessError::Unauthorized)?;
    Ok(Json(user.clone().into()))
}

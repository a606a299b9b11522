//! Request extractors.

use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{
    domain::{SessionToken, User},
    ui::{error::ApiError, state::AppState},
};

/// JSON body whose rejection is reported as a 400 `{error}` response.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters whose rejection is reported as a 400 `{error}` response.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// The caller behind `Authorization: Bearer <token>`, if any.
///
/// Never rejects: handlers decide through `authorize` whether anonymous access is allowed.
pub struct Caller {
    token: Option<SessionToken>,
    user: Option<User>,
}

impl Caller {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }
}

impl FromRequestParts<Arc<AppState>> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .and_then(|v| SessionToken::new(v.to_string()).ok());

        let user = match &token {
            Some(token) => state.auth_usecase.authenticate(token.as_str()).await,
            None => None,
        };

        Ok(Self { token, user })
    }
}

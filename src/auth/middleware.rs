use std::sync::Arc;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::server::AppState;
use crate::server::cookies::ACCESS_TOKEN_COOKIE;
use crate::types::User;

/// Extractor that resolves the access token on protected routes to a user.
/// The cookie is checked first, then the `Authorization: Bearer` header.
/// Validation never mutates state; refresh is a separate explicit endpoint.
pub struct RequireUser(pub User);

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Unauthorized request"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid access token"),
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = json!({
            "status": status.as_u16(),
            "message": message,
            "success": false,
            "errors": [],
        });

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                "WWW-Authenticate",
                "Bearer realm=\"vidhive\"".parse().unwrap(),
            );
        }

        response
    }
}

impl FromRequestParts<Arc<AppState>> for RequireUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let raw_token = extract_token(parts).ok_or(AuthError::MissingToken)?;

        let claims = state
            .tokens
            .decode_access_token(&raw_token)
            .map_err(|_| AuthError::InvalidToken)?;

        let user = state
            .store
            .get_user(&claims.sub)
            .map_err(|_| AuthError::InternalError)?
            .ok_or(AuthError::InvalidToken)?;

        Ok(RequireUser(user))
    }
}

fn extract_token(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(ACCESS_TOKEN_COOKIE) {
        return Some(cookie.value().to_string());
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

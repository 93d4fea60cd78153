use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::warn;

use crate::auth::password::verify_password;
use crate::auth::repo::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Checks HTTP Basic credentials against the store on every protected
/// request. There is no session or token state.
#[derive(Debug)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

/// Extractor failure: the underlying error plus the Basic challenge header.
/// Only this path advertises the scheme; the JSON login endpoint returns a
/// bare 401.
#[derive(Debug)]
pub struct BasicAuthRejection(ApiError);

impl From<ApiError> for BasicAuthRejection {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for BasicAuthRejection {
    fn into_response(self) -> Response {
        let mut res = self.0.into_response();
        res.headers_mut().insert(
            header::WWW_AUTHENTICATE,
            header::HeaderValue::from_static("Basic"),
        );
        res
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BasicAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let encoded = header
            .strip_prefix("Basic ")
            .or_else(|| header.strip_prefix("basic "))
            .ok_or(ApiError::Unauthorized)?;

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| ApiError::Unauthorized)?;
        let decoded = String::from_utf8(decoded).map_err(|_| ApiError::Unauthorized)?;
        let (username, password) = decoded.split_once(':').ok_or(ApiError::Unauthorized)?;

        let user = User::find_by_username(&state.db, username)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        if !verify_password(password, &user.password) {
            warn!(%username, "basic auth rejected");
            return Err(ApiError::Unauthorized.into());
        }

        Ok(AuthUser {
            id: user.id,
            username: user.username,
        })
    }
}

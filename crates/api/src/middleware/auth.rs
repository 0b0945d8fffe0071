//! Static bearer-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried an accepted API token.
///
/// Use as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(_auth: ApiToken) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
///
/// Tokens are compared against the configured set, so rotated-out values
/// can stay accepted until callers catch up.
#[derive(Debug, Clone, Copy)]
pub struct ApiToken;

impl FromRequestParts<AppState> for ApiToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".into())
        })?;

        if state.config.api_tokens.iter().any(|t| t == token) {
            Ok(ApiToken)
        } else {
            Err(AppError::Unauthorized("Invalid API token".into()))
        }
    }
}

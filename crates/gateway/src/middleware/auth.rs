//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use common::AppError;

use crate::state::AppState;

/// Authentication middleware that validates bearer tokens.
///
/// On success the verified `Principal` is inserted into the request
/// extensions; every failure is a 401 with the same message.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::Unauthorized)?;

    let principal = state.verifier.verify(bearer.token()).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        AppError::Unauthorized
    })?;

    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

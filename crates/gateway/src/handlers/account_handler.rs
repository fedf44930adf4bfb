//! Account handlers.

use axum::{extract::State, routing::get, Extension, Router};

use common::AppResult;
use domain::{Principal, User};

use crate::jsonapi::{Document, JsonApi, ToResource};
use crate::state::AppState;

/// Create account routes
pub fn account_routes() -> Router<AppState> {
    Router::new().route("/account/details", get(get_account_details))
}

/// Get the authenticated user's account
#[utoipa::path(
    get,
    path = "/api/v2/account/details",
    tag = "Account",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user with effective permissions", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No user with the token's email")
    )
)]
pub async fn get_account_details(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
) -> AppResult<JsonApi> {
    let principal = principal.map(|Extension(principal)| principal);

    let user = state
        .services
        .users()
        .get_current_user(principal.as_ref())
        .await?;

    Ok(JsonApi::ok(Document::single(user.to_resource()?)))
}

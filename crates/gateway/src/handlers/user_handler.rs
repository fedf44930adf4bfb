//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};

use common::AppResult;
use domain::User;

use super::parse_id;
use crate::extractors::JsonApiBody;
use crate::jsonapi::{Document, JsonApi, ToResource};
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/v2/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of all users", body = [User]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<JsonApi> {
    let users = state.services.users().list_users().await?;
    Ok(JsonApi::ok(Document::from_items(&users)?))
}

/// Create user
#[utoipa::path(
    post,
    path = "/api/v2/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = User,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Malformed or invalid document"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonApiBody(incoming): JsonApiBody<User>,
) -> AppResult<JsonApi> {
    let user = state.services.users().create_user(incoming.attributes).await?;
    Ok(JsonApi::created(Document::single(user.to_resource()?)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/v2/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID (UUID)")
    ),
    responses(
        (status = 200, description = "User profile", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<JsonApi> {
    let user = state.services.users().get_user(parse_id(&id)?).await?;
    Ok(JsonApi::ok(Document::single(user.to_resource()?)))
}

/// Replace user attributes
#[utoipa::path(
    patch,
    path = "/api/v2/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID (UUID)")
    ),
    request_body = User,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Malformed or invalid document"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonApiBody(incoming): JsonApiBody<User>,
) -> AppResult<JsonApi> {
    let id = parse_id(&id)?;
    let user = state.services.users().update_user(id, incoming.attributes).await?;
    Ok(JsonApi::ok(Document::single(user.to_resource()?)))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/api/v2/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID (UUID)")
    ),
    responses(
        (status = 204, description = "User deleted (or did not exist)"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Malformed user ID")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.users().delete_user(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Project handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};

use common::AppResult;
use domain::Project;

use super::parse_id;
use crate::extractors::JsonApiBody;
use crate::jsonapi::{Document, JsonApi, ToResource};
use crate::state::AppState;

/// Create project routes
pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/organizations/:name/projects",
            get(list_projects).post(create_project),
        )
        .route(
            "/projects/:id",
            get(get_project).patch(update_project).delete(delete_project),
        )
}

/// List projects of an organization
#[utoipa::path(
    get,
    path = "/api/v2/organizations/{name}/projects",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(
        ("name" = String, Path, description = "Organization name")
    ),
    responses(
        (status = 200, description = "Projects ordered by creation time", body = [Project]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn list_projects(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<JsonApi> {
    let organization_id = state.services.organizations().get_id_by_name(&name).await?;
    let projects = state.services.projects().list_projects(organization_id).await?;

    Ok(JsonApi::ok(Document::from_items(&projects)?))
}

/// Create project in an organization
#[utoipa::path(
    post,
    path = "/api/v2/organizations/{name}/projects",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(
        ("name" = String, Path, description = "Organization name")
    ),
    request_body = Project,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Malformed or invalid document"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonApiBody(incoming): JsonApiBody<Project>,
) -> AppResult<JsonApi> {
    let organization_id = state.services.organizations().get_id_by_name(&name).await?;

    let project = Project {
        id: None,
        organization_id: Some(organization_id),
        organization_name: Some(name),
        ..incoming.attributes
    };
    let project = state.services.projects().create_project(project).await?;

    Ok(JsonApi::created(Document::single(project.to_resource()?)))
}

/// Get project by ID
#[utoipa::path(
    get,
    path = "/api/v2/projects/{id}",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Project ID (UUID)")
    ),
    responses(
        (status = 200, description = "Project", body = Project),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<JsonApi> {
    let project = state.services.projects().get_project(parse_id(&id)?).await?;

    Ok(JsonApi::ok(Document::single(project.to_resource()?)))
}

/// Replace project attributes
///
/// Any id in the body is ignored; the path id wins.
#[utoipa::path(
    patch,
    path = "/api/v2/projects/{id}",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Project ID (UUID)")
    ),
    request_body = Project,
    responses(
        (status = 200, description = "Project updated", body = Project),
        (status = 400, description = "Malformed or invalid document"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonApiBody(incoming): JsonApiBody<Project>,
) -> AppResult<JsonApi> {
    let project = Project {
        id: Some(parse_id(&id)?),
        ..incoming.attributes
    };
    let project = state.services.projects().update_project(project).await?;

    Ok(JsonApi::ok(Document::single(project.to_resource()?)))
}

/// Delete project
#[utoipa::path(
    delete,
    path = "/api/v2/projects/{id}",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Project ID (UUID)")
    ),
    responses(
        (status = 204, description = "Project deleted (or did not exist)"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Malformed project ID")
    )
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.projects().delete_project(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

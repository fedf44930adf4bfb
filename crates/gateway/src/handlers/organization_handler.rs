//! Organization handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Entitlements, Organization, OrganizationUpdate, RELATIONSHIP_DEFAULT_PROJECT};

use crate::extractors::JsonApiBody;
use crate::jsonapi::{organization_detail, Document, JsonApi, ToResource};
use crate::state::AppState;

/// Organization list filter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListOrganizationsQuery {
    /// Case-insensitive substring of the name or email
    pub q: Option<String>,
}

/// Create organization routes
pub fn organization_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/organizations",
            get(list_organizations).post(create_organization),
        )
        .route(
            "/organizations/:name",
            get(get_organization)
                .patch(update_organization)
                .delete(delete_organization),
        )
        .route("/organizations/:name/entitlement-set", get(get_entitlements))
        .route(
            "/organizations/:name/relationships/module-producers",
            get(list_module_producers),
        )
        .route(
            "/organizations/:name/relationships/data-retention-policy",
            get(get_data_retention_policy)
                .post(set_data_retention_policy)
                .delete(delete_data_retention_policy),
        )
}

/// List organizations
#[utoipa::path(
    get,
    path = "/api/v2/organizations",
    tag = "Organizations",
    security(("bearer_auth" = [])),
    params(ListOrganizationsQuery),
    responses(
        (status = 200, description = "Organizations matching the filter", body = [Organization]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_organizations(
    State(state): State<AppState>,
    Query(query): Query<ListOrganizationsQuery>,
) -> AppResult<JsonApi> {
    tracing::debug!(query = ?query.q, "Listing organizations");

    let organizations = state
        .services
        .organizations()
        .list_organizations(query.q)
        .await?;

    Ok(JsonApi::ok(Document::from_items(&organizations)?))
}

/// Create organization
#[utoipa::path(
    post,
    path = "/api/v2/organizations",
    tag = "Organizations",
    security(("bearer_auth" = [])),
    request_body = Organization,
    responses(
        (status = 201, description = "Organization created", body = Organization),
        (status = 400, description = "Malformed or invalid document"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_organization(
    State(state): State<AppState>,
    JsonApiBody(incoming): JsonApiBody<Organization>,
) -> AppResult<JsonApi> {
    let organization = state
        .services
        .organizations()
        .create_organization(incoming.attributes)
        .await?;

    Ok(JsonApi::created(Document::single(organization_detail(
        &organization,
    )?)))
}

/// Get organization by name
#[utoipa::path(
    get,
    path = "/api/v2/organizations/{name}",
    tag = "Organizations",
    security(("bearer_auth" = [])),
    params(
        ("name" = String, Path, description = "Organization name")
    ),
    responses(
        (status = 200, description = "Organization with its projects", body = Organization),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn get_organization(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<JsonApi> {
    let organization = state.services.organizations().get_organization(&name).await?;

    Ok(JsonApi::ok(Document::single(organization_detail(
        &organization,
    )?)))
}

/// Update organization
///
/// Only attributes present in the document are changed. A
/// `default-project` relationship selects the organization's default
/// project.
#[utoipa::path(
    patch,
    path = "/api/v2/organizations/{name}",
    tag = "Organizations",
    security(("bearer_auth" = [])),
    params(
        ("name" = String, Path, description = "Organization name")
    ),
    request_body = OrganizationUpdate,
    responses(
        (status = 200, description = "Organization updated", body = Organization),
        (status = 400, description = "Malformed document or foreign default project"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn update_organization(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonApiBody(incoming): JsonApiBody<OrganizationUpdate>,
) -> AppResult<JsonApi> {
    let default_project_id = incoming
        .related_id(RELATIONSHIP_DEFAULT_PROJECT)
        .map(|id| {
            Uuid::parse_str(id)
                .map_err(|_| AppError::validation(format!("Invalid default project id: {}", id)))
        })
        .transpose()?;

    let patch = OrganizationUpdate {
        default_project_id,
        ..incoming.attributes
    };

    let organization = state
        .services
        .organizations()
        .update_organization(&name, patch)
        .await?;

    Ok(JsonApi::ok(Document::single(organization_detail(
        &organization,
    )?)))
}

/// Delete organization
#[utoipa::path(
    delete,
    path = "/api/v2/organizations/{name}",
    tag = "Organizations",
    security(("bearer_auth" = [])),
    params(
        ("name" = String, Path, description = "Organization name")
    ),
    responses(
        (status = 204, description = "Organization deleted (or did not exist)"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_organization(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<StatusCode> {
    state.services.organizations().delete_organization(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get organization entitlement set
#[utoipa::path(
    get,
    path = "/api/v2/organizations/{name}/entitlement-set",
    tag = "Organizations",
    security(("bearer_auth" = [])),
    params(
        ("name" = String, Path, description = "Organization name")
    ),
    responses(
        (status = 200, description = "Entitlement set", body = Entitlements),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_entitlements(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<JsonApi> {
    tracing::debug!(organization = %name, "Reading entitlements");

    let entitlements = state.services.organizations().get_entitlements(&name).await?;

    Ok(JsonApi::ok(Document::single(entitlements.to_resource()?)))
}

/// Module producers of an organization (always empty)
#[utoipa::path(
    get,
    path = "/api/v2/organizations/{name}/relationships/module-producers",
    tag = "Organizations",
    security(("bearer_auth" = [])),
    params(
        ("name" = String, Path, description = "Organization name")
    ),
    responses(
        (status = 200, description = "Empty relationship"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_module_producers(Path(_name): Path<String>) -> JsonApi {
    JsonApi::ok(Document::collection(Vec::new()))
}

/// Data retention policy of an organization (never set)
#[utoipa::path(
    get,
    path = "/api/v2/organizations/{name}/relationships/data-retention-policy",
    tag = "Organizations",
    security(("bearer_auth" = [])),
    params(
        ("name" = String, Path, description = "Organization name")
    ),
    responses(
        (status = 200, description = "Null relationship"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_data_retention_policy(Path(_name): Path<String>) -> JsonApi {
    JsonApi::ok(Document::null())
}

/// Accept and discard a data retention policy
#[utoipa::path(
    post,
    path = "/api/v2/organizations/{name}/relationships/data-retention-policy",
    tag = "Organizations",
    security(("bearer_auth" = [])),
    params(
        ("name" = String, Path, description = "Organization name")
    ),
    responses(
        (status = 204, description = "Accepted"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn set_data_retention_policy(Path(_name): Path<String>) -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Remove the data retention policy (no-op)
#[utoipa::path(
    delete,
    path = "/api/v2/organizations/{name}/relationships/data-retention-policy",
    tag = "Organizations",
    security(("bearer_auth" = [])),
    params(
        ("name" = String, Path, description = "Organization name")
    ),
    responses(
        (status = 204, description = "Removed"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_data_retention_policy(Path(_name): Path<String>) -> StatusCode {
    StatusCode::NO_CONTENT
}

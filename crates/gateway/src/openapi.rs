//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use domain::{Entitlements, Organization, OrganizationUpdate, Project, TwoFactor, User, UserPermissions};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::organization_handler::list_organizations,
        crate::handlers::organization_handler::create_organization,
        crate::handlers::organization_handler::get_organization,
        crate::handlers::organization_handler::update_organization,
        crate::handlers::organization_handler::delete_organization,
        crate::handlers::organization_handler::get_entitlements,
        crate::handlers::organization_handler::list_module_producers,
        crate::handlers::organization_handler::get_data_retention_policy,
        crate::handlers::organization_handler::set_data_retention_policy,
        crate::handlers::organization_handler::delete_data_retention_policy,
        crate::handlers::project_handler::list_projects,
        crate::handlers::project_handler::create_project,
        crate::handlers::project_handler::get_project,
        crate::handlers::project_handler::update_project,
        crate::handlers::project_handler::delete_project,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
        crate::handlers::account_handler::get_account_details,
    ),
    components(
        schemas(
            Organization,
            OrganizationUpdate,
            Project,
            User,
            TwoFactor,
            UserPermissions,
            Entitlements,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Organizations", description = "Organizations, entitlements and relationship stubs"),
        (name = "Projects", description = "Projects owned by an organization"),
        (name = "Users", description = "User management"),
        (name = "Account", description = "The authenticated user's account"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

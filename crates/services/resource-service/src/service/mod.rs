//! Application services - the mapping between the external vocabulary and
//! storage rows.
//!
//! Each resource has one capability trait and one implementation backed by
//! repository traits. `Services` composes them for the HTTP surface.

pub mod container;
mod organization_service;
mod privileges;
mod project_service;
mod user_service;

pub use container::{HealthCheck, ServiceContainer, Services};
pub use organization_service::{OrganizationManager, OrganizationService};
pub use privileges::{AccountPrivileges, GrantAllPrivileges};
pub use project_service::{ProjectManager, ProjectService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;

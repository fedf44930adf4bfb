//! Repository layer for data access.

pub mod entities;
mod organization_repository;
mod project_repository;
mod user_repository;

pub use organization_repository::{OrganizationRecord, OrganizationRepository, OrganizationStore};
pub use project_repository::{ProjectRepository, ProjectStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use organization_repository::MockOrganizationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use project_repository::MockProjectRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

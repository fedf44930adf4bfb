//! Project service - projects addressed by UUID, owned by an organization.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{validate, Project};

use crate::repository::ProjectRepository;

/// Project service trait for dependency injection.
///
/// Callers resolve the owning organization's name to its id before
/// listing or creating projects.
#[async_trait]
pub trait ProjectService: Send + Sync {
    /// List projects of an organization
    async fn list_projects(&self, organization_id: Uuid) -> AppResult<Vec<Project>>;

    /// Create a project; `organization_id` must already be set
    async fn create_project(&self, project: Project) -> AppResult<Project>;

    /// Get project by ID
    async fn get_project(&self, id: Uuid) -> AppResult<Project>;

    /// Replace the attributes of the project identified by `project.id`
    async fn update_project(&self, project: Project) -> AppResult<Project>;

    /// Delete project by ID
    async fn delete_project(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ProjectService using repository.
pub struct ProjectManager {
    repo: Arc<dyn ProjectRepository>,
}

impl ProjectManager {
    /// Create new project service instance with repository
    pub fn new(repo: Arc<dyn ProjectRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ProjectService for ProjectManager {
    async fn list_projects(&self, organization_id: Uuid) -> AppResult<Vec<Project>> {
        self.repo.list_by_organization(organization_id).await
    }

    async fn create_project(&self, project: Project) -> AppResult<Project> {
        if project.organization_id.is_none() {
            return Err(AppError::validation("Project must belong to an organization"));
        }
        validate(&project)?;
        tracing::debug!(name = %project.name, "Converting project for storage");

        self.repo
            .create(project)
            .await
            .inspect_err(|e| tracing::error!("Failed to create project: {}", e))
    }

    async fn get_project(&self, id: Uuid) -> AppResult<Project> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn update_project(&self, project: Project) -> AppResult<Project> {
        validate(&project)?;

        self.repo
            .update(project)
            .await
            .inspect_err(|e| tracing::error!("Failed to update project: {}", e))
    }

    async fn delete_project(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProjectRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_create_requires_organization() {
        let mut repo = MockProjectRepository::new();
        repo.expect_create().never();

        let result = ProjectManager::new(Arc::new(repo))
            .create_project(Project::new("infra"))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_returns_generated_id() {
        let org_id = Uuid::new_v4();

        let mut repo = MockProjectRepository::new();
        repo.expect_create().returning(|project| {
            Ok(Project {
                id: Some(Uuid::new_v4()),
                ..project
            })
        });

        let project = Project {
            organization_id: Some(org_id),
            organization_name: Some("acme".to_string()),
            ..Project::new("infra")
        };
        let created = ProjectManager::new(Arc::new(repo))
            .create_project(project)
            .await
            .unwrap();

        assert!(created.id.is_some());
        assert_eq!(created.organization_id, Some(org_id));
        assert_eq!(created.organization_name.as_deref(), Some("acme"));
    }

    #[tokio::test]
    async fn test_get_project_not_found() {
        let id = Uuid::new_v4();

        let mut repo = MockProjectRepository::new();
        repo.expect_find_by_id().with(eq(id)).returning(|_| Ok(None));

        let result = ProjectManager::new(Arc::new(repo)).get_project(id).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_rejects_empty_name() {
        let mut repo = MockProjectRepository::new();
        repo.expect_update().never();

        let project = Project {
            id: Some(Uuid::new_v4()),
            ..Project::new("")
        };
        let result = ProjectManager::new(Arc::new(repo)).update_project(project).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_project_succeeds() {
        let mut repo = MockProjectRepository::new();
        repo.expect_delete().returning(|_| Ok(()));

        let result = ProjectManager::new(Arc::new(repo))
            .delete_project(Uuid::new_v4())
            .await;

        assert!(result.is_ok());
    }
}

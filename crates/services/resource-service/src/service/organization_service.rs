//! Organization service - lookups by name, partial updates and the
//! default-project relationship.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{validate, Entitlements, Organization, OrganizationUpdate};

use crate::repository::{OrganizationRepository, ProjectRepository};

/// Organization service trait for dependency injection.
#[async_trait]
pub trait OrganizationService: Send + Sync {
    /// List organizations, optionally filtered by a name/email substring
    async fn list_organizations(&self, query: Option<String>) -> AppResult<Vec<Organization>>;

    /// Create an organization
    async fn create_organization(&self, organization: Organization) -> AppResult<Organization>;

    /// Get organization by name with its projects and default project
    async fn get_organization(&self, name: &str) -> AppResult<Organization>;

    /// Apply a partial update to the organization named `name`
    async fn update_organization(
        &self,
        name: &str,
        patch: OrganizationUpdate,
    ) -> AppResult<Organization>;

    /// Delete organization (and its projects) by name
    async fn delete_organization(&self, name: &str) -> AppResult<()>;

    /// Resolve an organization name to its surrogate id
    async fn get_id_by_name(&self, name: &str) -> AppResult<Uuid>;

    /// Entitlement set of an organization
    async fn get_entitlements(&self, name: &str) -> AppResult<Entitlements>;
}

/// Concrete implementation of OrganizationService using repositories.
pub struct OrganizationManager {
    organizations: Arc<dyn OrganizationRepository>,
    projects: Arc<dyn ProjectRepository>,
}

impl OrganizationManager {
    pub fn new(
        organizations: Arc<dyn OrganizationRepository>,
        projects: Arc<dyn ProjectRepository>,
    ) -> Self {
        Self {
            organizations,
            projects,
        }
    }

    /// Reject a default-project reference that is missing or owned by
    /// another organization.
    async fn ensure_owned_project(&self, organization_id: Uuid, project_id: Uuid) -> AppResult<()> {
        let project = self.projects.find_by_id(project_id).await?;

        match project {
            Some(project) if project.organization_id == Some(organization_id) => Ok(()),
            _ => Err(AppError::validation(
                "Default project must be a project of this organization",
            )),
        }
    }
}

#[async_trait]
impl OrganizationService for OrganizationManager {
    async fn list_organizations(&self, query: Option<String>) -> AppResult<Vec<Organization>> {
        let organizations = self.organizations.list(query).await.inspect_err(|e| {
            tracing::error!("Failed to list organizations: {}", e);
        })?;

        tracing::debug!(count = organizations.len(), "Converted organizations");
        Ok(organizations)
    }

    async fn create_organization(&self, organization: Organization) -> AppResult<Organization> {
        validate(&organization)?;
        tracing::debug!(name = %organization.name, "Converting organization for storage");

        self.organizations
            .create(organization)
            .await
            .inspect_err(|e| tracing::error!("Failed to create organization: {}", e))
    }

    async fn get_organization(&self, name: &str) -> AppResult<Organization> {
        let record = self
            .organizations
            .find_by_name(name)
            .await?
            .ok_or_not_found()?;

        let projects = self.projects.list_by_organization(record.id).await?;

        let mut organization = record.organization;
        organization.attach_projects(projects, record.default_project_id);

        Ok(organization)
    }

    async fn update_organization(
        &self,
        name: &str,
        patch: OrganizationUpdate,
    ) -> AppResult<Organization> {
        validate(&patch)?;

        if let Some(project_id) = patch.default_project_id {
            let organization_id = self.get_id_by_name(name).await?;
            self.ensure_owned_project(organization_id, project_id).await?;
        }

        self.organizations
            .update(name, patch)
            .await
            .inspect_err(|e| tracing::error!("Failed to update organization {}: {}", name, e))?;

        self.get_organization(name).await
    }

    async fn delete_organization(&self, name: &str) -> AppResult<()> {
        self.organizations
            .delete_by_name(name)
            .await
            .inspect_err(|e| tracing::error!("Failed to delete organization {}: {}", name, e))
    }

    async fn get_id_by_name(&self, name: &str) -> AppResult<Uuid> {
        self.organizations
            .find_by_name(name)
            .await?
            .map(|record| record.id)
            .ok_or_not_found()
    }

    async fn get_entitlements(&self, name: &str) -> AppResult<Entitlements> {
        Ok(Entitlements::all_enabled(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockOrganizationRepository, MockProjectRepository, OrganizationRecord};
    use domain::Project;
    use mockall::predicate::eq;

    fn record(name: &str, default_project_id: Option<Uuid>) -> OrganizationRecord {
        OrganizationRecord {
            id: Uuid::new_v4(),
            default_project_id,
            organization: Organization::new(name, "owner@example.com"),
        }
    }

    fn project(organization_id: Uuid, name: &str) -> Project {
        Project {
            id: Some(Uuid::new_v4()),
            organization_id: Some(organization_id),
            ..Project::new(name)
        }
    }

    fn manager(
        organizations: MockOrganizationRepository,
        projects: MockProjectRepository,
    ) -> OrganizationManager {
        OrganizationManager::new(Arc::new(organizations), Arc::new(projects))
    }

    #[tokio::test]
    async fn test_get_organization_falls_back_to_first_project() {
        let stored = record("acme", None);
        let org_id = stored.id;
        let first = project(org_id, "first");
        let second = project(org_id, "second");
        let listed = vec![first.clone(), second];

        let mut organizations = MockOrganizationRepository::new();
        organizations
            .expect_find_by_name()
            .returning(move |_| Ok(Some(stored.clone())));
        let mut projects = MockProjectRepository::new();
        projects
            .expect_list_by_organization()
            .with(eq(org_id))
            .returning(move |_| Ok(listed.clone()));

        let org = manager(organizations, projects)
            .get_organization("acme")
            .await
            .unwrap();

        assert_eq!(org.projects.len(), 2);
        assert_eq!(org.default_project, Some(first));
    }

    #[tokio::test]
    async fn test_get_organization_without_projects_has_no_default() {
        let stored = record("acme", None);

        let mut organizations = MockOrganizationRepository::new();
        organizations
            .expect_find_by_name()
            .returning(move |_| Ok(Some(stored.clone())));
        let mut projects = MockProjectRepository::new();
        projects
            .expect_list_by_organization()
            .returning(|_| Ok(vec![]));

        let org = manager(organizations, projects)
            .get_organization("acme")
            .await
            .unwrap();

        assert!(org.default_project.is_none());
        assert!(org.projects.is_empty());
    }

    #[tokio::test]
    async fn test_get_organization_not_found() {
        let mut organizations = MockOrganizationRepository::new();
        organizations.expect_find_by_name().returning(|_| Ok(None));

        let result = manager(organizations, MockProjectRepository::new())
            .get_organization("missing")
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_name_before_storage() {
        let mut organizations = MockOrganizationRepository::new();
        organizations.expect_create().never();

        let result = manager(organizations, MockProjectRepository::new())
            .create_organization(Organization::new("bad name", "owner@example.com"))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_foreign_default_project() {
        let stored = record("acme", None);
        let foreign = project(Uuid::new_v4(), "elsewhere");
        let foreign_id = foreign.id.unwrap();

        let mut organizations = MockOrganizationRepository::new();
        organizations
            .expect_find_by_name()
            .returning(move |_| Ok(Some(stored.clone())));
        organizations.expect_update().never();
        let mut projects = MockProjectRepository::new();
        projects
            .expect_find_by_id()
            .with(eq(foreign_id))
            .returning(move |_| Ok(Some(foreign.clone())));

        let patch = OrganizationUpdate {
            default_project_id: Some(foreign_id),
            ..OrganizationUpdate::default()
        };
        let result = manager(organizations, projects)
            .update_organization("acme", patch)
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_sets_owned_default_project() {
        let stored = record("acme", None);
        let org_id = stored.id;
        let first = project(org_id, "first");
        let chosen = project(org_id, "chosen");
        let chosen_id = chosen.id.unwrap();
        let listed = vec![first, chosen.clone()];

        let after_update = OrganizationRecord {
            default_project_id: Some(chosen_id),
            ..stored.clone()
        };
        let mut lookups = vec![after_update, stored];

        let mut organizations = MockOrganizationRepository::new();
        organizations
            .expect_find_by_name()
            .times(2)
            .returning(move |_| Ok(lookups.pop()));
        organizations
            .expect_update()
            .returning(|name, _| Ok(Organization::new(name, "owner@example.com")));
        let mut projects = MockProjectRepository::new();
        let owned = chosen.clone();
        projects
            .expect_find_by_id()
            .returning(move |_| Ok(Some(owned.clone())));
        projects
            .expect_list_by_organization()
            .returning(move |_| Ok(listed.clone()));

        let patch = OrganizationUpdate {
            default_project_id: Some(chosen_id),
            ..OrganizationUpdate::default()
        };
        let org = manager(organizations, projects)
            .update_organization("acme", patch)
            .await
            .unwrap();

        assert_eq!(org.default_project, Some(chosen));
    }

    #[tokio::test]
    async fn test_update_missing_organization_is_not_found() {
        let mut organizations = MockOrganizationRepository::new();
        organizations
            .expect_update()
            .returning(|_, _| Err(AppError::NotFound));

        let patch = OrganizationUpdate {
            email: Some("new@example.com".to_string()),
            ..OrganizationUpdate::default()
        };
        let result = manager(organizations, MockProjectRepository::new())
            .update_organization("missing", patch)
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_entitlements_do_not_touch_storage() {
        let organizations = MockOrganizationRepository::new();

        let entitlements = manager(organizations, MockProjectRepository::new())
            .get_entitlements("anything")
            .await
            .unwrap();

        assert_eq!(entitlements, Entitlements::all_enabled("anything"));
    }
}

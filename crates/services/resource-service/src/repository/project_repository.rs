//! Project repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::organization;
use super::entities::project::{self, ActiveModel, Entity as ProjectEntity};
use common::{AppError, AppResult};
use domain::Project;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Project repository trait for dependency injection.
///
/// Returned projects always carry the owning organization's name.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// List projects owned by an organization, ordered by creation time then id
    async fn list_by_organization(&self, organization_id: Uuid) -> AppResult<Vec<Project>>;

    /// Insert a new project; `organization_id` must be set
    async fn create(&self, project: Project) -> AppResult<Project>;

    /// Find project by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>>;

    /// Replace name, description and is-unified of the project with `project.id`
    async fn update(&self, project: Project) -> AppResult<Project>;

    /// Delete project by ID; a missing row is not an error
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ProjectRepository
pub struct ProjectStore {
    db: Arc<DatabaseConnection>,
}

impl ProjectStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn with_owner(model: project::Model, owner: Option<organization::Model>) -> Project {
    Project {
        organization_name: owner.map(|org| org.name),
        ..Project::from(model)
    }
}

#[async_trait]
impl ProjectRepository for ProjectStore {
    async fn list_by_organization(&self, organization_id: Uuid) -> AppResult<Vec<Project>> {
        let rows = ProjectEntity::find()
            .filter(project::Column::OrganizationId.eq(organization_id))
            .order_by_asc(project::Column::CreatedAt)
            .order_by_asc(project::Column::Id)
            .find_also_related(organization::Entity)
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(model, owner)| with_owner(model, owner))
            .collect())
    }

    async fn create(&self, project: Project) -> AppResult<Project> {
        let organization_id = project
            .organization_id
            .ok_or_else(|| AppError::validation("Project must belong to an organization"))?;

        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(project.name),
            description: Set(project.description),
            is_unified: Set(project.is_unified),
            organization_id: Set(organization_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.db.as_ref()).await.map_err(AppError::from)?;
        Ok(Project {
            organization_name: project.organization_name,
            ..Project::from(model)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>> {
        let result = ProjectEntity::find_by_id(id)
            .find_also_related(organization::Entity)
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(|(model, owner)| with_owner(model, owner)))
    }

    async fn update(&self, project: Project) -> AppResult<Project> {
        let id = project.id.ok_or(AppError::NotFound)?;

        let (existing, owner) = ProjectEntity::find_by_id(id)
            .find_also_related(organization::Entity)
            .one(self.db.as_ref())
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(project.name);
        active.description = Set(project.description);
        active.is_unified = Set(project.is_unified);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(self.db.as_ref()).await.map_err(AppError::from)?;
        Ok(with_owner(model, owner))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = ProjectEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        tracing::debug!(%id, rows = result.rows_affected, "Deleted project");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    use super::*;

    fn owner(id: Uuid) -> organization::Model {
        let now = Utc::now();
        organization::Model {
            id,
            name: "acme".to_string(),
            assessments_enforced: false,
            cost_estimation_enabled: false,
            default_execution_mode: "remote".to_string(),
            email: "ops@acme.test".to_string(),
            external_id: String::new(),
            is_unified: false,
            owners_team_saml_role_id: String::new(),
            saml_enabled: false,
            session_remember: 20160,
            session_timeout: 20160,
            trial_expires_at: None,
            two_factor_conformant: false,
            send_passing_statuses_for_untriggered_speculative_plans: false,
            remaining_testable_count: 0,
            speculative_plan_management_enabled: false,
            aggregated_commit_status_enabled: false,
            allow_force_delete_workspaces: false,
            default_project_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn project(name: &str, organization_id: Uuid, age_minutes: i64) -> project::Model {
        let created = Utc::now() - Duration::minutes(age_minutes);
        project::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            is_unified: false,
            organization_id,
            created_at: created,
            updated_at: created,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_creation_then_id() {
        let org_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                (project("first", org_id, 10), Some(owner(org_id))),
                (project("second", org_id, 5), Some(owner(org_id))),
            ]])
            .into_connection();
        let store = ProjectStore::new(Arc::new(db));

        let projects = store.list_by_organization(org_id).await.unwrap();
        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
        assert!(projects
            .iter()
            .all(|p| p.organization_name.as_deref() == Some("acme")));

        let log = Arc::try_unwrap(store.db)
            .ok()
            .expect("connection still shared")
            .into_transaction_log();
        let statement = &log[0].statements()[0];
        let (filter, order) = statement
            .sql
            .split_once(" ORDER BY ")
            .expect("ordered query");

        assert!(filter.contains(r#""projects"."organization_id" = "#), "{}", filter);
        let created_at = order.find(r#""created_at" ASC"#).expect("created_at key");
        let id = order.find(r#""id" ASC"#).expect("id key");
        assert!(created_at < id, "{}", order);
        assert!(statement
            .values
            .as_ref()
            .is_some_and(|values| values.0.contains(&Value::from(org_id))));
    }

    #[tokio::test]
    async fn test_create_requires_owner() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let store = ProjectStore::new(Arc::new(db));

        let orphan = Project {
            organization_id: None,
            ..Project::from(project("orphan", Uuid::new_v4(), 0))
        };
        let result = store.create(orphan).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}

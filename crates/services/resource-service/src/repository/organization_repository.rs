//! Organization repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use super::entities::organization::{self, ActiveModel, Entity as OrganizationEntity};
use common::{AppError, AppResult};
use domain::{Organization, OrganizationUpdate};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Stored organization together with the storage-only columns the
/// mapping layer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationRecord {
    pub id: Uuid,
    pub default_project_id: Option<Uuid>,
    pub organization: Organization,
}

impl From<organization::Model> for OrganizationRecord {
    fn from(model: organization::Model) -> Self {
        Self {
            id: model.id,
            default_project_id: model.default_project_id,
            organization: Organization::from(model),
        }
    }
}

/// Organization repository trait for dependency injection.
///
/// Organizations are addressed by their unique `name`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// List organizations whose name or email contains `query`
    /// (case-insensitive). `None` lists everything.
    async fn list(&self, query: Option<String>) -> AppResult<Vec<Organization>>;

    /// Insert a new organization
    async fn create(&self, organization: Organization) -> AppResult<Organization>;

    /// Find organization by exact name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<OrganizationRecord>>;

    /// Apply the present fields of `patch` to the organization named `name`
    async fn update(&self, name: &str, patch: OrganizationUpdate) -> AppResult<Organization>;

    /// Delete organization by name; a missing row is not an error
    async fn delete_by_name(&self, name: &str) -> AppResult<()>;
}

/// Concrete implementation of OrganizationRepository
pub struct OrganizationStore {
    db: Arc<DatabaseConnection>,
}

impl OrganizationStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// `lower(column) LIKE pattern`
fn lower_like(column: organization::Column, pattern: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(pattern)
}

#[async_trait]
impl OrganizationRepository for OrganizationStore {
    async fn list(&self, query: Option<String>) -> AppResult<Vec<Organization>> {
        let mut select = OrganizationEntity::find();

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let pattern = format!("%{}%", query.to_lowercase());
            select = select.filter(
                Condition::any()
                    .add(lower_like(organization::Column::Name, &pattern))
                    .add(lower_like(organization::Column::Email, &pattern)),
            );
        }

        let models = select.all(self.db.as_ref()).await.map_err(AppError::from)?;

        Ok(models.into_iter().map(Organization::from).collect())
    }

    async fn create(&self, organization: Organization) -> AppResult<Organization> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(organization.name),
            assessments_enforced: Set(organization.assessments_enforced),
            cost_estimation_enabled: Set(organization.cost_estimation_enabled),
            default_execution_mode: Set(organization.default_execution_mode),
            email: Set(organization.email),
            external_id: Set(organization.external_id),
            is_unified: Set(organization.is_unified),
            owners_team_saml_role_id: Set(organization.owners_team_saml_role_id),
            saml_enabled: Set(organization.saml_enabled),
            session_remember: Set(organization.session_remember),
            session_timeout: Set(organization.session_timeout),
            trial_expires_at: Set(organization.trial_expires_at),
            two_factor_conformant: Set(organization.two_factor_conformant),
            send_passing_statuses_for_untriggered_speculative_plans: Set(
                organization.send_passing_statuses_for_untriggered_speculative_plans,
            ),
            remaining_testable_count: Set(organization.remaining_testable_count),
            speculative_plan_management_enabled: Set(
                organization.speculative_plan_management_enabled,
            ),
            aggregated_commit_status_enabled: Set(organization.aggregated_commit_status_enabled),
            allow_force_delete_workspaces: Set(organization.allow_force_delete_workspaces),
            default_project_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.db.as_ref()).await.map_err(AppError::from)?;
        Ok(Organization::from(model))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<OrganizationRecord>> {
        let result = OrganizationEntity::find()
            .filter(organization::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(OrganizationRecord::from))
    }

    async fn update(&self, name: &str, patch: OrganizationUpdate) -> AppResult<Organization> {
        let organization = OrganizationEntity::find()
            .filter(organization::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = organization.into();

        if let Some(value) = patch.assessments_enforced {
            active.assessments_enforced = Set(value);
        }
        if let Some(value) = patch.cost_estimation_enabled {
            active.cost_estimation_enabled = Set(value);
        }
        if let Some(value) = patch.default_execution_mode {
            active.default_execution_mode = Set(value);
        }
        if let Some(value) = patch.email {
            active.email = Set(value);
        }
        if let Some(value) = patch.external_id {
            active.external_id = Set(value);
        }
        if let Some(value) = patch.is_unified {
            active.is_unified = Set(value);
        }
        if let Some(value) = patch.owners_team_saml_role_id {
            active.owners_team_saml_role_id = Set(value);
        }
        if let Some(value) = patch.saml_enabled {
            active.saml_enabled = Set(value);
        }
        if let Some(value) = patch.session_remember {
            active.session_remember = Set(value);
        }
        if let Some(value) = patch.session_timeout {
            active.session_timeout = Set(value);
        }
        if let Some(value) = patch.trial_expires_at {
            active.trial_expires_at = Set(Some(value));
        }
        if let Some(value) = patch.two_factor_conformant {
            active.two_factor_conformant = Set(value);
        }
        if let Some(value) = patch.send_passing_statuses_for_untriggered_speculative_plans {
            active.send_passing_statuses_for_untriggered_speculative_plans = Set(value);
        }
        if let Some(value) = patch.remaining_testable_count {
            active.remaining_testable_count = Set(value);
        }
        if let Some(value) = patch.speculative_plan_management_enabled {
            active.speculative_plan_management_enabled = Set(value);
        }
        if let Some(value) = patch.aggregated_commit_status_enabled {
            active.aggregated_commit_status_enabled = Set(value);
        }
        if let Some(value) = patch.allow_force_delete_workspaces {
            active.allow_force_delete_workspaces = Set(value);
        }
        if let Some(project_id) = patch.default_project_id {
            active.default_project_id = Set(Some(project_id));
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(self.db.as_ref()).await.map_err(AppError::from)?;
        Ok(Organization::from(model))
    }

    async fn delete_by_name(&self, name: &str) -> AppResult<()> {
        let result = OrganizationEntity::delete_many()
            .filter(organization::Column::Name.eq(name))
            .exec(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        tracing::debug!(name, rows = result.rows_affected, "Deleted organization");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, IdenStatic, Iterable, MockDatabase, Statement, Value};

    use super::*;

    fn model(name: &str) -> organization::Model {
        let now = Utc::now();
        organization::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            assessments_enforced: false,
            cost_estimation_enabled: false,
            default_execution_mode: "remote".to_string(),
            email: format!("{}@example.com", name),
            external_id: String::new(),
            is_unified: false,
            owners_team_saml_role_id: String::new(),
            saml_enabled: false,
            session_remember: 20160,
            session_timeout: 20160,
            trial_expires_at: None,
            two_factor_conformant: false,
            send_passing_statuses_for_untriggered_speculative_plans: false,
            remaining_testable_count: 5,
            speculative_plan_management_enabled: false,
            aggregated_commit_status_enabled: false,
            allow_force_delete_workspaces: false,
            default_project_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Statements the store sent, one per round trip.
    fn statements(store: OrganizationStore) -> Vec<Statement> {
        Arc::try_unwrap(store.db)
            .ok()
            .expect("connection still shared")
            .into_transaction_log()
            .iter()
            .flat_map(|transaction| transaction.statements().to_vec())
            .collect()
    }

    fn values(statement: &Statement) -> Vec<Value> {
        statement
            .values
            .as_ref()
            .map(|values| values.0.clone())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_list_matches_name_or_email_case_insensitively() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model("acme")]])
            .into_connection();
        let store = OrganizationStore::new(Arc::new(db));

        let found = store.list(Some("ACM".to_string())).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "acme");

        let log = statements(store);
        assert_eq!(log.len(), 1);
        let sql = &log[0].sql;
        assert!(sql.contains(r#"LOWER("name") LIKE"#), "{}", sql);
        assert!(sql.contains(r#"LOWER("email") LIKE"#), "{}", sql);
        assert!(sql.contains(" OR "), "{}", sql);
        assert!(values(&log[0]).contains(&Value::from("%acm%")));
    }

    #[tokio::test]
    async fn test_list_without_query_has_no_filter() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model("acme"), model("globex")]])
            .into_connection();
        let store = OrganizationStore::new(Arc::new(db));

        assert_eq!(store.list(Some(String::new())).await.unwrap().len(), 2);

        let log = statements(store);
        assert!(!log[0].sql.contains("WHERE"), "{}", log[0].sql);
    }

    #[tokio::test]
    async fn test_create_writes_every_attribute() {
        let organization = Organization {
            name: "acme".to_string(),
            assessments_enforced: true,
            default_execution_mode: "agent".to_string(),
            email: "ops@acme.test".to_string(),
            external_id: "ext-1".to_string(),
            owners_team_saml_role_id: "role-9".to_string(),
            session_remember: 40,
            session_timeout: 45,
            remaining_testable_count: 7,
            ..Organization::default()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model("acme")]])
            .into_connection();
        let store = OrganizationStore::new(Arc::new(db));

        let created = store.create(organization).await.unwrap();
        assert_eq!(created.name, "acme");
        assert!(created.created_at.is_some());

        let log = statements(store);
        let insert = &log[0];
        let columns = insert.sql.split(" VALUES ").next().unwrap_or_default();
        assert!(columns.starts_with(r#"INSERT INTO "organizations""#));
        for column in organization::Column::iter() {
            let quoted = format!("\"{}\"", column.as_str());
            assert!(columns.contains(&quoted), "missing {} in {}", quoted, columns);
        }

        let written = values(insert);
        for expected in [
            Value::from("acme"),
            Value::from("agent"),
            Value::from("ops@acme.test"),
            Value::from("ext-1"),
            Value::from("role-9"),
            Value::from(40i32),
            Value::from(45i32),
            Value::from(7i32),
            Value::from(true),
        ] {
            assert!(written.contains(&expected), "missing {:?}", expected);
        }
    }

    #[tokio::test]
    async fn test_update_writes_only_present_fields() {
        let existing = model("acme");
        let mut updated = existing.clone();
        updated.email = "new@acme.test".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing], vec![updated]])
            .into_connection();
        let store = OrganizationStore::new(Arc::new(db));

        let patch = OrganizationUpdate {
            email: Some("new@acme.test".to_string()),
            ..OrganizationUpdate::default()
        };
        let organization = store.update("acme", patch).await.unwrap();
        assert_eq!(organization.email, "new@acme.test");

        let log = statements(store);
        assert_eq!(log.len(), 2);
        assert!(log[0].sql.starts_with("SELECT"));

        let update = &log[1];
        let assignments = update.sql.split(" WHERE ").next().unwrap_or_default();
        assert!(assignments.starts_with(r#"UPDATE "organizations" SET"#));
        assert!(assignments.contains(r#""email""#), "{}", assignments);
        assert!(assignments.contains(r#""updated_at""#), "{}", assignments);
        for untouched in ["saml_enabled", "session_timeout", "default_project_id", "name"] {
            let quoted = format!("\"{}\"", untouched);
            assert!(!assignments.contains(&quoted), "{} in {}", quoted, assignments);
        }
        assert!(values(update).contains(&Value::from("new@acme.test")));
    }

    #[tokio::test]
    async fn test_update_missing_organization_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<organization::Model>::new()])
            .into_connection();
        let store = OrganizationStore::new(Arc::new(db));

        let result = store
            .update("ghost", OrganizationUpdate::default())
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));

        // No write after a failed lookup
        assert_eq!(statements(store).len(), 1);
    }
}

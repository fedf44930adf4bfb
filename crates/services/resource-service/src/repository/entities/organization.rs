//! Organization database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Organization;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub assessments_enforced: bool,
    pub cost_estimation_enabled: bool,
    pub default_execution_mode: String,
    pub email: String,
    pub external_id: String,
    pub is_unified: bool,
    pub owners_team_saml_role_id: String,
    pub saml_enabled: bool,
    pub session_remember: i32,
    pub session_timeout: i32,
    pub trial_expires_at: Option<DateTimeUtc>,
    pub two_factor_conformant: bool,
    pub send_passing_statuses_for_untriggered_speculative_plans: bool,
    pub remaining_testable_count: i32,
    pub speculative_plan_management_enabled: bool,
    pub aggregated_commit_status_enabled: bool,
    pub allow_force_delete_workspaces: bool,
    /// Explicit `default-project` reference (NULL = fall back to first project)
    pub default_project_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project::Entity")]
    Projects,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// Relationships are left empty; the service attaches projects on reads
/// that need them.
impl From<Model> for Organization {
    fn from(model: Model) -> Self {
        Organization {
            name: model.name,
            assessments_enforced: model.assessments_enforced,
            cost_estimation_enabled: model.cost_estimation_enabled,
            created_at: Some(model.created_at),
            default_execution_mode: model.default_execution_mode,
            email: model.email,
            external_id: model.external_id,
            is_unified: model.is_unified,
            owners_team_saml_role_id: model.owners_team_saml_role_id,
            saml_enabled: model.saml_enabled,
            session_remember: model.session_remember,
            session_timeout: model.session_timeout,
            trial_expires_at: model.trial_expires_at,
            two_factor_conformant: model.two_factor_conformant,
            send_passing_statuses_for_untriggered_speculative_plans: model
                .send_passing_statuses_for_untriggered_speculative_plans,
            remaining_testable_count: model.remaining_testable_count,
            speculative_plan_management_enabled: model.speculative_plan_management_enabled,
            aggregated_commit_status_enabled: model.aggregated_commit_status_enabled,
            allow_force_delete_workspaces: model.allow_force_delete_workspaces,
            default_project: None,
            projects: Vec::new(),
        }
    }
}

//! Organization entity and related types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::{DEFAULT_REMAINING_TESTABLE_COUNT, DEFAULT_SESSION_MINUTES};
use crate::project::Project;

/// Organization names appear verbatim in URL paths.
static ORGANIZATION_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("organization name pattern is valid"));

/// Organization in the external vocabulary.
///
/// The JSON:API `id` of an organization is its `name`; the surrogate UUID
/// never leaves the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case", default)]
pub struct Organization {
    #[validate(
        length(min = 1, message = "Organization name cannot be empty"),
        regex(
            path = *ORGANIZATION_NAME,
            message = "Organization name may only contain letters, numbers, '-' and '_'"
        )
    )]
    pub name: String,
    pub assessments_enforced: bool,
    pub cost_estimation_enabled: bool,
    /// Assigned by the store
    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,
    pub default_execution_mode: String,
    #[validate(email(message = "Organization email must be a valid email address"))]
    pub email: String,
    pub external_id: String,
    pub is_unified: bool,
    pub owners_team_saml_role_id: String,
    pub saml_enabled: bool,
    pub session_remember: i32,
    pub session_timeout: i32,
    pub trial_expires_at: Option<DateTime<Utc>>,
    pub two_factor_conformant: bool,
    pub send_passing_statuses_for_untriggered_speculative_plans: bool,
    pub remaining_testable_count: i32,
    pub speculative_plan_management_enabled: bool,
    pub aggregated_commit_status_enabled: bool,
    pub allow_force_delete_workspaces: bool,

    /// `default-project` relationship
    #[serde(skip)]
    pub default_project: Option<Project>,
    /// `projects` relationship, loaded on single reads only
    #[serde(skip)]
    pub projects: Vec<Project>,
}

impl Default for Organization {
    fn default() -> Self {
        Self {
            name: String::new(),
            assessments_enforced: false,
            cost_estimation_enabled: false,
            created_at: None,
            default_execution_mode: String::new(),
            email: String::new(),
            external_id: String::new(),
            is_unified: false,
            owners_team_saml_role_id: String::new(),
            saml_enabled: false,
            session_remember: DEFAULT_SESSION_MINUTES,
            session_timeout: DEFAULT_SESSION_MINUTES,
            trial_expires_at: None,
            two_factor_conformant: false,
            send_passing_statuses_for_untriggered_speculative_plans: false,
            remaining_testable_count: DEFAULT_REMAINING_TESTABLE_COUNT,
            speculative_plan_management_enabled: false,
            aggregated_commit_status_enabled: false,
            allow_force_delete_workspaces: false,
            default_project: None,
            projects: Vec::new(),
        }
    }
}

impl Organization {
    /// Create an organization with the given name and contact email.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Attach loaded projects and pick the default one.
    ///
    /// The explicit reference wins when it points at a loaded project;
    /// otherwise the first project of `projects` is used. `projects` must
    /// already be in a deterministic order.
    pub fn attach_projects(&mut self, projects: Vec<Project>, default_project_id: Option<Uuid>) {
        let explicit = default_project_id
            .and_then(|id| projects.iter().find(|p| p.id == Some(id)).cloned());

        self.default_project = explicit.or_else(|| projects.first().cloned());
        self.projects = projects;
    }
}

/// Partial organization update.
///
/// Only attributes present in the request are applied. The organization
/// name is the lookup key and cannot be changed through an update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case", default)]
pub struct OrganizationUpdate {
    pub assessments_enforced: Option<bool>,
    pub cost_estimation_enabled: Option<bool>,
    pub default_execution_mode: Option<String>,
    #[validate(email(message = "Organization email must be a valid email address"))]
    pub email: Option<String>,
    pub external_id: Option<String>,
    pub is_unified: Option<bool>,
    pub owners_team_saml_role_id: Option<String>,
    pub saml_enabled: Option<bool>,
    pub session_remember: Option<i32>,
    pub session_timeout: Option<i32>,
    pub trial_expires_at: Option<DateTime<Utc>>,
    pub two_factor_conformant: Option<bool>,
    pub send_passing_statuses_for_untriggered_speculative_plans: Option<bool>,
    pub remaining_testable_count: Option<i32>,
    pub speculative_plan_management_enabled: Option<bool>,
    pub aggregated_commit_status_enabled: Option<bool>,
    pub allow_force_delete_workspaces: Option<bool>,

    /// Target of the `default-project` relationship, when supplied
    #[serde(skip)]
    pub default_project_id: Option<Uuid>,
}

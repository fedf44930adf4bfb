//! Organization entitlement set.

use serde::{Deserialize, Serialize};

/// Feature entitlements of an organization.
///
/// Not persisted. Every flag is currently granted regardless of the
/// organization's plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub struct Entitlements {
    /// JSON:API `id`, the organization name
    #[serde(skip)]
    pub id: String,
    pub agents: bool,
    pub audit_logging: bool,
    pub cost_estimation: bool,
    pub global_run_tasks: bool,
    pub operations: bool,
    pub private_module_registry: bool,
    pub private_run_tasks: bool,
    pub run_tasks: bool,
    pub sso: bool,
    pub sentinel: bool,
    pub state_storage: bool,
    pub teams: bool,
    pub vcs_integrations: bool,
    pub waypoint_actions: bool,
    pub waypoint_templates_and_addons: bool,
}

impl Entitlements {
    /// Entitlement set with every feature enabled.
    pub fn all_enabled(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            agents: true,
            audit_logging: true,
            cost_estimation: true,
            global_run_tasks: true,
            operations: true,
            private_module_registry: true,
            private_run_tasks: true,
            run_tasks: true,
            sso: true,
            sentinel: true,
            state_storage: true,
            teams: true,
            vcs_integrations: true,
            waypoint_actions: true,
            waypoint_templates_and_addons: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_flag_is_true() {
        let value = serde_json::to_value(Entitlements::all_enabled("acme")).unwrap();
        let flags = value.as_object().unwrap();

        assert_eq!(flags.len(), 15);
        assert!(flags.values().all(|v| v == &serde_json::Value::Bool(true)));
        assert!(flags.contains_key("vcs-integrations"));
        assert!(flags.contains_key("private-module-registry"));
    }
}

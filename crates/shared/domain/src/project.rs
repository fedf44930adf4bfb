//! Project entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Project in the external vocabulary.
///
/// Projects are always owned by exactly one organization. The owning
/// organization is exposed as the `organization` relationship, identified
/// by the organization's name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case", default)]
pub struct Project {
    /// Surrogate identifier (JSON:API `id`), `None` until persisted
    #[serde(skip)]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, message = "Project name cannot be empty"))]
    pub name: String,
    pub description: String,
    pub is_unified: bool,
    /// Assigned by the store
    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,

    /// Owning organization's surrogate id, resolved from its name
    #[serde(skip)]
    pub organization_id: Option<Uuid>,
    /// Owning organization's name, used for the `organization` relationship
    #[serde(skip)]
    pub organization_name: Option<String>,
}

impl Project {
    /// Create a project with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

//! Domain-level constants.
//!
//! These constants define the external vocabulary shared by the mapping
//! layer and the HTTP surface.

// =============================================================================
// Resource types (JSON:API `type` member)
// =============================================================================

pub const ORGANIZATIONS_TYPE: &str = "organizations";

pub const PROJECTS_TYPE: &str = "projects";

pub const USERS_TYPE: &str = "users";

pub const ENTITLEMENT_SETS_TYPE: &str = "entitlement-sets";

// =============================================================================
// Relationship names
// =============================================================================

/// Project -> owning organization
pub const RELATIONSHIP_ORGANIZATION: &str = "organization";

/// Organization -> its default project
pub const RELATIONSHIP_DEFAULT_PROJECT: &str = "default-project";

/// Organization -> all owned projects (only present on single reads)
pub const RELATIONSHIP_PROJECTS: &str = "projects";

// =============================================================================
// Organization defaults
// =============================================================================

/// Session remember/timeout default in minutes (14 days)
pub const DEFAULT_SESSION_MINUTES: i32 = 20160;

/// Default remaining testable count for new organizations
pub const DEFAULT_REMAINING_TESTABLE_COUNT: i32 = 0;

// =============================================================================
// Authentication
// =============================================================================

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

// =============================================================================
// Wire format
// =============================================================================

/// JSON:API media type used for every response body
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

//! User entity and its embedded value objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Two-factor authentication state of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case", default)]
pub struct TwoFactor {
    pub enabled: bool,
    pub verified: bool,
}

impl TwoFactor {
    /// Two-factor enabled and verified
    pub fn enabled_and_verified() -> Self {
        Self {
            enabled: true,
            verified: true,
        }
    }
}

/// Account-level permissions of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case", default)]
pub struct UserPermissions {
    pub can_create_organizations: bool,
    pub can_change_email: bool,
    pub can_change_username: bool,
    pub can_manage_user_tokens: bool,
    pub can_view_2fa_settings: bool,
    pub can_manage_hcp_account: bool,
}

impl UserPermissions {
    /// Every permission granted
    pub fn all_granted() -> Self {
        Self {
            can_create_organizations: true,
            can_change_email: true,
            can_change_username: true,
            can_manage_user_tokens: true,
            can_view_2fa_settings: true,
            can_manage_hcp_account: true,
        }
    }
}

/// User in the external vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case", default)]
pub struct User {
    /// Surrogate identifier (JSON:API `id`), `None` until persisted
    #[serde(skip)]
    pub id: Option<Uuid>,
    pub avatar_url: String,
    #[validate(email(message = "User email must be a valid email address"))]
    pub email: String,
    pub is_service_account: bool,
    pub two_factor: TwoFactor,
    pub unconfirmed_email: String,
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,
    pub is_site_admin: bool,
    pub is_admin: bool,
    pub is_sso_login: bool,
    pub permissions: UserPermissions,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a user with the given username and email.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            ..Self::default()
        }
    }
}

//! User database entity for SeaORM.
//!
//! Two-factor state and permissions are embedded as prefixed columns.

use sea_orm::entity::prelude::*;

use domain::{TwoFactor, User, UserPermissions};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub avatar_url: String,
    pub is_service_account: bool,
    pub two_factor_enabled: bool,
    pub two_factor_verified: bool,
    pub unconfirmed_email: String,
    pub is_site_admin: bool,
    pub is_admin: bool,
    pub is_sso_login: bool,
    pub permissions_can_create_organizations: bool,
    pub permissions_can_change_email: bool,
    pub permissions_can_change_username: bool,
    pub permissions_can_manage_user_tokens: bool,
    pub permissions_can_view_2fa_settings: bool,
    pub permissions_can_manage_hcp_account: bool,
    pub last_login_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: Some(model.id),
            avatar_url: model.avatar_url,
            email: model.email,
            is_service_account: model.is_service_account,
            two_factor: TwoFactor {
                enabled: model.two_factor_enabled,
                verified: model.two_factor_verified,
            },
            unconfirmed_email: model.unconfirmed_email,
            username: model.username,
            is_site_admin: model.is_site_admin,
            is_admin: model.is_admin,
            is_sso_login: model.is_sso_login,
            permissions: UserPermissions {
                can_create_organizations: model.permissions_can_create_organizations,
                can_change_email: model.permissions_can_change_email,
                can_change_username: model.permissions_can_change_username,
                can_manage_user_tokens: model.permissions_can_manage_user_tokens,
                can_view_2fa_settings: model.permissions_can_view_2fa_settings,
                can_manage_hcp_account: model.permissions_can_manage_hcp_account,
            },
            last_login_at: model.last_login_at,
        }
    }
}

/// Copy every external attribute of `user` onto an active model.
///
/// Used by both create and full-replacement update; the id and the
/// timestamps are managed by the caller.
pub(crate) fn apply(active: &mut ActiveModel, user: User) {
    use sea_orm::Set;

    active.username = Set(user.username);
    active.email = Set(user.email);
    active.avatar_url = Set(user.avatar_url);
    active.is_service_account = Set(user.is_service_account);
    active.two_factor_enabled = Set(user.two_factor.enabled);
    active.two_factor_verified = Set(user.two_factor.verified);
    active.unconfirmed_email = Set(user.unconfirmed_email);
    active.is_site_admin = Set(user.is_site_admin);
    active.is_admin = Set(user.is_admin);
    active.is_sso_login = Set(user.is_sso_login);
    active.permissions_can_create_organizations = Set(user.permissions.can_create_organizations);
    active.permissions_can_change_email = Set(user.permissions.can_change_email);
    active.permissions_can_change_username = Set(user.permissions.can_change_username);
    active.permissions_can_manage_user_tokens = Set(user.permissions.can_manage_user_tokens);
    active.permissions_can_view_2fa_settings = Set(user.permissions.can_view_2fa_settings);
    active.permissions_can_manage_hcp_account = Set(user.permissions.can_manage_hcp_account);
    active.last_login_at = Set(user.last_login_at);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_embedded_columns_convert_field_by_field() {
        let now = Utc::now();
        let model = Model {
            id: Uuid::new_v4(),
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            avatar_url: String::new(),
            is_service_account: false,
            two_factor_enabled: true,
            two_factor_verified: false,
            unconfirmed_email: String::new(),
            is_site_admin: false,
            is_admin: false,
            is_sso_login: false,
            permissions_can_create_organizations: true,
            permissions_can_change_email: false,
            permissions_can_change_username: true,
            permissions_can_manage_user_tokens: false,
            permissions_can_view_2fa_settings: true,
            permissions_can_manage_hcp_account: false,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };

        let user = User::from(model.clone());

        assert_eq!(user.id, Some(model.id));
        assert!(user.two_factor.enabled);
        assert!(!user.two_factor.verified);
        assert!(user.permissions.can_create_organizations);
        assert!(!user.permissions.can_change_email);
        assert!(user.permissions.can_view_2fa_settings);
    }
}

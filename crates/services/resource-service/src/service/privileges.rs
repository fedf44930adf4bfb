//! Account privileges of the authenticated user.

use domain::{TwoFactor, User, UserPermissions};

/// Source of the permissions and two-factor state reported for the
/// current user.
pub trait AccountPrivileges: Send + Sync {
    fn permissions(&self, user: &User) -> UserPermissions;

    fn two_factor(&self, user: &User) -> TwoFactor;
}

/// Grants every permission and reports two-factor as enabled and verified.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrantAllPrivileges;

impl AccountPrivileges for GrantAllPrivileges {
    fn permissions(&self, _user: &User) -> UserPermissions {
        UserPermissions::all_granted()
    }

    fn two_factor(&self, _user: &User) -> TwoFactor {
        TwoFactor::enabled_and_verified()
    }
}

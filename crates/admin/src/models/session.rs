//! Session-stored admin identity.

use serde::{Deserialize, Serialize};

use dewdrop_core::{AdminRole, AdminUserId, Email, Permission};

use super::admin_user::AdminUser;
use crate::error::AppError;

/// Minimal data stored in the session to identify the logged-in admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
}

impl CurrentAdmin {
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.role.has_permission(permission)
    }

    /// Fail with 403 unless the admin holds `permission`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] naming the missing permission.
    pub fn require(&self, permission: Permission) -> Result<(), AppError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            tracing::warn!(
                admin_id = %self.id,
                role = %self.role,
                %permission,
                "Permission denied"
            );
            Err(AppError::Forbidden(format!(
                "Missing permission: {permission}"
            )))
        }
    }
}

impl From<&AdminUser> for CurrentAdmin {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Response for `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(flatten)]
    pub admin: CurrentAdmin,
    /// Everything the role allows, for gating UI controls.
    pub permissions: Vec<Permission>,
}

impl From<CurrentAdmin> for SessionInfo {
    fn from(admin: CurrentAdmin) -> Self {
        let permissions = admin.role.permissions();
        Self { admin, permissions }
    }
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn admin(role: AdminRole) -> CurrentAdmin {
        CurrentAdmin {
            id: AdminUserId::new(1),
            email: Email::parse("ops@dewdrop.shop").unwrap(),
            name: "Ops".to_string(),
            role,
        }
    }

    #[test]
    fn test_require_permission() {
        let editor = admin(AdminRole::Editor);
        assert!(editor.require(Permission::EditProducts).is_ok());
        assert!(matches!(
            editor.require(Permission::DeleteProducts),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_session_info_lists_permissions() {
        let info = SessionInfo::from(admin(AdminRole::Viewer));
        assert_eq!(
            info.permissions,
            vec![Permission::ViewDashboard, Permission::ViewProducts]
        );
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["role"], "viewer");
        assert_eq!(json["email"], "ops@dewdrop.shop");
    }
}

//! Admin roles and the permissions they grant.
//!
//! Roles form a ladder: each role holds every permission of the role below
//! it plus its own.
//!
//! | role          | adds                                  |
//! |---------------|---------------------------------------|
//! | `viewer`      | `view_dashboard`, `view_products`     |
//! | `editor`      | `edit_products`                       |
//! | `admin`       | `delete_products`, `manage_categories`|
//! | `super_admin` | `manage_users`                        |

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A capability checked by route handlers and reported to the dashboard UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ViewProducts,
    EditProducts,
    DeleteProducts,
    ManageCategories,
    ManageUsers,
}

impl Permission {
    pub const ALL: [Self; 6] = [
        Self::ViewDashboard,
        Self::ViewProducts,
        Self::EditProducts,
        Self::DeleteProducts,
        Self::ManageCategories,
        Self::ManageUsers,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "view_dashboard",
            Self::ViewProducts => "view_products",
            Self::EditProducts => "edit_products",
            Self::DeleteProducts => "delete_products",
            Self::ManageCategories => "manage_categories",
            Self::ManageUsers => "manage_users",
        }
    }

    /// The lowest role holding this permission.
    #[must_use]
    pub const fn minimum_role(&self) -> AdminRole {
        match self {
            Self::ViewDashboard | Self::ViewProducts => AdminRole::Viewer,
            Self::EditProducts => AdminRole::Editor,
            Self::DeleteProducts | Self::ManageCategories => AdminRole::Admin,
            Self::ManageUsers => AdminRole::SuperAdmin,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin role with different permission levels.
///
/// Variants are declared lowest to highest so the derived `Ord` matches
/// the privilege ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Read-only access to the dashboard and catalog.
    Viewer,
    /// Can create and edit products.
    Editor,
    /// Full catalog management including deletes and categories.
    Admin,
    /// Everything, including admin user management.
    SuperAdmin,
}

impl AdminRole {
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.is_at_least(permission.minimum_role())
    }

    /// Whether this role is `other` or above it.
    #[must_use]
    pub fn is_at_least(&self, other: Self) -> bool {
        *self >= other
    }

    #[must_use]
    pub fn permissions(&self) -> Vec<Permission> {
        Permission::ALL
            .into_iter()
            .filter(|p| self.has_permission(*p))
            .collect()
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            "viewer" => Ok(Self::Viewer),
            _ => Err(format!("invalid admin role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_is_read_only() {
        let viewer = AdminRole::Viewer;
        assert!(viewer.has_permission(Permission::ViewDashboard));
        assert!(viewer.has_permission(Permission::ViewProducts));
        assert!(!viewer.has_permission(Permission::EditProducts));
        assert!(!viewer.has_permission(Permission::ManageUsers));
    }

    #[test]
    fn test_editor_cannot_delete() {
        let editor = AdminRole::Editor;
        assert!(editor.has_permission(Permission::EditProducts));
        assert!(!editor.has_permission(Permission::DeleteProducts));
        assert!(!editor.has_permission(Permission::ManageCategories));
    }

    #[test]
    fn test_admin_cannot_manage_users() {
        let admin = AdminRole::Admin;
        assert!(admin.has_permission(Permission::DeleteProducts));
        assert!(admin.has_permission(Permission::ManageCategories));
        assert!(!admin.has_permission(Permission::ManageUsers));
    }

    #[test]
    fn test_super_admin_has_everything() {
        assert_eq!(AdminRole::SuperAdmin.permissions(), Permission::ALL.to_vec());
    }

    #[test]
    fn test_permissions_grow_with_role() {
        let counts: Vec<usize> = [
            AdminRole::Viewer,
            AdminRole::Editor,
            AdminRole::Admin,
            AdminRole::SuperAdmin,
        ]
        .iter()
        .map(|r| r.permissions().len())
        .collect();
        assert_eq!(counts, vec![2, 3, 5, 6]);
    }

    #[test]
    fn test_role_roundtrip_str() {
        for role in ["super_admin", "admin", "editor", "viewer"] {
            assert_eq!(role.parse::<AdminRole>().unwrap().as_str(), role);
        }
        assert!("owner".parse::<AdminRole>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&AdminRole::SuperAdmin).unwrap(),
            "\"super_admin\""
        );
        assert_eq!(
            serde_json::to_string(&Permission::ManageCategories).unwrap(),
            "\"manage_categories\""
        );
    }

    #[test]
    fn test_is_at_least() {
        assert!(AdminRole::Admin.is_at_least(AdminRole::Editor));
        assert!(AdminRole::Admin.is_at_least(AdminRole::Admin));
        assert!(!AdminRole::Viewer.is_at_least(AdminRole::Editor));
    }
}

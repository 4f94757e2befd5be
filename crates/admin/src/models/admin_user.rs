//! Admin user domain types.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use dewdrop_core::{AdminRole, AdminUserId, Email};

/// An admin user.
///
/// `Debug` is implemented manually so the password hash never reaches logs.
#[derive(Clone)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
    /// Argon2 PHC string.
    pub password_hash: SecretString,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for AdminUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUser")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Public view of an admin user, without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUserView {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
}

impl From<&AdminUser> for AdminUserView {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Request body for creating an admin user.
#[derive(Deserialize)]
pub struct NewAdminUser {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<AdminRole>,
    pub password: Option<String>,
}

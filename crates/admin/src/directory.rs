//! In-memory admin user directory.

use chrono::Utc;
use secrecy::SecretString;
use tokio::sync::RwLock;
use tracing::info;

use dewdrop_core::{AdminRole, AdminUserId, Email};

use crate::config::BootstrapAdmin;
use crate::models::{AdminUser, AdminUserView};
use crate::services::auth::{AuthError, hash_password};

/// Admin users, keyed by normalized email.
pub struct AdminDirectory {
    users: RwLock<Vec<AdminUser>>,
    /// Verified against when the email is unknown.
    dummy_hash: SecretString,
}

impl AdminDirectory {
    /// An empty directory.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::PasswordHash`] if the dummy hash cannot be made.
    pub fn new() -> Result<Self, AuthError> {
        let dummy = uuid::Uuid::new_v4().to_string();
        Ok(Self {
            users: RwLock::new(Vec::new()),
            dummy_hash: SecretString::from(hash_password(&dummy)?),
        })
    }

    #[must_use]
    pub const fn dummy_hash(&self) -> &SecretString {
        &self.dummy_hash
    }

    /// Add the configured super admin unless that email already exists.
    pub async fn bootstrap(&self, admin: &BootstrapAdmin) {
        if self.find_by_email(&admin.email).await.is_some() {
            return;
        }
        let result = self
            .insert(
                admin.email.clone(),
                admin.name.clone(),
                AdminRole::SuperAdmin,
                admin.password_hash.clone(),
            )
            .await;
        if let Ok(user) = result {
            info!(admin_id = %user.id, email = %user.email, "Bootstrap super admin created");
        }
    }

    pub async fn find_by_email(&self, email: &Email) -> Option<AdminUser> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| &u.email == email)
            .cloned()
    }

    /// All users, oldest first, without credentials.
    pub async fn list(&self) -> Vec<AdminUserView> {
        self.users.read().await.iter().map(AdminUserView::from).collect()
    }

    /// # Errors
    ///
    /// Returns [`AuthError::UserAlreadyExists`] if the email is taken.
    pub async fn insert(
        &self,
        email: Email,
        name: String,
        role: AdminRole,
        password_hash: SecretString,
    ) -> Result<AdminUser, AuthError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::UserAlreadyExists);
        }

        let id = users
            .iter()
            .map(|u| u.id)
            .max()
            .map_or(Some(AdminUserId::new(1)), |id| id.next())
            .ok_or(AuthError::IdsExhausted)?;

        let user = AdminUser {
            id,
            email,
            name,
            role,
            password_hash,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bootstrap_admin() -> BootstrapAdmin {
        BootstrapAdmin::new(
            "founder@dewdrop.shop",
            "Founder".to_string(),
            SecretString::from(hash_password("Founder-pass-1").unwrap()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let directory = AdminDirectory::new().unwrap();
        directory.bootstrap(&bootstrap_admin()).await;
        directory.bootstrap(&bootstrap_admin()).await;

        let users = directory.list().await;
        assert_eq!(users.len(), 1);
        let founder = users.first().unwrap();
        assert_eq!(founder.role, AdminRole::SuperAdmin);
        assert_eq!(founder.id, AdminUserId::new(1));
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_rejects_duplicates() {
        let directory = AdminDirectory::new().unwrap();
        let hash = SecretString::from(hash_password("Viewer-pass-1").unwrap());

        let first = directory
            .insert(
                Email::parse("a@dewdrop.shop").unwrap(),
                "A".to_string(),
                AdminRole::Viewer,
                hash.clone(),
            )
            .await
            .unwrap();
        let second = directory
            .insert(
                Email::parse("b@dewdrop.shop").unwrap(),
                "B".to_string(),
                AdminRole::Editor,
                hash.clone(),
            )
            .await
            .unwrap();
        assert_eq!(Some(second.id), first.id.next());
        let found = directory
            .find_by_email(&Email::parse("b@dewdrop.shop").unwrap())
            .await
            .unwrap();
        assert_eq!((found.id, found.name.as_str()), (second.id, "B"));

        let duplicate = directory
            .insert(
                Email::parse("A@dewdrop.shop").unwrap(),
                "A again".to_string(),
                AdminRole::Viewer,
                hash,
            )
            .await;
        assert!(matches!(duplicate, Err(AuthError::UserAlreadyExists)));
    }
}

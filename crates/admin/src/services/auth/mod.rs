//! Admin authentication service.
//!
//! Password login against argon2id hashes held in the [`AdminDirectory`].

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument, warn};

use dewdrop_core::{AdminRole, Email};

use crate::directory::AdminDirectory;
use crate::models::{AdminUser, NewAdminUser};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 10;

/// Upper bound so hashing cost stays bounded.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Admin authentication service.
pub struct AuthService<'a> {
    users: &'a AdminDirectory,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(users: &'a AdminDirectory) -> Self {
        Self { users }
    }

    /// Verify an email and password.
    ///
    /// Unknown emails are verified against a dummy hash so both failure
    /// paths cost the same.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for any mismatch.
    #[instrument(skip(self, email, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
        let user = match Email::parse(email) {
            Ok(email) => self.users.find_by_email(&email).await,
            Err(_) => None,
        };

        let Some(user) = user else {
            // Result ignored: only the hashing time matters here.
            let _ = verify_password(password, self.users.dummy_hash().expose_secret());
            warn!("Login failed for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if let Err(e) = verify_password(password, user.password_hash.expose_secret()) {
            warn!(admin_id = %user.id, "Login failed: wrong password");
            return Err(e);
        }

        info!(admin_id = %user.id, role = %user.role, "Admin logged in");
        Ok(user)
    }

    /// Validate and add a new admin user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`], [`AuthError::Validation`],
    /// [`AuthError::WeakPassword`] or [`AuthError::UserAlreadyExists`].
    #[instrument(skip(self, input))]
    pub async fn create_user(&self, input: NewAdminUser) -> Result<AdminUser, AuthError> {
        let email = input
            .email
            .as_deref()
            .ok_or_else(|| AuthError::Validation("email is required".to_string()))
            .and_then(|raw| Email::parse(raw).map_err(AuthError::from))?;

        let name = input
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AuthError::Validation("name is required".to_string()))?
            .to_string();

        let password = input
            .password
            .ok_or_else(|| AuthError::Validation("password is required".to_string()))?;
        validate_password(&password)?;

        let role = input.role.unwrap_or(AdminRole::Viewer);
        let hash = SecretString::from(hash_password(&password)?);

        let user = self.users.insert(email, name, role, hash).await?;
        info!(admin_id = %user.id, role = %user.role, "Admin user created");
        Ok(user)
    }
}

/// Check password length and that it mixes at least two character classes.
///
/// # Errors
///
/// Returns [`AuthError::WeakPassword`] describing the failed rule.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at most {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    let classes = [
        password.chars().any(|c| c.is_lowercase()),
        password.chars().any(|c| c.is_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_alphanumeric()),
    ];
    if classes.iter().filter(|present| **present).count() < 2 {
        return Err(AuthError::WeakPassword(
            "password must mix letters, digits or symbols".to_string(),
        ));
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns [`AuthError::PasswordHash`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a PHC hash.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] on mismatch or a malformed hash.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

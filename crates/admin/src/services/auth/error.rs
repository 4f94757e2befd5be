//! Admin authentication error types.

use thiserror::Error;

/// Errors that can occur during admin authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] dewdrop_core::EmailError),

    /// Input failed field validation.
    #[error("{0}")]
    Validation(String),

    #[error("Weak password: {0}")]
    WeakPassword(String),

    #[error("An admin user with this email already exists")]
    UserAlreadyExists,

    #[error("No admin user ids left")]
    IdsExhausted,

    #[error("Password hashing failed")]
    PasswordHash,
}

//! Admin credential commands.
//!
//! # Usage
//!
//! ```bash
//! dd-cli admin hash-password --password 'correct-horse-2026'
//! echo 'correct-horse-2026' | dd-cli admin hash-password
//! ```
//!
//! The printed PHC string goes in `ADMIN_BOOTSTRAP_PASSWORD_HASH`.

use std::io::{BufRead, Write};

use dewdrop_admin::services::auth::{self, AuthError};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors that can occur during admin commands.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("No password given on stdin")]
    EmptyInput,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validate and hash a password, printing the hash to stdout.
///
/// # Errors
///
/// Returns an error if the password is missing, too weak, or hashing fails.
pub fn hash_password(password: Option<String>) -> Result<(), AdminError> {
    let password = match password {
        Some(password) => SecretString::from(password),
        None => read_password(std::io::stdin().lock())?,
    };

    let hash = hash(&password)?;
    writeln!(std::io::stdout().lock(), "{hash}")?;
    tracing::info!("Set ADMIN_BOOTSTRAP_PASSWORD_HASH to the value above");
    Ok(())
}

fn hash(password: &SecretString) -> Result<String, AdminError> {
    auth::validate_password(password.expose_secret())?;
    Ok(auth::hash_password(password.expose_secret())?)
}

/// Read the first line, without its line ending.
fn read_password(mut input: impl BufRead) -> Result<SecretString, AdminError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(AdminError::EmptyInput);
    }
    Ok(SecretString::from(password.to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_password_strips_newline() {
        let password = read_password("Glow-serum-2026\r\n".as_bytes()).unwrap();
        assert_eq!(password.expose_secret(), "Glow-serum-2026");
    }

    #[test]
    fn test_read_password_rejects_empty_input() {
        assert!(matches!(
            read_password("\n".as_bytes()),
            Err(AdminError::EmptyInput)
        ));
    }

    #[test]
    fn test_hash_verifies() {
        let password = SecretString::from("Glow-serum-2026");
        let hash = hash(&password).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        auth::verify_password("Glow-serum-2026", &hash).unwrap();
    }

    #[test]
    fn test_weak_password_is_rejected() {
        let password = SecretString::from("short");
        assert!(matches!(
            hash(&password),
            Err(AdminError::Auth(AuthError::WeakPassword(_)))
        ));
    }
}

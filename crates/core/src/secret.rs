//! Strength checks for secrets loaded from the environment.
//!
//! Both binaries refuse to start with an API token or preview secret that
//! is obviously a placeholder or has too little entropy to be random.

use std::collections::HashMap;

/// Minimum Shannon entropy for a secret, in bits per character.
pub const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Case-insensitive substrings that mark a copied-from-docs placeholder.
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SecretError {
    #[error("appears to be a placeholder (contains '{0}')")]
    Placeholder(&'static str),
    #[error("entropy too low ({0:.2} bits/char, need >= 3.3). Use a randomly generated secret.")]
    LowEntropy(f64),
    #[error("must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },
}

/// Shannon entropy of `s` in bits per character.
#[must_use]
pub fn shannon_entropy(s: &str) -> f64 {
    let total = s.chars().count();
    if total == 0 {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // secret lengths are tiny
    let len = total as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Reject placeholders and low-entropy values.
///
/// # Errors
///
/// Returns [`SecretError::Placeholder`] or [`SecretError::LowEntropy`].
pub fn validate_strength(secret: &str) -> Result<(), SecretError> {
    let lower = secret.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(SecretError::Placeholder(*pattern));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(SecretError::LowEntropy(entropy));
    }

    Ok(())
}

/// Require a minimum length in characters.
///
/// # Errors
///
/// Returns [`SecretError::TooShort`].
pub fn validate_min_length(secret: &str, min: usize) -> Result<(), SecretError> {
    let actual = secret.chars().count();
    if actual < min {
        return Err(SecretError::TooShort { min, actual });
    }
    Ok(())
}

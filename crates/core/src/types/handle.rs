//! URL-safe handles (slugs) for products and categories.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    #[error("handle cannot be empty")]
    Empty,
    #[error("handle must be at most {max} characters")]
    TooLong { max: usize },
    #[error("handle may only contain lowercase letters, digits and single hyphens")]
    InvalidCharacters,
}

/// A URL-safe identifier such as `hydrating-rose-serum`.
///
/// Lowercase ASCII letters and digits separated by single hyphens, with no
/// leading or trailing hyphen.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    pub const MAX_LENGTH: usize = 100;

    /// Parse an already-formed handle.
    ///
    /// # Errors
    ///
    /// Returns a [`HandleError`] if the input is not a valid handle. Use
    /// [`Handle::from_title`] to derive one from free text instead.
    pub fn parse(s: &str) -> Result<Self, HandleError> {
        if s.is_empty() {
            return Err(HandleError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(HandleError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let valid_chars = s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
        if !valid_chars || s.starts_with('-') || s.ends_with('-') || s.contains("--") {
            return Err(HandleError::InvalidCharacters);
        }

        Ok(Self(s.to_owned()))
    }

    /// Derive a handle from a product or category name.
    ///
    /// Common Latin accents are folded (`Crème` -> `creme`), every other run
    /// of non-alphanumeric characters becomes a single hyphen.
    ///
    /// ```
    /// use dewdrop_core::Handle;
    ///
    /// let handle = Handle::from_title("Crème Brûlée Lip Balm (15ml)").unwrap();
    /// assert_eq!(handle.as_str(), "creme-brulee-lip-balm-15ml");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`HandleError::Empty`] if nothing usable remains.
    pub fn from_title(title: &str) -> Result<Self, HandleError> {
        let mut slug = String::with_capacity(title.len());
        let mut pending_hyphen = false;

        for c in title.chars().flat_map(char::to_lowercase) {
            let c = fold_accent(c);
            if c.is_ascii_alphanumeric() {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(c);
            } else {
                pending_hyphen = true;
            }
        }

        if slug.len() > Self::MAX_LENGTH {
            slug.truncate(Self::MAX_LENGTH);
            while slug.ends_with('-') {
                slug.pop();
            }
        }

        Self::parse(&slug)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Append a numeric suffix, used to make a derived handle unique.
    #[must_use]
    pub fn with_suffix(&self, n: u32) -> Self {
        let suffix = format!("-{n}");
        let mut base = self.0.clone();
        base.truncate(Self::MAX_LENGTH.saturating_sub(suffix.len()));
        while base.ends_with('-') {
            base.pop();
        }
        Self(base + &suffix)
    }
}

const fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Handle {
    type Err = HandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Handle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

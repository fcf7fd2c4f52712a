//! Path-safe post identifiers

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Characters forbidden in slugs to prevent path traversal.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', '\0'];

/// A post identifier, used verbatim as the file stem of the stored
/// `<slug>.md` file.
///
/// Construction rejects values that could escape the posts directory:
/// empty strings, path separators, NUL, and the `.`/`..` components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let valid = !value.is_empty()
            && value != "."
            && value != ".."
            && !value.contains(FORBIDDEN_CHARS);

        if valid {
            Ok(Self(value))
        } else {
            Err(Error::InvalidSlug(value))
        }
    }

    /// Derive a slug from a stored file name, stripping a trailing `.md`.
    /// File names without the suffix are used verbatim.
    pub fn from_file_name(name: &str) -> Result<Self> {
        Self::new(name.strip_suffix(".md").unwrap_or(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the backing file.
    pub fn file_name(&self) -> String {
        format!("{}.md", self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Slug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

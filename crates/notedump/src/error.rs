//! Error types for relay configuration and resolution.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating and mutating relay configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Relay URL failed validation.
    #[error("invalid relay URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending input string.
        url: String,
        /// Which rule it violated (wrong scheme vs. unparseable).
        reason: String,
    },

    /// Several relay URLs failed validation in one batch.
    #[error("invalid relay URLs:{}", bullet_list(.violations))]
    InvalidUrls {
        /// One formatted violation per offending URL.
        violations: Vec<String>,
    },

    /// Alias or set name contains disallowed characters.
    #[error("invalid name '{name}': names may contain only letters, digits, '-' and '_'")]
    InvalidName {
        /// The offending name.
        name: String,
    },

    /// A named relay set does not exist.
    #[error("no relay set named '{name}'")]
    SetNotFound {
        /// The missing set name.
        name: String,
    },

    /// Source and destination of a copy/rename are the same set.
    #[error("source and destination are both '{name}'")]
    SelfReference {
        /// The repeated name.
        name: String,
    },

    /// The persisted config document failed structural validation.
    #[error("config file {} failed validation:{}", .file.display(), bullet_list(.violations))]
    Schema {
        /// Path of the offending file.
        file: PathBuf,
        /// Every violated field path with the rule it broke.
        violations: Vec<SchemaViolation>,
    },

    /// YAML parse error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One structural rule violation in the persisted config document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Dotted field path, e.g. `relay.aliases.mine`.
    pub path: String,
    /// Human-readable rule that the field violated.
    pub rule: String,
}

impl SchemaViolation {
    pub(crate) fn new(path: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            rule: rule.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.rule)
    }
}

/// Render a violation list as indented bullet lines.
fn bullet_list<T: fmt::Display>(items: &[T]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str("\n  - ");
        out.push_str(&item.to_string());
    }
    out
}

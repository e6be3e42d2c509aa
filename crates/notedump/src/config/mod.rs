//! Persistent relay configuration.
//!
//! The configuration is a single YAML document at a fixed per-user location:
//!
//! ```yaml
//! relay:
//!   aliases:
//!     mine: wss://relay.example.com
//!   sets:
//!     team:
//!       - wss://relay.damus.io
//!       - wss://nos.lol
//! ```
//!
//! One [`Config`] instance is loaded per process invocation, mutated in
//! place through the [`AliasStore`] and [`SetStore`] handles, and written
//! back explicitly with [`Config::save`]. A missing file is not an error;
//! it loads as an empty configuration. A file that exists but does not
//! match the expected shape fails with every violated field path listed at
//! once, so the user can fix the whole file in one pass.
//!
//! Stored URLs are always in normalized form: validation normalizes as a
//! side effect of parsing, and all mutation goes through the store handles.

mod alias;
mod name;
mod set;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_yaml::Value;

use crate::error::{Error, Result, SchemaViolation};
use crate::relay::specifier::Resolver;
use crate::relay::url::normalize_relay_url;

pub use alias::AliasStore;
pub use name::{ensure_valid_name, is_valid_name};
pub use set::SetStore;

/// The root persisted configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Config {
    relay: RelaySection,
}

/// Relay aliases and relay sets.
///
/// Fields are private: mutation goes through [`AliasStore`] and
/// [`SetStore`], reads for resolution go through the crate-internal
/// accessors below.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub(crate) struct RelaySection {
    aliases: BTreeMap<String, String>,
    sets: BTreeMap<String, Vec<String>>,
}

impl RelaySection {
    pub(crate) fn alias_url(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub(crate) fn set_members(&self, name: &str) -> Option<&[String]> {
        self.sets.get(name).map(Vec::as_slice)
    }
}

impl Config {
    /// Default per-user config file location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notedump")
            .join("config.yml")
    }

    /// Load the configuration from `path`.
    ///
    /// A missing file yields the default (empty) configuration. A present
    /// but malformed file fails with every schema violation enumerated.
    pub async fn load(path: &Path) -> Result<Self> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config file at {}, starting empty", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let config = Self::parse_document(&text, path)?;
        tracing::debug!(
            aliases = config.relay.aliases.len(),
            sets = config.relay.sets.len(),
            "loaded config from {}",
            path.display()
        );
        Ok(config)
    }

    /// Serialize the configuration and write it to `path`, creating parent
    /// directories as needed. Full overwrite; last writer wins.
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let text = serde_yaml::to_string(self)?;
        tokio::fs::write(path, text).await?;
        tracing::debug!("saved config to {}", path.display());
        Ok(())
    }

    /// Mutable handle over the alias mapping.
    pub fn aliases(&mut self) -> AliasStore<'_> {
        AliasStore::new(&mut self.relay)
    }

    /// Mutable handle over the set mapping.
    pub fn sets(&mut self) -> SetStore<'_> {
        SetStore::new(&mut self.relay)
    }

    /// Read-only resolver over the current aliases and sets.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.relay)
    }

    /// Parse and validate a YAML config document.
    fn parse_document(text: &str, path: &Path) -> Result<Self> {
        let doc: Value = serde_yaml::from_str(text)?;
        let mut violations = Vec::new();
        let relay = validate_document(&doc, &mut violations);
        if violations.is_empty() {
            Ok(Self { relay })
        } else {
            Err(Error::Schema {
                file: path.to_path_buf(),
                violations,
            })
        }
    }
}

/// Walk the raw document, collecting every shape violation.
///
/// Returns the validated section; it is only meaningful when `violations`
/// stays empty. Unknown keys are ignored.
fn validate_document(doc: &Value, violations: &mut Vec<SchemaViolation>) -> RelaySection {
    let mut section = RelaySection::default();

    if doc.is_null() {
        return section;
    }
    if !doc.is_mapping() {
        violations.push(SchemaViolation::new("(root)", "expected a mapping"));
        return section;
    }

    match doc.get("relay") {
        None | Some(Value::Null) => {}
        Some(relay) if !relay.is_mapping() => {
            violations.push(SchemaViolation::new("relay", "expected a mapping"));
        }
        Some(relay) => {
            validate_aliases(relay.get("aliases"), violations, &mut section.aliases);
            validate_sets(relay.get("sets"), violations, &mut section.sets);
        }
    }

    section
}

fn validate_aliases(
    node: Option<&Value>,
    violations: &mut Vec<SchemaViolation>,
    aliases: &mut BTreeMap<String, String>,
) {
    let node = match node {
        None | Some(Value::Null) => return,
        Some(node) => node,
    };
    let Some(map) = node.as_mapping() else {
        violations.push(SchemaViolation::new(
            "relay.aliases",
            "expected a mapping of alias name to relay URL",
        ));
        return;
    };

    for (key, value) in map {
        let Some(alias) = key.as_str() else {
            violations.push(SchemaViolation::new(
                "relay.aliases",
                "alias names must be strings",
            ));
            continue;
        };
        let path = format!("relay.aliases.{alias}");
        if !is_valid_name(alias) {
            violations.push(SchemaViolation::new(
                path,
                "alias names may contain only letters, digits, '-' and '_'",
            ));
            continue;
        }
        let Some(url) = value.as_str() else {
            violations.push(SchemaViolation::new(path, "expected a relay URL string"));
            continue;
        };
        match normalize_relay_url(url) {
            Ok(url) => {
                aliases.insert(alias.to_string(), url);
            }
            Err(e) => violations.push(SchemaViolation::new(path, e.to_string())),
        }
    }
}

fn validate_sets(
    node: Option<&Value>,
    violations: &mut Vec<SchemaViolation>,
    sets: &mut BTreeMap<String, Vec<String>>,
) {
    let node = match node {
        None | Some(Value::Null) => return,
        Some(node) => node,
    };
    let Some(map) = node.as_mapping() else {
        violations.push(SchemaViolation::new(
            "relay.sets",
            "expected a mapping of set name to a list of relay URLs",
        ));
        return;
    };

    for (key, value) in map {
        let Some(set_name) = key.as_str() else {
            violations.push(SchemaViolation::new(
                "relay.sets",
                "set names must be strings",
            ));
            continue;
        };
        let path = format!("relay.sets.{set_name}");
        if !is_valid_name(set_name) {
            violations.push(SchemaViolation::new(
                path,
                "set names may contain only letters, digits, '-' and '_'",
            ));
            continue;
        }
        let Some(items) = value.as_sequence() else {
            violations.push(SchemaViolation::new(path, "expected a list of relay URLs"));
            continue;
        };

        // Members are deduplicated by normalized form, first occurrence kept.
        let mut members: Vec<String> = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let item_path = format!("{path}[{i}]");
            let Some(url) = item.as_str() else {
                violations.push(SchemaViolation::new(item_path, "expected a relay URL string"));
                continue;
            };
            match normalize_relay_url(url) {
                Ok(url) => {
                    if !members.contains(&url) {
                        members.push(url);
                    }
                }
                Err(e) => violations.push(SchemaViolation::new(item_path, e.to_string())),
            }
        }

        // Empty sets are not a representable persisted state.
        if !members.is_empty() {
            sets.insert(set_name.to_string(), members);
        }
    }
}

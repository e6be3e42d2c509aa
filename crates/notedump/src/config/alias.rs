//! Alias store: named shortcuts for single relay URLs.

use std::collections::BTreeMap;

use super::RelaySection;
use super::name::ensure_valid_name;
use crate::error::Result;
use crate::relay::url::normalize_relay_url;

/// Mutable handle over the alias mapping.
///
/// All alias mutation goes through this store; stored URLs are always in
/// normalized form.
pub struct AliasStore<'a> {
    relay: &'a mut RelaySection,
}

impl<'a> AliasStore<'a> {
    pub(crate) fn new(relay: &'a mut RelaySection) -> Self {
        Self { relay }
    }

    /// Snapshot copy of the full alias mapping.
    pub fn list(&self) -> BTreeMap<String, String> {
        self.relay.aliases.clone()
    }

    /// The URL an alias points to, if registered.
    pub fn get(&self, alias: &str) -> Option<String> {
        self.relay.alias_url(alias).map(str::to_string)
    }

    /// Whether an alias is registered.
    pub fn has(&self, alias: &str) -> bool {
        self.relay.alias_url(alias).is_some()
    }

    /// Register an alias, overwriting any existing entry.
    ///
    /// The name is validated first, then the URL; the URL is stored in
    /// normalized form.
    pub fn set(&mut self, alias: &str, url: &str) -> Result<()> {
        ensure_valid_name(alias)?;
        let url = normalize_relay_url(url)?;
        tracing::debug!(alias = %alias, url = %url, "alias set");
        self.relay.aliases.insert(alias.to_string(), url);
        Ok(())
    }

    /// Remove an alias. Returns whether an entry existed and was removed.
    pub fn unset(&mut self, alias: &str) -> bool {
        self.relay.aliases.remove(alias).is_some()
    }
}

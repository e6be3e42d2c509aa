//! Set store: named collections of distinct relay URLs.

use std::collections::BTreeMap;

use super::RelaySection;
use super::name::ensure_valid_name;
use crate::error::{Error, Result};
use crate::relay::url::normalize_relay_urls;

/// Mutable handle over the set mapping.
///
/// Members of one set are pairwise distinct by normalized form, and a set
/// with zero members is never kept: removal that empties a set deletes the
/// set entry itself. Merge order is stable: existing members first, newly
/// added URLs after them in input order.
pub struct SetStore<'a> {
    relay: &'a mut RelaySection,
}

impl<'a> SetStore<'a> {
    pub(crate) fn new(relay: &'a mut RelaySection) -> Self {
        Self { relay }
    }

    /// Snapshot copy of the full set mapping.
    pub fn list_all(&self) -> BTreeMap<String, Vec<String>> {
        self.relay.sets.clone()
    }

    /// Copy of one set's members, if the set exists.
    pub fn relays_of(&self, name: &str) -> Option<Vec<String>> {
        self.relay.sets.get(name).cloned()
    }

    /// Whether a set exists.
    pub fn has(&self, name: &str) -> bool {
        self.relay.sets.contains_key(name)
    }

    /// Union `urls` into the named set, creating it if absent.
    ///
    /// Every URL is validated up front (all violations aggregated into one
    /// error) and normalized before the union. Returns whether the set's
    /// membership actually changed.
    pub fn add_relay_urls(&mut self, name: &str, urls: &[impl AsRef<str>]) -> Result<bool> {
        ensure_valid_name(name)?;
        let urls = normalize_relay_urls(urls)?;
        if urls.is_empty() {
            return Ok(false);
        }

        let members = self.relay.sets.entry(name.to_string()).or_default();
        let mut changed = false;
        for url in urls {
            if !members.contains(&url) {
                members.push(url);
                changed = true;
            }
        }
        if changed {
            tracing::debug!(set = %name, members = members.len(), "relay set updated");
        }
        Ok(changed)
    }

    /// Remove `urls` (compared by normalized form) from the named set.
    ///
    /// A missing set is a no-op returning false. Returns whether membership
    /// changed; if removal empties the set, the set entry itself is deleted.
    pub fn remove_relay_urls(&mut self, name: &str, urls: &[impl AsRef<str>]) -> Result<bool> {
        if !self.relay.sets.contains_key(name) {
            return Ok(false);
        }
        let remove = normalize_relay_urls(urls)?;

        let Some(members) = self.relay.sets.get_mut(name) else {
            return Ok(false);
        };
        let before = members.len();
        members.retain(|m| !remove.contains(m));
        let changed = members.len() != before;

        if members.is_empty() {
            self.relay.sets.remove(name);
            tracing::debug!(set = %name, "relay set emptied and deleted");
        }
        Ok(changed)
    }

    /// Delete a set. Returns false if it did not exist.
    pub fn delete(&mut self, name: &str) -> bool {
        self.relay.sets.remove(name).is_some()
    }

    /// Copy `src`'s current membership to `dst`.
    ///
    /// Self-copy is rejected, `dst` must pass name validation, and `src`
    /// must exist. An existing `dst` is silently overwritten; `src` is
    /// untouched.
    pub fn copy(&mut self, src: &str, dst: &str) -> Result<()> {
        if src == dst {
            return Err(Error::SelfReference {
                name: src.to_string(),
            });
        }
        ensure_valid_name(dst)?;
        let members = self
            .relay
            .sets
            .get(src)
            .cloned()
            .ok_or_else(|| Error::SetNotFound {
                name: src.to_string(),
            })?;
        self.relay.sets.insert(dst.to_string(), members);
        Ok(())
    }

    /// Rename `old` to `new`: `new` receives `old`'s membership and `old`
    /// is deleted. Guards match [`SetStore::copy`].
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Err(Error::SelfReference {
                name: old.to_string(),
            });
        }
        ensure_valid_name(new)?;
        let members = self
            .relay
            .sets
            .remove(old)
            .ok_or_else(|| Error::SetNotFound {
                name: old.to_string(),
            })?;
        self.relay.sets.insert(new.to_string(), members);
        tracing::debug!(old = %old, new = %new, "relay set renamed");
        Ok(())
    }
}

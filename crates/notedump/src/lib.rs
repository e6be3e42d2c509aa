//! Relay configuration and specifier resolution for the notedump CLI.
//!
//! notedump dumps Nostr events from a set of relays. This crate holds the
//! part with the invariants: the persistent configuration of relay aliases
//! and relay sets, and the resolver that turns mixed user specifiers into a
//! validated endpoint list.
//!
//! # Modules
//!
//! - [`config`] - Persisted configuration, alias store, set store
//! - [`relay`] - URL normalization/validation and specifier resolution
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   Persistence    │  YAML document at the per-user config path
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │      Config      │  one owned instance per process invocation
//! └────────┬─────────┘
//!          │
//!    ┌─────┴──────┬─────────────┐
//!    ▼            ▼             ▼
//! AliasStore   SetStore      Resolver
//! (mutates)    (mutates)    (read-only)
//! ```
//!
//! All mutation flows through the two store handles, which validate names
//! and URLs and keep stored URLs in normalized form. The resolver reads
//! both stores and never mutates.

pub mod config;
pub mod error;
pub mod relay;

// Re-export commonly used types at crate root
pub use config::{AliasStore, Config, SetStore, ensure_valid_name, is_valid_name};
pub use error::{Error, Result, SchemaViolation};
pub use relay::specifier::{RelaySpecifier, ResolveError, Resolver};
pub use relay::url::{is_valid_relay_url, normalize_relay_url, normalize_relay_urls};

//! Relay URL handling and specifier resolution.

pub mod specifier;
pub mod url;

pub use specifier::{RelaySpecifier, ResolveError, Resolver};
pub use url::{is_valid_relay_url, normalize_relay_url, normalize_relay_urls};

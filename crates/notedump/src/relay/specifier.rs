//! Relay specifier classification and resolution.
//!
//! A relay specifier is one user-supplied string naming one or more relay
//! endpoints. Classification tries, in order:
//!
//! 1. a literal relay URL (`wss://relay.example.com`)
//! 2. a set spread (`...team`), expanding to every member of the set
//! 3. an alias name (`mine`)
//!
//! Anything else is unrecognized. Resolution walks the whole specifier
//! list, collecting one error per bad specifier instead of stopping at the
//! first, and fails as a batch when any specifier failed: the caller either
//! gets every endpoint or every diagnostic, never a partial list.

use thiserror::Error;

use crate::config::RelaySection;
use crate::config::is_valid_name;
use crate::relay::url::normalize_relay_url;

/// Prefix marking a set-spread specifier.
const SPREAD_PREFIX: &str = "...";

/// A single relay specifier, classified by syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelaySpecifier {
    /// A literal relay URL, already normalized.
    Url(String),
    /// A `...name` reference to every member of a set.
    Spread(String),
    /// An alias name.
    Alias(String),
}

impl RelaySpecifier {
    /// Classify a raw specifier string, or `None` if it is neither a relay
    /// URL, a set spread, nor a well-formed alias name.
    pub fn classify(input: &str) -> Option<Self> {
        if let Ok(url) = normalize_relay_url(input) {
            return Some(Self::Url(url));
        }
        if let Some(name) = input.strip_prefix(SPREAD_PREFIX) {
            if is_valid_name(name) {
                return Some(Self::Spread(name.to_string()));
            }
        }
        if is_valid_name(input) {
            return Some(Self::Alias(input.to_string()));
        }
        None
    }
}

/// Why one specifier failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A `...name` spread referenced a set that does not exist.
    #[error("no relay set named '{0}' (from '...{0}')")]
    SetNotFound(String),
    /// A specifier looked like an alias but none is registered.
    #[error("no alias named '{0}'")]
    AliasNotFound(String),
    /// The specifier is not a URL, a spread, or an alias name.
    #[error("'{0}' is not a relay URL, a '...set' spread, or an alias")]
    Unrecognized(String),
}

/// Read-only resolver over the configured aliases and sets.
pub struct Resolver<'a> {
    relay: &'a RelaySection,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(relay: &'a RelaySection) -> Self {
        Self { relay }
    }

    /// Resolve a list of specifiers into a deduplicated URL list.
    ///
    /// On success the URLs are in first-occurrence order across the input.
    /// If any specifier fails, the whole batch fails with one error per
    /// offending specifier and the partial successes are discarded.
    pub fn resolve<S: AsRef<str>>(
        &self,
        specifiers: &[S],
    ) -> std::result::Result<Vec<String>, Vec<ResolveError>> {
        let mut urls: Vec<String> = Vec::new();
        let mut errors = Vec::new();

        for specifier in specifiers {
            let specifier = specifier.as_ref();
            match RelaySpecifier::classify(specifier) {
                Some(RelaySpecifier::Url(url)) => push_unique(&mut urls, url),
                Some(RelaySpecifier::Spread(name)) => match self.relay.set_members(&name) {
                    Some(members) => {
                        for url in members {
                            push_unique(&mut urls, url.clone());
                        }
                    }
                    None => errors.push(ResolveError::SetNotFound(name)),
                },
                Some(RelaySpecifier::Alias(name)) => match self.relay.alias_url(&name) {
                    Some(url) => push_unique(&mut urls, url.to_string()),
                    None => errors.push(ResolveError::AliasNotFound(name)),
                },
                None => errors.push(ResolveError::Unrecognized(specifier.to_string())),
            }
        }

        if errors.is_empty() { Ok(urls) } else { Err(errors) }
    }
}

fn push_unique(urls: &mut Vec<String>, url: String) {
    if !urls.contains(&url) {
        urls.push(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn fixture() -> Config {
        let mut config = Config::default();
        config.aliases().set("mine", "wss://mine.example").unwrap();
        config.aliases().set("team", "wss://not-the-set.example").unwrap();
        config
            .sets()
            .add_relay_urls("team", &["wss://a.example", "wss://b.example"])
            .unwrap();
        config
    }

    #[test]
    fn test_classify_precedence() {
        assert_eq!(
            RelaySpecifier::classify("wss://Relay.Example.COM/"),
            Some(RelaySpecifier::Url("wss://relay.example.com".to_string()))
        );
        assert_eq!(
            RelaySpecifier::classify("...team"),
            Some(RelaySpecifier::Spread("team".to_string()))
        );
        assert_eq!(
            RelaySpecifier::classify("team"),
            Some(RelaySpecifier::Alias("team".to_string()))
        );
        // A spread whose name fails the grammar is unrecognized, not an alias
        assert_eq!(RelaySpecifier::classify("...bad name"), None);
        assert_eq!(RelaySpecifier::classify("https://x.example"), None);
    }

    #[test]
    fn test_resolve_literal_and_alias() {
        let config = fixture();
        let urls = config
            .resolver()
            .resolve(&["wss://lit.example/", "mine"])
            .unwrap();
        assert_eq!(urls, ["wss://lit.example", "wss://mine.example"]);
    }

    #[test]
    fn test_spread_takes_the_set_not_the_alias() {
        // "team" names both an alias and a set; the spread syntax picks the
        // set, the bare name picks the alias.
        let config = fixture();
        let resolver = config.resolver();

        let urls = resolver.resolve(&["...team"]).unwrap();
        assert_eq!(urls, ["wss://a.example", "wss://b.example"]);

        let urls = resolver.resolve(&["team"]).unwrap();
        assert_eq!(urls, ["wss://not-the-set.example"]);
    }

    #[test]
    fn test_resolve_is_all_or_nothing() {
        let config = fixture();
        let errors = config
            .resolver()
            .resolve(&["wss://lit.example", "nosuchalias"])
            .unwrap_err();
        assert_eq!(errors, [ResolveError::AliasNotFound("nosuchalias".to_string())]);
    }

    #[test]
    fn test_resolve_collects_every_error() {
        let config = fixture();
        let errors = config
            .resolver()
            .resolve(&["...ghost", "nosuchalias", "!!!", "mine"])
            .unwrap_err();
        assert_eq!(
            errors,
            [
                ResolveError::SetNotFound("ghost".to_string()),
                ResolveError::AliasNotFound("nosuchalias".to_string()),
                ResolveError::Unrecognized("!!!".to_string()),
            ]
        );
    }

    #[test]
    fn test_resolve_dedups_by_normalized_form() {
        let config = fixture();
        let urls = config
            .resolver()
            .resolve(&["wss://relay.example/", "wss://relay.example"])
            .unwrap();
        assert_eq!(urls, ["wss://relay.example"]);
    }

    #[test]
    fn test_resolve_dedups_across_specifier_kinds() {
        let config = fixture();
        // The literal URL, the alias, and a set member all collapse
        let urls = config
            .resolver()
            .resolve(&["wss://a.example", "mine", "...team"])
            .unwrap();
        assert_eq!(urls, ["wss://a.example", "wss://mine.example", "wss://b.example"]);
    }

    #[test]
    fn test_resolve_empty_input() {
        let config = fixture();
        assert_eq!(config.resolver().resolve::<&str>(&[]).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_spread_not_found_cites_the_name() {
        let config = Config::default();
        let errors = config.resolver().resolve(&["...ghost"]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("ghost"));
    }
}

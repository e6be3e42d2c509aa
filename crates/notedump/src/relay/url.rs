//! Relay URL normalization and validation.
//!
//! Relay endpoints are compared by their normalized form everywhere in this
//! crate, so that trailing slashes, host case, or an explicit default port
//! never produce duplicate entries.
//!
//! # Normalization Rules
//!
//! - Trim surrounding whitespace
//! - Require a `wss://` or `ws://` scheme
//! - Lowercase the scheme and host
//! - Drop default ports (80 for `ws`, 443 for `wss`), preserve all others
//! - Remove trailing slashes; paths and queries are otherwise preserved
//!
//! Normalization is idempotent: feeding a normalized URL back in yields the
//! same string.

use nostr::RelayUrl;

use crate::error::{Error, Result};

/// Returns true iff `url` parses as a relay URL with a websocket scheme.
pub fn is_valid_relay_url(url: &str) -> bool {
    let url = url.trim();
    (url.starts_with("wss://") || url.starts_with("ws://")) && RelayUrl::parse(url).is_ok()
}

/// Normalize a relay URL.
///
/// # Examples
///
/// ```
/// use notedump::relay::url::normalize_relay_url;
///
/// assert_eq!(
///     normalize_relay_url("wss://Relay.Example.COM/").unwrap(),
///     "wss://relay.example.com"
/// );
/// ```
pub fn normalize_relay_url(url: &str) -> Result<String> {
    let url = url.trim();

    // Quick check for websocket scheme
    if !url.starts_with("wss://") && !url.starts_with("ws://") {
        return Err(Error::InvalidUrl {
            url: url.to_string(),
            reason: "URL must start with wss:// or ws://".to_string(),
        });
    }

    let parsed = RelayUrl::parse(url).map_err(|e| Error::InvalidUrl {
        url: url.to_string(),
        reason: format!("not a parseable URL: {}", e),
    })?;

    let mut normalized = parsed.to_string();

    // Remove trailing slashes
    while normalized.ends_with('/') {
        normalized.pop();
    }

    Ok(normalized)
}

/// Normalize a list of relay URLs, aggregating every violation.
///
/// Unlike [`normalize_relay_url`], this does not stop at the first bad
/// input: all offending URLs are reported in one combined error so the
/// caller sees every problem at once.
pub fn normalize_relay_urls<S: AsRef<str>>(urls: &[S]) -> Result<Vec<String>> {
    let mut normalized = Vec::with_capacity(urls.len());
    let mut violations = Vec::new();

    for url in urls {
        match normalize_relay_url(url.as_ref()) {
            Ok(url) => normalized.push(url),
            Err(e) => violations.push(e.to_string()),
        }
    }

    if violations.is_empty() {
        Ok(normalized)
    } else {
        Err(Error::InvalidUrls { violations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trailing_slash() {
        assert_eq!(
            normalize_relay_url("wss://relay.example.com/").unwrap(),
            "wss://relay.example.com"
        );
        assert_eq!(
            normalize_relay_url("wss://relay.example.com///").unwrap(),
            "wss://relay.example.com"
        );
    }

    #[test]
    fn test_normalize_lowercases_host() {
        assert_eq!(
            normalize_relay_url("wss://Relay.Example.COM/").unwrap(),
            "wss://relay.example.com"
        );
    }

    #[test]
    fn test_normalize_preserves_path() {
        assert_eq!(
            normalize_relay_url("wss://relay.example.com/nostr/").unwrap(),
            "wss://relay.example.com/nostr"
        );
    }

    #[test]
    fn test_normalize_ports() {
        // Default ports are dropped
        assert_eq!(
            normalize_relay_url("wss://relay.example.com:443/").unwrap(),
            "wss://relay.example.com"
        );
        assert_eq!(
            normalize_relay_url("ws://relay.example.com:80").unwrap(),
            "ws://relay.example.com"
        );
        // Non-default ports are preserved
        assert_eq!(
            normalize_relay_url("wss://relay.example.com:8080/").unwrap(),
            "wss://relay.example.com:8080"
        );
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(
            normalize_relay_url("  wss://relay.example.com  ").unwrap(),
            "wss://relay.example.com"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in [
            "wss://Relay.Example.COM/",
            "wss://relay.example.com:443/",
            "ws://relay.example.com:3000/path/",
        ] {
            let once = normalize_relay_url(input).unwrap();
            assert_eq!(normalize_relay_url(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_wrong_scheme_rejected() {
        for input in ["https://relay.example.com", "relay.example.com", "ftp://x.y"] {
            let err = normalize_relay_url(input).unwrap_err();
            assert!(err.to_string().contains("wss://"), "unexpected error: {err}");
            assert!(!is_valid_relay_url(input));
        }
    }

    #[test]
    fn test_unparseable_rejected() {
        let err = normalize_relay_url("wss://").unwrap_err();
        assert!(err.to_string().contains("wss://"));
        assert!(!is_valid_relay_url("wss://"));
    }

    #[test]
    fn test_valid_relays() {
        // Common real relays should work
        assert!(is_valid_relay_url("wss://relay.damus.io"));
        assert!(is_valid_relay_url("wss://nos.lol"));
        assert!(is_valid_relay_url("ws://relay.example.com:8080"));
    }

    #[test]
    fn test_batch_aggregates_every_violation() {
        let err = normalize_relay_urls(&[
            "wss://relay.example.com",
            "https://not-websocket.example",
            "wss://",
        ])
        .unwrap_err();

        match err {
            Error::InvalidUrls { violations } => {
                assert_eq!(violations.len(), 2);
                assert!(violations[0].contains("not-websocket.example"));
                assert!(violations[1].contains("wss://"));
            }
            other => panic!("expected InvalidUrls, got {other:?}"),
        }
    }

    #[test]
    fn test_batch_success_preserves_order() {
        let urls = normalize_relay_urls(&["wss://b.example/", "wss://a.example"]).unwrap();
        assert_eq!(urls, vec!["wss://b.example", "wss://a.example"]);
    }
}

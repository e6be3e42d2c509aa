//! Alias and set name validation.

use crate::error::{Error, Result};

/// Returns true iff `name` is a valid alias or set name.
///
/// Names are non-empty and contain only ASCII letters, digits, `-` and `_`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Assert that `name` is a valid alias or set name.
pub fn ensure_valid_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(Error::InvalidName {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["team", "my-relays", "set_2", "A", "0"] {
            assert!(is_valid_name(name), "{name} should be valid");
            assert!(ensure_valid_name(name).is_ok());
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "with space", "dot.ted", "...spread", "café", "a/b"] {
            assert!(!is_valid_name(name), "{name:?} should be invalid");
            let err = ensure_valid_name(name).unwrap_err();
            assert!(err.to_string().contains("invalid name"));
        }
    }
}

//! Field validators
//!
//! A [`Validator`] maps a candidate value to `None` when it is acceptable or
//! to `Some(message)` when it is not. Validators are plain shared closures,
//! so any `Fn(&str) -> Option<String>` can be turned into one with
//! [`validator`].
//!
//! ```rust
//! use formwork::validators::{email, min, required, validator};
//!
//! let checks = [
//!     required("Required"),
//!     min("Too short", 3),
//!     email("Invalid"),
//!     validator(|v| v.contains(' ').then(|| "No spaces".to_string())),
//! ];
//!
//! let first_failure = checks.iter().find_map(|check| check("ab"));
//! assert_eq!(first_failure.as_deref(), Some("Too short"));
//! ```

use regex::Regex;
use std::sync::{Arc, LazyLock};

/// A pure check over a field value; `Some` carries the error message
pub type Validator = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// ASCII word characters only, mirroring HTML form email checks
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$")
        .expect("email pattern is a valid regex")
});

/// Wrap a closure as a [`Validator`]
pub fn validator<F>(check: F) -> Validator
where
    F: Fn(&str) -> Option<String> + Send + Sync + 'static,
{
    Arc::new(check)
}

/// Fails on the empty string
pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    validator(move |value| value.is_empty().then(|| message.clone()))
}

/// Fails unless the value has more than `threshold` characters
pub fn min(message: impl Into<String>, threshold: usize) -> Validator {
    let message = message.into();
    validator(move |value| (value.chars().count() <= threshold).then(|| message.clone()))
}

/// Fails unless the value looks like `local@domain.tld`
pub fn email(message: impl Into<String>) -> Validator {
    let message = message.into();
    validator(move |value| (!EMAIL_PATTERN.is_match(value)).then(|| message.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        let check = required("Required");
        assert_eq!(check(""), Some("Required".to_string()));
        assert_eq!(check(" "), None);
        assert_eq!(check("x"), None);
    }

    #[test]
    fn test_min_is_exclusive() {
        let check = min("Too short", 3);
        assert_eq!(check("abc"), Some("Too short".to_string()));
        assert_eq!(check("abcd"), None);
        // Counts characters, not bytes
        assert_eq!(check("äöüß"), None);
        assert_eq!(check("äöü"), Some("Too short".to_string()));
    }

    #[test]
    fn test_email() {
        let check = email("Invalid");
        assert_eq!(check("a@b.com"), None);
        assert_eq!(check("first.last-name@mail.example.org"), None);
        assert_eq!(check("a@b"), Some("Invalid".to_string()));
        assert_eq!(check(""), Some("Invalid".to_string()));
        assert_eq!(check("a@b.toolong"), Some("Invalid".to_string()));
        assert_eq!(check("no at sign.com"), Some("Invalid".to_string()));
    }

    #[test]
    fn test_email_is_stateless_across_calls() {
        let check = email("Invalid");
        for _ in 0..3 {
            assert_eq!(check("a@b.com"), None);
        }
    }

    #[test]
    fn test_custom_validator() {
        let check = validator(|v| v.starts_with('#').then(|| "No hashes".to_string()));
        assert_eq!(check("#tag"), Some("No hashes".to_string()));
        assert_eq!(check("tag"), None);
    }
}

//! Link URL handling: weak validation, submitted-URL repair, and expansion
//! of stored links into their final, parameter-substituted form.
//!
//! All functions here are pure and total. Malformed input is repaired or
//! classified, never rejected with an error.

mod entities;
mod expand;
mod normalize;
mod validate;

pub use entities::decode_entities;
pub use expand::{full_url, full_url_raw};
pub use normalize::fix_submitted;
pub use validate::{appears_valid, is_blank_or_placeholder};

/// True when the URL opens with one of the prefixes the engine treats as
/// structurally known: a local absolute path, `http:`, `https:`, or `ftp:`.
/// These get the full allow-set escaping; anything else (custom schemes like
/// `teamspeak://`) is touched as little as possible.
pub(crate) fn has_structured_prefix(url: &str) -> bool {
    url.starts_with('/')
        || starts_with_ignore_ascii_case(url, "https:")
        || starts_with_ignore_ascii_case(url, "http:")
        || starts_with_ignore_ascii_case(url, "ftp:")
}

/// True when the URL begins with a `scheme:` prefix (one or more ASCII
/// letters followed by a colon).
pub(crate) fn has_scheme(url: &str) -> bool {
    match url.find(':') {
        Some(pos) if pos > 0 => url[..pos].chars().all(|c| c.is_ascii_alphabetic()),
        _ => false,
    }
}

pub(crate) fn starts_with_ignore_ascii_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

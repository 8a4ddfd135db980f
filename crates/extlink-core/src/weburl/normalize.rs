//! Repair of submitted link URLs.

use super::entities::decode_entities;
use super::has_scheme;

/// Fixes the common problems in a submitted link so the submitter sees the
/// repaired value next time they edit the resource.
///
/// Trims whitespace, decodes HTML entities (we want the raw URI), and
/// prepends `http://` when the input has neither a `scheme:` prefix nor a
/// leading `/`. Relative links are not supported; `/xx/yy` paths are kept
/// as-is. The result may still be semantically invalid; that is for
/// [`appears_valid`](super::appears_valid) to report.
///
/// No XSS protection happens here.
pub fn fix_submitted(url: &str) -> String {
    let url = decode_entities(url.trim());

    if !has_scheme(&url) && !url.starts_with('/') {
        return format!("http://{url}");
    }

    url
}

//! Icon selection for course listings.

use super::mime::{mimetype_for_extension, url_extension};

/// Guesses an icon family for a link, or `None` when the module's default
/// icon is more appropriate.
///
/// Links with fewer than three slashes or a trailing slash are most
/// probably directory indexes; HTML pages and unknown files also fall back
/// to the default icon so external links stay visually distinct from
/// uploaded files.
pub fn guess_icon(url: &str) -> Option<&'static str> {
    if url.matches('/').count() < 3 || url.ends_with('/') {
        return None;
    }

    let path = url.split(['?', '#']).next().unwrap_or(url);
    let icon = icon_for_mimetype(mimetype_for_extension(url_extension(path)));
    match icon {
        "html" | "unknown" => None,
        other => Some(other),
    }
}

fn icon_for_mimetype(mimetype: &str) -> &'static str {
    match mimetype {
        "application/zip" | "application/x-tar" | "application/g-zip"
        | "application/x-7z-compressed" | "application/x-rar-compressed" => "archive",
        "application/pdf" => "pdf",
        "text/html" => "html",
        "application/msword"
        | "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        | "application/vnd.oasis.opendocument.text" => "document",
        "application/vnd.ms-excel"
        | "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        | "application/vnd.oasis.opendocument.spreadsheet" => "spreadsheet",
        "application/vnd.ms-powerpoint"
        | "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        | "application/vnd.oasis.opendocument.presentation" => "presentation",
        m if m.starts_with("image/") => "image",
        m if m.starts_with("audio/") || m == "x-realaudio-plugin" => "audio",
        m if m.starts_with("video/") || m == "application/x-shockwave-flash" => "video",
        m if m.starts_with("text/") => "text",
        _ => "unknown",
    }
}

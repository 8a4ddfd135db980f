//! MIME sniffing from a link URL.
//!
//! Used only to pick a display strategy; nothing here fetches anything.

use regex::Regex;
use std::sync::LazyLock;

/// File-serving proxy segments (`.../file.php?file=/...` and friends) hide
/// the real path; strip them so the served file's extension wins.
static FILE_PROXY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)/[a-z]*file\.php(\?file=)?(/[^&?#]*)").expect("valid regex")
});

/// Fallback when the extension is unknown.
const UNKNOWN_MIMETYPE: &str = "application/octet-stream";

/// Guesses a MIME type for a link from its URL shape and file extension.
///
/// Script markers (`.php` anywhere), directory indexes (trailing `/`),
/// bare hosts, and extension-less paths all sniff as `text/html`; anything
/// that finally looks like a real file goes through the extension table.
/// Fragments and query strings are ignored.
pub fn guess_mimetype(url: &str) -> &'static str {
    let mut full = url.to_string();

    if let Some(caps) = FILE_PROXY_RE.captures(&full) {
        full = format!("{}{}", &caps[1], &caps[3]);
    }

    // Ignore all anchors.
    if let Some(pos) = full.rfind('#') {
        full.truncate(pos);
    }

    if full.contains(".php") {
        // We cannot know what a general server-side script emits.
        return "text/html";
    }
    if full.ends_with('/') {
        // Directory index (http://example.com/samples/).
        return "text/html";
    }
    if full.contains("//") && full.matches('/').count() == 2 {
        // Just a host name (http://example.com).
        return "text/html";
    }

    let path = full.split('?').next().unwrap_or("");
    let ext = url_extension(path);
    if ext.is_empty() {
        // Extension-less page, most probably dynamic HTML.
        return "text/html";
    }
    mimetype_for_extension(ext)
}

/// File extension of the last path segment; empty when the segment has no
/// dot or ends with one. Case is preserved; the MIME table matches
/// case-insensitively.
pub fn url_extension(path: &str) -> &str {
    let segment = path.rsplit('/').next().unwrap_or(path);
    match segment.rfind('.') {
        Some(pos) if pos + 1 < segment.len() => &segment[pos + 1..],
        _ => "",
    }
}

/// Static extension→MIME table covering the types the classifier cares
/// about plus the common web formats. Two legacy spellings are kept on
/// purpose because the download/embed sets match on them: `application/g-zip`
/// for gzip and `audio/mp3` for mp3.
pub(crate) fn mimetype_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "zip" => "application/zip",
        "tar" => "application/x-tar",
        "gz" | "gzip" | "tgz" => "application/g-zip",
        "7z" => "application/x-7z-compressed",
        "rar" => "application/x-rar-compressed",
        "pdf" => "application/pdf",
        "htm" | "html" | "shtml" => "text/html",
        "txt" | "text" | "csv" | "log" => "text/plain",
        "css" => "text/css",
        "js" => "application/x-javascript",
        "xml" => "application/xml",
        "json" => "application/json",
        "gif" => "image/gif",
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "png" => "image/png",
        "svg" | "svgz" => "image/svg+xml",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        "swf" => "application/x-shockwave-flash",
        "flv" => "video/x-flv",
        "wm" | "wmv" | "asf" => "video/x-ms-wm",
        "mov" | "qt" => "video/quicktime",
        "mpeg" | "mpg" | "mpe" => "video/mpeg",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mp3" => "audio/mp3",
        "ra" | "ram" | "rm" => "audio/x-realaudio-plugin",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "m4a" => "audio/mp4",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "odt" => "application/vnd.oasis.opendocument.text",
        "ods" => "application/vnd.oasis.opendocument.spreadsheet",
        "odp" => "application/vnd.oasis.opendocument.presentation",
        _ => UNKNOWN_MIMETYPE,
    }
}

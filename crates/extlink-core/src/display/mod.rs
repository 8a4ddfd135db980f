//! Display strategy resolution.
//!
//! A stored link either names its rendering strategy explicitly or leaves
//! it on `auto`, in which case the engine sniffs a MIME type from the URL
//! and classifies it. Pure and deterministic; the worst failure mode is
//! falling back to the least specific strategy, `open`.

mod icon;
mod mime;

pub use icon::guess_icon;
pub use mime::{guess_mimetype, url_extension};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::resource::LinkResource;

/// Rendering strategy for a link resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Placeholder meaning "pick for me"; never the effective mode.
    #[default]
    Auto,
    /// Embed the content into the course page.
    Embed,
    /// Show inside a navigation frameset.
    Frame,
    /// Plain redirect to the target.
    Open,
    /// Open in a new browser window/tab.
    New,
    /// Open in a sized popup window.
    Popup,
    /// Force a download instead of in-browser display.
    Download,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Auto => "auto",
            DisplayMode::Embed => "embed",
            DisplayMode::Frame => "frame",
            DisplayMode::Open => "open",
            DisplayMode::New => "new",
            DisplayMode::Popup => "popup",
            DisplayMode::Download => "download",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(DisplayMode::Auto),
            "embed" => Ok(DisplayMode::Embed),
            "frame" => Ok(DisplayMode::Frame),
            "open" => Ok(DisplayMode::Open),
            "new" => Ok(DisplayMode::New),
            "popup" => Ok(DisplayMode::Popup),
            "download" => Ok(DisplayMode::Download),
            other => Err(format!("unknown display mode: {other}")),
        }
    }
}

/// MIME types known to misbehave when framed or embedded from external
/// servers; always handed to the browser as a download.
pub const DOWNLOAD_MIMETYPES: [&str; 5] = [
    "application/zip",
    "application/x-tar",
    "application/g-zip",
    "application/pdf",
    "text/html",
];

/// MIME types the page renderer can embed directly.
pub const EMBED_MIMETYPES: [&str; 13] = [
    "image/gif",
    "image/jpeg",
    "image/png",
    "image/svg+xml",
    "application/x-shockwave-flash",
    "video/x-flv",
    "video/x-ms-wm",
    "video/quicktime",
    "video/mpeg",
    "video/mp4",
    "audio/mp3",
    "audio/x-realaudio-plugin",
    "x-realaudio-plugin",
];

/// Decides the effective display strategy for a resource.
///
/// An explicit (non-`auto`) stored mode always wins. For `auto`, links back
/// to our own dynamic pages (under `server_url`, containing a script marker
/// but no file-serving segment) resolve to `Open` so navigation stays
/// intact; everything else is classified by sniffed MIME type.
pub fn final_display_type(resource: &LinkResource, server_url: &str) -> DisplayMode {
    if resource.display != DisplayMode::Auto {
        return resource.display;
    }

    let url = &resource.external_url;
    if !server_url.is_empty()
        && url.starts_with(server_url)
        && !url.contains("file.php")
        && url.contains(".php")
    {
        // Most probably one of our own pages with navigation.
        return DisplayMode::Open;
    }

    let mimetype = guess_mimetype(url);
    if DOWNLOAD_MIMETYPES.contains(&mimetype) {
        return DisplayMode::Download;
    }
    if EMBED_MIMETYPES.contains(&mimetype) {
        return DisplayMode::Embed;
    }

    // Let the browser deal with it somehow.
    DisplayMode::Open
}

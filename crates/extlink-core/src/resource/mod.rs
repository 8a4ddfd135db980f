//! The stored link resource and its persisted option blobs.

mod submission;

pub use submission::{LinkSubmission, MAX_PARAMETER_ROWS};

use serde::{Deserialize, Serialize};

use crate::display::DisplayMode;
use crate::variables::UrlVariable;

pub const DEFAULT_POPUP_WIDTH: u32 = 620;
pub const DEFAULT_POPUP_HEIGHT: u32 = 450;

/// Format tag for the intro rich text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntroFormat {
    #[default]
    Html,
    Plain,
    Markdown,
}

/// One configured query parameter: a target query key and the catalog
/// variable that supplies its value at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkParameter {
    pub name: String,
    pub variable: UrlVariable,
}

/// Mode-specific display settings, persisted as an opaque JSON blob on the
/// resource record. Which fields are present depends on the display mode
/// chosen at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_intro: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popup_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popup_height: Option<u32>,
}

impl DisplayOptions {
    /// Decodes a stored blob. Blank or unreadable blobs decode to the
    /// defaults; old records are allowed to carry anything here.
    pub fn decode(blob: &str) -> Self {
        if blob.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str(blob) {
            Ok(options) => options,
            Err(err) => {
                tracing::warn!("unreadable display options blob, using defaults: {err}");
                Self::default()
            }
        }
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Whether the intro text should be printed above the content.
    pub fn print_intro(&self) -> bool {
        self.print_intro.unwrap_or(false)
    }

    /// Popup window size, falling back to the historical 620x450.
    pub fn popup_size(&self) -> (u32, u32) {
        (
            self.popup_width.unwrap_or(DEFAULT_POPUP_WIDTH),
            self.popup_height.unwrap_or(DEFAULT_POPUP_HEIGHT),
        )
    }

    /// The legacy `window.open` features string for popup display.
    pub fn popup_features(&self) -> String {
        let (width, height) = self.popup_size();
        format!(
            "width={width},height={height},toolbar=no,location=no,menubar=no,\
             copyhistory=no,status=no,directories=no,scrollbars=yes,resizable=yes"
        )
    }
}

/// A stored external-link activity instance.
///
/// `display_options` and `parameters` are kept in their persisted (JSON)
/// form; use [`LinkResource::display_options`] and
/// [`LinkResource::parameters`] for the typed views. Records are built and
/// updated through [`LinkSubmission`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkResource {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub intro_format: IntroFormat,
    pub external_url: String,
    #[serde(default)]
    pub display: DisplayMode,
    #[serde(default)]
    pub display_options: String,
    #[serde(default)]
    pub parameters: String,
    #[serde(default)]
    pub time_modified: u64,
}

impl LinkResource {
    /// A bare resource with empty blobs and `auto` display, mainly for
    /// construction in tests and tools.
    pub fn new(id: i64, name: &str, external_url: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            intro: String::new(),
            intro_format: IntroFormat::default(),
            external_url: external_url.to_string(),
            display: DisplayMode::Auto,
            display_options: String::new(),
            parameters: String::new(),
            time_modified: 0,
        }
    }

    /// Typed view of the display options blob.
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions::decode(&self.display_options)
    }

    /// Typed view of the parameters blob, in stored order. Blank or
    /// unreadable blobs read as no parameters.
    pub fn parameters(&self) -> Vec<LinkParameter> {
        if self.parameters.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str(&self.parameters) {
            Ok(parameters) => parameters,
            Err(err) => {
                tracing::warn!("unreadable parameters blob, ignoring: {err}");
                Vec::new()
            }
        }
    }

    pub fn set_parameters(&mut self, parameters: &[LinkParameter]) {
        self.parameters = encode_parameters(parameters);
    }
}

pub(crate) fn encode_parameters(parameters: &[LinkParameter]) -> String {
    if parameters.is_empty() {
        return String::new();
    }
    serde_json::to_string(parameters).unwrap_or_default()
}

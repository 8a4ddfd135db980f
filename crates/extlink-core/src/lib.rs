pub mod config;
pub mod logging;

pub mod context;
pub mod display;
pub mod resource;
pub mod variables;
pub mod weburl;

pub use config::ExtlinkConfig;
pub use context::RenderContext;
pub use display::{final_display_type, guess_mimetype, DisplayMode};
pub use resource::{DisplayOptions, LinkParameter, LinkResource};
pub use variables::{UnknownVariable, UrlVariable};
pub use weburl::{appears_valid, fix_submitted, full_url, full_url_raw, is_blank_or_placeholder};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::display::DisplayMode;
use crate::resource::{DEFAULT_POPUP_HEIGHT, DEFAULT_POPUP_WIDTH};

/// Global configuration loaded from `~/.config/extlink/config.toml`.
///
/// The first group are site-wide settings; the rest are the defaults
/// offered when a new link resource is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtlinkConfig {
    /// Height in pixels of the navigation bar when a link is framed.
    pub frame_size: u32,
    /// Secret phrase for the legacy `encryptedcode` parameter; empty
    /// disables it. Not an authentication mechanism.
    #[serde(default)]
    pub secret_phrase: String,
    /// Offer `course<roleshortname>` variables in link parameters.
    #[serde(default)]
    pub roles_in_params: bool,

    /// Default display mode for new link resources.
    #[serde(default)]
    pub display: DisplayMode,
    /// Default popup window size for new link resources.
    pub popup_width: u32,
    pub popup_height: u32,
    /// Whether new link resources print their intro by default.
    pub print_intro: bool,
}

impl Default for ExtlinkConfig {
    fn default() -> Self {
        Self {
            frame_size: 130,
            secret_phrase: String::new(),
            roles_in_params: false,
            display: DisplayMode::Auto,
            popup_width: DEFAULT_POPUP_WIDTH,
            popup_height: DEFAULT_POPUP_HEIGHT,
            print_intro: true,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("extlink")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ExtlinkConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ExtlinkConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ExtlinkConfig = toml::from_str(&data)?;
    Ok(cfg)
}

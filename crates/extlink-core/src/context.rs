//! Read-only context snapshot passed into the resolution engine.
//!
//! The hosting platform supplies these values once per render; the engine
//! never mutates them and never reaches for ambient globals. The whole
//! snapshot deserializes from TOML so the CLI can feed a context file to
//! the expander.

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Course the link module lives in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseContext {
    pub id: i64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub id_number: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub format: String,
}

/// The course-module placement of the link instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleContext {
    pub instance_id: i64,
    pub cmid: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id_number: String,
}

/// Site-wide values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteContext {
    #[serde(default)]
    pub name: String,
    /// Base URL of this server, used both as a variable value and to detect
    /// links pointing back at our own pages.
    pub server_url: String,
}

/// The logged-in user, absent for guests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub id_number: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub icq: String,
    #[serde(default)]
    pub phone1: String,
    #[serde(default)]
    pub phone2: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    /// Offset from UTC in hours, fractional offsets allowed (e.g. 5.5).
    #[serde(default)]
    pub timezone_offset_hours: f64,
    #[serde(default)]
    pub url: String,
}

impl UserContext {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// One system role visible in the course, for `course<shortname>` variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleContext {
    pub short_name: String,
    pub display_name: String,
}

/// Everything the engine may read while expanding one link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderContext {
    pub course: CourseContext,
    pub module: ModuleContext,
    pub site: SiteContext,
    #[serde(default)]
    pub user: Option<UserContext>,
    #[serde(default)]
    pub roles: Vec<RoleContext>,
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Current unix timestamp; defaults to the wall clock when absent from
    /// a context file.
    #[serde(default = "unix_now")]
    pub now: u64,
    /// Caller network address, feeds the legacy encrypted-code parameter.
    #[serde(default)]
    pub remote_addr: String,
}

impl RenderContext {
    /// Loads a render-context snapshot from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("read context file {}", path.display()))?;
        let ctx: RenderContext = toml::from_str(&data)
            .with_context(|| format!("parse context file {}", path.display()))?;
        Ok(ctx)
    }
}

fn default_lang() -> String {
    "en".to_string()
}

/// Seconds since the unix epoch, saturating at zero on a badly set clock.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

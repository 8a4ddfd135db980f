use anyhow::Result;
use extlink_core::{ExtlinkConfig, UrlVariable};

/// Lists the fixed variable catalog, honoring the config (encrypted code
/// only with a secret phrase, role entries only when enabled).
pub fn run_variables(cfg: &ExtlinkConfig) -> Result<()> {
    for variable in UrlVariable::fixed_catalog(!cfg.secret_phrase.is_empty()) {
        println!("{variable}");
    }
    if cfg.roles_in_params {
        println!("course<roleshortname>  (one per course role)");
    }
    Ok(())
}

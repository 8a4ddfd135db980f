use anyhow::Result;
use extlink_core::fix_submitted;

/// Prints the repaired form of a submitted link.
pub fn run_normalize(url: &str) -> Result<()> {
    println!("{}", fix_submitted(url));
    Ok(())
}

use anyhow::Result;
use extlink_core::{appears_valid, is_blank_or_placeholder};

/// Reports whether a link would pass the editing form's weak validation.
pub fn run_check(url: &str) -> Result<()> {
    if is_blank_or_placeholder(url) {
        println!("invalid: blank or placeholder link, nothing would be rendered");
        return Ok(());
    }
    if appears_valid(url) {
        println!("valid");
    } else {
        println!("invalid: severely malformed link");
    }
    Ok(())
}

use anyhow::{anyhow, Result};

use extlink_core::{final_display_type, guess_mimetype, DisplayMode, LinkResource};

/// Prints the effective display strategy (and the sniffed MIME type) for a
/// link.
pub fn run_classify(url: &str, display: &str, server_url: &str) -> Result<()> {
    let display: DisplayMode = display.parse().map_err(|e: String| anyhow!(e))?;

    let mut resource = LinkResource::new(0, "extlink classify", url);
    resource.display = display;

    let effective = final_display_type(&resource, server_url);
    println!("display: {effective}");
    if display == DisplayMode::Auto {
        println!("mimetype: {}", guess_mimetype(url));
    }
    Ok(())
}

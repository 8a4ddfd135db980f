//! CLI for the extlink resolution engine.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use extlink_core::config;

use commands::{run_check, run_classify, run_expand, run_normalize, run_variables};

/// Top-level CLI for the extlink resolution engine.
#[derive(Debug, Parser)]
#[command(name = "extlink")]
#[command(about = "extlink: resolve and classify external-link resources", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Weakly validate a link the way the editing form would.
    Check {
        /// Link to validate.
        url: String,
    },

    /// Repair a submitted link (trim, decode entities, add missing scheme).
    Normalize {
        /// Link as submitted.
        url: String,
    },

    /// Expand a link with parameter substitution from a render context.
    Expand {
        /// Stored link to expand.
        url: String,

        /// Path to a TOML render-context file (course/module/site/user).
        #[arg(long, value_name = "FILE")]
        context: String,

        /// Parameter to append, as `querykey=variablename`. Repeatable.
        #[arg(long = "param", value_name = "KEY=VARIABLE")]
        params: Vec<String>,

        /// Print the raw URL (for redirects) instead of the HTML-embeddable
        /// form with `&` encoded as `&amp;`.
        #[arg(long)]
        raw: bool,
    },

    /// Decide the display strategy for a link.
    Classify {
        /// Link to classify.
        url: String,

        /// Explicitly stored display mode; `auto` (the default) sniffs the
        /// MIME type from the URL.
        #[arg(long, default_value = "auto")]
        display: String,

        /// Our own server base URL, for detecting links to local pages.
        #[arg(long, default_value = "")]
        server_url: String,
    },

    /// List the substitutable link variables the catalog offers.
    Variables,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Check { url } => run_check(&url),
            CliCommand::Normalize { url } => run_normalize(&url),
            CliCommand::Expand {
                url,
                context,
                params,
                raw,
            } => run_expand(&cfg, &url, &context, &params, raw),
            CliCommand::Classify {
                url,
                display,
                server_url,
            } => run_classify(&url, &display, &server_url),
            CliCommand::Variables => run_variables(&cfg),
        }
    }
}

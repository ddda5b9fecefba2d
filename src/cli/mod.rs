//! Command-line interface
//!
//! clap definitions, command handlers, console prompts, and output
//! formatting for the `inner-dna` binary.

pub mod commands;
pub mod output;
pub mod prompt;
pub mod types;

pub use types::{Cli, Commands};

use console::style;

/// Report a failed command and exit with status 1.
///
/// In JSON mode the error chain is emitted as a JSON object on stdout so
/// scripted callers can parse it.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let chain: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let body = serde_json::json!({
            "error": err.to_string(),
            "caused_by": chain,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );
    } else {
        eprintln!("{} {err}", style("error:").red().bold());
        for cause in err.chain().skip(1) {
            eprintln!("  {} {cause}", style("caused by:").dim());
        }
    }
    std::process::exit(1)
}

//! CLI-only commands: config info and shell completions.
//!
//! These run without opening the TUI and produce plain text output.

use std::env;

use clap::CommandFactory;

use crate::cli::{Args, generate};
use crate::core::app;
use crate::core::config;
use crate::core::paths;

/// Where the base URL came from, for `config` output.
fn base_url_source(url_override: Option<&str>) -> &'static str {
    if url_override.is_some() {
        "from --url"
    } else if env::var("ASK_FORM_BASE_URL").is_ok() {
        "from ASK_FORM_BASE_URL"
    } else {
        "default"
    }
}

/// Run the `config` command: display the resolved endpoint and log path.
pub fn run_config(url_override: Option<&str>) {
    let log_file = paths::log_file()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "—".to_string());

    match config::load(url_override) {
        Ok(c) => println!(
            "Endpoint:  {} ({})",
            c.endpoint,
            base_url_source(url_override)
        ),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
    println!("Log file:  {}", log_file);
    println!("Version:   {}", app::VERSION);
}

/// Run the `completions` command: write the completion script to stdout.
pub fn run_completions(shell: clap_complete::Shell) {
    let mut cmd = Args::command();
    generate(shell, &mut cmd, app::NAME, &mut std::io::stdout());
}

//! # ask-form - question form for a chat endpoint
//!
//! Entry point. Posts a natural-language question to a remote chat endpoint and
//! shows the answer as markdown.
//!
//! ## Modes
//! - Single prompt mode with `-p` or `--prompt` (prints the answer to stdout)
//! - Interactive form (TUI) by default
//! - `config` and `completions` subcommands

mod cli;
mod core;
mod run;
mod tui;

use clap::Parser;
use dotenv::dotenv;

use cli::{Args, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    match args.command {
        Some(Commands::Config) => {
            core::cli::run_config(args.url.as_deref());
            return Ok(());
        }
        Some(Commands::Completions { shell }) => {
            core::cli::run_completions(shell);
            return Ok(());
        }
        None => {}
    }

    // Print user-friendly message; exit uses Display not Debug
    let config = core::config::load(args.url.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if let Some(ref prompt) = args.prompt {
        return run::run_single_prompt(prompt, &config).await;
    }

    run::launch_tui(config).await
}

//! CLI definitions: argument parsing, subcommands, and help text.

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  ask-form                                  Launch the question form
  ask-form -p \"revenue by quarter?\"         Ask once, print the answer to stdout
  ask-form -p -                             Read the question from stdin
  ask-form --url http://localhost:8000      Use another backend
  ask-form config                           Show the resolved endpoint
  ask-form completions bash                 Generate bash completions

ENVIRONMENT:
  ASK_FORM_BASE_URL    Backend base URL (default http://127.0.0.1:5000)
  ASK_FORM_CHAT_PATH   Chat endpoint path (default /threads/chat)
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Ask a question, get a markdown answer from a chat endpoint",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Ask a single question then exit (without opening the form)
    #[arg(
        short = 'p',
        long,
        help = "Ask a single question and print the answer (use '-' to read from stdin)"
    )]
    pub prompt: Option<String>,

    /// Override the backend base URL
    #[arg(short = 'u', long, help = "Backend base URL (overrides ASK_FORM_BASE_URL)")]
    pub url: Option<String>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the resolved endpoint and log file path
    Config,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// True when the form UI owns the terminal (no prompt, no subcommand).
    pub fn is_tui(&self) -> bool {
        self.prompt.is_none() && self.command.is_none()
    }
}

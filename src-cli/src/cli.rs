use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ragqa")]
#[command(author, version)]
#[command(about = "Render citation-bearing answers from a retrieval-augmented Q&A backend")]
#[command(after_help = "\
EXAMPLES:

    # Render a finished answer to HTML
    ragqa render answer.txt

    # Render a partial answer as it would appear mid-stream
    printf 'See [rep' | ragqa render --streaming

    # Replay a captured NDJSON stream frame by frame
    ragqa replay chat-stream.ndjson

    # Answer prose without citation markers
    ragqa strip answer.txt

CONFIGURATION:

ragqa looks for configuration files in this order:
  1. Explicit --config path
  2. ragqa.toml or .ragqa.toml in current/parent directories
  3. Built-in defaults

Example .ragqa.toml:

    content_base = \"https://qa.example.com\"
    low_score_threshold = 3.0

    [delimiters]
    open = \"[\"
    close = \"]\"

    [email]
    recipients = [\"support@example.com\"]
")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render answer text to HTML with numbered citation anchors
    Render {
        /// Input file (stdin if not provided)
        file: Option<PathBuf>,

        /// Treat the input as a still-growing prefix and hold back partial markers
        #[arg(long)]
        streaming: bool,

        /// Print {html, citations, sources} as JSON instead of bare HTML
        #[arg(long)]
        json: bool,

        /// Input is a chat response JSON document rather than raw text
        #[arg(long)]
        response: bool,
    },
    /// Print answer text with citation markers removed
    Strip {
        /// Input file (stdin if not provided)
        file: Option<PathBuf>,
    },
    /// Render every growing prefix of an NDJSON answer stream
    Replay {
        /// NDJSON file (stdin if not provided)
        file: Option<PathBuf>,
    },
    /// Print a mailto: link for a follow-up email about an answer
    Email {
        /// The question the answer responds to
        #[arg(long)]
        question: String,

        /// Answer text file (stdin if not provided)
        file: Option<PathBuf>,
    },
    /// Render the answers stored in an exported feedback list
    Feedback {
        /// Feedback list JSON (stdin if not provided)
        file: Option<PathBuf>,
    },
    /// Summarise a batch evaluation experiment
    Eval {
        /// Experiment results JSON (stdin if not provided)
        file: Option<PathBuf>,

        /// Experiment name for the scorecard heading
        #[arg(long, default_value = "experiment")]
        name: String,
    },
}

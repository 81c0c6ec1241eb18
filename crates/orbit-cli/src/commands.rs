//! Subcommands.

use clap::Subcommand;

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ask a single question and hear the answer
    Ask {
        /// The question (words are joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        question: Vec<String>,
    },

    /// Interactive conversation with voice controls
    Chat,

    /// Show where the International Space Station is right now
    Iss,

    /// Quick facts about a planet, or list them all
    Planet {
        /// Planet name (case-insensitive)
        name: Option<String>,
    },

    /// Check that the backend is up and which APIs it has keys for
    Status {
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
}

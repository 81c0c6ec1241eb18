//! Terminal front end for the orbit space guide.
//!
//! The binary (`orbit`) is a thin dispatcher: [`bootstrap`] wires the HTTP
//! client, speech output, voice input and core services together, and the
//! [`handlers`] drive them for each subcommand. Everything the services want
//! to show goes through [`presentation::TerminalEmitter`].

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::{Cli, SpeechMode};

//! CLI entry point - the composition root.
//!
//! Parses arguments, installs logging, bootstraps the context and dispatches
//! to the handlers.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use orbit_cli::presentation::TerminalEmitter;
use orbit_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads ORBIT_*
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("orbit: {err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command.as_ref() else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    // Planet facts are static; no backend needed.
    if let Commands::Planet { name } = command {
        return handlers::planet::execute(name.as_deref());
    }

    let config = CliConfig::from_cli(&cli)?;
    let interactive = matches!(command, Commands::Chat);
    let ctx = bootstrap(&config, Arc::new(TerminalEmitter::new(interactive)))?;

    match command {
        Commands::Ask { question } => handlers::ask::execute(&ctx, &question.join(" ")).await,
        Commands::Chat => handlers::chat::execute(&ctx).await,
        Commands::Iss => handlers::iss::execute(&ctx).await,
        Commands::Status { json } => handlers::status::execute(&ctx, *json).await,
        Commands::Planet { .. } => Ok(()),
    }
}

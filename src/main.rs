//! NeuroCLI - an AI assistant for the terminal
//!
//! Sends a prompt to a hosted language model, optionally with a file or a
//! whole directory as context, and shows the reply or a diff against the
//! original file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod ai;
mod cli;
mod config;
mod context;
mod diff;
mod prompt;
mod ui;

use cli::ContextArgs;

/// NeuroCLI - AI assistance with your files as context
#[derive(Parser)]
#[command(name = "neuro")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ask a language model about your code, with files as context", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "NEUROCLI_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the model, optionally with a file or directory as context
    Ask {
        /// The prompt to send
        prompt: String,

        /// File or directory to include as context
        #[arg(short, long)]
        path: Option<String>,

        /// Provider to use (openai, gemini)
        #[arg(long)]
        provider: Option<String>,

        /// Show the reply as a diff against the original file
        #[arg(short, long)]
        diff: bool,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// Print the context that would be sent for a path
    Context {
        /// File or directory to build context from
        path: String,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// Show a unified diff between two files
    Diff {
        /// Original file
        original: String,

        /// Proposed replacement
        proposed: String,

        /// Print the raw diff without colors
        #[arg(long)]
        plain: bool,
    },

    /// Show configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Initialize configuration file
        #[arg(long)]
        init: bool,
    },

    /// Show version and provider status
    Info,
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = config::load_config(cli.config.as_deref())?;
    config.verbose = cli.verbose;

    tracing::debug!("NeuroCLI v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Ask {
            prompt,
            path,
            provider,
            diff,
            context,
        } => {
            cli::ask::run(
                config,
                &prompt,
                path.as_deref(),
                provider.as_deref(),
                diff,
                &context,
            )
            .await?;
        }
        Commands::Context { path, context } => {
            cli::context::run(config, &path, &context)?;
        }
        Commands::Diff {
            original,
            proposed,
            plain,
        } => {
            cli::diff::run(&original, &proposed, plain)?;
        }
        Commands::Config { show, init } => {
            if init {
                config::init_config(cli.config.as_deref())?;
            } else if show {
                config::show_config(&config)?;
            }
        }
        Commands::Info => {
            cli::info::run(&config)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", err);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::print_error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

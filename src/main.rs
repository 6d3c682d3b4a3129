mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::notify::{self, NotifyArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::infra::webhook::WebhookClient;
use crate::infra::workspace::WorkingTree;

#[derive(Parser)]
#[command(
    name = "pushnote",
    author,
    version,
    about = "Post push event summaries to a webhook"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Enable verbose output; repeat for more detail.
    #[arg(global = true, short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only report errors.
    #[arg(global = true, short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Gather the push event and post it to the webhook.
    Notify(NotifyArgs),
    /// Inspect the resolved configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    configure_tracing(&cli.global)?;

    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command)?;
            Ok(())
        }
        Commands::Notify(args) => run_notify(args).await,
    }
}

async fn run_notify(args: NotifyArgs) -> AppResult<()> {
    let cwd = std::env::current_dir()?;
    let config = AppConfig::load(args.settings, &cwd)?;

    let sink = Arc::new(WebhookClient::new(config.timeout)?);
    let workspace = Arc::new(WorkingTree::new(config.workspace_root.clone()));
    let context = AppContext::new(config, sink, workspace);

    notify::run(&context, args.dry_run).await
}

fn configure_tracing(global: &GlobalArgs) -> AppResult<()> {
    let level_filter = if global.quiet {
        LevelFilter::ERROR
    } else {
        match global.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("PUSHNOTE_LOG")
        .from_env()
        .map_err(|err| AppError::Configuration(format!("invalid PUSHNOTE_LOG filter: {err}")))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| AppError::Configuration(format!("failed to install logger: {err}")))?;

    Ok(())
}

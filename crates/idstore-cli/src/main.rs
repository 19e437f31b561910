//! # idstore CLI
//!
//! Command-line tools for idstore administration.

#![forbid(unsafe_code)]
#![allow(clippy::uninlined_format_args)]

use clap::Parser;
use idstore_cli::{
    Cli, CliResult, Context,
    cli::Command,
    commands::{run_role, run_schema, run_user, run_wipe},
    config::{self, OutputFormat},
    output::error,
};
use idstore_core::Config;
use idstore_document::PgDocumentStore;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            error(&format!("Failed to load configuration: {}", e));
            std::process::exit(1);
        }
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling");
            on_interrupt.cancel();
        }
    });

    let result = match cli.command {
        Command::Schema(cmd) => run_schema(cmd, &config).await,
        Command::User(cmd) => match connect(&config, cli.output, cancel).await {
            Ok(ctx) => run_user(cmd, &ctx).await,
            Err(e) => Err(e),
        },
        Command::Role(cmd) => match connect(&config, cli.output, cancel).await {
            Ok(ctx) => run_role(cmd, &ctx).await,
            Err(e) => Err(e),
        },
        Command::Wipe(args) => match connect(&config, cli.output, cancel).await {
            Ok(ctx) => run_wipe(args, &ctx).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        error(&e.to_string());
        std::process::exit(1);
    }
}

async fn connect(
    config: &Config,
    format: OutputFormat,
    cancel: CancellationToken,
) -> CliResult<Context<PgDocumentStore>> {
    let store = PgDocumentStore::connect(config).await?;
    Ok(Context::new(store, format, cancel))
}

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod backend;
mod chat;
mod cli;
mod commands;
mod config;
mod core;
mod display;
mod input;
mod utils;

use crate::app::Application;
use crate::cli::Args;
use crate::commands::create_command_registry;
use crate::config::Config;
use crate::core::error::MmateError;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "mmate=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<(), MmateError> {
    let config = Config::load()?;
    let settings = config.merge(&args);
    info!(
        backend_url = %settings.backend_url,
        typing_delay_ms = settings.typing_delay.as_millis() as u64,
        "starting mmate"
    );

    let mut app = Application::new(args, settings, create_command_registry());
    app.run().await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        display::display_error(&e);
        std::process::exit(1);
    }
}

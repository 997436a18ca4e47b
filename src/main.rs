use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;

mod cli;
mod api;
mod core;
mod utils;
mod models;
mod crypto;
mod generators;
mod logging;

use crate::api::AppState;
use crate::cli::{Args, CliCommand};
use crate::core::config::Config;
use crate::generators::PasswordEngine;
use crate::logging::{AuditObserver, Logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();
    let (mut config, warnings) = Config::load();
    logging::init_console_logger(config.log_level);
    for warning in &warnings {
        log::warn!("{}", warning);
    }
    log::debug!("Loaded config: {:?}", config);

    let audit = Arc::new(
        Logger::new(config.log_dir.clone())
            .with_context(|| format!("Failed to open audit log in {}", config.log_dir.display()))?,
    );

    let rng = match args.seed {
        Some(seed) => {
            log::warn!("⚠️ Using seeded random source ({}); output is reproducible", seed);
            crypto::seeded_random(seed)
        }
        None => crypto::os_random(),
    };
    let engine = Arc::new(
        PasswordEngine::with_random(rng).with_observer(Box::new(AuditObserver::new(Arc::clone(&audit)))),
    );

    match args.command {
        Some(CliCommand::Serve { port, address }) => {
            if let Some(port) = port {
                config.web_port = port;
            }
            if let Some(address) = address {
                config.web_address = address;
            }

            log::info!("🔒 Starting RustPassgen API");
            api::start_server(AppState { engine, config, audit })
                .await
                .context("API server failed")?;
        }
        Some(CliCommand::Generate(generate)) => {
            cli::handlers::handle_generate(&engine, &config, &generate, args.json)?;
        }
        Some(CliCommand::Multiple { count, options }) => {
            cli::handlers::handle_multiple(&engine, &config, count, &options, args.json)?;
        }
        Some(CliCommand::Memorable { words, separator, no_numbers }) => {
            cli::handlers::handle_memorable(&engine, words, &separator, !no_numbers, args.json)?;
        }
        Some(CliCommand::Requirements(requirements)) => {
            cli::handlers::handle_requirements(&engine, &config, &requirements, args.json)?;
        }
        Some(CliCommand::Analyze { password }) => {
            cli::handlers::handle_analyze(&password, args.json)?;
        }
        Some(CliCommand::Token { subject, email }) => {
            cli::handlers::handle_token(&config, &subject, email.as_deref())?;
        }
        None => {
            cli::menu::run_cli_menu(&engine, &config)
                .map_err(|e| anyhow!("CLI menu error: {}", e))?;
        }
    }

    Ok(())
}

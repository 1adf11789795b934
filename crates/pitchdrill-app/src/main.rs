//! PitchDrill application binary - composition root.
//!
//! Ties together the trainer crates into a single executable:
//! 1. Load configuration from TOML
//! 2. Build the HTTP client for the training service
//! 3. Build the trainer controller (no speech recognizer on this
//!    platform; dictation commands report the missing capability)
//! 4. Run the requested subcommand

mod cli;

use clap::Parser;

use pitchdrill_core::config::TrainerConfig;
use pitchdrill_core::types::Mode;
use pitchdrill_dictation::UnavailableRecognizer;
use pitchdrill_gateway::{HttpTrainingService, RequestStatus};
use pitchdrill_session::TrainerController;

use cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = TrainerConfig::load_or_default(&config_file);
    if let Some(url) = args.base_url.clone() {
        config.service.base_url = url;
    }

    // Tracing. RUST_LOG wins, then --log-level, then the config file.
    let log_level = args
        .resolve_log_level()
        .unwrap_or_else(|| config.general.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting PitchDrill v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    let service = HttpTrainingService::new(&config.service.base_url, config.service.timeout_secs)?;
    let mut controller = TrainerController::new(
        service,
        Box::new(UnavailableRecognizer),
        &config.dictation.language,
    );

    match args.command {
        Command::Scenarios => {
            controller.refresh_catalog().await?;
            println!("{}", serde_json::to_string_pretty(controller.catalog())?);
        }
        Command::Categories => {
            controller.refresh_catalog().await?;
            for category in controller.categories() {
                println!("{}", category);
            }
        }
        Command::Objection {
            text,
            language,
            scenario_id,
        } => {
            controller.enter(Mode::ObjectionHandling).await?;
            if let Some(language) = language {
                controller.set_language(&language);
            }
            if let Some(id) = scenario_id {
                controller.refresh_catalog().await?;
                if !controller.select_scenario(id) {
                    return Err(format!("scenario {} not found in catalog", id).into());
                }
            }
            controller.set_objection_text(&text);
            controller.submit_objection_text().await?;

            match controller.gateway().objection_status() {
                RequestStatus::Succeeded => {
                    // Verbatim coaching text; formatting is the service's.
                    if let Some(response) = controller.gateway().objection_response() {
                        println!("{}", response);
                    }
                }
                _ => {
                    let message = controller
                        .gateway()
                        .objection_error()
                        .unwrap_or("request did not complete")
                        .to_string();
                    return Err(message.into());
                }
            }
        }
        Command::Practice => {
            controller.enter(Mode::Practice).await?;
            tracing::info!(
                total = controller.navigator().len(),
                "Practice set loaded"
            );
            println!(
                "{}",
                serde_json::to_string_pretty(controller.navigator().scenarios())?
            );
        }
    }

    Ok(())
}

//! CLI argument definitions for the PitchDrill application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PitchDrill, a sales-objection trainer backed by a reasoning service.
#[derive(Parser, Debug)]
#[command(name = "pitchdrill", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Base URL of the training service.
    #[arg(short = 'u', long = "base-url")]
    pub base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the full scenario catalog.
    Scenarios,

    /// List the distinct scenario categories.
    Categories,

    /// Submit an objection and print the coaching response.
    Objection {
        /// The objection text, as the merchant stated it.
        text: String,

        /// Language to coach in (e.g. English, Hindi, Hinglish).
        #[arg(long = "language")]
        language: Option<String>,

        /// Anchor the response to a catalog scenario.
        #[arg(long = "scenario-id")]
        scenario_id: Option<i64>,
    },

    /// Fetch a fresh practice set and print it.
    Practice,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > PITCHDRILL_CONFIG env var > platform
    /// default (~/.pitchdrill/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("PITCHDRILL_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    /// Returns `None` if not overridden.
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".pitchdrill").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".pitchdrill").join("config.toml");
    }
    PathBuf::from("config.toml")
}

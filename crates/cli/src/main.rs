//! FlightCast CLI
//!
//! A command-line tool for requesting flight delay predictions, inspecting
//! route and airline statistics, and chatting with the FlightCast
//! assistant.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{airline, catalog, chat, predict, route};
use flight_lib::{FetchMode, HttpFlightApi, SearchForm, Session, StructuredLogger};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Settings;
use crate::output::OutputFormat;

/// FlightCast CLI
#[derive(Parser)]
#[command(name = "flightcast")]
#[command(author, version, about = "CLI for FlightCast flight delay predictions", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via FLIGHTCAST_API_URL env var)
    #[arg(long, env = "FLIGHTCAST_API_URL")]
    pub api_url: Option<String>,

    /// Path to config file (defaults to ~/.config/flightcast/config.json)
    #[arg(long, env = "FLIGHTCAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict the delay of a flight
    Predict {
        /// Origin airport IATA code
        #[arg(long, short)]
        origin: Option<String>,

        /// Destination airport IATA code
        #[arg(long, short)]
        destination: Option<String>,

        /// Flight date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Scheduled departure time (HH:MM)
        #[arg(long)]
        time: Option<String>,

        /// Airline IATA code
        #[arg(long, short)]
        airline: Option<String>,

        /// Scheduled flight time in minutes
        #[arg(long)]
        scheduled_time: Option<u32>,

        /// Flight distance
        #[arg(long)]
        distance: Option<u32>,
    },

    /// Show route performance aggregated across carriers
    Route {
        /// Origin airport IATA code
        #[arg(long, short)]
        origin: Option<String>,

        /// Destination airport IATA code
        #[arg(long, short)]
        destination: Option<String>,

        /// Carriers to query, comma separated (overrides config)
        #[arg(long, value_delimiter = ',')]
        carriers: Option<Vec<String>>,

        /// Query carriers concurrently
        #[arg(long)]
        concurrent: bool,

        /// Also show the all-airline overview for the route
        #[arg(long)]
        overview: bool,
    },

    /// Show delay statistics for an airline
    Airline {
        /// Airline IATA code
        code: String,
    },

    /// Chat with the assistant
    Chat {
        /// Message to send (starts an interactive session if omitted)
        message: Option<String>,

        /// Portal reported to the assistant
        #[arg(long, default_value = flight_lib::session::DEFAULT_PORTAL)]
        portal: String,
    },

    /// List known airports and airlines
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List airports
    Airports,
    /// List airlines
    Airlines,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write the effective configuration to the config file
    Init,
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    // Load configuration, then apply flags on top
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    let format = cli
        .format
        .or_else(|| {
            settings
                .default_format
                .as_deref()
                .and_then(OutputFormat::from_config)
        })
        .unwrap_or_default();
    debug!(api_url = %settings.api_url, "Configuration loaded");

    match cli.command {
        Commands::Predict {
            origin,
            destination,
            date,
            time,
            airline,
            scheduled_time,
            distance,
        } => {
            let form = SearchForm {
                origin,
                destination,
                date,
                time,
                airline,
                scheduled_time,
                distance,
            };
            let session = build_session(&settings)?;
            predict::predict(&session, form, format).await?;
        }
        Commands::Route {
            origin,
            destination,
            carriers,
            concurrent,
            overview,
        } => {
            let mut session = build_session(&settings)?;
            if let Some(carriers) = carriers {
                session = session.with_carriers(
                    carriers
                        .iter()
                        .map(|c| c.trim().to_ascii_uppercase())
                        .filter(|c| !c.is_empty())
                        .collect(),
                );
            }
            if concurrent {
                session = session.with_fetch_mode(FetchMode::Concurrent);
            }
            route::show_route(&session, origin, destination, overview, format).await?;
        }
        Commands::Airline { code } => {
            let session = build_session(&settings)?;
            airline::show_airline(&session, code, format).await?;
        }
        Commands::Chat { message, portal } => {
            let mut session = build_session(&settings)?.with_portal(portal);
            chat::chat(&mut session, message, format).await?;
        }
        Commands::Catalog(catalog_cmd) => match catalog_cmd {
            CatalogCommands::Airports => catalog::list_airports(format)?,
            CatalogCommands::Airlines => catalog::list_airlines(format)?,
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => output::print_json(&settings)?,
            ConfigCommands::Init => {
                let path = settings.save(cli.config.as_deref())?;
                output::print_success(&format!("Wrote {}", path.display()));
            }
        },
    }

    Ok(())
}

/// Build a session against the configured API
fn build_session(settings: &Settings) -> Result<Session> {
    let api = HttpFlightApi::with_timeout(
        &settings.api_url,
        Duration::from_secs(settings.timeout_secs),
    )
    .context("Failed to create API client")?;
    let logger = StructuredLogger::new(api.base_url().as_str());

    Ok(Session::new(Arc::new(api), logger)
        .with_carriers(settings.carriers.clone())
        .with_fetch_mode(settings.fetch_mode()))
}

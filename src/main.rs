mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use egui::Vec2;
use log::{error, warn};
use ui::dashboard::{DashboardApp, config::AppConfig};
use velocity::provider::ConfiguredProvider;
use velocity::{DashboardState, FetchSession, VelocityError};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the dashboard window
    Live {
        /// Read the provider payload from a JSON file instead of Gemini
        #[arg(short, long)]
        fixture: Option<PathBuf>,

        /// Gemini model to query
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Fetch once and print the resulting dashboard state as JSON
    Fetch {
        #[arg(short, long)]
        fixture: Option<PathBuf>,

        #[arg(short, long)]
        model: Option<String>,

        #[arg(short, long, default_value_t = false)]
        pretty: bool,
    },
}

fn load_app_config() -> AppConfig {
    match AppConfig::from_local_file() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            warn!("Ignoring config file: {}", e);
            AppConfig::default()
        }
    }
}

fn live(fixture: Option<PathBuf>, model: Option<String>) -> Result<(), VelocityError> {
    let session = FetchSession::start(ConfiguredProvider::from_options(fixture, model));
    let app_config = load_app_config();

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_title("F1 Velocity")
        .with_inner_size(Vec2::from(app_config.window_size.clone()));

    eframe::run_native(
        "F1 Velocity",
        native_options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(session, app_config, cc)))),
    )
    .expect("could not start app");
    Ok(())
}

fn fetch(fixture: Option<PathBuf>, model: Option<String>, pretty: bool) -> Result<bool, VelocityError> {
    let mut session = FetchSession::start(ConfiguredProvider::from_options(fixture, model));
    let mut state = DashboardState::new();
    if let Some(action) = session.wait() {
        state.apply(action);
    }

    let snapshot = state.snapshot();
    let output = if pretty {
        serde_json::to_string_pretty(&snapshot)
    } else {
        serde_json::to_string(&snapshot)
    }
    .map_err(|e| VelocityError::SnapshotSerializeError { source: e })?;
    println!("{}", output);
    Ok(snapshot.error.is_none())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");
    match cli.command {
        Commands::Live { fixture, model } => {
            live(fixture, model).expect("Error while running the dashboard")
        }
        Commands::Fetch {
            fixture,
            model,
            pretty,
        } => match fetch(fixture, model, pretty) {
            Ok(true) => {}
            Ok(false) => std::process::exit(1),
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
    };
}

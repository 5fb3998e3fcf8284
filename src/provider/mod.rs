pub mod config;
pub(crate) mod fixture;
pub(crate) mod gemini;

use std::{future::Future, path::PathBuf};

use log::{error, info, warn};

use crate::VelocityError;
use crate::model::{DashboardData, ProviderPayload};

pub use config::ProviderConfig;
pub use fixture::FixtureProvider;
pub use gemini::GeminiProvider;

/// Message shown to the user whenever the provider fails. The underlying
/// error is only logged.
pub const PROVIDER_FAILURE_MESSAGE: &str =
    "System Synchronization Interrupted. Re-authenticating...";

/// Source of dashboard data. Implementations are invoked once per session.
pub trait DataProvider {
    fn fetch(&self) -> impl Future<Output = Result<ProviderPayload, VelocityError>> + Send;
}

/// Result of the single startup fetch, after normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    Loaded(DashboardData),
    Failed(String),
}

/// Invokes the provider and absorbs any failure into the fixed user-facing
/// message.
pub async fn load_dashboard<P: DataProvider>(provider: &P) -> FetchOutcome {
    match provider.fetch().await {
        Ok(payload) => {
            let data = DashboardData::from(payload);
            info!(
                "Loaded dashboard data: {} drivers, {} circuits, {} sources",
                data.standings.len(),
                data.circuits.len(),
                data.sources.len()
            );
            FetchOutcome::Loaded(data)
        }
        Err(e) => {
            error!("Data provider failed: {} ({:?})", e, e);
            FetchOutcome::Failed(PROVIDER_FAILURE_MESSAGE.to_string())
        }
    }
}

/// Provider selected from the command line: a fixture file when one is given,
/// Gemini otherwise. Configuration problems are deferred to the fetch so they
/// surface as a regular provider failure.
#[derive(Debug)]
pub enum ConfiguredProvider {
    Gemini(GeminiProvider),
    Fixture(FixtureProvider),
    Unavailable { reason: String },
}

impl ConfiguredProvider {
    pub fn from_options(fixture: Option<PathBuf>, model: Option<String>) -> Self {
        if let Some(path) = fixture {
            return ConfiguredProvider::Fixture(FixtureProvider::new(path));
        }
        let provider = ProviderConfig::from_env().and_then(|mut config| {
            if let Some(model) = model {
                config.model = model;
            }
            info!("Using data provider {:?}", config);
            GeminiProvider::new(config)
        });
        match provider {
            Ok(provider) => ConfiguredProvider::Gemini(provider),
            Err(e) => {
                warn!("Data provider is not configured: {}", e);
                ConfiguredProvider::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl DataProvider for ConfiguredProvider {
    fn fetch(&self) -> impl Future<Output = Result<ProviderPayload, VelocityError>> + Send {
        async move {
            match self {
                ConfiguredProvider::Gemini(provider) => provider.fetch().await,
                ConfiguredProvider::Fixture(provider) => provider.fetch().await,
                ConfiguredProvider::Unavailable { reason } => {
                    Err(VelocityError::ProviderUnavailable {
                        reason: reason.clone(),
                    })
                }
            }
        }
    }
}

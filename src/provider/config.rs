//! Data provider configuration.
//!
//! Defaults point to the public Gemini endpoint. Override via environment
//! variables or explicit construction for testing.

use url::Url;

use crate::VelocityError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the Gemini data provider.
///
/// `Debug` redacts the API key so the config can be logged.
#[derive(Clone)]
pub struct ProviderConfig {
    pub base_url: Url,
    pub model: String,
    pub api_key: String,
    /// Request timeout. `None` means the request may hang indefinitely,
    /// leaving the dashboard in its loading state.
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ProviderConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `GEMINI_API_KEY`, falling back to `API_KEY` (required)
    /// - `GEMINI_MODEL` (default: `gemini-2.5-flash`)
    /// - `GEMINI_BASE_URL` (default: `https://generativelanguage.googleapis.com`)
    /// - `GEMINI_TIMEOUT_SECS` (default: no timeout)
    pub fn from_env() -> Result<Self, VelocityError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build the configuration from a variable lookup. Blank values count
    /// as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self, VelocityError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = var("GEMINI_API_KEY")
            .or_else(|| var("API_KEY"))
            .ok_or(VelocityError::MissingApiKey)?;
        let base_url = var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = match var("GEMINI_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(_) => return Err(VelocityError::InvalidProviderTimeout { value }),
            },
            None => None,
        };

        Ok(Self {
            base_url: parse_url(&base_url)?,
            model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key,
            timeout_secs,
        })
    }

    /// Configuration pointing at an explicit endpoint, used by tests against
    /// a local mock server.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, VelocityError> {
        Ok(Self {
            base_url: parse_url(base_url)?,
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.to_string(),
            timeout_secs: Some(5),
        })
    }

    /// Full `generateContent` endpoint for the configured model.
    pub fn endpoint(&self) -> Result<Url, VelocityError> {
        let path = format!("v1beta/models/{}:generateContent", self.model);
        self.base_url
            .join(&path)
            .map_err(|e| VelocityError::InvalidProviderUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })
    }
}

fn parse_url(raw: &str) -> Result<Url, VelocityError> {
    // a trailing slash keeps Url::join from dropping the last path segment
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalized).map_err(|e| VelocityError::InvalidProviderUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

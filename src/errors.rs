// Error types for velocity

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum VelocityError {
    // Errors while talking to the data provider
    #[snafu(display("Missing data provider API key, set GEMINI_API_KEY"))]
    MissingApiKey,
    #[snafu(display("Data provider unavailable: {reason}"))]
    ProviderUnavailable { reason: String },
    #[snafu(display("Invalid data provider URL {url}: {reason}"))]
    InvalidProviderUrl { url: String, reason: String },
    #[snafu(display("Invalid GEMINI_TIMEOUT_SECS value {value:?}, expected whole seconds"))]
    InvalidProviderTimeout { value: String },
    #[snafu(display("Could not initialize the data provider client"))]
    ProviderClientError { source: reqwest::Error },
    #[snafu(display("Data provider request to {endpoint} failed"))]
    ProviderRequestError {
        endpoint: String,
        source: reqwest::Error,
    },
    #[snafu(display("Data provider returned status {status}: {body}"))]
    ProviderStatusError { status: u16, body: String },
    #[snafu(display("Data provider response had no usable content: {reason}"))]
    ProviderContentError { reason: String },
    #[snafu(display("Could not decode data provider payload"))]
    PayloadDecodeError { source: serde_json::Error },

    // Errors for the offline fixture provider
    #[snafu(display("Error reading fixture file {path}"))]
    FixtureIOError { path: String, source: io::Error },

    // Errors for the fetch session
    #[snafu(display("Could not start the fetch runtime"))]
    RuntimeError { source: io::Error },

    // Config management errors
    #[snafu(display("Could not find application config directory"))]
    NoConfigDir,
    #[snafu(display("Error reading config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error parsing config file"))]
    ConfigParseError { source: serde_json::Error },

    // Output errors
    #[snafu(display("Error serializing dashboard snapshot"))]
    SnapshotSerializeError { source: serde_json::Error },
}

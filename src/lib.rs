// Library interface for velocity
// This allows integration tests to access internal modules

pub mod errors;
pub mod model;
pub mod projection;
pub mod provider;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use errors::VelocityError;
pub use model::{CircuitData, DashboardData, Driver, LapRecord, ProviderPayload, Source};
pub use provider::{DataProvider, FetchOutcome, PROVIDER_FAILURE_MESSAGE, load_dashboard};
pub use session::FetchSession;
pub use state::{Action, DashboardState, Phase, StateSnapshot};

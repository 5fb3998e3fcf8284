// Dashboard state machine
// The dashboard starts in Loading and moves exactly once to Ready or Error.
// All mutation goes through DashboardState::apply.

pub mod selection;

use log::{debug, warn};
use serde::Serialize;

use crate::model::{CircuitData, DashboardData, Driver, Source};
use crate::provider::FetchOutcome;

/// Lifecycle phase of the dashboard.
#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Loading,
    Ready(DashboardData),
    Error { message: String },
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Loading => "Loading",
            Phase::Ready(_) => "Ready",
            Phase::Error { .. } => "Error",
        }
    }
}

/// Inputs accepted by the state machine.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// The startup fetch succeeded with normalized data
    Loaded(DashboardData),
    /// The startup fetch failed, carries the user-facing message
    Failed(String),
    /// The user picked a circuit by name
    SelectCircuit(String),
}

impl From<FetchOutcome> for Action {
    fn from(outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Loaded(data) => Action::Loaded(data),
            FetchOutcome::Failed(message) => Action::Failed(message),
        }
    }
}

/// `DashboardState` holds the current phase and the selected circuit.
///
/// The selection is an index into the circuits of the `Ready` phase. Circuits
/// never change once loaded, so a selection can never reference a stale or
/// foreign circuit.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardState {
    phase: Phase,
    selected: Option<usize>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            phase: Phase::Loading,
            selected: None,
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unidirectional update function.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Loaded(data) => self.transition_to_ready(data),
            Action::Failed(message) => self.transition_to_error(message),
            Action::SelectCircuit(name) => self.select(&name),
        }
    }

    /// Moves from Loading to Ready and selects the default circuit.
    /// Re-applying the data the state already holds changes nothing.
    pub fn transition_to_ready(&mut self, data: DashboardData) {
        match &self.phase {
            Phase::Loading => {
                self.selected = selection::default_selection(&data.circuits);
                self.phase = Phase::Ready(data);
            }
            Phase::Ready(current) if *current == data => {
                debug!("Dashboard already holds this data");
            }
            phase => warn!("Ignoring ready transition from {} state", phase.name()),
        }
    }

    /// Moves from Loading to Error. Standings, circuits and sources stay empty.
    pub fn transition_to_error(&mut self, message: String) {
        match &self.phase {
            Phase::Loading => {
                self.phase = Phase::Error { message };
            }
            phase => warn!("Ignoring error transition from {} state", phase.name()),
        }
    }

    /// Selects the circuit called `name`; unknown names are ignored.
    pub fn select(&mut self, name: &str) {
        self.selected = selection::select(name, self.circuits(), self.selected);
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error { message } => Some(message),
            _ => None,
        }
    }

    fn data(&self) -> Option<&DashboardData> {
        match &self.phase {
            Phase::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn standings(&self) -> &[Driver] {
        self.data().map(|d| d.standings.as_slice()).unwrap_or(&[])
    }

    pub fn circuits(&self) -> &[CircuitData] {
        self.data().map(|d| d.circuits.as_slice()).unwrap_or(&[])
    }

    pub fn sources(&self) -> &[Source] {
        self.data().map(|d| d.sources.as_slice()).unwrap_or(&[])
    }

    pub fn selected_circuit(&self) -> Option<&CircuitData> {
        self.selected.and_then(|index| self.circuits().get(index))
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            standings: self.standings().to_vec(),
            circuits: self.circuits().to_vec(),
            sources: self.sources().to_vec(),
            is_loading: self.is_loading(),
            error: self.error().map(str::to_string),
            selected_circuit: self.selected_circuit().cloned(),
        }
    }
}

/// Flat, serializable view of the dashboard state.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub standings: Vec<Driver>,
    pub circuits: Vec<CircuitData>,
    pub sources: Vec<Source>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub selected_circuit: Option<CircuitData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circuit(name: &str) -> CircuitData {
        CircuitData {
            name: name.to_string(),
            location: "Somewhere".to_string(),
            length: "5.000km".to_string(),
            track_map_url: None,
            records: Vec::new(),
            history: Vec::new(),
        }
    }

    fn data_with(circuits: &[&str]) -> DashboardData {
        DashboardData {
            standings: Vec::new(),
            circuits: circuits.iter().map(|n| circuit(n)).collect(),
            sources: Vec::new(),
        }
    }

    #[test]
    fn test_new_state_is_loading_and_empty() {
        let state = DashboardState::new();
        assert!(state.is_loading());
        assert_eq!(state.error(), None);
        assert!(state.standings().is_empty());
        assert!(state.circuits().is_empty());
        assert!(state.sources().is_empty());
        assert!(state.selected_circuit().is_none());
    }

    #[test]
    fn test_ready_selects_first_circuit() {
        let mut state = DashboardState::new();
        state.apply(Action::Loaded(data_with(&["Monza", "Spa"])));
        assert!(!state.is_loading());
        assert_eq!(state.selected_circuit().unwrap().name, "Monza");
    }

    #[test]
    fn test_ready_twice_is_idempotent() {
        let mut once = DashboardState::new();
        once.transition_to_ready(data_with(&["Monza", "Spa"]));
        let mut twice = once.clone();
        twice.transition_to_ready(data_with(&["Monza", "Spa"]));
        assert_eq!(once, twice);
        assert_eq!(twice.circuits().len(), 2);
    }

    #[test]
    fn test_terminal_states_ignore_further_transitions() {
        let mut state = DashboardState::new();
        state.transition_to_error("boom".to_string());
        state.transition_to_ready(data_with(&["Monza"]));
        assert_eq!(state.error(), Some("boom"));
        assert!(state.circuits().is_empty());

        let mut state = DashboardState::new();
        state.transition_to_ready(data_with(&["Monza"]));
        state.transition_to_error("boom".to_string());
        state.transition_to_ready(data_with(&["Spa"]));
        assert_eq!(state.error(), None);
        assert_eq!(state.selected_circuit().unwrap().name, "Monza");
    }

    #[test]
    fn test_select_while_loading_or_failed_is_ignored() {
        let mut state = DashboardState::new();
        state.apply(Action::SelectCircuit("Monza".to_string()));
        assert!(state.selected_circuit().is_none());

        state.apply(Action::Failed("boom".to_string()));
        state.apply(Action::SelectCircuit("Monza".to_string()));
        assert!(state.selected_circuit().is_none());
    }

    #[test]
    fn test_fetch_outcome_converts_to_action() {
        assert_eq!(
            Action::from(FetchOutcome::Failed("x".to_string())),
            Action::Failed("x".to_string())
        );
        assert_eq!(
            Action::from(FetchOutcome::Loaded(DashboardData::default())),
            Action::Loaded(DashboardData::default())
        );
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let mut state = DashboardState::new();
        state.apply(Action::Loaded(data_with(&["Monza"])));
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["isLoading"], false);
        assert_eq!(json["error"], serde_json::Value::Null);
        assert_eq!(json["selectedCircuit"]["name"], "Monza");
    }
}

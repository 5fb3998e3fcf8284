// Core data structures shared by the provider, the state store and the views

use serde::{Deserialize, Serialize};

/// A driver entry in the championship standings.
///
/// Standings are kept in the order the provider returned them. `position` is
/// informational only: duplicated or missing positions are tolerated.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub position: i32,
    pub name: String,
    pub team: String,
    pub points: f64,
    pub wins: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A lap record set on a circuit.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LapRecord {
    pub circuit: String,
    pub driver: String,
    pub year: i32,
    /// Display string, usually "M:SS.mmm". Not validated against `seconds`
    pub time: String,
    /// Authoritative lap time in seconds
    pub seconds: f64,
}

/// Historic best lap time for a circuit in a given season.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct HistoryPoint {
    pub year: i32,
    /// Lap time in seconds
    pub time: f64,
}

/// A circuit and its lap records. `name` is the selection key.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CircuitData {
    pub name: String,
    pub location: String,
    pub length: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_map_url: Option<String>,
    /// The first record is the featured one
    #[serde(default)]
    pub records: Vec<LapRecord>,
    #[serde(default)]
    pub history: Vec<HistoryPoint>,
}

/// A citation returned alongside the provider data.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Data section of a provider response. Both sequences may be missing.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ProviderData {
    #[serde(default)]
    pub standings: Option<Vec<Driver>>,
    #[serde(default)]
    pub circuits: Option<Vec<CircuitData>>,
}

/// Raw response of a data provider, before normalization.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ProviderPayload {
    #[serde(default)]
    pub data: ProviderData,
    #[serde(default)]
    pub sources: Option<Vec<Source>>,
}

/// Normalized dashboard content. This is the only shape that enters the
/// state store: every sequence is present, possibly empty.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DashboardData {
    pub standings: Vec<Driver>,
    pub circuits: Vec<CircuitData>,
    pub sources: Vec<Source>,
}

impl From<ProviderPayload> for DashboardData {
    fn from(payload: ProviderPayload) -> Self {
        Self {
            standings: payload.data.standings.unwrap_or_default(),
            circuits: payload.data.circuits.unwrap_or_default(),
            sources: payload.sources.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_normalizes_to_empty_sequences() {
        let payload: ProviderPayload =
            serde_json::from_str(r#"{"data":{},"sources":[]}"#).unwrap();
        let data = DashboardData::from(payload);
        assert!(data.standings.is_empty());
        assert!(data.circuits.is_empty());
        assert!(data.sources.is_empty());
    }

    #[test]
    fn test_null_and_missing_fields_normalize() {
        let payload: ProviderPayload =
            serde_json::from_str(r#"{"data":{"standings":null}}"#).unwrap();
        assert_eq!(DashboardData::from(payload), DashboardData::default());
    }

    #[test]
    fn test_camel_case_fields_and_optional_urls() {
        let circuit: CircuitData = serde_json::from_str(
            r#"{"name":"Monza","location":"Italy","length":"5.793km","trackMapUrl":"https://maps/monza.png"}"#,
        )
        .unwrap();
        assert_eq!(
            circuit.track_map_url.as_deref(),
            Some("https://maps/monza.png")
        );
        assert!(circuit.records.is_empty());
        assert!(circuit.history.is_empty());

        let driver: Driver = serde_json::from_str(
            r#"{"position":1,"name":"A","team":"T","points":10.5,"wins":1}"#,
        )
        .unwrap();
        assert_eq!(driver.image_url, None);
        assert_eq!(driver.points, 10.5);
    }

    #[test]
    fn test_source_tolerates_missing_title_and_uri() {
        let sources: Vec<Source> =
            serde_json::from_str(r#"[{"title":"F1"},{"uri":"https://f1.com"},{}]"#).unwrap();
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0].uri, None);
        assert_eq!(sources[1].title, None);
        assert_eq!(sources[2], Source::default());
    }
}

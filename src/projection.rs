// Display projections derived from the dashboard state.
// Everything here is a pure function of its inputs and is recomputed every frame.

use itertools::Itertools;

use crate::model::{CircuitData, Driver, LapRecord, Source};

pub const DEFAULT_CITATION_LIMIT: usize = 3;
pub const FALLBACK_LEADER_IMAGE_URL: &str = "https://picsum.photos/seed/f1leader/1200/800";
const UNTITLED_SOURCE: &str = "Untitled source";

/// Championship leader: the first driver in provider order.
pub fn leader(standings: &[Driver]) -> Option<&Driver> {
    standings.first()
}

/// Hero image for the leader, falling back to a stock picture.
pub fn leader_image_url(leader: Option<&Driver>) -> &str {
    leader
        .and_then(|d| d.image_url.as_deref())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(FALLBACK_LEADER_IMAGE_URL)
}

/// Headline record of a circuit.
pub fn featured_record(circuit: &CircuitData) -> Option<&LapRecord> {
    circuit.records.first()
}

/// Fields of the featured record, each of which may be missing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeaturedRecordView<'a> {
    pub time: Option<&'a str>,
    pub driver: Option<&'a str>,
    pub year: Option<i32>,
}

impl<'a> FeaturedRecordView<'a> {
    pub fn of(circuit: Option<&'a CircuitData>) -> Self {
        match circuit.and_then(featured_record) {
            Some(record) => Self {
                time: Some(record.time.as_str()).filter(|t| !t.is_empty()),
                driver: Some(record.driver.as_str()).filter(|d| !d.is_empty()),
                year: Some(record.year),
            },
            None => Self::default(),
        }
    }
}

/// A citation ready for display. Entries without title or uri are kept.
#[derive(Clone, Debug, PartialEq)]
pub struct Citation<'a> {
    pub title: Option<&'a str>,
    pub uri: Option<&'a str>,
}

impl Citation<'_> {
    /// Title, then uri, then a placeholder.
    pub fn label(&self) -> &str {
        self.title
            .filter(|t| !t.trim().is_empty())
            .or(self.uri)
            .unwrap_or(UNTITLED_SOURCE)
    }
}

/// First `limit` sources in their original order.
pub fn citation_list(sources: &[Source], limit: usize) -> Vec<Citation<'_>> {
    sources
        .iter()
        .take(limit)
        .map(|s| Citation {
            title: s.title.as_deref(),
            uri: s.uri.as_deref(),
        })
        .collect()
}

/// Historic lap times as `[year, seconds]` plot points, oldest first.
pub fn history_series(circuit: &CircuitData) -> Vec<[f64; 2]> {
    circuit
        .history
        .iter()
        .filter(|p| p.time.is_finite())
        .sorted_by_key(|p| p.year)
        .map(|p| [p.year as f64, p.time])
        .collect()
}

/// Formats a lap time in seconds as "M:SS.mmm".
pub fn format_lap_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0. {
        return "-".to_string();
    }
    let total_ms = (seconds * 1000.).round() as u64;
    let minutes = total_ms / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{}:{:02}.{:03}", minutes, secs, millis)
}

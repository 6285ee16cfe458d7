//! Zone data model: descriptors, per-zone verdicts and the scan result.

use regex::Regex;
use seatwatch_core::{Timestamp, ZoneCode};
use serde::Serialize;
use std::sync::OnceLock;

/// A seating zone discovered on the seat selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneDescriptor {
    /// Entry text as shown on the page, whitespace-normalised
    pub display_name: String,
    /// Zone code extracted from `Sec <code>`
    pub code: ZoneCode,
    /// Position in discovery order
    pub source_index: usize,
}

impl ZoneDescriptor {
    /// Parse a zone entry's text.
    ///
    /// Returns `None` unless the text contains `Sec` and matches
    /// `Sec <code>` (case-insensitive).
    #[must_use]
    pub fn parse(text: &str, source_index: usize) -> Option<Self> {
        static SEC_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = SEC_REGEX.get_or_init(|| Regex::new(r"(?i)Sec ([A-Z0-9]+)").expect("valid regex"));

        let display_name = normalize_whitespace(text);
        if !display_name.contains("Sec") {
            return None;
        }

        let raw_code = regex.captures(&display_name)?.get(1)?.as_str();
        match ZoneCode::new(raw_code) {
            Ok(code) => Some(Self {
                display_name,
                code,
                source_index,
            }),
            Err(e) => {
                tracing::debug!("Skipping zone entry '{}': {}", display_name, e);
                None
            }
        }
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Availability determination for one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneVerdict {
    /// The zone this verdict is about
    pub zone: ZoneDescriptor,
    /// Whether purchasable seats were seen
    pub available: bool,
    /// Lower-bound count of interactable seat elements
    pub approx_seat_count: usize,
}

/// A zone that could not be classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneFailure {
    /// The zone that failed
    pub zone: ZoneDescriptor,
    /// Why classification failed
    pub reason: String,
}

/// Per-zone classification result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ZoneOutcome {
    /// The zone was inspected
    Classified(ZoneVerdict),
    /// The zone produced no verdict
    Failed(ZoneFailure),
}

/// Aggregated result of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// When classification finished
    pub timestamp: Timestamp,
    /// Verdicts in ranked order
    pub verdicts: Vec<ZoneVerdict>,
    /// Zones without a verdict, in ranked order
    pub failures: Vec<ZoneFailure>,
    /// True iff at least one verdict is available
    pub any_available: bool,
}

impl ScanResult {
    /// Build a result from per-zone outcomes, keeping their order.
    #[must_use]
    pub fn from_outcomes(timestamp: Timestamp, outcomes: Vec<ZoneOutcome>) -> Self {
        let mut verdicts = Vec::new();
        let mut failures = Vec::new();

        for outcome in outcomes {
            match outcome {
                ZoneOutcome::Classified(verdict) => verdicts.push(verdict),
                ZoneOutcome::Failed(failure) => failures.push(failure),
            }
        }

        let any_available = verdicts.iter().any(|v| v.available);
        Self {
            timestamp,
            verdicts,
            failures,
            any_available,
        }
    }

    /// Available verdicts in ranked order.
    pub fn available(&self) -> impl Iterator<Item = &ZoneVerdict> {
        self.verdicts.iter().filter(|v| v.available)
    }
}

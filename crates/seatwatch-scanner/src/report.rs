//! Availability report rendering.

use crate::ranker::PriorityRanker;
use crate::zone::{ScanResult, ZoneVerdict};
use seatwatch_core::AppConfig;
use std::fmt::Write;

/// Static text that frames the report.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    /// Headline line, wrapped in celebration emoji
    pub headline: String,
    /// Event name line
    pub event_name: Option<String>,
    /// Event date/time line
    pub event_schedule: Option<String>,
    /// Link printed under "BOOK NOW"
    pub booking_url: String,
    /// Closing line
    pub sign_off: Option<String>,
    /// Maximum entries listed under "Other Available Zones"
    pub other_zones_limit: usize,
}

impl ReportSettings {
    /// Build settings from the application config.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            headline: config.target.headline.clone(),
            event_name: config.target.event_name.clone(),
            event_schedule: config.target.event_schedule.clone(),
            booking_url: config.target.url.clone(),
            sign_off: config.target.sign_off.clone(),
            other_zones_limit: config.scanning.other_zones_limit,
        }
    }
}

/// Available zones split by priority membership, in ranked order.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityReport<'a> {
    /// Available zones on the priority list
    pub priority: Vec<&'a ZoneVerdict>,
    /// Remaining available zones
    pub others: Vec<&'a ZoneVerdict>,
}

impl<'a> AvailabilityReport<'a> {
    /// Partition the available verdicts of a result.
    #[must_use]
    pub fn partition(result: &'a ScanResult, ranker: &PriorityRanker) -> Self {
        let (priority, others) = result
            .available()
            .partition(|verdict| ranker.is_priority(&verdict.zone.code));
        Self { priority, others }
    }
}

/// Render the notification text for a scan result.
///
/// Pure: the same result and settings always produce the same text.
#[must_use]
pub fn render_report(
    result: &ScanResult,
    ranker: &PriorityRanker,
    settings: &ReportSettings,
) -> String {
    let report = AvailabilityReport::partition(result, ranker);
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "🎉🎉🎉 {} 🎉🎉🎉", settings.headline);
    out.push('\n');

    if settings.event_schedule.is_some() || settings.event_name.is_some() {
        if let Some(schedule) = &settings.event_schedule {
            let _ = writeln!(out, "📅 {schedule}");
        }
        if let Some(name) = &settings.event_name {
            let _ = writeln!(out, "🎪 {name}");
        }
        out.push('\n');
    }

    if !report.priority.is_empty() {
        let _ = writeln!(
            out,
            "⭐⭐⭐ PRIORITY ZONES AVAILABLE ({}) ⭐⭐⭐",
            report.priority.len()
        );
        for verdict in &report.priority {
            let _ = writeln!(
                out,
                "  🎯 {} (~{} seats)",
                verdict.zone.display_name, verdict.approx_seat_count
            );
        }
        out.push('\n');
    }

    if !report.others.is_empty() {
        let _ = writeln!(out, "🪑 Other Available Zones ({}):", report.others.len());
        for verdict in report.others.iter().take(settings.other_zones_limit) {
            let _ = writeln!(
                out,
                "  • {} (~{} seats)",
                verdict.zone.display_name, verdict.approx_seat_count
            );
        }
        if report.others.len() > settings.other_zones_limit {
            let _ = writeln!(
                out,
                "  ... and {} more",
                report.others.len() - settings.other_zones_limit
            );
        }
        out.push('\n');
    }

    let _ = writeln!(out, "🔗 BOOK NOW: {}", settings.booking_url);
    out.push('\n');
    let _ = writeln!(out, "⏰ Detected at: {}", result.timestamp.to_report_string());

    if let Some(sign_off) = &settings.sign_off {
        out.push('\n');
        let _ = writeln!(out, "{sign_off}");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::{ZoneDescriptor, ZoneOutcome};
    use seatwatch_core::{Timestamp, ZoneCode};

    fn ranker() -> PriorityRanker {
        PriorityRanker::new(vec![
            ZoneCode::new("F1").expect("valid code"),
            ZoneCode::new("A").expect("valid code"),
        ])
    }

    fn settings() -> ReportSettings {
        ReportSettings {
            headline: "TICKETS AVAILABLE!".to_string(),
            event_name: Some("Fan Meeting".to_string()),
            event_schedule: Some("2025.10.18 17:00".to_string()),
            booking_url: "https://tickets.example.com/show".to_string(),
            sign_off: None,
            other_zones_limit: 10,
        }
    }

    fn verdict(code: &str, index: usize, available: bool, seats: usize) -> ZoneOutcome {
        ZoneOutcome::Classified(ZoneVerdict {
            zone: ZoneDescriptor::parse(&format!("Floor 2, Sec {code}"), index)
                .expect("valid zone"),
            available,
            approx_seat_count: seats,
        })
    }

    fn timestamp() -> Timestamp {
        Timestamp::from_rfc3339("2025-10-18T08:00:00Z").expect("parse timestamp")
    }

    #[test]
    fn test_report_sections() {
        let result = ScanResult::from_outcomes(
            timestamp(),
            vec![
                verdict("F1", 0, true, 4),
                verdict("A", 1, false, 0),
                verdict("X", 2, true, 7),
            ],
        );

        let text = render_report(&result, &ranker(), &settings());
        assert!(text.starts_with("🎉🎉🎉 TICKETS AVAILABLE! 🎉🎉🎉\n"));
        assert!(text.contains("📅 2025.10.18 17:00\n🎪 Fan Meeting\n"));
        assert!(text.contains("⭐⭐⭐ PRIORITY ZONES AVAILABLE (1) ⭐⭐⭐\n  🎯 Floor 2, Sec F1 (~4 seats)\n"));
        assert!(text.contains("🪑 Other Available Zones (1):\n  • Floor 2, Sec X (~7 seats)\n"));
        assert!(!text.contains("Sec A"));
        assert!(text.contains("🔗 BOOK NOW: https://tickets.example.com/show"));
        assert!(text.contains("⏰ Detected at: 2025-10-18 08:00:00 UTC"));
    }

    #[test]
    fn test_other_zones_capped() {
        let outcomes = (0..13)
            .map(|i| verdict(&format!("Z{i}"), i, true, 1))
            .collect();
        let result = ScanResult::from_outcomes(timestamp(), outcomes);

        let text = render_report(&result, &ranker(), &settings());
        assert!(text.contains("🪑 Other Available Zones (13):"));
        assert_eq!(text.matches("  • ").count(), 10);
        assert!(text.contains("  ... and 3 more\n"));
        assert!(!text.contains("PRIORITY ZONES"));
    }

    #[test]
    fn test_optional_lines_omitted() {
        let result = ScanResult::from_outcomes(timestamp(), vec![verdict("F1", 0, true, 2)]);
        let mut settings = settings();
        settings.event_name = None;
        settings.event_schedule = None;
        settings.sign_off = Some("Go go go!".to_string());

        let text = render_report(&result, &ranker(), &settings);
        assert!(!text.contains("📅"));
        assert!(!text.contains("🎪"));
        assert!(!text.contains("Other Available Zones"));
        assert!(text.ends_with("Go go go!\n"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let result = ScanResult::from_outcomes(
            timestamp(),
            vec![verdict("F1", 0, true, 3), verdict("Q", 1, true, 5)],
        );
        let first = render_report(&result, &ranker(), &settings());
        let second = render_report(&result, &ranker(), &settings());
        assert_eq!(first, second);
    }

    #[test]
    fn test_partition_counts() {
        let result = ScanResult::from_outcomes(
            timestamp(),
            vec![
                verdict("A", 0, true, 1),
                verdict("B", 1, true, 1),
                verdict("F1", 2, false, 0),
            ],
        );
        let report = AvailabilityReport::partition(&result, &ranker());
        assert_eq!(report.priority.len(), 1);
        assert_eq!(report.others.len(), 1);
        assert_eq!(report.priority[0].zone.code.as_str(), "A");
    }
}

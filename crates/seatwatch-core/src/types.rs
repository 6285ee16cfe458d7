//! Shared types used across Seatwatch.

use crate::error::SeatwatchError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Newtype for seating zone codes (e.g. `F1`, `E`, `A`).
///
/// Codes are upper-case alphanumeric, 1-16 characters. Input is upper-cased
/// before validation so `f1` and `F1` name the same zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneCode(String);

impl ZoneCode {
    /// Create a new `ZoneCode`, normalising to upper case.
    ///
    /// # Errors
    /// Returns error if the code is empty, too long, or not alphanumeric.
    pub fn new(code: impl AsRef<str>) -> Result<Self, SeatwatchError> {
        let code = code.as_ref().trim().to_ascii_uppercase();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<(), SeatwatchError> {
        static CODE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex =
            CODE_REGEX.get_or_init(|| Regex::new(r"^[A-Z0-9]{1,16}$").expect("valid regex"));

        if regex.is_match(code) {
            Ok(())
        } else {
            Err(SeatwatchError::Validation(format!(
                "invalid zone code: must be 1-16 alphanumeric characters, got '{code}'"
            )))
        }
    }
}

impl fmt::Display for ZoneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ZoneCode {
    type Error = SeatwatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ZoneCode> for String {
    fn from(code: ZoneCode) -> Self {
        code.0
    }
}

/// UTC timestamp wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parse a timestamp from an RFC3339 string.
    pub fn from_rfc3339(s: &str) -> Result<Self, SeatwatchError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| SeatwatchError::Validation(format!("invalid timestamp: {e}")))
    }

    /// Format for human-readable reports, e.g. `2025-10-18 17:00:00 UTC`.
    #[must_use]
    pub fn to_report_string(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_code_valid() {
        for code in ["F1", "F2", "E", "A", "VIP1", "b"] {
            assert!(ZoneCode::new(code).is_ok(), "Failed for: {code}");
        }
    }

    #[test]
    fn test_zone_code_normalises_case() {
        let code = ZoneCode::new(" f1 ").expect("valid zone code");
        assert_eq!(code.as_str(), "F1");
        assert_eq!(code, ZoneCode::new("F1").expect("valid zone code"));
    }

    #[test]
    fn test_zone_code_invalid() {
        for code in ["", "F-1", "Sec A", "ABCDEFGHIJKLMNOPQ"] {
            assert!(ZoneCode::new(code).is_err(), "Should fail for: {code}");
        }
    }

    #[test]
    fn test_zone_code_serde() {
        let code: ZoneCode = serde_json::from_str("\"e\"").expect("deserialize zone code");
        assert_eq!(code.as_str(), "E");
        assert_eq!(serde_json::to_string(&code).expect("serialize"), "\"E\"");
        assert!(serde_json::from_str::<ZoneCode>("\"not a code\"").is_err());
    }

    #[test]
    fn test_timestamp_report_format() {
        let ts = Timestamp::from_rfc3339("2025-10-18T17:00:00Z").expect("parse timestamp");
        assert_eq!(ts.to_report_string(), "2025-10-18 17:00:00 UTC");
    }

    #[test]
    fn test_timestamp_ordering() {
        let ts1 = Timestamp::from_rfc3339("2025-10-18T17:00:00Z").expect("parse timestamp");
        let ts2 = Timestamp::from_rfc3339("2025-10-18T17:00:01Z").expect("parse timestamp");
        assert!(ts2 > ts1);
    }
}

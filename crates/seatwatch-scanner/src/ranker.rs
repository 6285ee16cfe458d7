//! Priority ordering of discovered zones.

use crate::zone::ZoneDescriptor;
use seatwatch_core::ZoneCode;

/// Orders zones by a configured priority list.
///
/// Listed codes come first, by their list position; unlisted codes follow.
/// Discovery order breaks ties, so the order is total and stable.
#[derive(Debug, Clone, Default)]
pub struct PriorityRanker {
    priority: Vec<ZoneCode>,
}

impl PriorityRanker {
    /// Create a ranker from an ordered list of codes.
    #[must_use]
    pub fn new(priority: Vec<ZoneCode>) -> Self {
        Self { priority }
    }

    /// Position of a code in the priority list.
    #[must_use]
    pub fn position(&self, code: &ZoneCode) -> Option<usize> {
        self.priority.iter().position(|p| p == code)
    }

    /// Whether a code appears in the priority list.
    #[must_use]
    pub fn is_priority(&self, code: &ZoneCode) -> bool {
        self.position(code).is_some()
    }

    /// Sort zones into classification order.
    #[must_use]
    pub fn rank(&self, mut zones: Vec<ZoneDescriptor>) -> Vec<ZoneDescriptor> {
        zones.sort_by_key(|zone| {
            (
                self.position(&zone.code).unwrap_or(usize::MAX),
                zone.source_index,
            )
        });
        zones
    }
}

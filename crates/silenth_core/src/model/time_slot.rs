//! Time-slot taxonomy.
//!
//! # Invariants
//! - The set of slots is closed; storage and wire names are identical.
//! - Every hour of day `0..24` maps to exactly one slot.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Named window of the day an entry was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeSlot {
    /// 00:00 - 03:00.
    EarlyDawn,
    /// 03:00 - 06:00.
    LateDawn,
    /// 06:00 - 12:00.
    Morning,
    /// 12:00 - 18:00.
    Afternoon,
    /// 18:00 - 24:00.
    Evening,
}

impl TimeSlot {
    /// All slots in chronological order.
    pub const ALL: [TimeSlot; 5] = [
        TimeSlot::EarlyDawn,
        TimeSlot::LateDawn,
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
    ];

    /// Stable name used in storage and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EarlyDawn => "EARLY_DAWN",
            Self::LateDawn => "LATE_DAWN",
            Self::Morning => "MORNING",
            Self::Afternoon => "AFTERNOON",
            Self::Evening => "EVENING",
        }
    }

    /// Parses a slot name, ignoring ASCII case and surrounding whitespace.
    ///
    /// Returns `None` for unknown names.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(normalized))
    }

    /// Maps an hour of day to its slot. Returns `None` when `hour >= 24`.
    pub fn from_hour(hour: u32) -> Option<Self> {
        match hour {
            0..=2 => Some(Self::EarlyDawn),
            3..=5 => Some(Self::LateDawn),
            6..=11 => Some(Self::Morning),
            12..=17 => Some(Self::Afternoon),
            18..=23 => Some(Self::Evening),
            _ => None,
        }
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::TimeSlot;

    #[test]
    fn parse_accepts_wire_names_case_insensitively() {
        assert_eq!(TimeSlot::parse("MORNING"), Some(TimeSlot::Morning));
        assert_eq!(TimeSlot::parse(" early_dawn "), Some(TimeSlot::EarlyDawn));
        assert_eq!(TimeSlot::parse("Late_Dawn"), Some(TimeSlot::LateDawn));
    }

    #[test]
    fn parse_rejects_unknown_and_empty_names() {
        assert_eq!(TimeSlot::parse("NIGHT"), None);
        assert_eq!(TimeSlot::parse(""), None);
        assert_eq!(TimeSlot::parse("EARLY DAWN"), None);
    }

    #[test]
    fn every_hour_maps_to_one_slot() {
        assert_eq!(TimeSlot::from_hour(0), Some(TimeSlot::EarlyDawn));
        assert_eq!(TimeSlot::from_hour(3), Some(TimeSlot::LateDawn));
        assert_eq!(TimeSlot::from_hour(6), Some(TimeSlot::Morning));
        assert_eq!(TimeSlot::from_hour(12), Some(TimeSlot::Afternoon));
        assert_eq!(TimeSlot::from_hour(23), Some(TimeSlot::Evening));
        assert_eq!(TimeSlot::from_hour(24), None);
        assert!((0..24).all(|hour| TimeSlot::from_hour(hour).is_some()));
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&TimeSlot::LateDawn).unwrap();
        assert_eq!(json, "\"LATE_DAWN\"");

        let parsed: TimeSlot = serde_json::from_str("\"AFTERNOON\"").unwrap();
        assert_eq!(parsed, TimeSlot::Afternoon);
        assert!(serde_json::from_str::<TimeSlot>("\"afternoon\"").is_err());
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for slot in TimeSlot::ALL {
            assert_eq!(TimeSlot::parse(slot.as_str()), Some(slot));
        }
    }
}

//! Aggregation output models.

use serde::{Deserialize, Serialize};

/// Per-member combat statistics accumulated over one query execution.
///
/// Entries are created on first encounter of a tag during a run and
/// discarded after ranking; there is no cross-request persistence.
/// `town_hall_level` is captured from the first war in which the member
/// is observed and never updated thereafter, even if later records show
/// a different level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStat {
    /// Player tag
    pub tag: String,

    /// Player name (first-seen)
    pub name: String,

    /// Town-hall level (first-seen, pinned for the run)
    pub town_hall_level: u8,

    /// Attempts that passed the attempt and comparison filters
    pub total_attempts: u32,

    /// Filtered attempts that also met the star threshold
    pub successful_attempts: u32,

    /// All attacks made, before filtering (attack mode only)
    pub raw_attack_count: u32,

    /// All stars earned, before filtering (attack mode only)
    pub raw_stars_earned: u32,
}

impl PlayerStat {
    /// Create a zeroed stat for a member on first encounter.
    pub fn new(tag: String, name: String, town_hall_level: u8) -> Self {
        Self {
            tag,
            name,
            town_hall_level,
            total_attempts: 0,
            successful_attempts: 0,
            raw_attack_count: 0,
            raw_stars_earned: 0,
        }
    }

    /// Success rate, undefined when no attempt qualified.
    pub fn rate(&self) -> Option<f64> {
        if self.total_attempts == 0 {
            None
        } else {
            Some(f64::from(self.successful_attempts) / f64::from(self.total_attempts))
        }
    }

    /// Average stars per raw attack, undefined when the member never attacked.
    pub fn avg_stars(&self) -> Option<f64> {
        if self.raw_attack_count == 0 {
            None
        } else {
            Some(f64::from(self.raw_stars_earned) / f64::from(self.raw_attack_count))
        }
    }
}

//! A single attack within a war.

use serde::{Deserialize, Serialize};

/// One attack made during a war.
///
/// `order` is assigned by the archive in attack occurrence time and is
/// globally unique and monotonically increasing across *all* attacks in
/// one war record, regardless of side. It is the sole basis for
/// freshness classification and is only ever compared, never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attack {
    /// Tag of the attacking player
    pub attacker_tag: String,

    /// Tag of the defending player
    pub defender_tag: String,

    /// Stars earned (0 to 3)
    pub stars: u8,

    /// Destruction percentage (0 to 100)
    pub destruction_percentage: f64,

    /// Global attack sequence number within the war
    pub order: u32,
}

impl Attack {
    /// Whether this attack is a low-effort "farm hit" (1 star, <50% destruction).
    pub fn is_farm_hit(&self) -> bool {
        self.stars == 1 && self.destruction_percentage < 50.0
    }

    /// Quality metric `destruction ^ stars`, the same metric the archive
    /// uses to pick a member's best opponent attack.
    pub fn quality(&self) -> f64 {
        self.destruction_percentage.powi(i32::from(self.stars))
    }
}

//! War roster member model.

use serde::{Deserialize, Serialize};

use super::Attack;

/// Lowest town-hall level that can participate in a war.
pub const MIN_TOWN_HALL_LEVEL: u8 = 2;

/// Highest town-hall level currently in the game.
pub const MAX_TOWN_HALL_LEVEL: u8 = 17;

/// A player on one side of a war.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Unique player tag, stable across wars
    pub tag: String,

    /// Player name at the time of the war
    pub name: String,

    /// Town-hall level during this war
    pub town_hall_level: u8,

    /// Attacks made by this member (0 to 2; absent in the archive when
    /// the member never attacked)
    #[serde(default)]
    pub attacks: Vec<Attack>,

    /// Strongest attack this member suffered, as recorded by the archive
    /// (absent when the member was never attacked)
    #[serde(default)]
    pub best_opponent_attack: Option<Attack>,
}

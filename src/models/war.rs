//! War record and side models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Attack, Member};

/// Category of a war, used to include or exclude records from aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarType {
    Regular,
    Friendly,
    Cwl,
}

impl std::fmt::Display for WarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarType::Regular => write!(f, "regular"),
            WarType::Friendly => write!(f, "friendly"),
            WarType::Cwl => write!(f, "cwl"),
        }
    }
}

/// One side of a war: a clan and its war roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Side {
    /// Unique clan tag
    pub tag: String,

    /// Clan name
    pub name: String,

    /// War roster in display order (order carries no meaning for analytics)
    pub members: Vec<Member>,
}

impl Side {
    /// Find a member of this side by player tag.
    pub fn member(&self, tag: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.tag == tag)
    }

    /// Flatten the attack lists of every member on this side.
    ///
    /// This is the freshness-classification input: all attacks made *by*
    /// this side in this war.
    pub fn all_attacks(&self) -> Vec<&Attack> {
        self.members.iter().flat_map(|m| m.attacks.iter()).collect()
    }
}

/// One completed or in-progress war between two sides.
///
/// Records are immutable once read; the engine never mutates archive data.
/// Which side is "clan" vs "opponent" is per-record, not semantically fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarRecord {
    /// War category
    pub war_type: WarType,

    /// Preparation-day start, used for window filtering
    pub preparation_start: DateTime<Utc>,

    /// First side
    pub side_a: Side,

    /// Second side
    pub side_b: Side,
}

impl WarRecord {
    /// Locate the side containing `tag` and its opponent.
    ///
    /// A member belongs to exactly one side per war; returns `None` when
    /// the tag took part in neither side.
    pub fn sides_for(&self, tag: &str) -> Option<(&Side, &Side)> {
        if self.side_a.member(tag).is_some() {
            Some((&self.side_a, &self.side_b))
        } else if self.side_b.member(tag).is_some() {
            Some((&self.side_b, &self.side_a))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(tag: &str, th: u8, attacks: Vec<Attack>) -> Member {
        Member {
            tag: tag.to_string(),
            name: format!("Player {}", tag),
            town_hall_level: th,
            attacks,
            best_opponent_attack: None,
        }
    }

    fn attack(attacker: &str, defender: &str, order: u32) -> Attack {
        Attack {
            attacker_tag: attacker.to_string(),
            defender_tag: defender.to_string(),
            stars: 2,
            destruction_percentage: 70.0,
            order,
        }
    }

    fn war() -> WarRecord {
        WarRecord {
            war_type: WarType::Regular,
            preparation_start: "2026-01-10T07:00:00Z".parse().unwrap(),
            side_a: Side {
                tag: "#CLANA".to_string(),
                name: "Alpha".to_string(),
                members: vec![
                    member("#A1", 13, vec![attack("#A1", "#B1", 1)]),
                    member("#A2", 12, vec![attack("#A2", "#B2", 3)]),
                ],
            },
            side_b: Side {
                tag: "#CLANB".to_string(),
                name: "Bravo".to_string(),
                members: vec![member("#B1", 13, vec![attack("#B1", "#A1", 2)])],
            },
        }
    }

    #[test]
    fn test_sides_for_first_side() {
        let war = war();
        let (own, opponent) = war.sides_for("#A1").unwrap();
        assert_eq!(own.tag, "#CLANA");
        assert_eq!(opponent.tag, "#CLANB");
    }

    #[test]
    fn test_sides_for_second_side() {
        let war = war();
        let (own, opponent) = war.sides_for("#B1").unwrap();
        assert_eq!(own.tag, "#CLANB");
        assert_eq!(opponent.tag, "#CLANA");
    }

    #[test]
    fn test_sides_for_absent_tag() {
        assert!(war().sides_for("#NOBODY").is_none());
    }

    #[test]
    fn test_all_attacks_flattens_member_order() {
        let war = war();
        let attacks = war.side_a.all_attacks();
        assert_eq!(attacks.len(), 2);
        assert_eq!(attacks[0].attacker_tag, "#A1");
        assert_eq!(attacks[1].attacker_tag, "#A2");
    }

    #[test]
    fn test_war_type_wire_names() {
        assert_eq!(serde_json::to_string(&WarType::Cwl).unwrap(), "\"cwl\"");
        let parsed: WarType = serde_json::from_str("\"friendly\"").unwrap();
        assert_eq!(parsed, WarType::Friendly);
    }

    #[test]
    fn test_war_type_display() {
        assert_eq!(format!("{}", WarType::Regular), "regular");
        assert_eq!(format!("{}", WarType::Cwl), "cwl");
    }
}

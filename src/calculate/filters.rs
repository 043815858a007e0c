//! Query filter types.
//!
//! All free-text filter inputs are resolved into closed variant types
//! once, at the query boundary; nothing downstream re-inspects strings.
//! Malformed input never fails: comparison strings fall back to `All`
//! and star thresholds to "exactly three" by contract.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{WarType, MAX_TOWN_HALL_LEVEL, MIN_TOWN_HALL_LEVEL};

/// Attack-freshness restriction requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attempt {
    /// Only the earliest attack against each defender
    Fresh,
    /// Only repeat attacks against an already-hit defender
    Cleanup,
}

impl Attempt {
    /// Parse `fresh` / `cleanup`; anything else is no restriction.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "fresh" => Some(Attempt::Fresh),
            "cleanup" => Some(Attempt::Cleanup),
            _ => None,
        }
    }

    /// Whether an attack with the given freshness passes this restriction.
    pub fn admits(&self, fresh: bool) -> bool {
        match self {
            Attempt::Fresh => fresh,
            Attempt::Cleanup => !fresh,
        }
    }
}

/// Town-hall matchup rule applied to (attacker, defender) levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareFilter {
    /// Always matches
    All,
    /// Attacker and defender levels must be identical
    Equal,
    /// Exact pair; `None` on either side is a wildcard
    Pair {
        attacker: Option<u8>,
        defender: Option<u8>,
    },
}

impl Default for CompareFilter {
    fn default() -> Self {
        CompareFilter::All
    }
}

impl CompareFilter {
    /// Parse a free-text comparison string.
    ///
    /// Accepted shapes: `13vs14`, `13v14`, `13 14`, `*vs9`, `13vs*`, and
    /// the literal `equal`. Anything else, including town-hall numbers
    /// outside the valid range, falls back to `All`. This fallback is a
    /// documented contract, not error tolerance.
    pub fn parse(input: &str) -> Self {
        let input = input.trim().to_ascii_lowercase();
        if input == "equal" {
            return CompareFilter::Equal;
        }

        let re = Regex::new(r"^(\*|\d{1,2})(?:\s*vs?\s*|\s+)(\*|\d{1,2})$").unwrap();
        let Some(caps) = re.captures(&input) else {
            return CompareFilter::All;
        };

        let attacker = match parse_level(&caps[1]) {
            Ok(level) => level,
            Err(()) => return CompareFilter::All,
        };
        let defender = match parse_level(&caps[2]) {
            Ok(level) => level,
            Err(()) => return CompareFilter::All,
        };

        CompareFilter::Pair { attacker, defender }
    }

    /// Whether an attack with the given town-hall levels matches.
    pub fn matches(&self, attacker_th: u8, defender_th: u8) -> bool {
        match self {
            CompareFilter::All => true,
            CompareFilter::Equal => attacker_th == defender_th,
            CompareFilter::Pair { attacker, defender } => {
                attacker.map_or(true, |th| th == attacker_th)
                    && defender.map_or(true, |th| th == defender_th)
            }
        }
    }
}

/// `Ok(None)` is a wildcard; `Err(())` is an out-of-range level.
fn parse_level(token: &str) -> Result<Option<u8>, ()> {
    if token == "*" {
        return Ok(None);
    }
    match token.parse::<u8>() {
        Ok(level) if (MIN_TOWN_HALL_LEVEL..=MAX_TOWN_HALL_LEVEL).contains(&level) => {
            Ok(Some(level))
        }
        _ => Err(()),
    }
}

/// Star-count success threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarThreshold {
    Exactly(u8),
    AtLeast(u8),
}

impl Default for StarThreshold {
    fn default() -> Self {
        StarThreshold::Exactly(3)
    }
}

impl StarThreshold {
    /// Parse a star-threshold string from the closed set
    /// `{==1, ==2, ==3, >=1, >=2}` (bare digits mean "exactly").
    /// Unrecognized specs default to exactly three.
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" | "==1" => StarThreshold::Exactly(1),
            "2" | "==2" => StarThreshold::Exactly(2),
            "3" | "==3" => StarThreshold::Exactly(3),
            ">=1" => StarThreshold::AtLeast(1),
            ">=2" => StarThreshold::AtLeast(2),
            _ => StarThreshold::default(),
        }
    }

    /// Whether an attack earning `stars` meets this threshold.
    pub fn meets(&self, stars: u8) -> bool {
        match self {
            StarThreshold::Exactly(n) => stars == *n,
            StarThreshold::AtLeast(n) => stars >= *n,
        }
    }
}

/// Which war categories participate in aggregation.
///
/// The default excludes friendly wars, matching archive convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarTypeFilter {
    pub regular: bool,
    pub friendly: bool,
    pub cwl: bool,
}

impl Default for WarTypeFilter {
    fn default() -> Self {
        Self {
            regular: true,
            friendly: false,
            cwl: true,
        }
    }
}

impl WarTypeFilter {
    /// Include every war category.
    pub fn all() -> Self {
        Self {
            regular: true,
            friendly: true,
            cwl: true,
        }
    }

    /// Include only the listed categories.
    pub fn only(types: &[WarType]) -> Self {
        let mut filter = Self {
            regular: false,
            friendly: false,
            cwl: false,
        };
        for war_type in types {
            filter.set(*war_type, true);
        }
        filter
    }

    /// Parse a comma/space separated list of categories. A leading `!`
    /// negates from the full set (`!friendly` = everything but friendly).
    /// Inputs with no recognized token fall back to the default.
    pub fn parse(input: &str) -> Self {
        let tokens: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.iter().any(|t| t.eq_ignore_ascii_case("all")) {
            return Self::all();
        }

        let negating = tokens.iter().any(|t| t.starts_with('!'));
        let mut filter = if negating {
            Self::all()
        } else {
            Self {
                regular: false,
                friendly: false,
                cwl: false,
            }
        };

        let mut recognized = false;
        for token in tokens {
            let (name, include) = match token.strip_prefix('!') {
                Some(rest) => (rest, false),
                None => (token, true),
            };
            let war_type = match name.to_ascii_lowercase().as_str() {
                "regular" => WarType::Regular,
                "friendly" => WarType::Friendly,
                "cwl" => WarType::Cwl,
                _ => continue,
            };
            recognized = true;
            filter.set(war_type, include);
        }

        if recognized {
            filter
        } else {
            Self::default()
        }
    }

    /// Whether records of the given category are included.
    pub fn allows(&self, war_type: WarType) -> bool {
        match war_type {
            WarType::Regular => self.regular,
            WarType::Friendly => self.friendly,
            WarType::Cwl => self.cwl,
        }
    }

    fn set(&mut self, war_type: WarType, include: bool) {
        match war_type {
            WarType::Regular => self.regular = include,
            WarType::Friendly => self.friendly = include,
            WarType::Cwl => self.cwl = include,
        }
    }
}

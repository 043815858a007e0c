//! Combat performance analytics engine.
//!
//! Computes per-member attack-success or defense-failure statistics from
//! a corpus of historical war records:
//! - Attack freshness classification (fresh vs cleanup)
//! - Defense engagement resolution
//! - Town-hall matchup and star-threshold filtering
//! - Per-member aggregation and tie-broken ranking
//!
//! The engine is pure, synchronous computation over an
//! already-materialized record sequence: one pass plus one sort, no I/O,
//! no shared state between invocations.

mod aggregate;
mod defense;
mod filters;
mod freshness;
mod ranking;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{PlayerStat, WarRecord};

pub use defense::resolve_defense_attack;
pub use filters::{Attempt, CompareFilter, StarThreshold, WarTypeFilter};
pub use freshness::is_fresh;

/// Whether the query measures members' own attacks or the attacks they
/// suffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    Attacks,
    Defense,
}

impl Mode {
    /// Parse `attacks` / `defense`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "attacks" => Some(Mode::Attacks),
            "defense" => Some(Mode::Defense),
            _ => None,
        }
    }
}

/// One analytics query: the subject and every comparison filter.
///
/// Raw filter strings are resolved into their variant types before the
/// request is built (`CompareFilter::parse`, `StarThreshold::parse`).
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Player tags to aggregate (a clan roster, a user's linked
    /// accounts, or an ad-hoc roster group)
    pub subject_tags: Vec<String>,

    /// Attack or defense mode
    pub mode: Mode,

    /// Town-hall matchup rule
    pub compare: CompareFilter,

    /// Success threshold
    pub stars: StarThreshold,

    /// Optional freshness restriction
    pub attempt: Option<Attempt>,

    /// Discard farm hits before counting (attack mode only)
    pub filter_farm_hits: bool,
}

impl AnalysisRequest {
    /// Create a request with default filters (all matchups, exactly
    /// three stars, no attempt restriction).
    pub fn new(subject_tags: Vec<String>, mode: Mode) -> Self {
        Self {
            subject_tags,
            mode,
            compare: CompareFilter::default(),
            stars: StarThreshold::default(),
            attempt: None,
            filter_farm_hits: false,
        }
    }

    /// Builder method to set the matchup rule.
    pub fn with_compare(mut self, compare: CompareFilter) -> Self {
        self.compare = compare;
        self
    }

    /// Builder method to set the success threshold.
    pub fn with_stars(mut self, stars: StarThreshold) -> Self {
        self.stars = stars;
        self
    }

    /// Builder method to set the freshness restriction.
    pub fn with_attempt(mut self, attempt: Option<Attempt>) -> Self {
        self.attempt = attempt;
        self
    }

    /// Builder method to enable farm-hit filtering.
    pub fn with_filter_farm_hits(mut self, filter: bool) -> Self {
        self.filter_farm_hits = filter;
        self
    }
}

/// Ranked analytics output.
///
/// An empty `stats` vector is a regular "no data" outcome, never an
/// error. `wars_considered` is carried for display purposes by the
/// presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Post-ranking leaderboard
    pub stats: Vec<PlayerStat>,

    /// Number of war records that entered aggregation
    pub wars_considered: usize,
}

/// Run one analytics query over an already-materialized record sequence.
///
/// Records are processed in the order supplied (archive order,
/// newest-first by convention); name and town-hall capture depend on
/// that order, the ranking itself does not.
pub fn analyze(records: &[WarRecord], request: &AnalysisRequest) -> AnalysisResult {
    let stats = aggregate::aggregate(records, request);

    let subject: HashSet<&str> = request.subject_tags.iter().map(String::as_str).collect();
    let ranked = ranking::rank(stats, &subject, request.attempt.is_some());

    debug!(
        wars = records.len(),
        members = ranked.len(),
        mode = ?request.mode,
        "analysis complete"
    );

    AnalysisResult {
        stats: ranked,
        wars_considered: records.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attack, Member, Side, WarType};
    use pretty_assertions::assert_eq;

    fn attack(attacker: &str, defender: &str, stars: u8, destruction: f64, order: u32) -> Attack {
        Attack {
            attacker_tag: attacker.to_string(),
            defender_tag: defender.to_string(),
            stars,
            destruction_percentage: destruction,
            order,
        }
    }

    fn member(tag: &str, th: u8, attacks: Vec<Attack>) -> Member {
        Member {
            tag: tag.to_string(),
            name: format!("Player {}", tag),
            town_hall_level: th,
            attacks,
            best_opponent_attack: None,
        }
    }

    fn war(side_a: Vec<Member>, side_b: Vec<Member>) -> WarRecord {
        WarRecord {
            war_type: WarType::Regular,
            preparation_start: "2026-02-01T07:00:00Z".parse().unwrap(),
            side_a: Side {
                tag: "#CLANA".to_string(),
                name: "Alpha".to_string(),
                members: side_a,
            },
            side_b: Side {
                tag: "#CLANB".to_string(),
                name: "Bravo".to_string(),
                members: side_b,
            },
        }
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse("attacks"), Some(Mode::Attacks));
        assert_eq!(Mode::parse(" Defense "), Some(Mode::Defense));
        assert_eq!(Mode::parse("both"), None);
    }

    #[test]
    fn test_zero_records_yield_empty_result() {
        let request = AnalysisRequest::new(tags(&["#A1"]), Mode::Attacks);
        let result = analyze(&[], &request);
        assert!(result.stats.is_empty());
        assert_eq!(result.wars_considered, 0);
    }

    #[test]
    fn test_fresh_filter_drops_cleaned_up_two_star_attacker() {
        // A1's fresh 2-star hit fails ==3; with an attempt filter the
        // ranking stage also requires a success, so A1 disappears.
        let records = [war(
            vec![
                member("#A1", 13, vec![attack("#A1", "#X", 2, 60.0, 1)]),
                member("#A2", 13, vec![attack("#A2", "#X", 3, 100.0, 2)]),
            ],
            vec![member("#X", 13, vec![])],
        )];

        let request = AnalysisRequest::new(tags(&["#A1"]), Mode::Attacks)
            .with_attempt(Some(Attempt::Fresh))
            .with_stars(StarThreshold::Exactly(3));

        let result = analyze(&records, &request);
        assert!(result.stats.is_empty());
        assert_eq!(result.wars_considered, 1);
    }

    #[test]
    fn test_matchup_pair_excludes_cross_level_attack() {
        // TH13 attacking TH14 under a 13vs13 rule: no attempt regardless
        // of stars.
        let records = [war(
            vec![member("#A1", 13, vec![attack("#A1", "#X", 3, 100.0, 1)])],
            vec![member("#X", 14, vec![])],
        )];

        let request = AnalysisRequest::new(tags(&["#A1"]), Mode::Attacks)
            .with_compare(CompareFilter::parse("13vs13"));

        let result = analyze(&records, &request);
        assert!(result.stats.is_empty());
    }

    #[test]
    fn test_defense_resolution_end_to_end() {
        // Two incoming hits; resolver picks the higher-quality order 5
        // (70^2 over 30^1). With >=2 stars that counts as one failure.
        let records = [war(
            vec![
                member("#A1", 13, vec![attack("#A1", "#D1", 1, 30.0, 3)]),
                member("#A2", 14, vec![attack("#A2", "#D1", 2, 70.0, 5)]),
            ],
            vec![member("#D1", 13, vec![])],
        )];

        let request = AnalysisRequest::new(tags(&["#D1"]), Mode::Defense)
            .with_stars(StarThreshold::AtLeast(2));

        let result = analyze(&records, &request);
        assert_eq!(result.stats.len(), 1);
        assert_eq!(result.stats[0].total_attempts, 1);
        assert_eq!(result.stats[0].successful_attempts, 1);
    }

    #[test]
    fn test_tightening_compare_never_increases_attempts() {
        let records = [war(
            vec![
                member("#A1", 13, vec![attack("#A1", "#X", 3, 100.0, 1)]),
                member("#A2", 12, vec![attack("#A2", "#Y", 2, 80.0, 2)]),
            ],
            vec![member("#X", 14, vec![]), member("#Y", 12, vec![])],
        )];
        let subject = tags(&["#A1", "#A2"]);

        let all = analyze(
            &records,
            &AnalysisRequest::new(subject.clone(), Mode::Attacks)
                .with_stars(StarThreshold::AtLeast(1)),
        );
        let pair = analyze(
            &records,
            &AnalysisRequest::new(subject, Mode::Attacks)
                .with_stars(StarThreshold::AtLeast(1))
                .with_compare(CompareFilter::parse("13vs14")),
        );

        for narrowed in &pair.stats {
            let wide = all
                .stats
                .iter()
                .find(|s| s.tag == narrowed.tag)
                .expect("member present under All");
            assert!(narrowed.total_attempts <= wide.total_attempts);
        }
    }

    #[test]
    fn test_rate_stays_within_bounds() {
        let records = [war(
            vec![
                member(
                    "#A1",
                    13,
                    vec![
                        attack("#A1", "#X", 3, 100.0, 1),
                        attack("#A1", "#Y", 1, 55.0, 3),
                    ],
                ),
                member("#A2", 12, vec![attack("#A2", "#Y", 0, 20.0, 2)]),
            ],
            vec![member("#X", 13, vec![]), member("#Y", 12, vec![])],
        )];

        let request = AnalysisRequest::new(tags(&["#A1", "#A2"]), Mode::Attacks)
            .with_stars(StarThreshold::AtLeast(2));
        let result = analyze(&records, &request);

        for stat in &result.stats {
            assert!(stat.successful_attempts <= stat.total_attempts);
            let rate = stat.rate().unwrap();
            assert!((0.0..=1.0).contains(&rate));
        }
    }

    #[test]
    fn test_record_reorder_does_not_change_ranking() {
        let war_one = war(
            vec![member("#A1", 13, vec![attack("#A1", "#X", 3, 100.0, 1)])],
            vec![member("#X", 13, vec![])],
        );
        let war_two = war(
            vec![member("#A2", 13, vec![attack("#A2", "#X", 2, 70.0, 1)])],
            vec![member("#X", 13, vec![])],
        );

        let request = AnalysisRequest::new(tags(&["#A1", "#A2"]), Mode::Attacks)
            .with_stars(StarThreshold::AtLeast(2));

        let forward = analyze(&[war_one.clone(), war_two.clone()], &request);
        let backward = analyze(&[war_two, war_one], &request);

        let forward_tags: Vec<&str> = forward.stats.iter().map(|s| s.tag.as_str()).collect();
        let backward_tags: Vec<&str> = backward.stats.iter().map(|s| s.tag.as_str()).collect();
        assert_eq!(forward_tags, backward_tags);
    }

    #[test]
    fn test_member_on_either_side_is_aggregated() {
        // Subject members split across both sides of one war
        let records = [war(
            vec![member("#A1", 13, vec![attack("#A1", "#B1", 3, 100.0, 1)])],
            vec![member("#B1", 13, vec![attack("#B1", "#A1", 3, 100.0, 2)])],
        )];

        let request = AnalysisRequest::new(tags(&["#A1", "#B1"]), Mode::Attacks);
        let result = analyze(&records, &request);
        assert_eq!(result.stats.len(), 2);
    }
}

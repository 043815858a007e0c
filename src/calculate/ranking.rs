//! Leaderboard ranking stage.

use std::collections::HashSet;

use crate::models::PlayerStat;

/// Filter and sort accumulated stats into the final leaderboard.
///
/// Drops entries with no qualifying attempts, entries outside the
/// subject's tag set, and — when the caller explicitly requested an
/// attempt filter — entries with no successful attempts. The sort is
/// stable: rate descending, then raw stars descending, then attempts
/// descending; equal keys preserve encounter order.
pub(super) fn rank(
    stats: Vec<PlayerStat>,
    subject_tags: &HashSet<&str>,
    attempt_requested: bool,
) -> Vec<PlayerStat> {
    let mut ranked: Vec<PlayerStat> = stats
        .into_iter()
        .filter(|s| s.total_attempts > 0)
        .filter(|s| subject_tags.contains(s.tag.as_str()))
        .filter(|s| !attempt_requested || s.successful_attempts > 0)
        .collect();

    ranked.sort_by(|a, b| {
        let rate_a = a.rate().unwrap_or(0.0);
        let rate_b = b.rate().unwrap_or(0.0);
        rate_b
            .total_cmp(&rate_a)
            .then_with(|| b.raw_stars_earned.cmp(&a.raw_stars_earned))
            .then_with(|| b.total_attempts.cmp(&a.total_attempts))
    });

    ranked
}

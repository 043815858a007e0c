//! Per-member aggregation over a sequence of war records.

use std::collections::HashMap;

use crate::models::{Member, PlayerStat, WarRecord};

use super::defense::resolve_defense_attack;
use super::freshness::is_fresh;
use super::{AnalysisRequest, Mode};

/// Accumulation map for one invocation: owned exclusively by a single
/// run and discarded after ranking. Entries keep encounter order, which
/// the ranking stage relies on for stable tie-breaking.
#[derive(Default)]
struct Accumulator {
    stats: Vec<PlayerStat>,
    index: HashMap<String, usize>,
}

impl Accumulator {
    /// Get or create the stat for a member. Name and town-hall level are
    /// pinned at first encounter and never updated within the run.
    fn entry(&mut self, member: &Member) -> &mut PlayerStat {
        let idx = match self.index.get(&member.tag).copied() {
            Some(idx) => idx,
            None => {
                let idx = self.stats.len();
                self.stats.push(PlayerStat::new(
                    member.tag.clone(),
                    member.name.clone(),
                    member.town_hall_level,
                ));
                self.index.insert(member.tag.clone(), idx);
                idx
            }
        };
        &mut self.stats[idx]
    }

    fn into_stats(self) -> Vec<PlayerStat> {
        self.stats
    }
}

/// Accumulate per-member statistics across all supplied war records,
/// in encounter order, without ranking.
pub(super) fn aggregate(records: &[WarRecord], request: &AnalysisRequest) -> Vec<PlayerStat> {
    let mut acc = Accumulator::default();

    for war in records {
        for tag in &request.subject_tags {
            let Some((side, opponent)) = war.sides_for(tag) else {
                continue;
            };
            // sides_for guarantees the member exists on `side`
            let Some(member) = side.member(tag) else {
                continue;
            };

            acc.entry(member);

            match request.mode {
                Mode::Attacks => {
                    let own_attacks = side.all_attacks();

                    for attack in &member.attacks {
                        // Farm hits vanish from raw and filtered counters alike
                        if request.filter_farm_hits && attack.is_farm_hit() {
                            continue;
                        }

                        let stat = acc.entry(member);
                        stat.raw_attack_count += 1;
                        stat.raw_stars_earned += u32::from(attack.stars);

                        if let Some(attempt) = request.attempt {
                            let fresh =
                                is_fresh(&own_attacks, &attack.defender_tag, attack.order);
                            if !attempt.admits(fresh) {
                                continue;
                            }
                        }

                        let Some(target) = opponent.member(&attack.defender_tag) else {
                            continue;
                        };
                        if !request
                            .compare
                            .matches(member.town_hall_level, target.town_hall_level)
                        {
                            continue;
                        }

                        let stat = acc.entry(member);
                        stat.total_attempts += 1;
                        if request.stars.meets(attack.stars) {
                            stat.successful_attempts += 1;
                        }
                    }
                }
                Mode::Defense => {
                    let opponent_attacks = opponent.all_attacks();
                    let Some(attack) =
                        resolve_defense_attack(member, &opponent_attacks, request.attempt)
                    else {
                        continue;
                    };
                    let Some(attacker) = opponent.member(&attack.attacker_tag) else {
                        continue;
                    };
                    if !request
                        .compare
                        .matches(attacker.town_hall_level, member.town_hall_level)
                    {
                        continue;
                    }

                    let stat = acc.entry(member);
                    stat.total_attempts += 1;
                    if request.stars.meets(attack.stars) {
                        stat.successful_attempts += 1;
                    }
                }
            }
        }
    }

    acc.into_stats()
}

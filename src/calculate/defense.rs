//! Defense engagement resolution.

use crate::models::{Attack, Member};

use super::filters::Attempt;
use super::freshness::is_fresh;

/// Select the single attack that counts as a member's defensive
/// engagement for one war, or `None` when no engagement qualifies.
///
/// `opponent_attacks` is the flattened attack list of the *opposing*
/// side (the side that attacked this member). When the member suffered
/// several attacks and the caller asked for fresh attempts only, the
/// earliest one is taken; otherwise the attack maximizing
/// `destruction ^ stars` wins, ties going to the first found. The chosen
/// attack is then checked against the requested attempt restriction;
/// exclusion is a regular outcome, not an error.
pub fn resolve_defense_attack<'a>(
    member: &Member,
    opponent_attacks: &[&'a Attack],
    attempt: Option<Attempt>,
) -> Option<&'a Attack> {
    let incoming: Vec<&'a Attack> = opponent_attacks
        .iter()
        .copied()
        .filter(|a| a.defender_tag == member.tag)
        .collect();

    let chosen = if incoming.len() > 1 && attempt == Some(Attempt::Fresh) {
        incoming.iter().copied().min_by_key(|a| a.order)?
    } else {
        let mut best: Option<&'a Attack> = None;
        for candidate in incoming {
            if best.map_or(true, |b| candidate.quality() > b.quality()) {
                best = Some(candidate);
            }
        }
        best?
    };

    if let Some(attempt) = attempt {
        let fresh = is_fresh(opponent_attacks, &chosen.defender_tag, chosen.order);
        if !attempt.admits(fresh) {
            return None;
        }
    }

    Some(chosen)
}

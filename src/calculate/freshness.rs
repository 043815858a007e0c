//! Attack freshness classification.

use crate::models::Attack;

/// Classify one attack as fresh or cleanup.
///
/// `attacks_by_side` must be the flattened attack lists of every member
/// of the *attacking* side for one war (never the defending side). The
/// earliest attack against a given defender is fresh; any later attack
/// against that same defender is cleanup.
pub fn is_fresh(attacks_by_side: &[&Attack], defender_tag: &str, order: u32) -> bool {
    let mut orders: Vec<u32> = attacks_by_side
        .iter()
        .filter(|a| a.defender_tag == defender_tag)
        .map(|a| a.order)
        .collect();
    orders.sort_unstable();

    match orders.as_slice() {
        [] => false,
        [_] => true,
        [first, ..] => order == *first,
    }
}

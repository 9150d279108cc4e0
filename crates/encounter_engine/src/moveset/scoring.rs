//! Move scoring primitives shared by the smart and evil policies.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core_data::MoveRecord;

/// STAB candidate key: power, target breadth, multi-hit, crit — compared
/// lexicographically. `REJECT` marks moves too weak to consider.
pub type StabKey = (i32, i32, i32, i32);

pub const REJECT: StabKey = (-1, -1, -1, -1);

/// Score a STAB/attack candidate. Low-power moves with no multi-hit or
/// crit upside are rejected outright.
pub fn stab_key(record: Option<&MoveRecord>) -> StabKey {
    let Some(record) = record else {
        return REJECT;
    };
    let power = record.power;
    let target_score = if record.is_area() { 2 } else { 1 };
    let successive_score = if record.is_multi_hit() { 3 } else { 0 };
    let crit_score = record.crit;
    if power <= 2 && successive_score == 0 && crit_score == 0 {
        return REJECT;
    }
    (power, target_score, successive_score, crit_score)
}

/// Pick up to `needed` items, randomizing among the top group instead of
/// taking a strict sort: everything scoring at or above the
/// `max(needed * 4, len / 2)`-th candidate's score is eligible, and the
/// picks are sampled uniformly from that set.
pub fn pick_from_top<S, R>(
    candidates: &[String],
    score: impl Fn(&str) -> S,
    needed: usize,
    rng: &mut R,
) -> Vec<String>
where
    S: Ord + Copy,
    R: Rng,
{
    if candidates.is_empty() || needed == 0 {
        return Vec::new();
    }
    let mut scored: Vec<(&String, S)> = candidates.iter().map(|m| (m, score(m))).collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    if needed >= scored.len() {
        return scored.into_iter().map(|(m, _)| m.clone()).collect();
    }

    let max_candidates = (needed * 4).max(scored.len() / 2);
    let threshold_index = (scored.len() - 1).min(max_candidates.saturating_sub(1));
    let threshold = scored[threshold_index].1;
    let eligible: Vec<&String> = scored
        .iter()
        .filter(|(_, s)| *s >= threshold)
        .map(|(m, _)| *m)
        .collect();
    if eligible.len() <= needed {
        return scored
            .into_iter()
            .take(needed)
            .map(|(m, _)| m.clone())
            .collect();
    }
    eligible
        .choose_multiple(rng, needed)
        .map(|m| (*m).clone())
        .collect()
}

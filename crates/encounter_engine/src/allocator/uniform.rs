//! Uniform-random allocation.
//!
//! Phase 1 spreads plain increments across random stats until none can
//! accept more; phase 2 buys single-point limit breaks on random maxed
//! stats until the escalating cost outruns the budget.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core_data::BattleStat;

use super::state::AllocationState;

/// Bail-out for the plain-fill loop; generous versus any real budget.
const MAX_FILL_ATTEMPTS: u32 = 1000;

pub fn run<R: Rng>(state: &mut AllocationState, rng: &mut R) {
    // Phase 1: plain increments.
    let mut attempts = 0;
    while state.points() > 0 {
        let candidates: Vec<BattleStat> = BattleStat::ALL
            .into_iter()
            .filter(|&stat| accepts_plain(state, stat))
            .collect();
        let Some(&stat) = candidates.choose(rng) else {
            break;
        };
        state.try_plain_increment(stat);
        attempts += 1;
        if attempts > MAX_FILL_ATTEMPTS {
            break;
        }
    }

    // Phase 2: exhaust affordable limit breaks, randomly.
    while state.points() >= state.single_cost() {
        let eligible: Vec<BattleStat> = BattleStat::ALL
            .into_iter()
            .filter(|&stat| !state.below_max(stat) && state.can_limit_break(stat))
            .collect();
        let Some(&stat) = eligible.choose(rng) else {
            break;
        };
        if !state.try_limit_single(stat) {
            break;
        }
    }
}

/// Whether a plain increment on `stat` is currently possible: below the
/// effective max, with the two-point batch affordable for odd-valued
/// Vitality/Insight.
fn accepts_plain(state: &AllocationState, stat: BattleStat) -> bool {
    if !state.below_max(stat) {
        return false;
    }
    if stat.is_paired() && state.value(stat) % 2 == 1 {
        return state.points() >= 2;
    }
    state.points() >= 1
}

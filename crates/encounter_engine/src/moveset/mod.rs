//! Moveset selection.
//!
//! The candidate pool is the union of all rank tiers unlocked at the
//! target rank, optionally interleaved with the TM/Tutor/Egg extras. Three
//! policies size and fill the set:
//!
//! - **Standard** — uniform sample of `insight + 2` moves.
//! - **Smart** — role-consistent: STAB and same-category attacks matching
//!   the stronger offensive stat, plus Support, with randomized top-group
//!   picks.
//! - **Evil** — boss policy: setup moves first, then the hardest-hitting
//!   wide-target attacks, recoil and charge moves mostly filtered out.

mod evil;
mod scoring;
mod smart;

pub use scoring::pick_from_top;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::allocator::ComputedStats;
use crate::core_data::{BattleStat, SpeciesRecord};
use crate::data::DataProvider;
use crate::ranks::Rank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveMode {
    #[default]
    Standard,
    Smart,
    Evil,
}

/// Cumulative candidate pool for `rank`, deduplicated in unlock order.
/// With `include_extra`, TM/Tutor/Egg moves are interleaved with the tier
/// moves — alternating, not appended, so the extras keep comparable
/// selection odds under random sampling.
pub fn build_pool(species: &SpeciesRecord, rank: Rank, include_extra: bool) -> Vec<String> {
    let mut pool: Vec<String> = Vec::new();
    for tier in &species.moves.tiers()[..rank.unlocked_tiers()] {
        for name in tier.iter() {
            if !pool.contains(name) {
                pool.push(name.clone());
            }
        }
    }
    if !include_extra {
        return pool;
    }

    let extras: Vec<&String> = species
        .moves
        .extras()
        .filter(|m| !pool.contains(*m))
        .collect();
    let mut interleaved: Vec<String> = Vec::with_capacity(pool.len() + extras.len());
    let mut base = pool.iter();
    let mut extra = extras.iter();
    loop {
        let mut pushed = false;
        if let Some(m) = base.next() {
            if !interleaved.contains(m) {
                interleaved.push(m.clone());
            }
            pushed = true;
        }
        if let Some(m) = extra.next() {
            if !interleaved.contains(*m) {
                interleaved.push((*m).clone());
            }
            pushed = true;
        }
        if !pushed {
            break;
        }
    }
    interleaved
}

/// Select a moveset for the computed stats. The result is deduplicated and
/// holds at most `insight + 2` moves.
pub fn select<R: Rng>(
    species: &SpeciesRecord,
    stats: &ComputedStats,
    rank: Rank,
    mode: MoveMode,
    include_extra: bool,
    provider: &dyn DataProvider,
    rng: &mut R,
) -> Vec<String> {
    let pool = build_pool(species, rank, include_extra);
    if pool.is_empty() {
        return Vec::new();
    }
    match mode {
        MoveMode::Standard => standard(stats, &pool, rng),
        MoveMode::Smart => smart::select(species, stats, &pool, provider, rng),
        MoveMode::Evil => evil::select(species, stats, &pool, provider),
    }
}

/// Uniform sample without replacement, sized by Insight.
fn standard<R: Rng>(stats: &ComputedStats, pool: &[String], rng: &mut R) -> Vec<String> {
    let size = ((stats.battle(BattleStat::Insight) + 2).max(0) as usize).min(pool.len());
    pool.choose_multiple(rng, size).cloned().collect()
}

/// Keep first occurrences, preserving order.
fn dedup_preserving(moves: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(moves.len());
    for m in moves {
        if !out.contains(&m) {
            out.push(m);
        }
    }
    out
}

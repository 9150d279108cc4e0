//! Role-aware ("smart") allocation.
//!
//! Each step samples a stat from a weighted distribution: cubic scaling by
//! the stat's max, a defensive bias that fills Vitality/Insight first, and
//! an explicit limit-break priority ladder once stats hit max. The weights'
//! constants are a behavioral contract inherited from the game balance this
//! generator reproduces; do not re-derive them.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::trace;

use crate::core_data::{BattleStat, MoveCategory, SpeciesRecord};
use crate::data::DataProvider;
use crate::ranks::Rank;

use super::state::AllocationState;

/// Probability of the Vitality→Insight tie-break nudge.
const INSIGHT_NUDGE_CHANCE: f64 = 0.12;

/// Move-pool shape, driving the offense-heavy heuristic.
#[derive(Debug, Clone, Default)]
pub struct PoolProfile {
    pub attack_count: u32,
    pub special_count: u32,
    pub offense_score: f64,
    pub dex_max: i32,
}

impl PoolProfile {
    /// Scan the rank-unlocked move tiers (extras excluded — the analysis
    /// reflects what the species learns naturally).
    pub fn analyze(species: &SpeciesRecord, rank: Rank, provider: &dyn DataProvider) -> Self {
        let mut profile = PoolProfile {
            dex_max: species.battle_range(BattleStat::Dexterity).max,
            ..Default::default()
        };
        for tier in &species.moves.tiers()[..rank.unlocked_tiers()] {
            for name in tier.iter() {
                let Some(record) = provider.move_record(name) else {
                    continue;
                };
                if !record.is_attacking() {
                    continue;
                }
                profile.attack_count += 1;
                if record.category == MoveCategory::Special {
                    profile.special_count += 1;
                    profile.offense_score += record.power as f64 * 1.25;
                } else {
                    profile.offense_score += record.power as f64;
                }
            }
        }
        profile
    }

    /// Dexterity caps above 6 mark it as a usable attacking stat.
    pub fn dex_is_offense_cap(&self) -> bool {
        self.dex_max > 6
    }

    pub fn offense_ratio(&self) -> f64 {
        if self.attack_count == 0 {
            0.0
        } else {
            self.offense_score / self.attack_count as f64
        }
    }

    /// Many decent attacks and either a high Dexterity cap or several
    /// Special moves: build offense before bulk.
    pub fn offense_heavy(&self) -> bool {
        self.attack_count >= 3
            && self.offense_ratio() >= 4.0
            && (self.dex_is_offense_cap() || self.special_count >= 2)
    }
}

/// Offensive-stat policy derived once per allocation.
struct OffenseConfig {
    /// The higher-capped of Strength/Special; sole recipient of offensive
    /// points unless the caps tie.
    preferred: BattleStat,
    allow_both: bool,
    /// Leading offense stat for the ordered leftover sweep.
    highest: BattleStat,
    top: BattleStat,
    second: BattleStat,
    third: BattleStat,
}

pub fn run<R: Rng>(
    species: &SpeciesRecord,
    rank: Rank,
    provider: &dyn DataProvider,
    state: &mut AllocationState,
    rng: &mut R,
) {
    // Make even-based Vitality/Insight odd up front, but only when a
    // follow-up two-point batch is still affordable afterwards.
    for stat in [BattleStat::Vitality, BattleStat::Insight] {
        if state.base(stat) % 2 == 0 && state.points() >= 3 {
            state.spend_plain(stat, 1);
        }
    }

    let profile = PoolProfile::analyze(species, rank, provider);
    let offense_heavy = profile.offense_heavy();
    let dex_cap = profile.dex_is_offense_cap();

    let mut highest = if dex_cap {
        BattleStat::Dexterity
    } else if species.battle_range(BattleStat::Special).base
        >= species.battle_range(BattleStat::Strength).base
    {
        BattleStat::Special
    } else {
        BattleStat::Strength
    };
    let mut defensive_bias = 5.0;
    if offense_heavy {
        defensive_bias = 1.5;
        if !dex_cap {
            highest = BattleStat::Special;
        }
    }

    let special_max = state.max(BattleStat::Special);
    let strength_max = state.max(BattleStat::Strength);
    let allow_both = special_max == strength_max;
    let preferred = if special_max > strength_max {
        BattleStat::Special
    } else {
        BattleStat::Strength
    };

    // Explicit first/second/third offense ranking, Dexterity included when
    // its cap qualifies.
    let mut ranking: Vec<BattleStat> = Vec::with_capacity(3);
    if dex_cap {
        ranking.push(BattleStat::Dexterity);
    }
    if !ranking.contains(&preferred) {
        ranking.push(preferred);
    }
    let other_offense = if preferred == BattleStat::Strength {
        BattleStat::Special
    } else {
        BattleStat::Strength
    };
    if !ranking.contains(&other_offense) {
        ranking.push(other_offense);
    }
    for stat in [
        BattleStat::Strength,
        BattleStat::Special,
        BattleStat::Dexterity,
    ] {
        if ranking.len() >= 3 {
            break;
        }
        if !ranking.contains(&stat) {
            ranking.push(stat);
        }
    }
    let cfg = OffenseConfig {
        preferred,
        allow_both,
        highest,
        top: ranking[0],
        second: ranking[1],
        third: ranking[2],
    };
    trace!(
        ?cfg.top, ?cfg.second, ?cfg.third,
        offense_heavy, "smart allocation configured"
    );

    weighted_pass(state, &cfg, defensive_bias, rng);
    ordered_sweep(state, &cfg);
}

/// Probabilistic main pass: sample stats from the weighted distribution
/// until the budget is empty, every weight is zero, or a full rotation's
/// worth of iterations makes no progress.
fn weighted_pass<R: Rng>(
    state: &mut AllocationState,
    cfg: &OffenseConfig,
    defensive_bias: f64,
    rng: &mut R,
) {
    let mut preferred_touched = false;
    let mut stalled = 0usize;
    let mut last_points = state.points();

    while state.points() > 0 {
        let vit_need = state.below_max(BattleStat::Vitality);
        let ins_need = state.below_max(BattleStat::Insight);

        let mut weights = [0.0f64; 5];
        for stat in BattleStat::ALL {
            weights[stat.index()] = sampling_weight(
                state,
                stat,
                cfg,
                preferred_touched,
                defensive_bias,
                vit_need,
                ins_need,
                rng,
            );
        }
        if weights.iter().all(|&w| w == 0.0) {
            break;
        }

        if state.points() == last_points {
            stalled += 1;
        } else {
            stalled = 0;
        }
        last_points = state.points();
        if stalled >= BattleStat::ALL.len() + 3 {
            break;
        }

        let Ok(dist) = WeightedIndex::new(weights) else {
            break;
        };
        let chosen = BattleStat::ALL[dist.sample(rng)];

        if chosen.is_paired() {
            let cur = state.value(chosen);
            if cur < state.max(chosen) {
                if state.points() >= 2 && cur % 2 == 1 {
                    state.spend_plain(chosen, 2);
                }
            } else if cur % 2 == 1
                && state.points() >= state.double_cost()
                && !can_spend_elsewhere(state, state.max(chosen))
                && state.can_limit_break(chosen)
            {
                state.try_limit_double(chosen);
            }
        } else if state.below_max(chosen) {
            state.spend_plain(chosen, 1);
            if chosen == cfg.preferred {
                preferred_touched = true;
            }
        } else if state.points() >= state.single_cost() && state.can_limit_break(chosen) {
            state.try_limit_single(chosen);
        }
    }
}

/// Weight of `stat` for one sampling step. Zero means ineligible.
#[allow(clippy::too_many_arguments)]
fn sampling_weight<R: Rng>(
    state: &AllocationState,
    stat: BattleStat,
    cfg: &OffenseConfig,
    preferred_touched: bool,
    defensive_bias: f64,
    vit_need: bool,
    ins_need: bool,
    rng: &mut R,
) -> f64 {
    // With unequal caps, the lower-capped of Strength/Special never
    // receives points.
    if matches!(stat, BattleStat::Strength | BattleStat::Special)
        && !cfg.allow_both
        && stat != cfg.preferred
    {
        return 0.0;
    }

    let cur = state.value(stat);
    let cap = state.max(stat);
    let base_score = (cap as f64).powi(3);

    if cur >= cap {
        // At or above max: limit-break weighting.
        if stat.is_paired() {
            if cur % 2 == 1 && state.points() >= state.double_cost() {
                // Never limit-break bulk while bulk still needs plain
                // points, or while similar-capped stats can be filled.
                if vit_need || ins_need || can_spend_elsewhere(state, cap) {
                    0.0
                } else {
                    base_score * 0.5
                }
            } else {
                0.0
            }
        } else if state.points() >= state.single_cost() {
            if !cfg.allow_both && !preferred_touched && stat != cfg.preferred {
                0.0
            } else {
                base_score * limit_break_priority(stat, cfg)
            }
        } else {
            0.0
        }
    } else {
        // Below max: plain-increment weighting.
        let mut w = if stat.is_paired() && (vit_need || ins_need) {
            base_score * defensive_bias
        } else {
            base_score
        };
        if stat == BattleStat::Insight {
            w *= 1.02;
        }
        w *= 1.0 + rng.gen_range(-0.04..=0.04);
        // Paired stats need an affordable two-point batch from an odd value.
        if stat.is_paired() && !(state.points() >= 2 && cur % 2 == 1) {
            w = 0.0;
        }
        w
    }
}

/// Explicit at-max priority ladder for single-point limit breaks.
fn limit_break_priority(stat: BattleStat, cfg: &OffenseConfig) -> f64 {
    if stat == cfg.top {
        3.0
    } else if stat == cfg.second {
        1.8
    } else if stat == BattleStat::Insight {
        1.2
    } else if stat == BattleStat::Vitality {
        0.6
    } else if stat == cfg.third {
        0.05
    } else {
        0.1
    }
}

/// Whether an ordinary stat can still absorb points: below max, or at a
/// comparable cap with an affordable single-point limit break.
fn can_spend_elsewhere(state: &AllocationState, threshold_max: i32) -> bool {
    for stat in BattleStat::ALL {
        if stat.is_paired() {
            continue;
        }
        if state.below_max(stat) {
            return true;
        }
        if state.max(stat) >= threshold_max && state.points() >= state.single_cost() {
            return true;
        }
    }
    false
}

/// Deterministic leftover sweep, highest-priority stat first: fill plain
/// increments to max, touch the offensive stats, then interleave limit
/// breaks one purchase per stat per pass until nothing is affordable.
fn ordered_sweep(state: &mut AllocationState, cfg: &OffenseConfig) {
    if state.points() == 0 {
        return;
    }

    let offense_other = if cfg.highest == BattleStat::Strength {
        BattleStat::Special
    } else {
        BattleStat::Strength
    };
    let mut ordered: Vec<BattleStat> = if cfg.allow_both {
        vec![
            cfg.highest,
            offense_other,
            BattleStat::Dexterity,
            BattleStat::Vitality,
            BattleStat::Insight,
        ]
    } else {
        let first = if cfg.highest == cfg.preferred || cfg.highest == BattleStat::Dexterity {
            cfg.highest
        } else {
            cfg.preferred
        };
        vec![
            first,
            BattleStat::Dexterity,
            BattleStat::Vitality,
            BattleStat::Insight,
        ]
    };
    let mut seen = [false; 5];
    ordered.retain(|stat| {
        let keep = !seen[stat.index()];
        seen[stat.index()] = true;
        keep
    });

    // Fill plain increments to max in priority order.
    for &stat in &ordered {
        while state.points() > 0 && state.below_max(stat) {
            if !state.try_plain_increment(stat) {
                break;
            }
        }
    }

    // Give each eligible offensive stat its first point before any limit
    // breaks, so breaks never land on an untouched build.
    let offense_targets: Vec<BattleStat> = if cfg.allow_both {
        if matches!(cfg.highest, BattleStat::Strength | BattleStat::Special) {
            vec![cfg.highest, offense_other]
        } else {
            vec![BattleStat::Special, BattleStat::Strength]
        }
    } else {
        vec![cfg.preferred]
    };
    for &target in &offense_targets {
        if state.points() > 0
            && state.value(target) == state.base(target)
            && state.below_max(target)
        {
            state.spend_plain(target, 1);
        }
    }

    // Interleaved limit-break passes: at most one purchase per stat per
    // pass, so a single stat can't drain the budget in one run.
    let guard_a = cfg.highest;
    let guard_b = if cfg.highest == BattleStat::Strength {
        BattleStat::Special
    } else {
        BattleStat::Strength
    };
    let mut made_any = true;
    while state.points() > 0 && made_any {
        made_any = false;
        for &stat in &ordered {
            if state.points() <= 0 {
                break;
            }
            if stat.is_paired() {
                if state.value(stat) >= state.max(stat)
                    && state.value(stat) % 2 == 1
                    && state.points() >= state.double_cost()
                    && !can_spend_elsewhere(state, state.max(stat))
                    && state.try_limit_double(stat)
                {
                    made_any = true;
                }
                continue;
            }
            if state.below_max(stat) {
                continue;
            }
            // Don't break one offensive stat while its partner sits at base.
            if stat == guard_a || stat == guard_b {
                let partner = if stat == guard_a { guard_b } else { guard_a };
                if state.value(partner) == state.base(partner) {
                    continue;
                }
            }
            // The preferred offensive stat must be touched first.
            if stat != cfg.preferred && state.value(cfg.preferred) == state.base(cfg.preferred) {
                let touched = state.below_max(cfg.preferred)
                    && state.spend_plain(cfg.preferred, 1);
                if !touched {
                    continue;
                }
            }
            if state.try_limit_single(stat) {
                made_any = true;
            }
        }
    }

    // Whatever still remains: round-robin over the ordered list, spending
    // any legal increment or break, until a full pass spends nothing.
    let mut made_spend = true;
    while state.points() > 0 && made_spend {
        made_spend = false;
        for &stat in &ordered {
            if state.points() <= 0 {
                break;
            }
            if stat.is_paired() {
                if state.below_max(stat) {
                    if state.try_plain_increment(stat) {
                        made_spend = true;
                    }
                } else if state.value(stat) % 2 == 1 && state.try_limit_double(stat) {
                    made_spend = true;
                }
            } else if state.below_max(stat) {
                if state.spend_plain(stat, 1) {
                    made_spend = true;
                }
            } else if state.try_limit_single(stat) {
                made_spend = true;
            }
        }
    }
}

/// Tie-break nudge: when final Insight equals final Vitality, a 12% roll
/// shifts two points from Vitality to Insight, bounded by Vitality's base
/// and Insight's nominal max.
pub fn maybe_shift_vitality_to_insight<R: Rng>(
    battle: &mut [i32; 5],
    species: &SpeciesRecord,
    rng: &mut R,
) {
    let vit = battle[BattleStat::Vitality.index()];
    let ins = battle[BattleStat::Insight.index()];
    if ins != vit || !rng.gen_bool(INSIGHT_NUDGE_CHANCE) {
        return;
    }
    let can_take = vit - 2 >= species.battle_range(BattleStat::Vitality).base;
    let can_add = ins + 2 <= species.battle_range(BattleStat::Insight).max;
    if can_take && can_add {
        battle[BattleStat::Vitality.index()] = vit - 2;
        battle[BattleStat::Insight.index()] = ins + 2;
    } else if can_add {
        battle[BattleStat::Insight.index()] = ins + 2;
    } else if can_take {
        battle[BattleStat::Vitality.index()] = vit - 2;
    }
}

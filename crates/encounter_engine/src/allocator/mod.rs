//! Battle-stat point allocation.
//!
//! Distributes a `3 + level` point budget across the five battle stats
//! under the odd-cap, limit-break and spacing rules, in one of two modes:
//!
//! - **Uniform** — random plain increments, then exhaustive random
//!   limit-break purchases while affordable.
//! - **Smart** — role-aware weighted sampling driven by the species' move
//!   pool, followed by a deterministic ordered sweep for leftovers.
//!
//! Both modes finish with a forced-spend pass so the allocator never
//! terminates with idle points while a legal purchase remains.

mod smart;
mod state;
mod uniform;

pub mod social;

pub use smart::PoolProfile;
pub use state::{AllocationState, Purchase, PurchaseKind};

use rand::Rng;
use tracing::debug;

use crate::core_data::{BattleStat, SocialStat, SpeciesRecord};
use crate::data::DataProvider;
use crate::ranks::Rank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatMode {
    #[default]
    Uniform,
    Smart,
}

/// Final stat values for one generated encounter. Battle values may exceed
/// their nominal max when limit-broken; social values are already capped.
#[derive(Debug, Clone)]
pub struct ComputedStats {
    battle: [i32; 5],
    battle_max: [i32; 5],
    social: [i32; 5],
    social_max: [i32; 5],
    pub base_hp: i32,
}

impl ComputedStats {
    pub fn new(
        battle: [i32; 5],
        battle_max: [i32; 5],
        social: [i32; 5],
        social_max: [i32; 5],
        base_hp: i32,
    ) -> Self {
        Self {
            battle,
            battle_max,
            social,
            social_max,
            base_hp,
        }
    }

    pub fn battle(&self, stat: BattleStat) -> i32 {
        self.battle[stat.index()]
    }

    /// Nominal (display) max, not the odd-capped effective max.
    pub fn battle_max(&self, stat: BattleStat) -> i32 {
        self.battle_max[stat.index()]
    }

    pub fn social(&self, stat: SocialStat) -> i32 {
        self.social[stat.index()]
    }

    pub fn social_max(&self, stat: SocialStat) -> i32 {
        self.social_max[stat.index()]
    }

    pub fn hp(&self) -> i32 {
        (self.base_hp + self.battle(BattleStat::Vitality)) * 2
    }

    pub fn defense(&self) -> i32 {
        ceil_half(self.battle(BattleStat::Vitality))
    }

    pub fn special_defense(&self) -> i32 {
        ceil_half(self.battle(BattleStat::Insight))
    }

    pub fn active_move_limit(&self) -> i32 {
        self.battle(BattleStat::Insight) + 2
    }

    /// Resolve a lower-case stat name (battle or social) to its final
    /// value, for damage/accuracy descriptors like `"special"` or
    /// `"clever"`.
    pub fn value_of(&self, name: &str) -> Option<i32> {
        if let Some(stat) = BattleStat::from_name(name) {
            return Some(self.battle(stat));
        }
        SocialStat::ALL
            .iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
            .map(|s| self.social(*s))
    }
}

fn ceil_half(value: i32) -> i32 {
    (value + 1) / 2
}

/// Result of one allocation run: the final stats, any points the policies
/// could not legally spend, and the limit-break purchase log.
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    pub stats: ComputedStats,
    pub leftover: i32,
    pub purchases: Vec<Purchase>,
}

/// Allocate battle and social stats for `species` at `level`.
pub fn allocate<R: Rng>(
    species: &SpeciesRecord,
    level: i32,
    mode: StatMode,
    provider: &dyn DataProvider,
    rng: &mut R,
) -> AllocationOutcome {
    let points = 3 + level;
    let rank = Rank::from_level(level);

    let mut state = match mode {
        StatMode::Uniform => {
            let mut state = AllocationState::new(species, points, false);
            uniform::run(&mut state, rng);
            state
        }
        StatMode::Smart => {
            let mut state = AllocationState::new(species, points, true);
            smart::run(species, rank, provider, &mut state, rng);
            state
        }
    };

    force_spend(&mut state, mode == StatMode::Smart);

    let mut battle = [0; 5];
    let mut battle_max = [0; 5];
    for stat in BattleStat::ALL {
        battle[stat.index()] = state.value(stat);
        battle_max[stat.index()] = species.battle_range(stat).max;
    }

    if mode == StatMode::Smart {
        smart::maybe_shift_vitality_to_insight(&mut battle, species, rng);
    }

    let (social, social_max) = social::allocate(species, rank, rng);

    let leftover = state.points();
    if leftover > 0 {
        debug!(leftover, species = %species.name, "allocation ended with unspendable points");
    }

    AllocationOutcome {
        stats: ComputedStats::new(battle, battle_max, social, social_max, species.base_hp),
        leftover,
        purchases: state.into_log(),
    }
}

/// Correctness backstop shared by both modes: round-robin over the stats
/// spending any legal plain increment or limit break, until either the
/// budget is empty or three full rotations make no progress.
fn force_spend(state: &mut AllocationState, smart: bool) {
    let mut i = 0;
    let mut last_points = state.points();
    let mut stalled_rotations = 0;

    while state.points() > 0 {
        let stat = BattleStat::ALL[i % BattleStat::ALL.len()];
        if state.below_max(stat) {
            state.try_plain_increment(stat);
        } else if stat.is_paired() {
            if state.value(stat) % 2 == 1 {
                if smart {
                    state.try_limit_double(stat);
                } else {
                    state.try_limit_single(stat);
                }
            } else if !smart {
                // Even-valued paired stats can't take a clean +2 batch;
                // standard mode falls back to a single point.
                state.try_limit_single(stat);
            }
        } else {
            state.try_limit_single(stat);
        }

        i += 1;
        if i % BattleStat::ALL.len() == 0 {
            if state.points() == last_points {
                stalled_rotations += 1;
            } else {
                stalled_rotations = 0;
            }
            last_points = state.points();
            if stalled_rotations >= 3 {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests;

//! Role-consistent ("smart") moveset selection.
//!
//! The stronger of final Special/Strength decides the attacking category;
//! the other category is excluded outright rather than down-weighted. STAB
//! attacks fill first, then same-category attacks, then Support, with
//! randomized picks among near-tied candidates.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::allocator::ComputedStats;
use crate::core_data::{BattleStat, MoveCategory, SpeciesRecord};
use crate::data::DataProvider;

use super::dedup_preserving;
use super::scoring::{pick_from_top, stab_key, StabKey};

/// Score penalty pushing excluded-category moves below every real option.
const EXCLUDED: i64 = -999_999;

pub fn select<R: Rng>(
    species: &SpeciesRecord,
    stats: &ComputedStats,
    pool: &[String],
    provider: &dyn DataProvider,
    rng: &mut R,
) -> Vec<String> {
    let insight = stats.battle(BattleStat::Insight);
    let spdef_count = stats.special_defense().max(0) as usize;

    let preferred_category =
        if stats.battle(BattleStat::Special) >= stats.battle(BattleStat::Strength) {
            MoveCategory::Special
        } else {
            MoveCategory::Physical
        };

    // Categorize the pool. Attacking moves of the wrong category are
    // dropped here — a hard exclusivity rule.
    let mut attacking: Vec<String> = Vec::new();
    let mut support: Vec<String> = Vec::new();
    let mut stab: Vec<String> = Vec::new();
    for name in pool {
        let Some(record) = provider.move_record(name) else {
            continue;
        };
        match record.category {
            MoveCategory::Support => support.push(name.clone()),
            category if category == preferred_category => {
                attacking.push(name.clone());
                if record.stab_against(&species.types) {
                    stab.push(name.clone());
                }
            }
            _ => {}
        }
    }

    let mut selected: Vec<String> = Vec::new();

    // STAB attacks first, up to the attack quota.
    let num_attacking = spdef_count;
    let num_stab = num_attacking.min(stab.len());
    let key = |name: &str| -> StabKey { stab_key(provider.move_record(name)) };
    let chosen_stab = pick_from_top(&stab, key, num_stab, rng);
    let stab_taken = chosen_stab.len();
    selected.extend(chosen_stab);

    // Fill the remaining attack slots from the same-category pool.
    let remaining_attacking = num_attacking.saturating_sub(stab_taken);
    let candidates: Vec<String> = attacking
        .iter()
        .filter(|m| !selected.contains(*m))
        .cloned()
        .collect();
    let attack_score =
        |name: &str| -> i64 { candidate_score(provider.move_record(name), preferred_category) };
    selected.extend(pick_from_top(&candidates, attack_score, remaining_attacking, rng));

    // If the category-restricted pool ran short, pull matching-category
    // attacks straight from the original pool, best first.
    let attacking_selected = selected
        .iter()
        .filter(|m| {
            provider
                .move_record(m)
                .is_some_and(|r| r.is_attacking())
        })
        .count();
    if attacking_selected < num_attacking {
        let needed = num_attacking - attacking_selected;
        let mut fallback: Vec<String> = pool
            .iter()
            .filter(|m| !selected.contains(*m))
            .filter(|m| {
                provider
                    .move_record(m)
                    .is_some_and(|r| r.category == preferred_category)
            })
            .cloned()
            .collect();
        fallback.sort_by_key(|m| std::cmp::Reverse(attack_score(m)));
        selected.extend(fallback.into_iter().take(needed));
    }

    // Support moves, lightly biased toward Insight-accuracy ones.
    let num_support = spdef_count.min(support.len());
    let support_candidates: Vec<String> = support
        .iter()
        .filter(|m| !selected.contains(*m))
        .cloned()
        .collect();
    let support_score = |name: &str| -> i64 {
        provider
            .move_record(name)
            .is_some_and(|r| r.accuracy_stat.contains("insight")) as i64
    };
    selected.extend(pick_from_top(&support_candidates, support_score, num_support, rng));

    let mut selected = dedup_preserving(selected);

    // Top up to the active-move limit with anything left that doesn't
    // break the category rule. Records the provider can't resolve pass
    // through; they render as "No data found." later.
    let remaining_slots = ((insight + 2).max(0) as usize).saturating_sub(selected.len());
    if remaining_slots > 0 {
        let excluded_category = match preferred_category {
            MoveCategory::Special => MoveCategory::Physical,
            _ => MoveCategory::Special,
        };
        let mut rest: Vec<String> = pool
            .iter()
            .filter(|m| !selected.contains(*m))
            .filter(|m| {
                provider
                    .move_record(m)
                    .map_or(true, |r| r.category != excluded_category)
            })
            .cloned()
            .collect();
        rest.shuffle(rng);
        selected.extend(rest.into_iter().take(remaining_slots));
    }
    selected
}

/// Attack fill score: power plus multi-hit and crit bonuses; wrong-category
/// and unresolvable moves sink to the bottom.
fn candidate_score(
    record: Option<&crate::core_data::MoveRecord>,
    preferred_category: MoveCategory,
) -> i64 {
    let Some(record) = record else {
        return -1;
    };
    if !record.is_attacking() {
        return -1;
    }
    if record.category != preferred_category {
        return EXCLUDED;
    }
    let successive_bonus = if record.is_multi_hit() { 100 } else { 0 };
    let crit_bonus = record.crit as i64 * 10;
    record.power as i64 + successive_bonus + crit_bonus
}

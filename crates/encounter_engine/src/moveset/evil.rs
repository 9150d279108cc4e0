//! Boss ("evil") moveset selection.
//!
//! Antagonist NPCs get a deliberately nasty set: setup moves from a fixed
//! priority list, then the hardest-hitting wide-target attacks. Suicidal,
//! charge-up and weak filler moves are filtered before selection; recoil
//! moves survive only when they earn it.

use crate::allocator::ComputedStats;
use crate::core_data::{BattleStat, EffectFlags, MoveRecord, SpeciesRecord};
use crate::data::DataProvider;

use super::dedup_preserving;

/// Setup moves bosses want, in pick order.
const SETUP_PRIORITY: [&str; 6] = [
    "Swords Dance",
    "Agility",
    "Nasty Plot",
    "Iron Defense",
    "Amnesia",
    "Cosmic Power",
];

const MULTI_HIT_BONUS: i64 = 150;
const AREA_TARGET_BONUS: i64 = 50;
const STAB_BONUS: i64 = 20;
const RECOIL_PENALTY: i64 = -40;

pub fn select(
    species: &SpeciesRecord,
    stats: &ComputedStats,
    pool: &[String],
    provider: &dyn DataProvider,
) -> Vec<String> {
    let insight = stats.battle(BattleStat::Insight);
    let quota = insight.max(0) as usize;

    // Pre-filter: drop self-destructs, charge/recharge moves, moves
    // without a record, and weak attacks with no multi-hit/crit upside.
    let filtered: Vec<String> = pool
        .iter()
        .filter(|name| {
            let Some(record) = provider.move_record(name) else {
                return false;
            };
            if record.flags.contains(EffectFlags::SELF_DESTRUCT) {
                return false;
            }
            if record
                .flags
                .intersects(EffectFlags::CHARGE | EffectFlags::RECHARGE)
            {
                return false;
            }
            is_worth_using(record)
        })
        .cloned()
        .collect();

    let mut selected: Vec<String> = Vec::new();

    // Setup support first, up to Insight moves.
    let available_setup: Vec<&str> = SETUP_PRIORITY
        .iter()
        .copied()
        .filter(|s| filtered.iter().any(|m| m == s))
        .collect();
    selected.extend(
        available_setup
            .iter()
            .take(quota.min(available_setup.len()))
            .map(|s| (*s).to_owned()),
    );

    // Then the best attacks, up to Insight more.
    let mut scored: Vec<(&String, i64, i64, i64)> = filtered
        .iter()
        .filter(|m| !selected.contains(*m))
        .filter_map(|m| {
            let record = provider.move_record(m)?;
            let (score, power, successive) = attack_score(record, species)?;
            Some((m, score, power, successive))
        })
        .collect();
    scored.sort_by(|a, b| (b.1, b.2, b.3).cmp(&(a.1, a.2, a.3)));
    selected.extend(scored.iter().take(quota).map(|(m, ..)| (*m).clone()));

    // Fill any remaining slots up to Insight + 2 with the best leftovers;
    // support moves score lowest and land last.
    let mut selected = dedup_preserving(selected);
    let remaining_slots = ((insight + 2).max(0) as usize).saturating_sub(selected.len());
    if remaining_slots > 0 {
        let mut remaining: Vec<&String> =
            filtered.iter().filter(|m| !selected.contains(*m)).collect();
        remaining.sort_by_key(|m| {
            let key = provider
                .move_record(m)
                .and_then(|r| attack_score(r, species))
                .map(|(score, power, _)| (score, power))
                .unwrap_or((-1, -1));
            std::cmp::Reverse(key)
        });
        selected.extend(remaining.into_iter().take(remaining_slots).cloned());
    }
    selected
}

/// Support always passes; attacks must bring power, multi-hit or crit.
fn is_worth_using(record: &MoveRecord) -> bool {
    if !record.is_attacking() {
        return true;
    }
    record.power > 2 || record.is_multi_hit() || record.crit > 0
}

/// Aggression score `(score, power, multi_bonus)` for ranking, or `None`
/// when the move is unusable (support, too weak, or disallowed recoil).
fn attack_score(record: &MoveRecord, species: &SpeciesRecord) -> Option<(i64, i64, i64)> {
    if !record.is_attacking() {
        return None;
    }
    let power = record.power as i64;
    let successive_bonus = if record.is_multi_hit() {
        MULTI_HIT_BONUS
    } else {
        0
    };
    let target_bonus = if record.is_area() { AREA_TARGET_BONUS } else { 0 };
    let stab_bonus = if record.stab_against(&species.types) {
        STAB_BONUS
    } else {
        0
    };
    let crit_bonus = record.crit as i64 * 10;

    let mut recoil_penalty = 0;
    if record.has_recoil() {
        let allowed = stab_bonus > 0
            || power >= 5
            || record.is_multi_hit()
            || crit_bonus >= 10;
        if !allowed {
            return None;
        }
        recoil_penalty = RECOIL_PENALTY;
    }

    if power <= 2 && !record.is_multi_hit() && crit_bonus == 0 {
        return None;
    }

    let score = power + successive_bonus + target_bonus + stab_bonus + crit_bonus + recoil_penalty;
    Some((score, power, successive_bonus))
}

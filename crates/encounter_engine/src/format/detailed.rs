//! Per-move encounter sheet with computed accuracy and damage numbers.

use std::fmt::Write;

use crate::allocator::ComputedStats;
use crate::core_data::{BattleStat, MoveRecord, SocialStat};
use crate::data::DataProvider;
use crate::encounter::Encounter;

pub(super) fn render(encounter: &Encounter, provider: &dyn DataProvider) -> String {
    let species = &encounter.species;
    let stats = &encounter.stats;
    let rank_value = encounter.rank.value();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} | **Lv.{} ({})**",
        species.name,
        encounter.gender,
        encounter.level,
        encounter.rank.name()
    );
    let _ = writeln!(
        out,
        "**Types**: {}",
        species
            .types
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(" / ")
    );

    out.push_str("```\n");
    let _ = writeln!(
        out,
        "HP: {}  |  Def: {}  |  SpDef: {}",
        stats.hp(),
        stats.defense(),
        stats.special_defense()
    );
    let rows = [
        ("STR", BattleStat::Strength, "Tough: ", SocialStat::Tough),
        ("DEX", BattleStat::Dexterity, "Cool:  ", SocialStat::Cool),
        ("VIT", BattleStat::Vitality, "Beauty:", SocialStat::Beauty),
        ("SPE", BattleStat::Special, "Cute:  ", SocialStat::Cute),
        ("INS", BattleStat::Insight, "Clever:", SocialStat::Clever),
    ];
    for (battle_label, battle, social_label, social) in rows {
        let _ = writeln!(
            out,
            "{battle_label}:  {} / {}      {social_label} {} / {}",
            stats.battle(battle),
            stats.battle_max(battle),
            stats.social(social),
            stats.social_max(social)
        );
    }
    out.push_str("```\n");

    let _ = writeln!(out, "**Ability**: {}", encounter.ability);
    if let Some(ability) = provider.ability(&encounter.ability) {
        if !ability.effect.is_empty() {
            let _ = writeln!(out, "*{}*", ability.effect);
        }
    }

    out.push_str("## Moves\n");
    for name in &encounter.moves {
        match provider.move_record(name) {
            Some(record) => {
                let _ = writeln!(
                    out,
                    "**{name}** – {} | {} | {}",
                    record.typ.name(),
                    record.category.name(),
                    record.target
                );
                let _ = write!(out, "ACC: **{}**", accuracy_display(record, stats, rank_value));
                if record.is_attacking() {
                    let stab = record.stab_against(&species.types);
                    let _ = write!(
                        out,
                        " | DMG: **{}**",
                        damage_display(record, stats, rank_value, stab)
                    );
                }
                out.push('\n');
                if !record.effect.is_empty() {
                    let _ = writeln!(out, "{}", record.effect);
                }
                out.push('\n');
            }
            None => {
                let _ = writeln!(out, "**{name}** – *No data found.*\n");
            }
        }
    }
    out
}

/// Numeric accuracy: `stat + rank`, `a/b` pairs resolved per side, bare
/// `rank` as the rank value alone; numeric descriptors add the rank too.
fn accuracy_display(record: &MoveRecord, stats: &ComputedStats, rank_value: i32) -> String {
    let descriptor = record.accuracy_stat.as_str();
    if let Some((a, b)) = descriptor.split_once('/') {
        let a = stats.value_of(a.trim()).unwrap_or(0) + rank_value;
        let b = stats.value_of(b.trim()).unwrap_or(0) + rank_value;
        return format!("{a}/{b}");
    }
    if descriptor == "rank" {
        return rank_value.to_string();
    }
    if let Some(value) = stats.value_of(descriptor) {
        return (value + rank_value).to_string();
    }
    match descriptor.parse::<i32>() {
        Ok(n) => (n + rank_value).to_string(),
        Err(_) => rank_value.to_string(),
    }
}

/// Numeric damage: `stat + power`, with `a/b` pairs and rank-based damage,
/// plus a literal STAB marker on a type match.
fn damage_display(record: &MoveRecord, stats: &ComputedStats, rank_value: i32, stab: bool) -> String {
    let descriptor = record.damage_stat.as_str();
    let base = if let Some((a, b)) = descriptor.split_once('/') {
        let a = stats.value_of(a.trim()).unwrap_or(0) + record.power;
        let b = stats.value_of(b.trim()).unwrap_or(0) + record.power;
        format!("{a}/{b}")
    } else if descriptor == "rank" {
        (rank_value + record.power).to_string()
    } else {
        (stats.value_of(descriptor).unwrap_or(0) + record.power).to_string()
    };
    if stab {
        format!("{base} + STAB")
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::{EffectFlags, MoveCategory, Type};

    fn stats() -> ComputedStats {
        // [Strength, Dexterity, Vitality, Special, Insight]
        ComputedStats::new([3, 4, 5, 6, 7], [10; 5], [2; 5], [5; 5], 8)
    }

    fn record(damage_stat: &str, accuracy_stat: &str, power: i32) -> MoveRecord {
        MoveRecord {
            name: "Test".into(),
            typ: Type::Electric,
            category: MoveCategory::Special,
            power,
            damage_stat: damage_stat.into(),
            accuracy_stat: accuracy_stat.into(),
            target: "Foe".into(),
            effect: String::new(),
            crit: 0,
            recoil: false,
            flags: EffectFlags::empty(),
        }
    }

    #[test]
    fn test_accuracy_stat_plus_rank() {
        let r = record("special", "dexterity", 3);
        assert_eq!(accuracy_display(&r, &stats(), 2), "6"); // dex 4 + rank 2
    }

    #[test]
    fn test_accuracy_pair_and_rank_forms() {
        let r = record("special", "dexterity/insight", 3);
        assert_eq!(accuracy_display(&r, &stats(), 2), "6/9");
        let r = record("special", "rank", 3);
        assert_eq!(accuracy_display(&r, &stats(), 2), "2");
    }

    #[test]
    fn test_damage_stat_plus_power_with_stab() {
        let r = record("special", "dexterity", 3);
        assert_eq!(damage_display(&r, &stats(), 2, false), "9"); // spe 6 + 3
        assert_eq!(damage_display(&r, &stats(), 2, true), "9 + STAB");
    }

    #[test]
    fn test_damage_pair_and_rank_forms() {
        let r = record("strength/special", "dexterity", 1);
        assert_eq!(damage_display(&r, &stats(), 2, false), "4/7");
        let r = record("rank", "dexterity", 3);
        assert_eq!(damage_display(&r, &stats(), 5, false), "8");
    }
}

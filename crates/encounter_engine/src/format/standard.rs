//! Compact encounter sheet.

use std::fmt::Write;

use crate::core_data::{BattleStat, SocialStat};
use crate::encounter::Encounter;

use super::stat_bar;

pub(super) fn render(encounter: &Encounter) -> String {
    let species = &encounter.species;
    let stats = &encounter.stats;

    let type_str = species
        .types
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(" / ");

    let mut out = String::new();
    let _ = writeln!(out, "## [{}] {}", encounter.rank.name(), species.name);
    let _ = writeln!(out, "**Level {}**", encounter.level);
    let _ = writeln!(out, "### Stats {type_str}");
    out.push_str("```\n");
    let _ = writeln!(out, "HP: {}", stats.hp());
    let _ = writeln!(out, "Willpower: {}", stats.active_move_limit());
    out.push('\n');

    for stat in BattleStat::ALL {
        let value = stats.battle(stat);
        let max = stats.battle_max(stat);
        let name = stat.name();
        let _ = writeln!(
            out,
            "{name}:{pad} {value:2} |{bar}",
            pad = " ".repeat(9 - name.len()),
            bar = stat_bar(value, max)
        );
    }

    let _ = writeln!(out, "\nDefense: {}", stats.defense());
    let _ = writeln!(out, "Special Defense: {}", stats.special_defense());
    let _ = writeln!(out, "Active Move Limit: {}", stats.active_move_limit());
    out.push('\n');

    for stat in SocialStat::ALL {
        let value = stats.social(stat);
        let max = stats.social_max(stat);
        let name = stat.name();
        let _ = writeln!(
            out,
            "{name}:{pad} {value:2} |{bar}",
            pad = " ".repeat(6 - name.len()),
            bar = stat_bar(value, max)
        );
    }
    out.push_str("```\n");

    let _ = writeln!(out, "### Ability\n- {}", encounter.ability);
    out.push_str("### Moves\n");
    for name in &encounter.moves {
        let _ = writeln!(out, "- {name}");
    }
    out
}

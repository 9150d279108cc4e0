//! JSON record parsing.
//!
//! Source files are hand-maintained and inconsistent about key casing
//! (`Power` vs `power`, `Accuracy1`, `Damage2`, ...). Every document is
//! normalized to lower-case keys once, then the variant fields are folded
//! into the canonical record schema so no fallback lookups survive past
//! load time.

use serde_json::Value;
use tracing::warn;

use crate::core_data::{
    AbilityPools, AbilityRecord, EffectFlags, MoveCategory, MovePools, MoveRecord, SpeciesRecord,
    StatRange, Type,
};

/// Moves whose user faints on use. Flagged here because the effect text
/// does not say "self-destruct" in a machine-scannable way.
const SELF_DESTRUCT_MOVES: [&str; 2] = ["explosion", "self destruct"];

/// Canonical lookup key: lower-case, non-alphanumerics collapsed to `-`.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Recursively lower-case every object key.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), normalize_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn int_field(value: &Value, key: &str) -> Option<i64> {
    match value.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn stat_range(value: &Value, key: &str, default: StatRange) -> StatRange {
    match str_field(value, key) {
        Some(raw) => {
            let parsed = StatRange::parse(raw, default);
            if parsed == default && !raw.contains('/') {
                warn!(key, raw, "malformed stat range, using default");
            }
            parsed
        }
        None => default,
    }
}

/// First non-empty string among `key`, `key1`, `key2`.
fn variant_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    for k in [key.to_owned(), format!("{key}1"), format!("{key}2")] {
        if let Some(s) = str_field(value, &k).filter(|s| !s.is_empty()) {
            return Some(s);
        }
    }
    None
}

/// Parse a species document (already key-normalized). `stem` names the
/// source file and backs the record when the `name` field is missing.
pub fn parse_species(value: &Value, stem: &str) -> SpeciesRecord {
    let name = str_field(value, "name").unwrap_or(stem).to_owned();
    let number = int_field(value, "number").unwrap_or(0).max(0) as u32;
    let types = string_list(value, "types")
        .iter()
        .map(|t| Type::from_str(t).unwrap_or(Type::Unknown))
        .collect();
    let base_hp = int_field(value, "base_hp").unwrap_or(0) as i32;

    let battle = [
        stat_range(value, "strength", StatRange::DEFAULT_BATTLE),
        stat_range(value, "dexterity", StatRange::DEFAULT_BATTLE),
        stat_range(value, "vitality", StatRange::DEFAULT_BATTLE),
        stat_range(value, "special", StatRange::DEFAULT_BATTLE),
        stat_range(value, "insight", StatRange::DEFAULT_BATTLE),
    ];
    let social = [
        stat_range(value, "tough", StatRange::DEFAULT_SOCIAL),
        stat_range(value, "cool", StatRange::DEFAULT_SOCIAL),
        stat_range(value, "beauty", StatRange::DEFAULT_SOCIAL),
        stat_range(value, "cute", StatRange::DEFAULT_SOCIAL),
        stat_range(value, "clever", StatRange::DEFAULT_SOCIAL),
    ];

    let abilities = value
        .get("abilities")
        .map(|a| AbilityPools {
            normal: string_list(a, "normal"),
            hidden: string_list(a, "hidden"),
        })
        .unwrap_or_default();

    let moves = value
        .get("moves")
        .map(|m| MovePools {
            bronze: string_list(m, "bronze"),
            silver: string_list(m, "silver"),
            gold: string_list(m, "gold"),
            platinum: string_list(m, "platinum"),
            diamond: string_list(m, "diamond"),
            tm: string_list(m, "tm"),
            egg: string_list(m, "egg"),
            tutor: string_list(m, "tutor"),
        })
        .unwrap_or_default();

    SpeciesRecord::new(number, name, types, base_hp, battle, social, abilities, moves)
}

/// Parse a move document (already key-normalized).
pub fn parse_move(value: &Value, stem: &str) -> MoveRecord {
    let name = str_field(value, "name").unwrap_or(stem).to_owned();
    let typ = str_field(value, "type")
        .and_then(Type::from_str)
        .unwrap_or(Type::Unknown);
    let category = str_field(value, "category")
        .map(MoveCategory::from_str)
        .unwrap_or(MoveCategory::Support);

    // Power: explicit field first, then the power1/power2 variants.
    let mut power = int_field(value, "power")
        .or_else(|| int_field(value, "power1"))
        .or_else(|| int_field(value, "power2"))
        .unwrap_or(0) as i32;

    // Damage descriptor: "Special + 4" carries both the stat and a power
    // override; a bare stat name carries just the stat.
    let damage_field = variant_field(value, "damage");
    let damage_stat = match damage_field {
        Some(raw) if raw.contains('+') => {
            let (left, right) = raw.split_once('+').unwrap_or((raw, ""));
            if let Ok(n) = right.trim().parse::<i32>() {
                power = n;
            }
            left.trim().to_lowercase()
        }
        Some(raw) => raw.trim().to_lowercase(),
        None => "strength".to_owned(),
    };

    let accuracy_stat = variant_field(value, "accuracy")
        .unwrap_or("Dexterity")
        .trim()
        .to_lowercase();

    let target = str_field(value, "target").unwrap_or_default().to_owned();
    let effect = str_field(value, "effect").unwrap_or_default().to_owned();
    let crit = int_field(value, "crit").unwrap_or(0) as i32;
    let recoil = value.get("recoil").and_then(Value::as_bool).unwrap_or(false);

    let mut flags = EffectFlags::scan(&effect);
    if SELF_DESTRUCT_MOVES.contains(&normalize_name(&name).replace('-', " ").as_str()) {
        flags |= EffectFlags::SELF_DESTRUCT;
    }

    MoveRecord {
        name,
        typ,
        category,
        power,
        damage_stat,
        accuracy_stat,
        target,
        effect,
        crit,
        recoil,
        flags,
    }
}

/// Parse an ability document (already key-normalized). Abilities are flat
/// enough to deserialize directly.
pub fn parse_ability(value: &Value, stem: &str) -> AbilityRecord {
    let mut record: AbilityRecord = serde_json::from_value(value.clone()).unwrap_or_default();
    if record.name.is_empty() {
        record.name = stem.to_owned();
    }
    record
}

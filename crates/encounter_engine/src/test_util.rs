//! Shared test fixtures: hand-built species/move records and a populated
//! in-memory provider, so unit tests never touch the filesystem.

use crate::core_data::{
    AbilityPools, EffectFlags, MoveCategory, MovePools, MoveRecord, SpeciesRecord, StatRange, Type,
};
use crate::data::MemoryProvider;

pub fn ranges(raw: [&str; 5]) -> [StatRange; 5] {
    raw.map(|r| StatRange::parse(r, StatRange::DEFAULT_BATTLE))
}

pub fn species(name: &str, types: Vec<Type>, battle: [&str; 5], moves: MovePools) -> SpeciesRecord {
    SpeciesRecord::new(
        0,
        name.to_owned(),
        types,
        5,
        ranges(battle),
        [StatRange::DEFAULT_SOCIAL; 5],
        AbilityPools {
            normal: vec!["Test Ability".to_owned()],
            hidden: vec![],
        },
        moves,
    )
}

pub fn attack(name: &str, typ: Type, category: MoveCategory, power: i32) -> MoveRecord {
    MoveRecord {
        name: name.to_owned(),
        typ,
        category,
        power,
        damage_stat: if category == MoveCategory::Special {
            "special".to_owned()
        } else {
            "strength".to_owned()
        },
        accuracy_stat: "dexterity".to_owned(),
        target: "Foe".to_owned(),
        effect: String::new(),
        crit: 0,
        recoil: false,
        flags: EffectFlags::empty(),
    }
}

pub fn support(name: &str, accuracy_stat: &str) -> MoveRecord {
    MoveRecord {
        name: name.to_owned(),
        typ: Type::Normal,
        category: MoveCategory::Support,
        power: 0,
        damage_stat: "strength".to_owned(),
        accuracy_stat: accuracy_stat.to_owned(),
        target: "User".to_owned(),
        effect: String::new(),
        crit: 0,
        recoil: false,
        flags: EffectFlags::empty(),
    }
}

/// Provider with a balanced pool: four Physical and four Special attacks
/// (two of each Electric for STAB against Electric species), and four
/// Support moves.
pub fn standard_provider() -> MemoryProvider {
    let mut provider = MemoryProvider::new();
    for record in [
        attack("Tackle", Type::Normal, MoveCategory::Physical, 2),
        attack("Slam", Type::Normal, MoveCategory::Physical, 4),
        attack("Spark", Type::Electric, MoveCategory::Physical, 3),
        attack("Wild Charge", Type::Electric, MoveCategory::Physical, 5),
        attack("Swift", Type::Normal, MoveCategory::Special, 3),
        attack("Hyper Beam", Type::Normal, MoveCategory::Special, 6),
        attack("Thunder Shock", Type::Electric, MoveCategory::Special, 2),
        attack("Thunderbolt", Type::Electric, MoveCategory::Special, 4),
        support("Growl", "tough"),
        support("Tail Whip", "cute"),
        support("Nasty Plot", "insight"),
        support("Agility", "dexterity"),
    ] {
        provider.add_move(record);
    }
    provider
}

/// Move pools exposing the full standard_provider pool at Bronze.
pub fn full_pools() -> MovePools {
    MovePools {
        bronze: vec![
            "Tackle".into(),
            "Slam".into(),
            "Spark".into(),
            "Wild Charge".into(),
            "Swift".into(),
            "Hyper Beam".into(),
            "Thunder Shock".into(),
            "Thunderbolt".into(),
            "Growl".into(),
            "Tail Whip".into(),
            "Nasty Plot".into(),
            "Agility".into(),
        ],
        ..MovePools::default()
    }
}

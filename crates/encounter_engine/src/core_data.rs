//! Core game-data types shared by the allocator, selector and formatter.
//!
//! Records are produced once by the data loader with all JSON keys folded to
//! a canonical lower-case schema, so everything downstream uses plain field
//! access instead of case-insensitive fallback lookups.

use bitflags::bitflags;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Type {
    Normal = 0,
    Fighting = 1,
    Flying = 2,
    Poison = 3,
    Ground = 4,
    Rock = 5,
    Bug = 6,
    Ghost = 7,
    Steel = 8,
    Fire = 9,
    Water = 10,
    Grass = 11,
    Electric = 12,
    Psychic = 13,
    Ice = 14,
    Dragon = 15,
    Dark = 16,
    Fairy = 17,
    Unknown = 255,
}

impl Default for Type {
    fn default() -> Self {
        Type::Normal
    }
}

impl Type {
    pub fn from_str(s: &str) -> Option<Type> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Some(Type::Normal),
            "fighting" => Some(Type::Fighting),
            "flying" => Some(Type::Flying),
            "poison" => Some(Type::Poison),
            "ground" => Some(Type::Ground),
            "rock" => Some(Type::Rock),
            "bug" => Some(Type::Bug),
            "ghost" => Some(Type::Ghost),
            "steel" => Some(Type::Steel),
            "fire" => Some(Type::Fire),
            "water" => Some(Type::Water),
            "grass" => Some(Type::Grass),
            "electric" => Some(Type::Electric),
            "psychic" => Some(Type::Psychic),
            "ice" => Some(Type::Ice),
            "dragon" => Some(Type::Dragon),
            "dark" => Some(Type::Dark),
            "fairy" => Some(Type::Fairy),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Type::Normal => "Normal",
            Type::Fighting => "Fighting",
            Type::Flying => "Flying",
            Type::Poison => "Poison",
            Type::Ground => "Ground",
            Type::Rock => "Rock",
            Type::Bug => "Bug",
            Type::Ghost => "Ghost",
            Type::Steel => "Steel",
            Type::Fire => "Fire",
            Type::Water => "Water",
            Type::Grass => "Grass",
            Type::Electric => "Electric",
            Type::Psychic => "Psychic",
            Type::Ice => "Ice",
            Type::Dragon => "Dragon",
            Type::Dark => "Dark",
            Type::Fairy => "Fairy",
            Type::Unknown => "???",
        }
    }
}

/// Move category. `Support` moves never deal direct damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCategory {
    Physical,
    Special,
    Support,
}

impl MoveCategory {
    pub fn from_str(s: &str) -> MoveCategory {
        match s.to_ascii_lowercase().as_str() {
            "physical" => MoveCategory::Physical,
            "special" => MoveCategory::Special,
            _ => MoveCategory::Support,
        }
    }

    pub fn is_attacking(self) -> bool {
        matches!(self, MoveCategory::Physical | MoveCategory::Special)
    }

    pub fn name(self) -> &'static str {
        match self {
            MoveCategory::Physical => "Physical",
            MoveCategory::Special => "Special",
            MoveCategory::Support => "Support",
        }
    }
}

/// The five battle stats, in allocation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum BattleStat {
    Strength = 0,
    Dexterity = 1,
    Vitality = 2,
    Special = 3,
    Insight = 4,
}

impl BattleStat {
    pub const ALL: [BattleStat; 5] = [
        BattleStat::Strength,
        BattleStat::Dexterity,
        BattleStat::Vitality,
        BattleStat::Special,
        BattleStat::Insight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            BattleStat::Strength => "Strength",
            BattleStat::Dexterity => "Dexterity",
            BattleStat::Vitality => "Vitality",
            BattleStat::Special => "Special",
            BattleStat::Insight => "Insight",
        }
    }

    pub fn from_name(s: &str) -> Option<BattleStat> {
        match s.to_ascii_lowercase().as_str() {
            "strength" => Some(BattleStat::Strength),
            "dexterity" => Some(BattleStat::Dexterity),
            "vitality" => Some(BattleStat::Vitality),
            "special" => Some(BattleStat::Special),
            "insight" => Some(BattleStat::Insight),
            _ => None,
        }
    }

    /// Vitality and Insight advance in 2-point batches and carry odd caps.
    pub fn is_paired(self) -> bool {
        matches!(self, BattleStat::Vitality | BattleStat::Insight)
    }
}

/// The five social stats, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum SocialStat {
    Tough = 0,
    Cool = 1,
    Beauty = 2,
    Cute = 3,
    Clever = 4,
}

impl SocialStat {
    pub const ALL: [SocialStat; 5] = [
        SocialStat::Tough,
        SocialStat::Cool,
        SocialStat::Beauty,
        SocialStat::Cute,
        SocialStat::Clever,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            SocialStat::Tough => "Tough",
            SocialStat::Cool => "Cool",
            SocialStat::Beauty => "Beauty",
            SocialStat::Cute => "Cute",
            SocialStat::Clever => "Clever",
        }
    }
}

/// Inclusive `base..=max` range parsed from a `"base/max"` JSON string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatRange {
    pub base: i32,
    pub max: i32,
}

impl StatRange {
    pub const DEFAULT_BATTLE: StatRange = StatRange { base: 0, max: 10 };
    pub const DEFAULT_SOCIAL: StatRange = StatRange { base: 1, max: 5 };

    /// Parse `"2/10"`. Malformed input falls back to `default` — species
    /// files in the wild are hand-edited and occasionally broken.
    pub fn parse(raw: &str, default: StatRange) -> StatRange {
        let mut parts = raw.splitn(2, '/');
        let base = parts.next().and_then(|p| p.trim().parse::<i32>().ok());
        let max = parts.next().and_then(|p| p.trim().parse::<i32>().ok());
        match (base, max) {
            (Some(base), Some(max)) => StatRange { base, max },
            _ => default,
        }
    }
}

bitflags! {
    /// Effect-text keywords, scanned once at load time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EffectFlags: u8 {
        /// "successive" / "double" / "triple" — hits more than once
        const MULTI_HIT     = 1 << 0;
        const RECOIL        = 1 << 1;
        const CHARGE        = 1 << 2;
        const RECHARGE      = 1 << 3;
        /// The user faints on use (Explosion, Self-Destruct)
        const SELF_DESTRUCT = 1 << 4;
    }
}

impl EffectFlags {
    const MULTI_HIT_KEYWORDS: [&'static str; 3] = ["successive", "double", "triple"];

    /// Scan lower-cased effect text for the keyword set.
    pub fn scan(effect: &str) -> EffectFlags {
        let text = effect.to_ascii_lowercase();
        let mut flags = EffectFlags::empty();
        if Self::MULTI_HIT_KEYWORDS.iter().any(|kw| text.contains(kw)) {
            flags |= EffectFlags::MULTI_HIT;
        }
        if text.contains("recoil") {
            flags |= EffectFlags::RECOIL;
        }
        if text.contains("recharge") {
            flags |= EffectFlags::RECHARGE | EffectFlags::CHARGE;
        } else if text.contains("charge") {
            flags |= EffectFlags::CHARGE;
        }
        flags
    }
}

/// A single move, with raw JSON fields folded into one canonical schema.
#[derive(Debug, Clone)]
pub struct MoveRecord {
    pub name: String,
    pub typ: Type,
    pub category: MoveCategory,
    /// Flat power. A `"Stat + N"` damage string overrides the numeric field.
    pub power: i32,
    /// Damage-stat descriptor: a stat name, `"rank"`, or `"stat1/stat2"`.
    pub damage_stat: String,
    /// Accuracy-stat descriptor, same shapes. Defaults to `"dexterity"`.
    pub accuracy_stat: String,
    pub target: String,
    pub effect: String,
    pub crit: i32,
    pub recoil: bool,
    pub flags: EffectFlags,
}

impl MoveRecord {
    pub fn is_attacking(&self) -> bool {
        self.category.is_attacking()
    }

    /// Same-Type Attack Bonus against the given species types.
    pub fn stab_against(&self, types: &[Type]) -> bool {
        self.typ != Type::Unknown && types.contains(&self.typ)
    }

    pub fn is_multi_hit(&self) -> bool {
        self.flags.contains(EffectFlags::MULTI_HIT)
    }

    pub fn has_recoil(&self) -> bool {
        self.recoil || self.flags.contains(EffectFlags::RECOIL)
    }

    /// Targets the whole field rather than a single foe.
    pub fn is_area(&self) -> bool {
        self.target.contains("All Foes") || self.target.contains("Area")
    }
}

/// Ability pools as stored on the species record.
#[derive(Debug, Clone, Default)]
pub struct AbilityPools {
    pub normal: Vec<String>,
    pub hidden: Vec<String>,
}

/// Rank-gated move unlock tiers plus the optional extra pools.
#[derive(Debug, Clone, Default)]
pub struct MovePools {
    pub bronze: Vec<String>,
    pub silver: Vec<String>,
    pub gold: Vec<String>,
    pub platinum: Vec<String>,
    pub diamond: Vec<String>,
    pub tm: Vec<String>,
    pub egg: Vec<String>,
    pub tutor: Vec<String>,
}

impl MovePools {
    /// The rank tiers in unlock order (extras excluded).
    pub fn tiers(&self) -> [&[String]; 5] {
        [
            &self.bronze,
            &self.silver,
            &self.gold,
            &self.platinum,
            &self.diamond,
        ]
    }

    /// TM, tutor and egg moves, in that order.
    pub fn extras(&self) -> impl Iterator<Item = &String> {
        self.tm.iter().chain(self.tutor.iter()).chain(self.egg.iter())
    }
}

/// One species, immutable per encounter.
#[derive(Debug, Clone)]
pub struct SpeciesRecord {
    pub number: u32,
    pub name: String,
    pub types: Vec<Type>,
    pub base_hp: i32,
    battle: [StatRange; 5],
    social: [StatRange; 5],
    pub abilities: AbilityPools,
    pub moves: MovePools,
}

impl SpeciesRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        number: u32,
        name: String,
        types: Vec<Type>,
        base_hp: i32,
        battle: [StatRange; 5],
        social: [StatRange; 5],
        abilities: AbilityPools,
        moves: MovePools,
    ) -> Self {
        Self {
            number,
            name,
            types,
            base_hp,
            battle,
            social,
            abilities,
            moves,
        }
    }

    pub fn battle_range(&self, stat: BattleStat) -> StatRange {
        self.battle[stat.index()]
    }

    pub fn social_range(&self, stat: SocialStat) -> StatRange {
        self.social[stat.index()]
    }
}

/// One ability. Only the effect text matters to the formatter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AbilityRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub effect: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_lookup() {
        assert_eq!(Type::from_str("fire"), Some(Type::Fire));
        assert_eq!(Type::from_str("Fire"), Some(Type::Fire));
        assert_eq!(Type::from_str("invalid"), None);
    }

    #[test]
    fn test_stat_range_parse() {
        assert_eq!(
            StatRange::parse("2/10", StatRange::DEFAULT_BATTLE),
            StatRange { base: 2, max: 10 }
        );
        // Malformed strings fall back instead of erroring
        assert_eq!(
            StatRange::parse("garbage", StatRange::DEFAULT_BATTLE),
            StatRange::DEFAULT_BATTLE
        );
        assert_eq!(
            StatRange::parse("3", StatRange::DEFAULT_SOCIAL),
            StatRange::DEFAULT_SOCIAL
        );
    }

    #[test]
    fn test_effect_flag_scan() {
        let flags = EffectFlags::scan("Hits the foe with two successive strikes.");
        assert!(flags.contains(EffectFlags::MULTI_HIT));

        let flags = EffectFlags::scan("The user takes recoil damage.");
        assert!(flags.contains(EffectFlags::RECOIL));

        let flags = EffectFlags::scan("Charges on the first turn, attacks on the second.");
        assert!(flags.contains(EffectFlags::CHARGE));
        assert!(!flags.contains(EffectFlags::RECHARGE));

        let flags = EffectFlags::scan("The user must recharge next turn.");
        assert!(flags.contains(EffectFlags::RECHARGE));
    }

    #[test]
    fn test_stab() {
        let record = MoveRecord {
            name: "Thunderbolt".into(),
            typ: Type::Electric,
            category: MoveCategory::Special,
            power: 4,
            damage_stat: "special".into(),
            accuracy_stat: "dexterity".into(),
            target: "Foe".into(),
            effect: String::new(),
            crit: 0,
            recoil: false,
            flags: EffectFlags::empty(),
        };
        assert!(record.stab_against(&[Type::Electric]));
        assert!(!record.stab_against(&[Type::Rock, Type::Ground]));
    }
}

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::allocator::{allocate, ComputedStats, PurchaseKind, StatMode};
use crate::core_data::{BattleStat, MovePools, Type};
use crate::data::MemoryProvider;
use crate::ranks::Rank;
use crate::test_util::{full_pools, species, standard_provider};

use super::social;

/// Total points accounted for: plain boosts + limit-break costs + leftover
/// must equal the budget.
fn assert_budget_identity(
    outcome: &crate::allocator::AllocationOutcome,
    base: impl Fn(BattleStat) -> i32,
    budget: i32,
) {
    let break_points: i32 = outcome
        .purchases
        .iter()
        .map(|p| match p.kind {
            PurchaseKind::Single => 1,
            PurchaseKind::Double => 2,
        })
        .sum();
    let break_cost: i32 = outcome.purchases.iter().map(|p| p.cost).sum();
    let total_boost: i32 = BattleStat::ALL
        .iter()
        .map(|&s| outcome.stats.battle(s) - base(s))
        .sum();
    let plain_spent = total_boost - break_points;
    assert_eq!(
        plain_spent + break_cost + outcome.leftover,
        budget,
        "budget identity violated: plain={plain_spent} breaks={break_cost} leftover={}",
        outcome.leftover
    );
}

#[test]
fn test_level_one_uniform_scenario() {
    // All ranges 1/10 except Vitality/Insight at 1/9 (already odd):
    // 4 points, all spent as plain increments, no limit breaks possible.
    let s = species(
        "Testmon",
        vec![Type::Normal],
        ["1/10", "1/10", "1/9", "1/10", "1/9"],
        MovePools::default(),
    );
    let provider = MemoryProvider::new();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = allocate(&s, 1, StatMode::Uniform, &provider, &mut rng);
        assert_eq!(outcome.leftover, 0);
        assert!(outcome.purchases.is_empty());
        let spent: i32 = BattleStat::ALL
            .iter()
            .map(|&st| outcome.stats.battle(st) - s.battle_range(st).base)
            .sum();
        assert_eq!(spent, 4);
        for stat in BattleStat::ALL {
            assert!(outcome.stats.battle(stat) <= s.battle_range(stat).max);
        }
    }
}

#[test]
fn test_uniform_budget_identity_across_levels() {
    let s = species(
        "Testmon",
        vec![Type::Normal],
        ["1/4", "1/5", "1/5", "1/4", "1/5"],
        MovePools::default(),
    );
    let provider = MemoryProvider::new();
    for level in [1, 5, 10, 20, 40] {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = allocate(&s, level, StatMode::Uniform, &provider, &mut rng);
            assert!(outcome.leftover >= 0);
            assert_budget_identity(&outcome, |st| s.battle_range(st).base, 3 + level);
        }
    }
}

#[test]
fn test_uniform_exhausts_affordable_limit_breaks() {
    // Tiny caps force the budget into limit breaks.
    let s = species(
        "Smallmon",
        vec![Type::Normal],
        ["1/2", "1/2", "1/1", "1/2", "1/1"],
        MovePools::default(),
    );
    let provider = MemoryProvider::new();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = allocate(&s, 20, StatMode::Uniform, &provider, &mut rng);
        assert!(!outcome.purchases.is_empty());
        // Whatever is left cannot afford the next single-point break.
        let next_cost = outcome
            .purchases
            .iter()
            .map(|p| match p.kind {
                PurchaseKind::Single => 1,
                PurchaseKind::Double => 2,
            })
            .sum::<i32>()
            + 2;
        assert!(
            outcome.leftover < next_cost,
            "leftover {} could still buy a break costing {next_cost}",
            outcome.leftover
        );
        assert_budget_identity(&outcome, |st| s.battle_range(st).base, 23);
    }
}

#[test]
fn test_odd_cap_never_plain_fills_to_even_max() {
    // Vitality/Insight max 10 is even: the effective cap is 9, so a final
    // value of exactly 10 can only come from a limit break.
    let s = species(
        "Testmon",
        vec![Type::Normal],
        ["1/10", "1/10", "1/10", "1/10", "1/10"],
        MovePools::default(),
    );
    let provider = MemoryProvider::new();
    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = allocate(&s, 30, StatMode::Uniform, &provider, &mut rng);
        for stat in [BattleStat::Vitality, BattleStat::Insight] {
            if outcome.stats.battle(stat) == 10 {
                assert!(
                    outcome.purchases.iter().any(|p| p.stat == stat),
                    "{} reached its even nominal max without a limit break",
                    stat.name()
                );
            }
        }
    }
}

#[test]
fn test_limit_break_costs_are_monotonic_per_point() {
    let s = species(
        "Smallmon",
        vec![Type::Normal],
        ["1/2", "1/2", "1/1", "1/2", "1/1"],
        MovePools::default(),
    );
    let provider = standard_provider();
    for seed in 0..20 {
        for mode in [StatMode::Uniform, StatMode::Smart] {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = allocate(&s, 30, mode, &provider, &mut rng);
            // Expand each purchase into per-point costs: a double batch is
            // two sequential singles, (L+2) then (L+3).
            let mut per_point = Vec::new();
            for p in &outcome.purchases {
                match p.kind {
                    PurchaseKind::Single => per_point.push(p.cost),
                    PurchaseKind::Double => {
                        let first = (p.cost - 1) / 2;
                        per_point.push(first);
                        per_point.push(first + 1);
                    }
                }
            }
            for pair in per_point.windows(2) {
                assert!(pair[1] >= pair[0], "per-point cost decreased: {per_point:?}");
            }
        }
    }
}

#[test]
fn test_smart_spacing_forbids_back_to_back_purchases() {
    let s = species(
        "Smallmon",
        vec![Type::Normal],
        ["1/3", "1/3", "1/3", "1/3", "1/3"],
        MovePools::default(),
    );
    let provider = standard_provider();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = allocate(&s, 30, StatMode::Smart, &provider, &mut rng);
        for pair in outcome.purchases.windows(2) {
            assert_ne!(
                pair[0].stat, pair[1].stat,
                "consecutive limit breaks on {}",
                pair[0].stat.name()
            );
        }
    }
}

#[test]
fn test_smart_prefers_higher_capped_offense() {
    // Special max 12 beats Strength max 8: Strength must never receive a
    // limit break, and Special must end above its base.
    let mut s = species(
        "Specialmon",
        vec![Type::Electric],
        ["2/8", "2/6", "1/9", "2/12", "1/9"],
        full_pools(),
    );
    s.base_hp = 4;
    let provider = standard_provider();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = allocate(&s, 15, StatMode::Smart, &provider, &mut rng);
        assert!(
            !outcome
                .purchases
                .iter()
                .any(|p| p.stat == BattleStat::Strength),
            "strength was limit-broken despite the lower cap"
        );
        assert!(outcome.stats.battle(BattleStat::Special) > 2);
    }
}

#[test]
fn test_smart_budget_identity() {
    let s = species(
        "Specialmon",
        vec![Type::Electric],
        ["2/8", "2/6", "1/9", "2/12", "1/9"],
        full_pools(),
    );
    let provider = standard_provider();
    for level in [1, 4, 10, 25] {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = allocate(&s, level, StatMode::Smart, &provider, &mut rng);
            assert!(outcome.leftover >= 0);
            // The vitality→insight nudge moves points between stats after
            // the budget is spent, so the identity can be off by the
            // shifted pair in either direction.
            let budget = 3 + level;
            let break_cost: i32 = outcome.purchases.iter().map(|p| p.cost).sum();
            let break_points: i32 = outcome
                .purchases
                .iter()
                .map(|p| match p.kind {
                    PurchaseKind::Single => 1,
                    PurchaseKind::Double => 2,
                })
                .sum();
            let total_boost: i32 = BattleStat::ALL
                .iter()
                .map(|&st| outcome.stats.battle(st) - s.battle_range(st).base)
                .sum();
            let plain = total_boost - break_points;
            let diff = plain + break_cost + outcome.leftover - budget;
            assert!(
                (-2..=2).contains(&diff),
                "budget off by {diff} at level {level} seed {seed}"
            );
        }
    }
}

#[test]
fn test_derived_stat_formulas() {
    let stats = ComputedStats::new([3, 4, 5, 6, 7], [10; 5], [1; 5], [5; 5], 10);
    assert_eq!(stats.hp(), 30);
    assert_eq!(stats.defense(), 3);
    assert_eq!(stats.special_defense(), 4);
    assert_eq!(stats.active_move_limit(), 9);
    assert_eq!(stats.value_of("special"), Some(6));
    assert_eq!(stats.value_of("tough"), Some(1));
    assert_eq!(stats.value_of("nonsense"), None);
}

#[test]
fn test_social_points_scale_with_rank() {
    assert_eq!(social::social_points(Rank::Bronze), 4);
    assert_eq!(social::social_points(Rank::Silver), 6);
    assert_eq!(social::social_points(Rank::Diamond), 12);
    assert_eq!(social::social_points(Rank::Master), 12);
}

#[test]
fn test_social_values_capped_at_max() {
    let s = species(
        "Testmon",
        vec![Type::Normal],
        ["1/10"; 5],
        MovePools::default(),
    );
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let (values, maxes) = social::allocate(&s, Rank::Master, &mut rng);
        for i in 0..5 {
            assert!(values[i] >= 1 && values[i] <= maxes[i]);
        }
    }
}

#[test]
fn test_vitality_insight_nudge_respects_bounds() {
    use super::smart::maybe_shift_vitality_to_insight;

    let s = species(
        "Testmon",
        vec![Type::Normal],
        ["1/10", "1/10", "3/9", "1/10", "3/9"],
        MovePools::default(),
    );
    let mut shifted = 0;
    for seed in 0..400 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut battle = [2, 2, 5, 2, 5];
        maybe_shift_vitality_to_insight(&mut battle, &s, &mut rng);
        if battle != [2, 2, 5, 2, 5] {
            assert_eq!(battle, [2, 2, 3, 2, 7], "shift must move exactly two points");
            shifted += 1;
        }
    }
    // ~12% of 400 trials; wide tolerance to stay seed-stable.
    assert!(shifted > 10 && shifted < 120, "shift count {shifted}");

    // Unequal values never shift.
    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut battle = [2, 2, 5, 2, 7];
        maybe_shift_vitality_to_insight(&mut battle, &s, &mut rng);
        assert_eq!(battle, [2, 2, 5, 2, 7]);
    }
}

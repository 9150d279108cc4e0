//! Social-stat allocation.
//!
//! Much simpler than battle allocation: a rank-scaled pool of points is
//! scattered uniformly. Boosts may overshoot a stat's max; final values
//! are capped here since nothing downstream needs the overflow.

use rand::Rng;

use crate::core_data::{SocialStat, SpeciesRecord};
use crate::ranks::Rank;

/// Points available: 4 at Bronze, +2 per rank above it.
pub fn social_points(rank: Rank) -> i32 {
    4 + (rank.value() - 1) * 2
}

/// Returns `(values, maxes)` per social stat, values capped at max.
pub fn allocate<R: Rng>(
    species: &SpeciesRecord,
    rank: Rank,
    rng: &mut R,
) -> ([i32; 5], [i32; 5]) {
    let mut boosts = [0; 5];
    for _ in 0..social_points(rank) {
        boosts[rng.gen_range(0..SocialStat::ALL.len())] += 1;
    }

    let mut values = [0; 5];
    let mut maxes = [0; 5];
    for stat in SocialStat::ALL {
        let range = species.social_range(stat);
        values[stat.index()] = (range.base + boosts[stat.index()]).min(range.max);
        maxes[stat.index()] = range.max;
    }
    (values, maxes)
}

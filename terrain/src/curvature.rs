//! Earth curvature relative to a straight sightline.
//!
//! Over a path of length `L`, the terrain at distance `d` from the
//! start sits `d * (L - d) / 2R` below the chord joining both
//! endpoints. Subtracting that drop shows the terrain the way a
//! straight line of sight sees it; the true elevation is unchanged.

use crate::{C, MEAN_EARTH_RADIUS};
use num_traits::Float;

/// Returns how far below the chord the earth's surface is at
/// `distance_m` along a path of `total_m`, both in meters.
///
/// Zero at both endpoints, and for distances outside `[0, total_m]`.
pub fn curvature_drop<T>(distance_m: T, total_m: T, earth_radius: T) -> T
where
    T: Float,
{
    if distance_m <= T::zero() || distance_m >= total_m {
        return T::zero();
    }
    let two = T::one() + T::one();
    distance_m * (total_m - distance_m) / (two * earth_radius)
}

/// Returns `raw_elevation - drop(distance)` for every `(distance,
/// raw_elevation)` pair, using [`MEAN_EARTH_RADIUS`].
pub fn adjust(samples: &[(C, C)], total_m: C) -> Vec<C> {
    samples
        .iter()
        .map(|&(distance_m, elevation_m)| {
            elevation_m - curvature_drop(distance_m, total_m, MEAN_EARTH_RADIUS)
        })
        .collect()
}

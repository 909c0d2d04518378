//! Sampling the path between two points.

use crate::{
    math::{linspace, GeodesicIter, HaversineIter},
    TerrainError, C, MEAN_EARTH_RADIUS,
};
use geo::Point;

/// Earth model used to trace the path between two points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathModel {
    /// Shortest path on the WGS84 ellipsoid.
    #[default]
    Geodesic,

    /// Great circle on a sphere of [`MEAN_EARTH_RADIUS`].
    Haversine,
}

/// A point on the path and its distance from the start of the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledPoint {
    pub point: Point<C>,

    /// Distance from the path's start in meters.
    pub distance_m: C,
}

/// Returns the length of the path from `start` to `end` in meters.
pub fn path_length(start: Point<C>, end: Point<C>, model: PathModel) -> C {
    match model {
        PathModel::Geodesic => GeodesicIter::new(start, end, 0).distance_m(),
        PathModel::Haversine => HaversineIter::new(start, end, 0).central_angle() * MEAN_EARTH_RADIUS,
    }
}

/// Returns `n` points evenly spaced along the path from `start` to
/// `end`. The first and last points are `start` and `end`.
pub fn interpolate(
    start: Point<C>,
    end: Point<C>,
    n: usize,
    model: PathModel,
) -> Result<Vec<Point<C>>, TerrainError> {
    Ok(sample_path(start, end, n, model, false)?
        .into_iter()
        .map(|sample| sample.point)
        .collect())
}

/// Like [`interpolate`], but pairs every point with its distance from
/// `start`.
///
/// With `allow_degenerate`, identical endpoints produce `n` copies of
/// `start`, all at distance 0, instead of an error.
pub fn sample_path(
    start: Point<C>,
    end: Point<C>,
    n: usize,
    model: PathModel,
    allow_degenerate: bool,
) -> Result<Vec<SampledPoint>, TerrainError> {
    if n < 2 {
        return Err(TerrainError::SampleCount(n));
    }
    check_coordinate(start)?;
    check_coordinate(end)?;

    let distance_m = path_length(start, end, model);

    if start == end || distance_m == 0.0 {
        return if allow_degenerate {
            Ok(vec![
                SampledPoint {
                    point: start,
                    distance_m: 0.0,
                };
                n
            ])
        } else {
            Err(TerrainError::Degenerate {
                lat: start.y(),
                lon: start.x(),
            })
        };
    }

    let points: Vec<Point<C>> = match model {
        PathModel::Geodesic => GeodesicIter::new(start, end, n).collect(),
        PathModel::Haversine => HaversineIter::new(start, end, n).collect(),
    };

    Ok(points
        .into_iter()
        .zip(linspace(0.0, distance_m, n))
        .map(|(point, distance_m)| SampledPoint { point, distance_m })
        .collect())
}

fn check_coordinate(point: Point<C>) -> Result<(), TerrainError> {
    let (lon, lat) = point.x_y();
    if lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 && lon.abs() <= 180.0 {
        Ok(())
    } else {
        Err(TerrainError::Coordinate { lat, lon })
    }
}

//! Ellipsoidal (WGS84) counterpart to [`HaversineIter`].
//!
//! Same idea as geo's [GeodesicIntermediate], but the inverse problem
//! is solved once per path instead of once per point.
//!
//! [`HaversineIter`]: super::HaversineIter
//! [GeodesicIntermediate]: https://github.com/georust/geo/blob/main/geo/src/algorithm/geodesic_intermediate.rs

use geo::Point;
use geographiclib_rs::{DirectGeodesic, Geodesic, InverseGeodesic};
use std::ops::Range;

/// Yields `len` evenly spaced points along the WGS84 geodesic from
/// `start` to `end`, both included.
pub struct GeodesicIter {
    geod: Geodesic,
    start: Point,
    end: Point,
    /// Forward azimuth at `start`, in degrees.
    azimuth: f64,
    /// Length of the geodesic in meters.
    distance_m: f64,
    range: Range<usize>,
}

impl GeodesicIter {
    pub fn new(start: Point, end: Point, len: usize) -> Self {
        let geod = Geodesic::wgs84();
        let (distance_m, azimuth, _azi2, _a12): (f64, f64, f64, f64) =
            geod.inverse(start.y(), start.x(), end.y(), end.x());
        Self {
            geod,
            start,
            end,
            azimuth,
            distance_m,
            range: 0..len,
        }
    }

    /// Length of the geodesic in meters.
    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }
}

impl Iterator for GeodesicIter {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.range.next()?;
        let last = self.range.end - 1;
        let point = if idx == 0 {
            self.start
        } else if idx == last {
            self.end
        } else {
            #[allow(clippy::cast_precision_loss)]
            let s12 = self.distance_m * (idx as f64 / last as f64);
            let (lat, lon): (f64, f64) =
                self.geod
                    .direct(self.start.y(), self.start.x(), self.azimuth, s12);
            Point::new(lon, lat)
        };
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl ExactSizeIterator for GeodesicIter {}

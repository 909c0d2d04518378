//! These routines are taken from the [geo] crate, modified to better
//! fit our use-case.
//!
//! [geo](https://github.com/georust/geo/blob/eb0cd98f3ccfa226631af23d94d66d214ea66488/geo/src/algorithm/haversine_intermediate.rs)

use geo::{CoordFloat, Point};
use num_traits::FromPrimitive;
use std::ops::Range;

/// Yields `len` evenly spaced points along the spherical great circle
/// from `start` to `end`, both included.
pub struct HaversineIter<T: CoordFloat = f64> {
    params: HaversineParams<T>,
    start: Point<T>,
    end: Point<T>,
    range: Range<usize>,
    inverse: T,
}

impl<T: CoordFloat + FromPrimitive> HaversineIter<T> {
    pub fn new(start: Point<T>, end: Point<T>, len: usize) -> Self {
        let params = get_params(&start, &end);
        let steps = T::from_usize(len.saturating_sub(1).max(1)).unwrap_or_else(T::one);
        Self {
            params,
            start,
            end,
            range: 0..len,
            inverse: T::one() / steps,
        }
    }

    /// Central angle between `start` and `end`, in radians.
    pub fn central_angle(&self) -> T {
        self.params.d
    }
}

impl<T: CoordFloat + FromPrimitive> Iterator for HaversineIter<T> {
    type Item = Point<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.range.next()?;
        let point = if idx == 0 {
            self.start
        } else if idx + 1 == self.range.end {
            self.end
        } else {
            let factor = T::from_usize(idx)? * self.inverse;
            get_point(&self.params, factor)
        };
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<T: CoordFloat + FromPrimitive> ExactSizeIterator for HaversineIter<T> {}

#[allow(clippy::many_single_char_names)]
struct HaversineParams<T> {
    d: T,
    n: T,
    o: T,
    p: T,
    q: T,
    r: T,
    s: T,
}

#[allow(clippy::many_single_char_names)]
fn get_point<T>(params: &HaversineParams<T>, f: T) -> Point<T>
where
    T: CoordFloat,
{
    let one = T::one();

    let HaversineParams {
        d,
        n,
        o,
        p,
        q,
        r,
        s,
    } = *params;

    let a = ((one - f) * d).sin() / d.sin();
    let b = (f * d).sin() / d.sin();

    let x = a * n + b * o;
    let y = a * p + b * q;
    let z = a * r + b * s;

    let lat = z.atan2(x.hypot(y));
    let lon = y.atan2(x);

    Point::new(lon.to_degrees(), lat.to_degrees())
}

#[allow(clippy::many_single_char_names)]
fn get_params<T>(p1: &Point<T>, p2: &Point<T>) -> HaversineParams<T>
where
    T: CoordFloat,
{
    let one = T::one();
    let two = one + one;

    let lat1 = p1.y().to_radians();
    let lon1 = p1.x().to_radians();
    let lat2 = p2.y().to_radians();
    let lon2 = p2.x().to_radians();

    let (lat1_sin, lat1_cos) = lat1.sin_cos();
    let (lat2_sin, lat2_cos) = lat2.sin_cos();
    let (lon1_sin, lon1_cos) = lon1.sin_cos();
    let (lon2_sin, lon2_cos) = lon2.sin_cos();

    let m = lat1_cos * lat2_cos;

    let n = lat1_cos * lon1_cos;
    let o = lat2_cos * lon2_cos;
    let p = lat1_cos * lon1_sin;
    let q = lat2_cos * lon2_sin;

    let k = (((lat1 - lat2) / two).sin().powi(2) + m * ((lon1 - lon2) / two).sin().powi(2)).sqrt();

    let d = two * k.asin();

    HaversineParams {
        d,
        n,
        o,
        p,
        q,
        r: lat1_sin,
        s: lat2_sin,
    }
}

#[cfg(test)]
mod tests {
    use super::HaversineIter;
    use crate::MEAN_EARTH_RADIUS;
    use approx::assert_relative_eq;
    use geo::point;

    #[test]
    fn test_haversine_iter() {
        let start = point!(x: -0.5, y: -0.5);
        let end = point!(x: 0.5, y: 0.5);
        let haversine = HaversineIter::new(start, end, 10);
        assert_eq!(haversine.len(), 10);
        assert_relative_eq!(
            haversine.central_angle() * MEAN_EARTH_RADIUS,
            157_252.4,
            epsilon = 1.0
        );
        let points = haversine.collect::<Vec<_>>();
        let expected = [
            point!(x: -0.5, y: -0.5),
            point!(x: -0.388_884_988_799_152_34, y: -0.388_890_838_895_255_3),
            point!(x: -0.277_772_902_687_608_4, y: -0.277_780_215_266_485_2),
            point!(x: -0.166_662_905_894_136_8, y: -0.166_668_547_005_197_93),
            point!(x: -0.055_554_162_678_936_12, y: -0.055_556_251_975_400_386),
            point!(x: 0.055_554_162_678_936_12, y: 0.055_556_251_975_400_386),
            point!(x: 0.166_662_905_894_136_7, y: 0.166_668_547_005_197_84),
            point!(x: 0.277_772_902_687_608_24, y: 0.277_780_215_266_485_1),
            point!(x: 0.388_884_988_799_152_3, y: 0.388_890_838_895_255_2),
            point!(x: 0.5, y: 0.5),
        ];
        assert_eq!(points.len(), expected.len());
        for (actual, expected) in points.iter().zip(expected.iter()) {
            assert_relative_eq!(actual.x(), expected.x(), epsilon = 1e-12);
            assert_relative_eq!(actual.y(), expected.y(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_endpoints_are_exact() {
        let start = point!(x: 10.7650043, y: 46.1617322);
        let end = point!(x: 11.003402, y: 46.1661363);
        let points = HaversineIter::new(start, end, 3).collect::<Vec<_>>();
        assert_eq!(points.first(), Some(&start));
        assert_eq!(points.last(), Some(&end));
    }
}

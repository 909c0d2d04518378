/// Mean earth radius in meters.
pub const MEAN_EARTH_RADIUS: f64 = 6_371_000.0;

use crate::{
    curvature::curvature_drop,
    path::{sample_path, PathModel, SampledPoint},
    TerrainError, C, MEAN_EARTH_RADIUS,
};
use elevation::ElevationSource;
use geo::geometry::{Coord, Point};
use log::debug;

/// One step along the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationSample {
    /// Location of this step.
    pub point: Point<C>,

    /// Distance from the start of the path in meters.
    pub distance_m: C,

    /// Elevation in meters; curvature adjusted when the profile was
    /// built with `earth_curve`.
    pub elevation_m: C,

    /// Drop of the earth's surface below the start-end chord at this
    /// step, in meters.
    pub curvature_m: C,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Total distance from `start` to `end` in meters.
    pub distance_m: C,

    /// Samples ordered from `start` to `end`, both included.
    pub samples: Vec<ElevationSample>,
}

impl Profile {
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder {
            start: None,
            end: None,
            samples: None,
            earth_curve: false,
            model: PathModel::default(),
            allow_degenerate: false,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn distances(&self) -> impl Iterator<Item = C> + '_ {
        self.samples.iter().map(|s| s.distance_m)
    }

    pub fn elevations(&self) -> impl Iterator<Item = C> + '_ {
        self.samples.iter().map(|s| s.elevation_m)
    }
}

#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    /// Start point of the path (required).
    start: Option<Coord<C>>,

    /// End point of the path (required).
    end: Option<Coord<C>>,

    /// Number of samples, endpoints included (required).
    samples: Option<usize>,

    /// Subtract earth curvature (defaults to false).
    earth_curve: bool,

    /// Earth model for the path (defaults to geodesic).
    model: PathModel,

    /// Accept identical start and end (defaults to false).
    allow_degenerate: bool,
}

impl ProfileBuilder {
    /// Start point of the path (required).
    #[must_use]
    pub fn start(mut self, coord: Coord<C>) -> Self {
        self.start = Some(coord);
        self
    }

    /// End point of the path (required).
    #[must_use]
    pub fn end(mut self, coord: Coord<C>) -> Self {
        self.end = Some(coord);
        self
    }

    /// Number of samples, endpoints included (required, at least 2).
    #[must_use]
    pub fn samples(mut self, n: usize) -> Self {
        self.samples = Some(n);
        self
    }

    /// Subtract earth curvature relative to the straight sightline
    /// between the endpoints (defaults to false).
    #[must_use]
    pub fn earth_curve(mut self, earth_curve: bool) -> Self {
        self.earth_curve = earth_curve;
        self
    }

    /// Earth model for the path (defaults to geodesic).
    #[must_use]
    pub fn model(mut self, model: PathModel) -> Self {
        self.model = model;
        self
    }

    /// Build a zero length profile, instead of failing, when start and
    /// end are the same point (defaults to false).
    #[must_use]
    pub fn allow_degenerate(mut self, allow: bool) -> Self {
        self.allow_degenerate = allow;
        self
    }

    pub fn build<S>(&self, source: &S) -> Result<Profile, TerrainError>
    where
        S: ElevationSource + ?Sized,
    {
        let start = self.start.ok_or(TerrainError::Builder("start"))?;
        let end = self.end.ok_or(TerrainError::Builder("end"))?;
        let n = self.samples.ok_or(TerrainError::Builder("samples"))?;

        let (path, path_runtime) = {
            let now = std::time::Instant::now();
            let path = sample_path(
                Point::from(start),
                Point::from(end),
                n,
                self.model,
                self.allow_degenerate,
            )?;
            (path, now.elapsed())
        };

        let distance_m = path.last().map_or(0.0, |s| s.distance_m);

        let (terrain, terrain_runtime) = {
            let now = std::time::Instant::now();
            let coords: Vec<Coord<C>> = path.iter().map(|s| s.point.0).collect();
            let terrain = source.elevations(&coords)?;
            (terrain, now.elapsed())
        };

        if terrain.len() != path.len() {
            return Err(TerrainError::Elevations {
                expected: path.len(),
                received: terrain.len(),
            });
        }

        debug!(
            "profile; len: {}, distance: {distance_m:.1} m, path_exec: {:?}, terrain_exec: {:?}",
            path.len(),
            path_runtime,
            terrain_runtime
        );

        let samples = path
            .into_iter()
            .zip(terrain)
            .map(|(SampledPoint { point, distance_m: d }, raw_m)| {
                let curvature_m = curvature_drop(d, distance_m, MEAN_EARTH_RADIUS);
                let elevation_m = if self.earth_curve {
                    raw_m - curvature_m
                } else {
                    raw_m
                };
                ElevationSample {
                    point,
                    distance_m: d,
                    elevation_m,
                    curvature_m,
                }
            })
            .collect();

        Ok(Profile {
            distance_m,
            samples,
        })
    }
}

/// Builds a profile of `n` samples from `start` to `end`.
///
/// Shorthand for [`Profile::builder`] with the default path model.
pub fn build<S>(
    start: Coord<C>,
    end: Coord<C>,
    n: usize,
    earth_curve: bool,
    source: &S,
) -> Result<Profile, TerrainError>
where
    S: ElevationSource + ?Sized,
{
    Profile::builder()
        .start(start)
        .end(end)
        .samples(n)
        .earth_curve(earth_curve)
        .build(source)
}

//! # Terrain profiles
//!
//! Samples evenly spaced points along the path between two
//! coordinates, looks up their elevation through an
//! [`ElevationSource`](elevation::ElevationSource) and optionally
//! drops each sample by the earth's curvature relative to the straight
//! sightline between the endpoints.

mod constants;
pub mod curvature;
mod error;
mod math;
mod path;
mod profile;

pub use crate::{
    constants::MEAN_EARTH_RADIUS,
    error::{ErrorKind, TerrainError},
    path::{interpolate, path_length, sample_path, PathModel, SampledPoint},
    profile::{build, ElevationSample, Profile, ProfileBuilder},
};
pub use {elevation, geo};

/// Floating point type used for coordinates, distances and
/// elevations.
pub type C = elevation::C;

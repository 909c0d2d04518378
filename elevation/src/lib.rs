//! Elevation lookups from remote services.
//!
//! Every backend implements [`ElevationSource`]: given an ordered
//! slice of coordinates it returns one elevation (meters above sea
//! level) per coordinate, in the same order. Requests are batched and
//! each batch is attempted under a [`RetryPolicy`]; transient failures
//! (network errors, timeouts, 5xx, malformed responses) are retried
//! with binary exponential backoff, rejections (4xx) are not.

mod error;
mod http;
mod open_elevation;
mod opentopodata;
mod retry;

pub use crate::{
    error::{ElevationError, Failure, TransientError},
    http::ServiceOptions,
    open_elevation::{OpenElevation, OPEN_ELEVATION_URL},
    opentopodata::{OpenTopoData, OPENTOPODATA_URL},
    retry::RetryPolicy,
};
pub use geo;
use geo::geometry::Coord;

/// Base floating point type used for all coordinates and elevations.
///
/// Note: this _could_ be a generic parameter, but the ellipsoidal
/// path math downstream is `f64` only and service responses carry
/// no more precision than that anyway.
pub type C = f64;

/// Something which can report elevations for coordinates.
pub trait ElevationSource {
    /// Returns the elevation, in meters, at each of `coords`.
    ///
    /// The output has the same length and order as `coords`. A failure
    /// for any coordinate fails the whole call.
    fn elevations(&self, coords: &[Coord<C>]) -> Result<Vec<C>, ElevationError>;
}

impl<S: ElevationSource + ?Sized> ElevationSource for &S {
    fn elevations(&self, coords: &[Coord<C>]) -> Result<Vec<C>, ElevationError> {
        (**self).elevations(coords)
    }
}

impl<S: ElevationSource + ?Sized> ElevationSource for Box<S> {
    fn elevations(&self, coords: &[Coord<C>]) -> Result<Vec<C>, ElevationError> {
        (**self).elevations(coords)
    }
}

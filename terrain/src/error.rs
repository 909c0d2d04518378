use crate::C;
use elevation::ElevationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("a profile needs at least 2 samples, got {0}")]
    SampleCount(usize),

    #[error("invalid coordinate lat: {lat}, lon: {lon}")]
    Coordinate { lat: C, lon: C },

    #[error("start and end are the same point, lat: {lat}, lon: {lon}")]
    Degenerate { lat: C, lon: C },

    #[error("elevation source returned {received} values for {expected} samples")]
    Elevations { expected: usize, received: usize },

    #[error(transparent)]
    Elevation(#[from] ElevationError),
}

/// Coarse classification of a [`TerrainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad geometry or missing parameters; nothing was requested.
    InvalidInput,

    /// The elevation service refused the request.
    InvalidRequest,

    /// The elevation service could not deliver, retries included.
    ElevationService,
}

impl TerrainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Builder(_)
            | Self::SampleCount(_)
            | Self::Coordinate { .. }
            | Self::Degenerate { .. } => ErrorKind::InvalidInput,
            Self::Elevation(ElevationError::InvalidRequest { .. }) => ErrorKind::InvalidRequest,
            Self::Elevations { .. } | Self::Elevation(_) => ErrorKind::ElevationService,
        }
    }
}

use anyhow::{anyhow, Error as AnyError};
use clap::{Parser, Subcommand, ValueEnum};
use std::str::FromStr;
use terrain::{geo::geometry::Coord, PathModel};

/// Generate point-to-point terrain profiles from a remote elevation
/// service.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Start "lat,lon".
    #[arg(long)]
    pub start: LatLon,

    /// End "lat,lon".
    #[arg(long)]
    pub end: LatLon,

    /// Number of samples along the path, endpoints included.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub samples: usize,

    /// Subtract earth curvature relative to the start-end sightline.
    #[arg(short, long, default_value_t = false)]
    pub earth_curve: bool,

    /// Earth model for the path.
    #[arg(long, value_enum, default_value_t = Model::Geodesic)]
    pub model: Model,

    /// Build a flat profile instead of failing when start and end are
    /// the same point.
    #[arg(long, default_value_t = false)]
    pub allow_degenerate: bool,

    /// Elevation service.
    #[arg(long, value_enum, default_value_t = Service::OpenElevation)]
    pub service: Service,

    /// Service base URL, defaults to the service's public instance.
    #[arg(long)]
    pub url: Option<String>,

    /// Dataset name (opentopodata only).
    #[arg(long, default_value = "srtm90m")]
    pub dataset: String,

    /// Maximum coordinates per request.
    #[arg(long, default_value_t = 100)]
    pub batch_size: usize,

    /// Timeout for a single request, in milliseconds.
    #[arg(long, default_value_t = 30_000)]
    pub timeout_ms: u64,

    /// Attempts per request before giving up.
    #[arg(long, default_value_t = 5)]
    pub max_attempts: u32,

    /// Delay before the first retry, doubled on every further retry.
    #[arg(long, default_value_t = 500)]
    pub base_delay_ms: u64,

    /// Upper bound for a single retry delay.
    #[arg(long, default_value_t = 30_000)]
    pub max_delay_ms: u64,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Clone, Debug, Copy)]
pub struct LatLon(pub Coord<f64>);

impl FromStr for LatLon {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let (lat_str, lon_str) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("not a valid lat,lon pair"))?;
        let lat = f64::from_str(lat_str.trim())?;
        let lon = f64::from_str(lon_str.trim())?;
        Ok(Self(Coord { y: lat, x: lon }))
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Model {
    Geodesic,
    Haversine,
}

impl From<Model> for PathModel {
    fn from(model: Model) -> Self {
        match model {
            Model::Geodesic => Self::Geodesic,
            Model::Haversine => Self::Haversine,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Service {
    OpenElevation,
    Opentopodata,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print profile as CSV to stdout.
    Csv,

    /// Print profile as JSON to stdout.
    Json,

    /// Plot to terminal.
    Plot,
}

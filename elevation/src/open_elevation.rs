//! Elevation lookups against the [Open-Elevation] JSON API.
//!
//! [Open-Elevation]: https://github.com/Jorl17/open-elevation/blob/master/docs/api.md

use crate::{
    error::Failure,
    http::{check_status, ServiceOptions},
    ElevationError, ElevationSource, C,
};
use geo::geometry::Coord;
use reqwest::{blocking::Client, header::ACCEPT};
use serde::{Deserialize, Serialize};

/// Public Open-Elevation instance.
pub const OPEN_ELEVATION_URL: &str = "https://api.open-elevation.com";

#[derive(Debug, Serialize)]
struct Location {
    latitude: C,
    longitude: C,
}

#[derive(Debug, Serialize)]
struct LookupRequest {
    locations: Vec<Location>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    elevation: C,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Clone)]
pub struct OpenElevation {
    url: String,
    opts: ServiceOptions,
    client: Client,
}

impl OpenElevation {
    /// Returns a client for the Open-Elevation instance at `base_url`
    /// (scheme and host, without the `/api/v1` suffix).
    pub fn new(base_url: &str, opts: ServiceOptions) -> Result<Self, ElevationError> {
        Ok(Self {
            url: format!("{}/api/v1/lookup", base_url.trim_end_matches('/')),
            client: opts.client()?,
            opts,
        })
    }

    fn lookup(&self, batch: &[Coord<C>]) -> Result<Vec<C>, Failure> {
        let body = LookupRequest {
            locations: batch
                .iter()
                .map(|coord| Location {
                    latitude: coord.y,
                    longitude: coord.x,
                })
                .collect(),
        };
        let resp = self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()?;
        let json: LookupResponse = check_status(resp)?.json()?;
        Ok(json.results.into_iter().map(|r| r.elevation).collect())
    }
}

impl ElevationSource for OpenElevation {
    fn elevations(&self, coords: &[Coord<C>]) -> Result<Vec<C>, ElevationError> {
        self.opts.fetch_batched(coords, |batch| self.lookup(batch))
    }
}

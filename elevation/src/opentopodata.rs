//! Elevation lookups against an [OpenTopoData] instance.
//!
//! [OpenTopoData]: https://www.opentopodata.org/api/

use crate::{
    error::Failure,
    http::{check_status, ServiceOptions},
    ElevationError, ElevationSource, C,
};
use geo::geometry::Coord;
use reqwest::blocking::Client;
use serde::Deserialize;

/// Public OpenTopoData instance.
pub const OPENTOPODATA_URL: &str = "https://api.opentopodata.org";

#[derive(Debug, Deserialize)]
struct Elevation {
    elevation: Option<C>,
}

#[derive(Debug, Deserialize)]
struct SuccessResponse {
    results: Vec<Elevation>,
}

#[derive(Debug, Clone)]
pub struct OpenTopoData {
    url: String,
    opts: ServiceOptions,
    client: Client,
}

impl OpenTopoData {
    /// Returns a client for `dataset` on the OpenTopoData version 1
    /// API served at `base_url`.
    pub fn new(base_url: &str, dataset: &str, opts: ServiceOptions) -> Result<Self, ElevationError> {
        Ok(Self {
            url: format!("{}/v1/{dataset}", base_url.trim_end_matches('/')),
            client: opts.client()?,
            opts,
        })
    }

    fn lookup(&self, batch: &[Coord<C>]) -> Result<Vec<C>, Failure> {
        let locations = batch
            .iter()
            .map(|c| format!("{0:.6},{1:.6}", c.y, c.x))
            .collect::<Vec<String>>()
            .join("|");
        let resp = self
            .client
            .get(&self.url)
            .query(&[("locations", &locations)])
            .send()?;
        let json: SuccessResponse = check_status(resp)?.json()?;

        // A missing value means the dataset does not cover the point,
        // asking again won't change that.
        json.results
            .into_iter()
            .zip(batch)
            .map(|(result, coord)| {
                result.elevation.ok_or_else(|| Failure::Rejected {
                    status: None,
                    message: format!("no elevation data at {:.6},{:.6}", coord.y, coord.x),
                })
            })
            .collect()
    }
}

impl ElevationSource for OpenTopoData {
    fn elevations(&self, coords: &[Coord<C>]) -> Result<Vec<C>, ElevationError> {
        self.opts.fetch_batched(coords, |batch| self.lookup(batch))
    }
}

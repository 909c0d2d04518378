//! Plumbing shared by the HTTP backends.

use crate::{
    error::{ElevationError, Failure, TransientError},
    RetryPolicy, C,
};
use geo::geometry::Coord;
use log::debug;
use reqwest::{
    blocking::{Client, Response},
    StatusCode,
};
use serde::Deserialize;
use std::time::Duration;

/// Connection parameters common to every HTTP backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Maximum number of coordinates per request.
    batch_size: usize,

    /// Timeout for a single attempt.
    timeout: Duration,

    /// Retry policy applied to every batch.
    retry: RetryPolicy,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            batch_size: 100,
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

impl ServiceOptions {
    #[must_use]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub(crate) fn client(&self) -> Result<Client, ElevationError> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ElevationError::Client)
    }

    /// Splits `coords` into batches, runs `request` on each under the
    /// retry policy and concatenates the results in order.
    pub(crate) fn fetch_batched<F>(
        &self,
        coords: &[Coord<C>],
        mut request: F,
    ) -> Result<Vec<C>, ElevationError>
    where
        F: FnMut(&[Coord<C>]) -> Result<Vec<C>, Failure>,
    {
        let mut elevations = Vec::with_capacity(coords.len());
        for (idx, batch) in coords.chunks(self.batch_size).enumerate() {
            let values = self.retry.run(|attempt| {
                debug!(
                    "elevation batch {idx}; len: {}, attempt: {attempt}",
                    batch.len()
                );
                let values = request(batch)?;
                if values.len() == batch.len() {
                    Ok(values)
                } else {
                    Err(Failure::Transient(TransientError::Count {
                        expected: batch.len(),
                        received: values.len(),
                    }))
                }
            })?;
            elevations.extend(values);
        }
        Ok(elevations)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Passes successful responses through and classifies the rest.
///
/// 5xx, 408 and 429 are worth another attempt; any other status is
/// a rejection of the request itself.
pub(crate) fn check_status(resp: Response) -> Result<Response, Failure> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|err| err.error)
        .unwrap_or(body);

    if is_transient(status) {
        Err(Failure::Transient(TransientError::Status { status, message }))
    } else {
        Err(Failure::Rejected {
            status: Some(status),
            message: format!("{status}: {message}"),
        })
    }
}

fn is_transient(status: StatusCode) -> bool {
    status.is_server_error()
        || status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
}

#[cfg(test)]
mod tests {
    use super::{is_transient, ServiceOptions, StatusCode};
    use crate::{error::Failure, ElevationError, RetryPolicy, TransientError};
    use geo::coord;
    use std::cell::RefCell;

    #[test]
    fn test_status_classification() {
        assert!(is_transient(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_transient(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_transient(StatusCode::GATEWAY_TIMEOUT));
        assert!(is_transient(StatusCode::REQUEST_TIMEOUT));
        assert!(is_transient(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_transient(StatusCode::BAD_REQUEST));
        assert!(!is_transient(StatusCode::NOT_FOUND));
        assert!(!is_transient(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(!is_transient(StatusCode::MULTIPLE_CHOICES));
        assert!(!is_transient(StatusCode::NOT_MODIFIED));
    }

    #[test]
    fn test_batches_preserve_order() {
        let opts = ServiceOptions::default()
            .batch_size(2)
            .retry(RetryPolicy::once());
        let coords: Vec<_> = (0..5).map(|i| coord!(x: f64::from(i), y: 0.0)).collect();
        let seen = RefCell::new(Vec::new());
        let elevations = opts
            .fetch_batched(&coords, |batch| {
                seen.borrow_mut().push(batch.len());
                Ok(batch.iter().map(|c| c.x * 10.0).collect())
            })
            .unwrap();
        assert_eq!(elevations, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
        assert_eq!(*seen.borrow(), vec![2, 2, 1]);
    }

    #[test]
    fn test_short_batch_is_retried() {
        let opts = ServiceOptions::default()
            .batch_size(10)
            .retry(RetryPolicy::new(3, Default::default(), Default::default()));
        let coords = [coord!(x: 1.0, y: 1.0), coord!(x: 2.0, y: 2.0)];
        let calls = RefCell::new(0);
        let result = opts.fetch_batched(&coords, |_| {
            *calls.borrow_mut() += 1;
            Ok(vec![1.0])
        });
        assert_eq!(*calls.borrow(), 3);
        assert!(matches!(
            result,
            Err(ElevationError::Service {
                attempts: 3,
                source: TransientError::Count {
                    expected: 2,
                    received: 1
                }
            })
        ));
    }

    #[test]
    fn test_failed_batch_fails_everything() {
        let opts = ServiceOptions::default()
            .batch_size(1)
            .retry(RetryPolicy::once());
        let coords = [coord!(x: 1.0, y: 1.0), coord!(x: 2.0, y: 2.0)];
        let result = opts.fetch_batched(&coords, |batch| {
            if batch[0].x > 1.5 {
                Err(Failure::Rejected {
                    status: Some(StatusCode::BAD_REQUEST),
                    message: "out of range".to_string(),
                })
            } else {
                Ok(vec![0.0])
            }
        });
        assert!(matches!(result, Err(ElevationError::InvalidRequest { .. })));
    }

    #[test]
    fn test_empty_input_makes_no_requests() {
        let opts = ServiceOptions::default();
        let elevations = opts
            .fetch_batched(&[], |_| -> Result<Vec<f64>, Failure> {
                panic!("no request expected")
            })
            .unwrap();
        assert!(elevations.is_empty());
    }
}

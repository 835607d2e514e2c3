//! Distance sources
//!
//! A `DistanceSource` produces one `Reading` per call. The production source
//! issues a blocking HTTP GET against the sensor endpoint; tests substitute
//! scripted sources.

use crate::error::{ProximityError, Result};
use crate::reading::Reading;
use std::time::Duration;
use tracing::debug;

/// Produces distance readings on demand
pub trait DistanceSource: Send {
    /// Fetch and decode one reading
    fn fetch(&mut self) -> Result<Reading>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// Reads the sensor over HTTP
///
/// One unauthenticated GET per fetch; the body must be JSON with a numeric
/// `distance` member. `Content-Type` is not checked.
pub struct HttpDistanceSource {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpDistanceSource {
    /// Create a source for `endpoint` with a per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(format!("proximity-monitor/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                // Preserve error chain by wrapping the source error
                ProximityError::ConfigError(Box::new(e))
            })?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Endpoint URL this source polls
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl DistanceSource for HttpDistanceSource {
    fn fetch(&mut self) -> Result<Reading> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .map_err(|e| ProximityError::FetchFailed(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProximityError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| ProximityError::FetchFailed(Box::new(e)))?;

        debug!("Sensor response: {}", String::from_utf8_lossy(&body).trim_end());

        Reading::from_json(&body)
    }

    fn describe(&self) -> String {
        format!("HTTP GET {}", self.endpoint)
    }
}

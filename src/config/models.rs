//! Configuration data models
//!
//! This module defines the data structures used for application configuration.

use crate::monitor::POLL_INTERVAL;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Endpoint of the sensor as deployed on the lab network
pub const DEFAULT_ENDPOINT: &str = "http://192.168.137.134:1234";

/// Default per-request timeout in milliseconds (below the polling interval)
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 900;

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// URL polled for distance readings
    pub endpoint: String,
    /// HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Window state for persistence
    pub window_state: WindowState,
}

/// Window state for position and size persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    /// X position
    pub x: i32,
    /// Y position
    pub y: i32,
    /// Window width
    pub width: u32,
    /// Window height
    pub height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            window_state: WindowState::default(),
        }
    }
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            width: 420,
            height: 360,
        }
    }
}

impl AppConfig {
    /// Replace out-of-range values with defaults, warning about each one
    ///
    /// The endpoint must be an `http://` or `https://` URL. The request
    /// timeout must be non-zero and shorter than the polling interval so a
    /// slow sensor cannot stall more than one tick.
    pub fn validate(&mut self) {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            warn!(
                "Invalid endpoint '{}', falling back to {}",
                self.endpoint, DEFAULT_ENDPOINT
            );
            self.endpoint = DEFAULT_ENDPOINT.to_string();
        } else if endpoint.len() != self.endpoint.len() {
            self.endpoint = endpoint.to_string();
        }

        let max_timeout_ms = u64::try_from(POLL_INTERVAL.as_millis()).unwrap_or(u64::MAX);
        if self.request_timeout_ms == 0 || self.request_timeout_ms >= max_timeout_ms {
            warn!(
                "Request timeout {} ms out of range (1..{}), falling back to {} ms",
                self.request_timeout_ms, max_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS
            );
            self.request_timeout_ms = DEFAULT_REQUEST_TIMEOUT_MS;
        }
    }

    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_timeout_ms)
    }
}

//! Distance readings decoded from the sensor endpoint
//!
//! A reading lives for exactly one tick: it is decoded from a response body,
//! rendered, and dropped.

use crate::display::DisplayState;
use crate::error::{ProximityError, Result};
use serde_json::Value;

/// One decoded distance measurement, in centimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    distance_cm: f64,
}

impl Reading {
    /// Create a reading from a distance in centimeters
    ///
    /// Rejects negative and non-finite distances.
    pub fn new(distance_cm: f64) -> Result<Self> {
        if !distance_cm.is_finite() || distance_cm < 0.0 {
            return Err(ProximityError::InvalidDistance(distance_cm));
        }

        // Normalize -0.0 so the label never reads "-0 cm"
        let distance_cm = if distance_cm == 0.0 { 0.0 } else { distance_cm };
        Ok(Self { distance_cm })
    }

    /// Decode a reading from a JSON response body
    ///
    /// The body must be a JSON value with a numeric `distance` member; any
    /// other members are ignored.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body).map_err(ProximityError::MalformedResponse)?;

        let distance = value
            .get("distance")
            .and_then(Value::as_f64)
            .ok_or(ProximityError::MissingDistance)?;

        Self::new(distance)
    }

    /// Distance in centimeters
    pub fn distance_cm(&self) -> f64 {
        self.distance_cm
    }

    /// Display state this reading classifies into
    pub fn display_state(&self) -> DisplayState {
        DisplayState::from_distance(self.distance_cm)
    }
}

//! Sensor response format
//!
//! What the sensor device puts on the wire: a minimal HTTP/1.1 response with
//! a JSON body and a permissive CORS header so a page on another origin can
//! poll it.

use crate::sensor::echo::MAX_RANGE_CM;

/// JSON body of a sensor response
#[derive(Debug, Clone, PartialEq)]
pub struct SensorResponse {
    /// Always `"detected"`
    pub object: &'static str,
    /// Distance in centimeters
    pub distance: f64,
}

impl SensorResponse {
    /// Response body for a published distance
    pub fn new(distance_cm: f64) -> Self {
        Self {
            object: "detected",
            distance: distance_cm,
        }
    }

    /// JSON text of the body
    ///
    /// The distance is written with exactly two decimals (`5.00`), the way
    /// the device formats it, which a JSON serializer would shorten to `5.0`.
    pub fn to_json(&self) -> String {
        format!(
            r#"{{"object":"{}","distance":{:.2}}}"#,
            self.object,
            published_distance(self.distance)
        )
    }
}

/// Whether the device publishes a measured distance at all
///
/// Negative values are measurement errors and anything at or beyond the
/// maximum range means no object.
pub fn is_publishable(distance_cm: f64) -> bool {
    (0.0..MAX_RANGE_CM).contains(&distance_cm) || distance_cm.is_nan()
}

/// Value actually published for a measured distance
///
/// NaN becomes 0. Infinities cannot be written as JSON numbers and are
/// clamped to the range ends.
pub fn published_distance(distance_cm: f64) -> f64 {
    if distance_cm.is_nan() {
        0.0
    } else {
        distance_cm.clamp(-MAX_RANGE_CM, MAX_RANGE_CM)
    }
}

/// Build the complete HTTP response for one reading
pub fn build_http_response(distance_cm: f64) -> String {
    let body = SensorResponse::new(published_distance(distance_cm)).to_json();
    format!(
        "HTTP/1.1 200 OK\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         Access-Control-Allow-Origin: *\r\n\
         \r\n\
         {body}",
        body.len()
    )
}

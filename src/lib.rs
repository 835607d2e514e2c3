//! `ProximityMonitor` - Live distance display for a networked ultrasonic sensor
//!
//! Polls a sensor endpoint once per second, classifies each reading as near,
//! medium or far, and shows a label, an indicator light and a color scheme
//! for the current band. Uses a multi-threaded event-driven architecture with
//! `DistanceMonitor` polling the sensor, `DisplayController` turning readings
//! into render models, and a `RenderSurface` (window or console) showing them.
//!
//! # Bands
//!
//! | Distance (cm) | State  | Indicator | Background |
//! |---------------|--------|-----------|------------|
//! | < 10          | Near   | red       | `#ffcccc`  |
//! | 10 ..= 30     | Medium | yellow    | `#ffffcc`  |
//! | > 30          | Far    | green     | `#ccffcc`  |
//!
//! A poll that fails for any reason is skipped and the display keeps showing
//! the last good reading.

// Module declarations
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod monitor;
pub mod reading;
pub mod sensor;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{ProximityError, Result};
pub use reading::Reading;

//! Application logic controller module
//!
//! This module sits between the distance monitor and the status window.
//!
//! # Event Flow
//!
//! ```text
//! DistanceMonitor → SensorEvent → DisplayController → render() → RenderSurface
//! ```
//!
//! # Behavior
//!
//! - **Reading**: rendered into a `RenderModel` and applied to the surface.
//!   A model identical to the one on screen is not re-applied, so a steady
//!   sensor never causes redraws.
//! - **Skipped tick**: counted and logged; the surface keeps showing the last
//!   reading. Nothing about the failure is shown to the user.

pub mod display_controller;

pub use display_controller::{ControllerStats, DisplayController};

//! Display state and rendering module
//!
//! Turns a distance reading into everything the status window shows.
//!
//! # Overview
//!
//! - `DisplayState`: near / medium / far classification of a distance
//! - `Palette`: accent color and background tint of a state
//! - `RenderModel`: label text, indicator visibility and palette for one reading
//! - `RenderSurface`: trait implemented by the Slint window and the console
//!
//! Until the first reading arrives a surface shows `WAITING_LABEL` with every
//! indicator hidden (`IndicatorVisibility::NONE`); from then on exactly one
//! indicator is visible.
//!
//! # Thresholds
//!
//! | Distance (cm)   | State  | Indicator       | Accent   | Background |
//! |-----------------|--------|-----------------|----------|------------|
//! | `d < 10`        | Near   | `status-red`    | `red`    | `#ffcccc`  |
//! | `10 <= d <= 30` | Medium | `status-yellow` | `yellow` | `#ffffcc`  |
//! | `d > 30`        | Far    | `status-green`  | `green`  | `#ccffcc`  |
//!
//! # Example Usage
//!
//! ```
//! use proximity_monitor::display::{ConsoleSurface, RenderSurface, render};
//! use proximity_monitor::reading::Reading;
//!
//! let reading = Reading::from_json(br#"{"distance": 5}"#)?;
//! let model = render(&reading);
//! assert_eq!(model.label, "Object found at: 5 cm");
//!
//! let mut surface = ConsoleSurface::new(Vec::new());
//! surface.apply(&model);
//! # Ok::<(), proximity_monitor::ProximityError>(())
//! ```

pub mod render;
pub mod state;

pub use render::{
    ConsoleSurface, IndicatorVisibility, RenderModel, RenderSurface, WAITING_LABEL, format_label,
    render,
};
pub use state::{CssColor, DisplayState, Palette};

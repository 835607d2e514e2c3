//! Rendering of readings into surface-independent view models
//!
//! `render` is a pure function: it produces a `RenderModel` describing the
//! complete visual state, and a `RenderSurface` applies it. Nothing here
//! touches a window, so everything is testable without a display.

use crate::display::state::{DisplayState, Palette};
use crate::reading::Reading;
use std::io::Write;
use tracing::warn;

/// Label shown before the first successful reading
pub const WAITING_LABEL: &str = "Waiting for sensor...";

/// Format the status label for a distance in centimeters
pub fn format_label(distance_cm: f64) -> String {
    format!("Object found at: {distance_cm} cm")
}

/// Visibility of the three status indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndicatorVisibility {
    /// `status-red`
    pub red: bool,
    /// `status-yellow`
    pub yellow: bool,
    /// `status-green`
    pub green: bool,
}

impl IndicatorVisibility {
    /// All indicators hidden; only shown before the first reading arrives
    pub const NONE: Self = Self {
        red: false,
        yellow: false,
        green: false,
    };

    /// Show the indicator for `state` and hide the other two
    pub const fn for_state(state: DisplayState) -> Self {
        Self {
            red: matches!(state, DisplayState::Near),
            yellow: matches!(state, DisplayState::Medium),
            green: matches!(state, DisplayState::Far),
        }
    }

    /// Number of indicators currently visible
    pub fn visible_count(self) -> usize {
        [self.red, self.yellow, self.green]
            .into_iter()
            .filter(|visible| *visible)
            .count()
    }
}

/// Complete visual output for one reading
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    /// Text of the `object` label
    pub label: String,
    /// Classified state
    pub state: DisplayState,
    /// Indicator visibility
    pub indicators: IndicatorVisibility,
    /// Accent color and background tint
    pub palette: Palette,
}

/// Render a reading
pub fn render(reading: &Reading) -> RenderModel {
    let state = reading.display_state();
    RenderModel {
        label: format_label(reading.distance_cm()),
        state,
        indicators: IndicatorVisibility::for_state(state),
        palette: state.palette(),
    }
}

/// Something that can display a `RenderModel`
///
/// Implementations must overwrite the whole visual state on every call so
/// applying the same model twice is indistinguishable from applying it once.
pub trait RenderSurface: Send {
    /// Apply a model to the surface
    fn apply(&mut self, model: &RenderModel);
}

/// Surface that writes one line per update to a byte sink
///
/// Used by the `--headless` mode of the binary.
pub struct ConsoleSurface<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> ConsoleSurface<W> {
    /// Create a console surface writing to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the surface and return the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleSurface<std::io::Stdout> {
    /// Console surface on standard output
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> RenderSurface for ConsoleSurface<W> {
    fn apply(&mut self, model: &RenderModel) {
        let result = writeln!(
            self.out,
            "[{:<6}] {} (accent {}, background {})",
            model.state, model.label, model.palette.accent, model.palette.background
        )
        .and_then(|()| self.out.flush());

        if let Err(e) = result {
            warn!("Failed to write status line: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_distance(distance: f64) -> RenderModel {
        render(&Reading::new(distance).unwrap())
    }

    #[test]
    fn test_render_near() {
        let model = render_distance(5.0);
        assert_eq!(model.label, "Object found at: 5 cm");
        assert_eq!(model.state, DisplayState::Near);
        assert!(model.indicators.red);
        assert!(!model.indicators.yellow);
        assert!(!model.indicators.green);
        assert_eq!(model.palette.accent.css, "red");
        assert_eq!(model.palette.background.css, "#ffcccc");
    }

    #[test]
    fn test_render_medium_at_upper_boundary() {
        let model = render_distance(30.0);
        assert_eq!(model.label, "Object found at: 30 cm");
        assert!(model.indicators.yellow);
        assert_eq!(model.indicators.visible_count(), 1);
        assert_eq!(model.palette.background.css, "#ffffcc");
    }

    #[test]
    fn test_render_far() {
        let model = render_distance(100.0);
        assert!(model.indicators.green);
        assert_eq!(model.indicators.visible_count(), 1);
        assert_eq!(model.palette.background.css, "#ccffcc");
    }

    #[test]
    fn test_waiting_state_shows_no_indicator() {
        assert_eq!(IndicatorVisibility::NONE.visible_count(), 0);
        assert!(
            DisplayState::ALL
                .iter()
                .all(|s| IndicatorVisibility::for_state(*s) != IndicatorVisibility::NONE)
        );
        assert!(!WAITING_LABEL.contains("Object found"));
    }

    #[test]
    fn test_label_keeps_fraction() {
        assert_eq!(format_label(12.34), "Object found at: 12.34 cm");
        assert_eq!(format_label(0.0), "Object found at: 0 cm");
    }

    #[test]
    fn test_console_surface_output() {
        let mut surface = ConsoleSurface::new(Vec::new());
        surface.apply(&render_distance(5.0));

        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(
            out,
            "[near  ] Object found at: 5 cm (accent red, background #ffcccc)\n"
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: exactly one indicator is visible for every reading
            #[test]
            fn exactly_one_indicator_visible(d in 0.0f64..1000.0) {
                let model = render_distance(d);
                prop_assert_eq!(model.indicators.visible_count(), 1);
                prop_assert_eq!(model.indicators, IndicatorVisibility::for_state(model.state));
            }

            /// Property: palette always matches the rendered state
            #[test]
            fn palette_matches_state(d in 0.0f64..1000.0) {
                let model = render_distance(d);
                prop_assert_eq!(model.palette, model.state.palette());
            }

            /// Property: rendering is idempotent
            #[test]
            fn rendering_is_idempotent(d in 0.0f64..1000.0) {
                prop_assert_eq!(render_distance(d), render_distance(d));
            }
        }
    }
}

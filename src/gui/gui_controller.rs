//! GUI controller implementation
//!
//! Owns the Slint main window. Render models arrive on the display
//! controller's thread and are marshalled onto the Slint event loop through
//! a weak window handle.

use crate::MainWindow;
use proximity_monitor::config::WindowState;
use proximity_monitor::display::{
    CssColor, IndicatorVisibility, RenderModel, RenderSurface, WAITING_LABEL,
};
use proximity_monitor::error::{ProximityError, Result};
use slint::{ComponentHandle, Weak};
use tracing::{debug, info, warn};

/// Convert a palette color into a Slint color
fn to_slint_color(color: CssColor) -> slint::Color {
    slint::Color::from_rgb_u8(color.r, color.g, color.b)
}

/// Render surface backed by the main window
///
/// Holds only a weak handle, so a surface outliving the window is harmless:
/// updates are dropped once the window is gone.
pub struct SlintSurface {
    window: Weak<MainWindow>,
}

impl RenderSurface for SlintSurface {
    fn apply(&mut self, model: &RenderModel) {
        let label = slint::SharedString::from(model.label.as_str());
        let indicators = model.indicators;
        let accent = to_slint_color(model.palette.accent);
        let background = to_slint_color(model.palette.background);

        let result = self.window.upgrade_in_event_loop(move |window| {
            window.set_label_text(label);
            window.set_show_red(indicators.red);
            window.set_show_yellow(indicators.yellow);
            window.set_show_green(indicators.green);
            window.set_bg_circle_color(accent);
            window.set_background_color(background);
        });

        if let Err(e) = result {
            debug!("Dropping render update, event loop not running: {}", e);
        }
    }
}

/// GUI controller managing the Slint window
pub struct GuiController {
    main_window: MainWindow,
}

impl GuiController {
    /// Create the main window and restore its saved geometry
    pub fn new(window_state: &WindowState) -> Result<Self> {
        let main_window = MainWindow::new().map_err(|e| ProximityError::GuiError(Box::new(e)))?;

        let waiting = IndicatorVisibility::NONE;
        main_window.set_label_text(WAITING_LABEL.into());
        main_window.set_show_red(waiting.red);
        main_window.set_show_yellow(waiting.yellow);
        main_window.set_show_green(waiting.green);

        let window = main_window.window();
        window.set_position(slint::PhysicalPosition::new(window_state.x, window_state.y));
        window.set_size(slint::PhysicalSize::new(
            window_state.width,
            window_state.height,
        ));

        info!(
            "Main window created at ({}, {}) size {}x{}",
            window_state.x, window_state.y, window_state.width, window_state.height
        );

        Ok(Self { main_window })
    }

    /// Render surface that updates this window
    pub fn surface(&self) -> SlintSurface {
        SlintSurface {
            window: self.main_window.as_weak(),
        }
    }

    /// Current window geometry, for persisting on exit
    pub fn window_state(&self) -> WindowState {
        let window = self.main_window.window();
        let position = window.position();
        let size = window.size();
        WindowState {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Show the window and run the Slint event loop until it is closed
    pub fn run(&self) -> Result<()> {
        self.main_window.run().map_err(|e| {
            warn!("Slint event loop failed: {}", e);
            ProximityError::GuiError(Box::new(e))
        })
    }
}

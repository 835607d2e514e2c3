//! GUI module
//!
//! Provides the Slint status window and the render surface that drives it.

pub mod gui_controller;

pub use gui_controller::GuiController;

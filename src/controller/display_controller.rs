//! Display controller implementation
//!
//! Receives sensor events from the monitor thread, renders readings and
//! pushes the result onto a render surface.

use crate::display::{RenderModel, RenderSurface, render};
use crate::monitor::SensorEvent;
use parking_lot::Mutex;
use std::sync::{Arc, mpsc};
use std::thread::JoinHandle;
use tracing::{debug, info, warn};

/// Counters describing what the controller has seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerStats {
    /// Readings received
    pub readings: u64,
    /// Ticks skipped by the monitor
    pub skipped: u64,
    /// Models actually applied to the surface
    pub applied: u64,
}

/// Application logic controller
pub struct DisplayController {
    /// Where rendered models go
    surface: Box<dyn RenderSurface>,
    /// Last model applied to the surface
    last_model: Option<RenderModel>,
    /// Event receiver from the distance monitor (taken when the event loop starts)
    event_receiver: Option<mpsc::Receiver<SensorEvent>>,
    /// Counters
    stats: ControllerStats,
}

impl DisplayController {
    /// Create a controller that renders onto `surface`
    pub fn new(
        event_receiver: mpsc::Receiver<SensorEvent>,
        surface: Box<dyn RenderSurface>,
    ) -> Self {
        Self {
            surface,
            last_model: None,
            event_receiver: Some(event_receiver),
            stats: ControllerStats::default(),
        }
    }

    /// Model currently shown, if any reading has arrived yet
    pub fn current_model(&self) -> Option<&RenderModel> {
        self.last_model.as_ref()
    }

    /// Counters
    pub fn stats(&self) -> ControllerStats {
        self.stats
    }

    /// Take ownership of the event receiver if it hasn't been taken yet.
    /// Returns None if already taken. Caller should treat None as a no-op.
    fn take_event_receiver(&mut self) -> Option<mpsc::Receiver<SensorEvent>> {
        self.event_receiver.take()
    }

    /// Handle one sensor event
    ///
    /// A reading is rendered and applied unless it renders exactly like the
    /// model already on screen. A skipped tick leaves the surface untouched.
    pub fn handle_event(&mut self, event: SensorEvent) {
        match event {
            SensorEvent::Reading(reading) => {
                self.stats.readings += 1;
                let model = render(&reading);

                if self.last_model.as_ref() == Some(&model) {
                    debug!("Reading renders identically, surface left as is");
                    return;
                }

                let previous_state = self.last_model.as_ref().map(|m| m.state);
                if previous_state != Some(model.state) {
                    info!(
                        "Display state {} -> {} ({} cm)",
                        previous_state.map_or_else(|| "none".to_string(), |s| s.to_string()),
                        model.state,
                        reading.distance_cm()
                    );
                }

                self.surface.apply(&model);
                self.stats.applied += 1;
                self.last_model = Some(model);
            }
            SensorEvent::Skipped {
                consecutive_failures,
            } => {
                self.stats.skipped += 1;
                debug!(
                    "Tick skipped ({} in a row), keeping previous display",
                    consecutive_failures
                );
            }
        }
    }

    /// Run the event loop on the current thread until the monitor goes away
    pub fn run(&mut self) {
        let Some(event_receiver) = self.take_event_receiver() else {
            warn!("Event loop already running; run() call ignored");
            return;
        };

        info!("Entering display event loop");
        for event in event_receiver {
            self.handle_event(event);
        }
        info!("Sensor event channel disconnected. Display event loop exited");
    }

    /// Spawn the event loop in a background thread. Only locks the controller
    /// while handling individual events.
    ///
    /// Returns `None` if the event loop was already started.
    pub fn spawn_event_loop(controller: Arc<Mutex<DisplayController>>) -> Option<JoinHandle<()>> {
        let Some(event_receiver) = controller.lock().take_event_receiver() else {
            warn!("Event loop already running; spawn_event_loop() call ignored");
            return None;
        };

        Some(std::thread::spawn(move || {
            info!("Entering display event loop");
            for event in event_receiver {
                controller.lock().handle_event(event);
            }
            info!("Sensor event channel disconnected. Display event loop exited");
        }))
    }
}

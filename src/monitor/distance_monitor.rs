//! Distance monitor implementation
//!
//! Polls a `DistanceSource` once per scheduler tick and forwards the outcome
//! to the display controller. A failed tick is logged and skipped; it never
//! stops the loop.

use crate::error::Result;
use crate::monitor::scheduler::{IntervalScheduler, Scheduler, TickControl};
use crate::monitor::source::DistanceSource;
use crate::reading::Reading;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Events emitted by the distance monitor
#[derive(Debug, Clone, PartialEq)]
pub enum SensorEvent {
    /// A reading was decoded this tick
    Reading(Reading),
    /// This tick produced no reading; the previous display stays as is
    Skipped {
        /// Failed ticks in a row, including this one
        consecutive_failures: u32,
    },
}

/// Monitor that polls a distance source on every tick
pub struct DistanceMonitor<S: DistanceSource> {
    /// Where readings come from
    source: S,
    /// Channel to send sensor events
    event_sender: mpsc::SyncSender<SensorEvent>,
    /// Polling interval
    interval: Duration,
    /// Failed ticks since the last successful one
    consecutive_failures: u32,
    /// Set once the receiving side of the event channel is gone
    receiver_gone: bool,
}

impl<S: DistanceSource> DistanceMonitor<S> {
    /// Create a new monitor with the specified polling interval
    pub fn new(interval: Duration, source: S, event_sender: mpsc::SyncSender<SensorEvent>) -> Self {
        Self {
            source,
            event_sender,
            interval,
            consecutive_failures: 0,
            receiver_gone: false,
        }
    }

    /// Polling interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Failed ticks since the last successful one
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Perform one poll
    ///
    /// On success the reading is forwarded as `SensorEvent::Reading`. On
    /// failure a `SensorEvent::Skipped` is forwarded and the error returned
    /// to the caller for logging.
    pub fn poll_once(&mut self) -> Result<Reading> {
        match self.source.fetch() {
            Ok(reading) => {
                if self.consecutive_failures > 0 {
                    info!(
                        "Sensor reachable again after {} failed poll(s)",
                        self.consecutive_failures
                    );
                }
                self.consecutive_failures = 0;
                debug!("Distance reading: {} cm", reading.distance_cm());
                self.send(SensorEvent::Reading(reading));
                Ok(reading)
            }
            Err(e) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                self.send(SensorEvent::Skipped {
                    consecutive_failures: self.consecutive_failures,
                });
                Err(e)
            }
        }
    }

    /// Tick handler: poll, log failures, and decide whether to keep going
    fn on_tick(&mut self, tick: u64) -> TickControl {
        if let Err(e) = self.poll_once() {
            if self.consecutive_failures == 1 {
                warn!("Poll {} skipped: {}", tick, e);
            } else {
                debug!(
                    "Poll {} skipped ({} in a row): {}",
                    tick, self.consecutive_failures, e
                );
            }
        }

        if self.receiver_gone {
            warn!("Sensor event receiver disconnected. Stopping distance monitor.");
            TickControl::Stop
        } else {
            TickControl::Continue
        }
    }

    /// Run the polling loop on the given scheduler until it stops
    pub fn run_with(&mut self, scheduler: &mut dyn Scheduler) {
        info!(
            "Polling {} every {:?}",
            self.source.describe(),
            self.interval
        );
        let interval = self.interval;
        scheduler.run(interval, &mut |tick| self.on_tick(tick));
        info!("Distance monitor stopped");
    }

    fn send(&mut self, event: SensorEvent) {
        if let Err(e) = self.event_sender.send(event) {
            error!("Failed to send sensor event: {}", e);
            self.receiver_gone = true;
        }
    }
}

impl<S: DistanceSource + 'static> DistanceMonitor<S> {
    /// Start the monitoring thread with a real-time scheduler
    pub fn start(self) -> JoinHandle<()> {
        self.start_with(IntervalScheduler::new())
    }

    /// Start the monitoring thread with the given scheduler
    pub fn start_with<T: Scheduler + Send + 'static>(mut self, mut scheduler: T) -> JoinHandle<()> {
        thread::spawn(move || self.run_with(&mut scheduler))
    }
}

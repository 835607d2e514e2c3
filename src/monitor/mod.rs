//! Distance monitoring module
//!
//! This module polls the distance sensor and reports each outcome to the
//! display controller.
//!
//! # Overview
//!
//! - **Scheduled polling** through an injectable `Scheduler` (real time or manual)
//! - **HTTP source** issuing one GET per tick and decoding the JSON body
//! - **Event notification** over an mpsc channel to the application controller
//! - **Skip on failure**: a failed tick leaves the display untouched
//!
//! # Architecture
//!
//! - `DistanceMonitor`: owns the source and runs the tick loop on its own thread
//! - `DistanceSource`: trait for anything that can produce a `Reading`
//! - `HttpDistanceSource`: blocking `reqwest` client against the sensor endpoint
//! - `Scheduler`: invokes the tick callback at a cadence
//! - `SensorEvent`: events sent to the controller
//!
//! # Request Ordering
//!
//! Ticks are serialized on the monitor thread. A request always completes or
//! times out before the next one is issued, so readings reach the controller
//! in the order they were requested. The request timeout is kept below the
//! polling interval; a tick that still overruns causes the missed deadlines
//! to be skipped.
//!
//! # Example Usage
//!
//! ```no_run
//! use proximity_monitor::monitor::{DistanceMonitor, HttpDistanceSource, SensorEvent};
//! use std::sync::mpsc;
//! use std::time::Duration;
//!
//! let (tx, rx) = mpsc::sync_channel(32);
//! let source = HttpDistanceSource::new("http://192.168.137.134:1234", Duration::from_millis(900))?;
//! let _handle = DistanceMonitor::new(Duration::from_millis(1000), source, tx).start();
//!
//! for event in rx {
//!     if let SensorEvent::Reading(reading) = event {
//!         println!("{} cm", reading.distance_cm());
//!     }
//! }
//! # Ok::<(), proximity_monitor::ProximityError>(())
//! ```

pub mod distance_monitor;
pub mod scheduler;
pub mod source;

pub use distance_monitor::{DistanceMonitor, SensorEvent};
pub use scheduler::{IntervalScheduler, ManualScheduler, Scheduler, TickControl};
pub use source::{DistanceSource, HttpDistanceSource};

/// Fixed polling interval of the application
pub const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(1000);

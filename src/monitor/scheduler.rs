//! Tick scheduling
//!
//! The monitor does not sleep on its own; it asks a `Scheduler` to call it
//! back. `IntervalScheduler` fires at a fixed rate in real time, while
//! `ManualScheduler` fires a fixed number of ticks back to back so tests run
//! without time passing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// What the tick callback wants the scheduler to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    /// Keep firing
    Continue,
    /// Stop and return from `run`
    Stop,
}

/// Invokes a callback at a cadence
pub trait Scheduler {
    /// Call `on_tick` once per interval until it returns `TickControl::Stop`
    /// or the scheduler is shut down. The argument is the tick number,
    /// starting at 0.
    fn run(&mut self, interval: Duration, on_tick: &mut dyn FnMut(u64) -> TickControl);
}

/// Real-time fixed-rate scheduler
///
/// Deadlines are absolute (`start + n * interval`) so a slow tick does not
/// shift later ones. When a tick overruns one or more deadlines, the missed
/// deadlines are skipped instead of firing in a burst.
#[derive(Debug, Clone, Default)]
pub struct IntervalScheduler {
    shutdown: Arc<AtomicBool>,
}

impl IntervalScheduler {
    /// Create a scheduler that runs until shut down
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag that stops the scheduler at the next deadline when set
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }
}

impl Scheduler for IntervalScheduler {
    fn run(&mut self, interval: Duration, on_tick: &mut dyn FnMut(u64) -> TickControl) {
        let start = Instant::now();
        let mut tick: u64 = 0;

        while !self.shutdown.load(Ordering::Acquire) {
            if on_tick(tick) == TickControl::Stop {
                return;
            }

            let next = next_tick_after(start, interval, tick, Instant::now());
            if next > tick + 1 {
                debug!("Tick {} overran, skipping {} deadline(s)", tick, next - tick - 1);
            }
            tick = next;

            let deadline = deadline_of(start, interval, tick);
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
        }

        debug!("Interval scheduler shut down after {} tick(s)", tick);
    }
}

/// Absolute deadline of tick `n`
fn deadline_of(start: Instant, interval: Duration, n: u64) -> Instant {
    let nanos = interval.as_nanos().saturating_mul(u128::from(n));
    let offset = u64::try_from(nanos).map_or(Duration::MAX, Duration::from_nanos);
    start.checked_add(offset).unwrap_or(start)
}

/// Index of the first tick after `current` whose deadline has not passed at `now`
fn next_tick_after(start: Instant, interval: Duration, current: u64, now: Instant) -> u64 {
    if interval.is_zero() {
        return current + 1;
    }

    let elapsed = now.saturating_duration_since(start).as_nanos();
    let due = elapsed / interval.as_nanos();
    // Tick `due` is either now or already in the past; fire the one after it
    // unless it is exactly on time
    let next = u64::try_from(due).unwrap_or(u64::MAX);
    if deadline_of(start, interval, next) >= now {
        next.max(current + 1)
    } else {
        next.saturating_add(1).max(current + 1)
    }
}

/// Deterministic scheduler for tests: fires `ticks` callbacks without sleeping
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    ticks: u64,
    intervals_seen: Vec<Duration>,
}

impl ManualScheduler {
    /// Fire exactly `ticks` callbacks
    pub fn new(ticks: u64) -> Self {
        Self {
            ticks,
            intervals_seen: Vec::new(),
        }
    }

    /// Intervals passed to `run`, in call order
    pub fn intervals_seen(&self) -> &[Duration] {
        &self.intervals_seen
    }
}

impl Scheduler for ManualScheduler {
    fn run(&mut self, interval: Duration, on_tick: &mut dyn FnMut(u64) -> TickControl) {
        self.intervals_seen.push(interval);
        for tick in 0..self.ticks {
            if on_tick(tick) == TickControl::Stop {
                return;
            }
        }
    }
}

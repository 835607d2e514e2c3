//! Integration tests for `ProximityMonitor`
//!
//! Runs the full pipeline over loopback: simulated sensor, HTTP source,
//! distance monitor on a manual scheduler, display controller and a
//! recording surface.

use parking_lot::Mutex;
use proximity_monitor::{
    controller::{ControllerStats, DisplayController},
    display::{DisplayState, RenderModel, RenderSurface},
    error::ProximityError,
    monitor::{DistanceMonitor, HttpDistanceSource, ManualScheduler, SensorEvent},
    sensor::{DistanceScript, SensorSimulator, SimulatedResponse, SimulatorHandle},
};
use std::net::TcpListener;
use std::sync::{Arc, mpsc};
use std::time::Duration;

/// Surface that remembers every model applied to it
#[derive(Clone, Default)]
struct RecordingSurface {
    applied: Arc<Mutex<Vec<RenderModel>>>,
}

impl RenderSurface for RecordingSurface {
    fn apply(&mut self, model: &RenderModel) {
        self.applied.lock().push(model.clone());
    }
}

fn start_simulator(responses: Vec<SimulatedResponse>) -> SimulatorHandle {
    SensorSimulator::bind("127.0.0.1:0", DistanceScript::Cycle(responses))
        .unwrap()
        .spawn()
        .unwrap()
}

fn http_source(endpoint: &str) -> HttpDistanceSource {
    HttpDistanceSource::new(endpoint, Duration::from_millis(900)).unwrap()
}

/// Poll `ticks` times against `endpoint` and feed every event through a
/// display controller. Returns what reached the surface and the counters.
fn run_pipeline(endpoint: &str, ticks: u64) -> (Vec<RenderModel>, ControllerStats) {
    let (tx, rx) = mpsc::sync_channel::<SensorEvent>(64);
    let surface = RecordingSurface::default();
    let mut controller = DisplayController::new(rx, Box::new(surface.clone()));

    let mut monitor = DistanceMonitor::new(Duration::from_millis(1000), http_source(endpoint), tx);
    let mut scheduler = ManualScheduler::new(ticks);
    monitor.run_with(&mut scheduler);
    drop(monitor);

    // Sender is gone, so the loop drains the channel and returns
    controller.run();

    let applied = surface.applied.lock().clone();
    (applied, controller.stats())
}

/// Test the three bands end to end, including the inclusive 30 cm boundary
#[test]
fn test_readings_render_in_order() {
    let sim = start_simulator(vec![
        SimulatedResponse::Distance(5.0),
        SimulatedResponse::Distance(30.0),
        SimulatedResponse::Distance(100.0),
    ]);

    let (applied, stats) = run_pipeline(&sim.endpoint(), 3);

    let states: Vec<_> = applied.iter().map(|m| m.state).collect();
    assert_eq!(
        states,
        vec![DisplayState::Near, DisplayState::Medium, DisplayState::Far]
    );
    assert_eq!(applied[0].label, "Object found at: 5 cm");
    assert_eq!(applied[1].label, "Object found at: 30 cm");
    assert_eq!(applied[2].label, "Object found at: 100 cm");
    assert!(applied[0].indicators.red);
    assert!(applied[1].indicators.yellow);
    assert!(applied[2].indicators.green);
    assert_eq!(applied[2].palette.background.css, "#ccffcc");

    assert_eq!(stats.readings, 3);
    assert_eq!(stats.skipped, 0);
    assert_eq!(sim.served(), 3);
}

/// Test that every kind of failed tick leaves the display untouched
#[test]
fn test_failed_ticks_keep_previous_display() {
    let sim = start_simulator(vec![
        SimulatedResponse::Distance(5.0),
        SimulatedResponse::Status(500),
        SimulatedResponse::Body("not json".to_string()),
        SimulatedResponse::Body(r#"{"object":"detected"}"#.to_string()),
        SimulatedResponse::Body(r#"{"distance":"12"}"#.to_string()),
        SimulatedResponse::Distance(5.0),
    ]);

    let (applied, stats) = run_pipeline(&sim.endpoint(), 6);

    // The final reading renders exactly like the first, so only one apply
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].state, DisplayState::Near);
    assert_eq!(stats.readings, 2);
    assert_eq!(stats.skipped, 4);
    assert_eq!(stats.applied, 1);
}

/// Test that recovery after failures shows the new reading
#[test]
fn test_recovery_after_failures() {
    let sim = start_simulator(vec![
        SimulatedResponse::Distance(100.0),
        SimulatedResponse::Status(503),
        SimulatedResponse::Status(503),
        SimulatedResponse::Distance(12.0),
    ]);

    let (applied, stats) = run_pipeline(&sim.endpoint(), 4);

    let states: Vec<_> = applied.iter().map(|m| m.state).collect();
    assert_eq!(states, vec![DisplayState::Far, DisplayState::Medium]);
    assert_eq!(stats.skipped, 2);
}

/// Test that an unreachable endpoint never produces a model
#[test]
fn test_unreachable_endpoint_renders_nothing() {
    // Bind and immediately release a port so nothing is listening on it
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let (applied, stats) = run_pipeline(&format!("http://{addr}"), 2);

    assert!(applied.is_empty());
    assert_eq!(stats.readings, 0);
    assert_eq!(stats.skipped, 2);
}

/// Test the error reported for each failure mode
#[test]
fn test_poll_errors_are_classified() {
    let sim = start_simulator(vec![
        SimulatedResponse::Status(404),
        SimulatedResponse::Body("<html>".to_string()),
        SimulatedResponse::Body(r#"{"object":"detected"}"#.to_string()),
        SimulatedResponse::Body(r#"{"distance":-4}"#.to_string()),
        SimulatedResponse::Distance(42.5),
    ]);

    let (tx, rx) = mpsc::sync_channel::<SensorEvent>(16);
    let mut monitor =
        DistanceMonitor::new(Duration::from_millis(1000), http_source(&sim.endpoint()), tx);

    assert!(matches!(
        monitor.poll_once(),
        Err(ProximityError::HttpStatus(404))
    ));
    assert!(matches!(
        monitor.poll_once(),
        Err(ProximityError::MalformedResponse(_))
    ));
    assert!(matches!(
        monitor.poll_once(),
        Err(ProximityError::MissingDistance)
    ));
    assert!(matches!(
        monitor.poll_once(),
        Err(ProximityError::InvalidDistance(_))
    ));
    assert_eq!(monitor.consecutive_failures(), 4);

    let reading = monitor.poll_once().unwrap();
    assert!((reading.distance_cm() - 42.5).abs() < f64::EPSILON);
    assert_eq!(monitor.consecutive_failures(), 0);

    drop(monitor);
    let events: Vec<_> = rx.iter().collect();
    assert_eq!(events.len(), 5);
    assert_eq!(
        events[3],
        SensorEvent::Skipped {
            consecutive_failures: 4
        }
    );
}

/// Test that a swept object is always decoded and classified
#[test]
fn test_sweep_readings_decode() {
    let sim = SensorSimulator::bind("127.0.0.1:0", DistanceScript::Sweep { step_cm: 37.0 })
        .unwrap()
        .spawn()
        .unwrap();

    let (_applied, stats) = run_pipeline(&sim.endpoint(), 12);

    assert_eq!(stats.readings, 12);
    assert_eq!(stats.skipped, 0);
}

/// Test that the controller can be shared and driven from its own thread
#[test]
fn test_spawned_event_loop() {
    let sim = start_simulator(vec![SimulatedResponse::Distance(8.0)]);

    let (tx, rx) = mpsc::sync_channel::<SensorEvent>(16);
    let surface = RecordingSurface::default();
    let controller = Arc::new(Mutex::new(DisplayController::new(
        rx,
        Box::new(surface.clone()),
    )));

    let handle = DisplayController::spawn_event_loop(Arc::clone(&controller)).unwrap();
    assert!(DisplayController::spawn_event_loop(Arc::clone(&controller)).is_none());

    let monitor = DistanceMonitor::new(Duration::from_millis(1000), http_source(&sim.endpoint()), tx);
    monitor.start_with(ManualScheduler::new(2)).join().unwrap();
    handle.join().unwrap();

    let controller = controller.lock();
    assert_eq!(controller.stats().readings, 2);
    assert_eq!(controller.stats().applied, 1);
    assert_eq!(
        controller.current_model().map(|m| m.state),
        Some(DisplayState::Near)
    );
    assert_eq!(surface.applied.lock().len(), 1);
}

//! Simulated sensor endpoint
//!
//! Speaks the same minimal HTTP the sensor device does: every `GET` gets one
//! reading and the connection is closed. Used by the `sensor-sim` binary for
//! development without hardware and by the integration tests.

use crate::error::{ProximityError, Result, StringError};
use crate::sensor::alarm::AlarmState;
use crate::sensor::echo::{EchoDistance, MAX_ECHO, MIN_RANGE_CM, SPEED_OF_SOUND_CM_PER_US};
use crate::sensor::response::{build_http_response, is_publishable};
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Upper bound on request bytes read before answering
const MAX_REQUEST_BYTES: usize = 4096;

/// How long a client may take to send its request
const REQUEST_READ_TIMEOUT: Duration = Duration::from_secs(2);

/// One scripted answer to a `GET`
#[derive(Debug, Clone, PartialEq)]
pub enum SimulatedResponse {
    /// A measured distance in centimeters, sent as the device would
    Distance(f64),
    /// A 200 response with this raw body
    Body(String),
    /// An empty response with this status code
    Status(u16),
}

/// Sequence of answers the simulator gives
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceScript {
    /// Repeat these responses in order
    Cycle(Vec<SimulatedResponse>),
    /// Move an object back and forth between the closest and furthest
    /// distances the echo timing can report
    Sweep {
        /// Distance change per reading, in centimeters
        step_cm: f64,
    },
}

impl DistanceScript {
    /// Cycle through plain distances
    pub fn distances(values: impl IntoIterator<Item = f64>) -> Self {
        Self::Cycle(values.into_iter().map(SimulatedResponse::Distance).collect())
    }

    /// Response number `n` of this script
    fn response_at(&self, n: u64) -> SimulatedResponse {
        match self {
            Self::Cycle(responses) if responses.is_empty() => SimulatedResponse::Status(503),
            Self::Cycle(responses) => {
                let len = responses.len() as u64;
                let index = usize::try_from(n % len).unwrap_or(0);
                responses[index].clone()
            }
            Self::Sweep { step_cm } => SimulatedResponse::Distance(sweep_position(*step_cm, n)),
        }
    }

    fn len_hint(&self) -> u64 {
        match self {
            Self::Cycle(responses) => responses.len() as u64,
            Self::Sweep { .. } => 1,
        }
    }
}

/// Position of a swept object after `n` steps, quantized through an echo
/// round trip like a real measurement
fn sweep_position(step_cm: f64, n: u64) -> f64 {
    // Furthest point whose echo still fits the timing window
    let max_echo_us = f64::from(u32::try_from(MAX_ECHO.as_micros()).unwrap_or(u32::MAX));
    let far_cm = SPEED_OF_SOUND_CM_PER_US * max_echo_us / 2.0;
    let span = far_cm - MIN_RANGE_CM - 1.0;
    let step = step_cm.abs().max(0.01);
    #[expect(
        clippy::cast_precision_loss,
        reason = "step counts stay far below 2^52 for any realistic session"
    )]
    let travelled = (step * n as f64) % (2.0 * span);
    let offset = if travelled <= span {
        travelled
    } else {
        2.0 * span - travelled
    };
    EchoDistance::from_echo(EchoDistance::echo_for(MIN_RANGE_CM + offset)).centimeters
}

/// Simulated sensor bound to a TCP socket
pub struct SensorSimulator {
    listener: TcpListener,
    script: DistanceScript,
    served: Arc<AtomicU64>,
    cursor: u64,
    last_alarm: Option<AlarmState>,
}

impl SensorSimulator {
    /// Bind the simulator to `addr` (use port 0 for an ephemeral port)
    pub fn bind(addr: impl ToSocketAddrs, script: DistanceScript) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self {
            listener,
            script,
            served: Arc::new(AtomicU64::new(0)),
            cursor: 0,
            last_alarm: None,
        })
    }

    /// Address the simulator listens on
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// URL a client should poll
    pub fn endpoint(&self) -> Result<String> {
        Ok(format!("http://{}", self.local_addr()?))
    }

    /// Alarm the device would be driving after the last published reading
    pub fn last_alarm(&self) -> Option<AlarmState> {
        self.last_alarm
    }

    /// Next response to publish, skipping readings the device would drop
    fn next_response(&mut self) -> SimulatedResponse {
        // Bounded so a script of only unpublishable readings cannot spin forever
        for _ in 0..self.script.len_hint().max(1) {
            let response = self.script.response_at(self.cursor);
            self.cursor = self.cursor.wrapping_add(1);
            match response {
                SimulatedResponse::Distance(d) if !is_publishable(d) => {
                    debug!("Dropping unpublishable reading {} cm", d);
                }
                other => return other,
            }
        }
        SimulatedResponse::Status(503)
    }

    /// Accept one connection and answer it
    ///
    /// Returns the response sent, or `None` when the request was not a `GET`.
    pub fn serve_one(&mut self) -> Result<Option<SimulatedResponse>> {
        let (stream, peer) = self.listener.accept()?;
        debug!("Connection from {}", peer);
        self.handle(stream)
    }

    fn handle(&mut self, mut stream: TcpStream) -> Result<Option<SimulatedResponse>> {
        stream.set_read_timeout(Some(REQUEST_READ_TIMEOUT))?;
        let request = read_request(&mut stream)?;

        if !request.starts_with(b"GET") {
            debug!("Ignoring non-GET request");
            stream.shutdown(Shutdown::Both).ok();
            return Ok(None);
        }

        let response = self.next_response();
        let wire = match &response {
            SimulatedResponse::Distance(d) => {
                let alarm = AlarmState::from_distance(*d);
                debug!(
                    "Alarm for {} cm: LED {}, buzzer {}",
                    d,
                    alarm.led,
                    alarm
                        .tone_duration
                        .map_or_else(|| "off".to_string(), |t| format!("{t:?} per tone"))
                );
                self.last_alarm = Some(alarm);
                build_http_response(*d)
            }
            SimulatedResponse::Body(body) => format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
                 Connection: close\r\nAccess-Control-Allow-Origin: *\r\n\r\n{body}",
                body.len()
            ),
            SimulatedResponse::Status(code) => format!(
                "HTTP/1.1 {code} Simulated\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            ),
        };

        stream.write_all(wire.as_bytes())?;
        stream.flush()?;
        stream.shutdown(Shutdown::Write).ok();

        self.served.fetch_add(1, Ordering::Relaxed);
        debug!("Sent {:?}", response);
        Ok(Some(response))
    }

    /// Serve requests on a background thread until the handle is dropped
    pub fn spawn(mut self) -> Result<SimulatorHandle> {
        let addr = self.local_addr()?;
        let shutdown = Arc::new(AtomicBool::new(false));
        let served = Arc::clone(&self.served);

        let thread_shutdown = Arc::clone(&shutdown);
        let thread = thread::spawn(move || {
            info!("Simulated sensor listening on {}", addr);
            while !thread_shutdown.load(Ordering::Acquire) {
                match self.listener.accept() {
                    Ok((stream, _)) => {
                        if thread_shutdown.load(Ordering::Acquire) {
                            break;
                        }
                        if let Err(e) = self.handle(stream) {
                            warn!("Failed to answer request: {}", e);
                        }
                    }
                    Err(e) => warn!("Accept error: {}", e),
                }
            }
            info!("Simulated sensor on {} stopped", addr);
        });

        Ok(SimulatorHandle {
            addr,
            shutdown,
            served,
            thread: Some(thread),
        })
    }
}

/// Read request bytes until the end of the header block, EOF, or the size cap
fn read_request(stream: &mut TcpStream) -> Result<Vec<u8>> {
    let mut request = Vec::with_capacity(512);
    let mut buf = [0u8; 512];

    loop {
        let n = match stream.read(&mut buf) {
            Ok(n) => n,
            Err(e) if request.is_empty() => return Err(e.into()),
            // Partial request: answer based on what arrived
            Err(_) => break,
        };
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buf[..n]);
        if request.windows(4).any(|w| w == b"\r\n\r\n") || request.len() >= MAX_REQUEST_BYTES {
            break;
        }
    }

    if request.is_empty() {
        return Err(ProximityError::IoError(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            StringError::new("connection closed before a request arrived"),
        )));
    }
    Ok(request)
}

/// Handle to a simulator running on a background thread
///
/// Dropping the handle stops the simulator.
pub struct SimulatorHandle {
    addr: SocketAddr,
    shutdown: Arc<AtomicBool>,
    served: Arc<AtomicU64>,
    thread: Option<JoinHandle<()>>,
}

impl SimulatorHandle {
    /// Address the simulator listens on
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// URL a client should poll
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests answered so far
    pub fn served(&self) -> u64 {
        self.served.load(Ordering::Relaxed)
    }

    /// Stop the simulator and wait for its thread
    pub fn stop(mut self) {
        self.shutdown_inner();
    }

    fn shutdown_inner(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        // Wake the blocking accept
        let _ = TcpStream::connect_timeout(&self.addr, Duration::from_millis(200));
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Simulator thread panicked");
            }
        }
    }
}

impl Drop for SimulatorHandle {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}

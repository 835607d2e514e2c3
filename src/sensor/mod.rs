//! Sensor side of the link
//!
//! The device measures distance with an ultrasonic echo, sounds a local
//! alarm for close objects, and answers every HTTP `GET` with one JSON
//! reading. This module holds the echo conversion, the alarm bands, the
//! response format, and a simulator that serves scripted readings over
//! loopback or the network.

pub mod alarm;
pub mod echo;
pub mod response;
pub mod simulator;

pub use alarm::{AlarmState, LedColor, pattern_duration};
pub use echo::EchoDistance;
pub use response::{SensorResponse, build_http_response, is_publishable, published_distance};
pub use simulator::{DistanceScript, SensorSimulator, SimulatedResponse, SimulatorHandle};

//! Local proximity alarm of the sensor device
//!
//! Besides answering HTTP, the device drives an RGB LED and a buzzer from
//! every accepted reading. Its bands are not the client's: both ends are
//! inclusive at the top (`0 < d <= 10` is red, `10 < d <= 30` is yellow) and a
//! reading of exactly 0 means no echo, so the alarm stays off.

use std::fmt;
use std::time::Duration;

/// Upper bound (inclusive) of the red LED band, in centimeters
pub const ALARM_RED_MAX_CM: f64 = 10.0;

/// Upper bound (inclusive) of the alarm, in centimeters
pub const ALARM_MAX_CM: f64 = 30.0;

/// Buzzer tones as divisors of the PWM period: high pitch, then near silence
pub const BUZZER_TONES: [u32; 2] = [2000, 5];

/// Times the two-tone pattern is played per reading
pub const BUZZER_REPEATS: usize = 3;

/// RGB LED state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedColor {
    /// Red channel only
    Red,
    /// Red and green channels
    Yellow,
    /// Dark
    Off,
}

impl LedColor {
    /// Red, green and blue channel enables
    pub const fn channels(self) -> (bool, bool, bool) {
        match self {
            Self::Red => (true, false, false),
            Self::Yellow => (true, true, false),
            Self::Off => (false, false, false),
        }
    }
}

impl fmt::Display for LedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Off => "off",
        })
    }
}

/// What the device's alarm does for one reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmState {
    /// LED color
    pub led: LedColor,
    /// Length of each buzzer tone, `None` when the buzzer is silent
    pub tone_duration: Option<Duration>,
}

impl AlarmState {
    /// Alarm driven by a distance in centimeters
    ///
    /// NaN and values outside `(0, 30]` turn everything off.
    pub fn from_distance(distance_cm: f64) -> Self {
        if !(distance_cm > 0.0 && distance_cm <= ALARM_MAX_CM) {
            return Self {
                led: LedColor::Off,
                tone_duration: None,
            };
        }

        let led = if distance_cm <= ALARM_RED_MAX_CM {
            LedColor::Red
        } else {
            LedColor::Yellow
        };

        Self {
            led,
            tone_duration: pattern_duration(distance_cm),
        }
    }

    /// Whether the buzzer sounds
    pub fn is_sounding(&self) -> bool {
        self.tone_duration.is_some()
    }

    /// Tone sequence played for this reading: `(divisor, duration)` pairs
    pub fn buzzer_pattern(&self) -> Vec<(u32, Duration)> {
        let Some(duration) = self.tone_duration else {
            return Vec::new();
        };
        (0..BUZZER_REPEATS)
            .flat_map(|_| BUZZER_TONES.iter().map(move |&tone| (tone, duration)))
            .collect()
    }

    /// Total time the buzzer pattern takes
    pub fn pattern_length(&self) -> Duration {
        self.buzzer_pattern().iter().map(|(_, d)| *d).sum()
    }
}

/// Length of one buzzer tone for a distance: `50 + 2 × whole centimeters` ms
///
/// Closer objects beep faster. Returns `None` outside the alarm band.
pub fn pattern_duration(distance_cm: f64) -> Option<Duration> {
    if !(distance_cm > 0.0 && distance_cm <= ALARM_MAX_CM) {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "distance is in (0, 30], whole centimeters fit a u64"
    )]
    let whole_cm = distance_cm.trunc() as u64;
    Some(Duration::from_millis(50 + whole_cm * 2))
}

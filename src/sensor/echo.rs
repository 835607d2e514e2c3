//! HC-SR04 echo timing conversion
//!
//! The sensor reports the width of its echo pulse. Sound travels to the
//! object and back, so the one-way distance is half of speed × time.

use std::time::Duration;

/// Speed of sound in cm/µs (343 m/s)
pub const SPEED_OF_SOUND_CM_PER_US: f64 = 0.0343;

/// Shortest echo the sensor can time
pub const MIN_ECHO: Duration = Duration::from_micros(100);

/// Longest echo before the sensor reports no object
pub const MAX_ECHO: Duration = Duration::from_millis(18);

/// Closest measurable distance in centimeters
pub const MIN_RANGE_CM: f64 = 2.0;

/// Furthest measurable distance in centimeters
pub const MAX_RANGE_CM: f64 = 400.0;

/// A distance derived from an echo pulse, in several units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EchoDistance {
    /// Millimeters
    pub millimeters: f64,
    /// Centimeters
    pub centimeters: f64,
    /// Decimeters
    pub decimeters: f64,
    /// Meters
    pub meters: f64,
}

impl EchoDistance {
    /// Distance for a value in centimeters
    pub fn from_centimeters(centimeters: f64) -> Self {
        Self {
            millimeters: centimeters * 10.0,
            centimeters,
            decimeters: centimeters / 10.0,
            meters: centimeters / 100.0,
        }
    }

    /// Convert an echo pulse width to a distance
    ///
    /// Echoes outside 100 µs ..= 18 ms mean no object in range and read as
    /// the maximum range. Results below 2 cm read as 0 and results above
    /// 400 cm are clamped to 400.
    pub fn from_echo(echo: Duration) -> Self {
        // `as_millis` truncates, so an echo of 18.9 ms still counts as 18 ms
        if echo < MIN_ECHO || echo.as_millis() > MAX_ECHO.as_millis() {
            return Self::out_of_range();
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "echo is at most ~19000 µs, far below f64's exact integer range"
        )]
        let micros = echo.as_micros() as f64;
        let distance = SPEED_OF_SOUND_CM_PER_US * micros / 2.0;

        if distance < MIN_RANGE_CM {
            Self::from_centimeters(0.0)
        } else if distance > MAX_RANGE_CM {
            Self::out_of_range()
        } else {
            Self::from_centimeters(distance)
        }
    }

    /// Reading reported when nothing is in range
    pub fn out_of_range() -> Self {
        Self::from_centimeters(MAX_RANGE_CM)
    }

    /// Echo pulse width that produces `centimeters` (inverse of `from_echo`)
    ///
    /// Input is clamped to `0 ..= 400` cm; NaN counts as 0.
    pub fn echo_for(centimeters: f64) -> Duration {
        let centimeters = if centimeters.is_nan() {
            0.0
        } else {
            centimeters.clamp(0.0, MAX_RANGE_CM)
        };
        let micros = (centimeters * 2.0 / SPEED_OF_SOUND_CM_PER_US).round();
        Duration::from_secs_f64(micros / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_from_echo_nominal() {
        // 1000 µs -> 0.0343 * 1000 / 2 = 17.15 cm
        let d = EchoDistance::from_echo(Duration::from_micros(1000));
        assert!(approx(d.centimeters, 17.15));
        assert!(approx(d.millimeters, 171.5));
        assert!(approx(d.decimeters, 1.715));
        assert!(approx(d.meters, 0.1715));
    }

    #[test]
    fn test_echo_too_short_is_out_of_range() {
        let d = EchoDistance::from_echo(Duration::from_micros(99));
        assert!(approx(d.centimeters, 400.0));
        assert!(approx(d.meters, 4.0));
    }

    #[test]
    fn test_echo_too_long_is_out_of_range() {
        let d = EchoDistance::from_echo(Duration::from_millis(19));
        assert!(approx(d.centimeters, 400.0));
    }

    #[test]
    fn test_echo_truncated_millis_still_measured() {
        // 18.5 ms truncates to 18 ms, so it is measured: 317.275 cm
        let d = EchoDistance::from_echo(Duration::from_micros(18_500));
        assert!(approx(d.centimeters, 317.275));

        // 15 ms is inside the window: 257.25 cm
        let d = EchoDistance::from_echo(Duration::from_millis(15));
        assert!(approx(d.centimeters, 257.25));
    }

    #[test]
    fn test_minimum_echo_reads_above_two_cm() {
        // 100 µs -> 1.715 cm, below the 2 cm floor
        let d = EchoDistance::from_echo(Duration::from_micros(100));
        assert!(approx(d.centimeters, 0.0));
        assert!(approx(d.millimeters, 0.0));

        // 117 µs -> 2.00655 cm, just above it
        let d = EchoDistance::from_echo(Duration::from_micros(117));
        assert!(d.centimeters > 2.0);
    }

    #[test]
    fn test_echo_for_inverts_from_echo() {
        for cm in [5.0, 10.0, 30.0, 120.0] {
            let d = EchoDistance::from_echo(EchoDistance::echo_for(cm));
            // One microsecond of rounding is ~0.017 cm
            assert!((d.centimeters - cm).abs() < 0.02, "{cm} -> {}", d.centimeters);
        }
    }

    #[test]
    fn test_echo_for_clamps_out_of_range_input() {
        let longest = EchoDistance::echo_for(MAX_RANGE_CM);
        assert_eq!(EchoDistance::echo_for(f64::INFINITY), longest);
        assert_eq!(EchoDistance::echo_for(1e300), longest);
        assert_eq!(EchoDistance::echo_for(f64::NEG_INFINITY), Duration::ZERO);
        assert_eq!(EchoDistance::echo_for(f64::NAN), Duration::ZERO);

        // Out-of-range echoes read back as no object
        let d = EchoDistance::from_echo(EchoDistance::echo_for(f64::INFINITY));
        assert!(approx(d.centimeters, MAX_RANGE_CM));
    }
}

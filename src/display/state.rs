//! Display state classification and color palette
//!
//! Maps a distance in centimeters to one of three mutually exclusive states.
//! The thresholds are adjacent: `< 10` is near, `<= 30` is medium, anything
//! else is far.

use std::fmt;

/// Upper bound (exclusive) of the near band, in centimeters
pub const NEAR_THRESHOLD_CM: f64 = 10.0;

/// Upper bound (inclusive) of the medium band, in centimeters
pub const MEDIUM_THRESHOLD_CM: f64 = 30.0;

/// Visual state derived from a single distance reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayState {
    /// Object closer than 10 cm (red)
    Near,
    /// Object between 10 cm and 30 cm inclusive (yellow)
    Medium,
    /// Object further than 30 cm (green)
    Far,
}

impl DisplayState {
    /// All states, in indicator order
    pub const ALL: [DisplayState; 3] = [Self::Near, Self::Medium, Self::Far];

    /// Classify a distance in centimeters
    ///
    /// Total over `f64`: negative values are near and NaN (which fails both
    /// comparisons) is far.
    pub fn from_distance(distance_cm: f64) -> Self {
        if distance_cm < NEAR_THRESHOLD_CM {
            Self::Near
        } else if distance_cm <= MEDIUM_THRESHOLD_CM {
            Self::Medium
        } else {
            Self::Far
        }
    }

    /// Palette entry for this state
    pub const fn palette(self) -> Palette {
        match self {
            Self::Near => Palette {
                accent: CssColor::RED,
                background: CssColor::LIGHT_RED,
            },
            Self::Medium => Palette {
                accent: CssColor::YELLOW,
                background: CssColor::LIGHT_YELLOW,
            },
            Self::Far => Palette {
                accent: CssColor::GREEN,
                background: CssColor::LIGHT_GREEN,
            },
        }
    }

    /// Identifier of the indicator element that represents this state
    pub const fn indicator_id(self) -> &'static str {
        match self {
            Self::Near => "status-red",
            Self::Medium => "status-yellow",
            Self::Far => "status-green",
        }
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Near => "near",
            Self::Medium => "medium",
            Self::Far => "far",
        };
        f.pad(name)
    }
}

/// A color as written in a style sheet, with its RGB value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CssColor {
    /// Style sheet spelling (`"red"`, `"#ffcccc"`)
    pub css: &'static str,
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl CssColor {
    /// CSS `red`
    pub const RED: Self = Self::new("red", 0xff, 0x00, 0x00);
    /// CSS `yellow`
    pub const YELLOW: Self = Self::new("yellow", 0xff, 0xff, 0x00);
    /// CSS `green` (note: `#008000`, not `#00ff00`)
    pub const GREEN: Self = Self::new("green", 0x00, 0x80, 0x00);
    /// Light red background tint
    pub const LIGHT_RED: Self = Self::new("#ffcccc", 0xff, 0xcc, 0xcc);
    /// Light yellow background tint
    pub const LIGHT_YELLOW: Self = Self::new("#ffffcc", 0xff, 0xff, 0xcc);
    /// Light green background tint
    pub const LIGHT_GREEN: Self = Self::new("#ccffcc", 0xcc, 0xff, 0xcc);

    const fn new(css: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self { css, r, g, b }
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css)
    }
}

/// Accent color and background tint for one display state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Palette {
    /// Indicator color (`--bg-circle-color`)
    pub accent: CssColor,
    /// Page background tint (`--background-color`)
    pub background: CssColor,
}

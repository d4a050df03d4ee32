//! RGB colour handling for arena items.

// Allow intentional type casts for colour math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB colour of an arena item.
///
/// Animal-AI stores colours as `!RGB {r, g, b}` with channels in 0-255.
/// Configurations sometimes carry fractional or out-of-range channel values;
/// those are reported by the validator and clamped here for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a colour from raw configuration channel values.
    ///
    /// Each channel is rounded and clamped into 0-255.
    ///
    /// # Examples
    ///
    /// ```
    /// use aai_assist::models::RgbColor;
    ///
    /// let color = RgbColor::from_channels(153.0, 300.0, -4.0);
    /// assert_eq!(color, RgbColor::new(153, 255, 0));
    /// ```
    #[must_use]
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Converts the colour to a hex string in the format "#RRGGBB" (uppercase).
    ///
    /// # Examples
    ///
    /// ```
    /// use aai_assist::models::RgbColor;
    ///
    /// let color = RgbColor::new(0, 128, 255);
    /// assert_eq!(color.to_hex(), "#0080FF");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

impl Default for RgbColor {
    fn default() -> Self {
        // Neutral grey, the Animal-AI wall colour
        Self::new(153, 153, 153)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

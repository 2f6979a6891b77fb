//! Color handling for Swatch tokens and paints
//!
//! This module provides the [`Color`] type, an sRGB color with straight alpha
//! stored as floating point channels in `0.0..=1.0` (the representation used by
//! the host design tool), and [`ColorKey`], the quantized form used to match
//! literal paint colors against token values.
//!
//! CSS color strings are parsed through the `color` crate, so anything it
//! understands (`#rgb`, `#rrggbb`, `rgb()`, `rgba()`, named colors, ...) can be
//! used to declare a token value.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a CSS color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct ParseColorError {
    input: String,
    reason: String,
}

/// An sRGB color with alpha, channels in `0.0..=1.0`.
///
/// Serializes as `{ "r": .., "g": .., "b": .., "a": .. }`. The alpha channel
/// is optional on input and defaults to fully opaque, which is how the host
/// stores paint colors (paint transparency lives in the paint's opacity).
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
    #[serde(default = "opaque")]
    a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    /// Opaque white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Create a new `Color` from a CSS color string.
    ///
    /// # Examples
    ///
    /// ```
    /// use swatch_core::color::Color;
    ///
    /// let primary = Color::new("#313131").unwrap();
    /// let short = Color::new("#ccc").unwrap();
    /// assert_eq!(short, Color::new("#cccccc").unwrap());
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ParseColorError> {
        let parsed = DynamicColor::from_str(color_str).map_err(|err| ParseColorError {
            input: color_str.to_string(),
            reason: err.to_string(),
        })?;
        let [r, g, b, a] = parsed.to_alpha_color::<Srgb>().components;
        Ok(Self::rgba(r, g, b, a))
    }

    /// Create a color from floating point channels in `0.0..=1.0`.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit channels and a floating point alpha, the
    /// way `rgba(255, 255, 255, 0.75)` reads in a stylesheet.
    ///
    /// # Examples
    ///
    /// ```
    /// use swatch_core::color::Color;
    ///
    /// let translucent = Color::from_rgba8(255, 255, 255, 0.75);
    /// assert_eq!(translucent.alpha(), 0.75);
    /// assert_eq!(translucent.red(), 1.0);
    /// ```
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            a,
        )
    }

    /// Red channel, `0.0..=1.0`.
    pub fn red(&self) -> f32 {
        self.r
    }

    /// Green channel, `0.0..=1.0`.
    pub fn green(&self) -> f32 {
        self.g
    }

    /// Blue channel, `0.0..=1.0`.
    pub fn blue(&self) -> f32 {
        self.b
    }

    /// Alpha channel, where 0.0 is fully transparent and 1.0 fully opaque.
    pub fn alpha(&self) -> f32 {
        self.a
    }

    /// Creates a new color with the specified alpha value.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Returns the match key for this color using its own alpha channel.
    pub fn key(&self) -> ColorKey {
        ColorKey::from_channels(self.r, self.g, self.b, self.a)
    }

    /// Returns the 8-bit red, green and blue channels.
    pub fn to_rgb8(self) -> [u8; 3] {
        [
            quantize_channel(self.r),
            quantize_channel(self.g),
            quantize_channel(self.b),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Formats the color the way a stylesheet would spell it: `#rrggbb` when
/// opaque, `rgba(r, g, b, a)` otherwise.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_rgb8();
        let key = self.key();
        if key.alpha_milli() >= 1000 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "rgba({r}, {g}, {b}, {})", key.alpha())
        }
    }
}

fn quantize_channel(channel: f32) -> u8 {
    (f64::from(channel).clamp(0.0, 1.0) * 255.0).round() as u8
}

fn quantize_alpha(alpha: f32) -> u16 {
    (f64::from(alpha).clamp(0.0, 1.0) * 1000.0).round() as u16
}

/// Quantized color used as the color-index key.
///
/// Each color channel is rounded to the nearest 8-bit integer and alpha is
/// rounded to three decimal places, so colors that only differ by float noise
/// (less than 1/510 per channel, less than 0.0005 in alpha) produce the same
/// key.
///
/// # Examples
///
/// ```
/// use swatch_core::color::{Color, ColorKey};
///
/// let yellow = Color::new("#ffff00").unwrap();
/// let noisy = ColorKey::from_channels(0.9995, 1.0, 0.0012, 0.99999);
/// assert_eq!(yellow.key(), noisy);
/// assert_eq!(noisy.to_string(), "255,255,0,1");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ColorKey {
    r: u8,
    g: u8,
    b: u8,
    alpha_milli: u16,
}

impl ColorKey {
    /// Quantizes floating point channels in `0.0..=1.0`.
    pub fn from_channels(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: quantize_channel(r),
            g: quantize_channel(g),
            b: quantize_channel(b),
            alpha_milli: quantize_alpha(a),
        }
    }

    /// Returns the 8-bit red, green and blue channels.
    pub fn rgb8(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Alpha in thousandths, `0..=1000`.
    pub fn alpha_milli(&self) -> u16 {
        self.alpha_milli
    }

    /// Alpha rounded to three decimal places.
    pub fn alpha(&self) -> f64 {
        f64::from(self.alpha_milli) / 1000.0
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.alpha())
    }
}

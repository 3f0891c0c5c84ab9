//! RGB color with channels clamped to [0, 1].

use std::ops::{Add, Mul};

use glam::DVec3;

/// An RGB color. Channels are clamped to [0, 1] whenever a color is built,
/// including the results of arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color(DVec3);

impl Color {
    pub const BLACK: Color = Color(DVec3::ZERO);
    pub const WHITE: Color = Color(DVec3::ONE);

    /// Create a color, clamping each channel to [0, 1]. NaN becomes 0.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self::from_dvec3(DVec3::new(r, g, b))
    }

    /// Clamp an unbounded RGB triple into a color.
    pub fn from_dvec3(rgb: DVec3) -> Self {
        let rgb = DVec3::select(rgb.is_nan_mask(), DVec3::ZERO, rgb);
        Self(rgb.clamp(DVec3::ZERO, DVec3::ONE))
    }

    /// Create a color from 8-bit channels.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self::from_dvec3(DVec3::new(rgb[0] as f64, rgb[1] as f64, rgb[2] as f64) / 255.0)
    }

    #[inline]
    pub fn r(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn g(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn b(&self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn to_dvec3(self) -> DVec3 {
        self.0
    }

    /// Convert to 8-bit channels (no gamma).
    pub fn to_rgb8(&self) -> [u8; 3] {
        let c = (self.0 * 255.0).round();
        [c.x as u8, c.y as u8, c.z as u8]
    }

    /// Component-wise mean of a set of samples. Black for an empty set.
    ///
    /// Sums are accumulated unclamped, so averaging never saturates early.
    pub fn average(samples: &[Color]) -> Color {
        if samples.is_empty() {
            return Color::BLACK;
        }
        let sum: DVec3 = samples.iter().map(|c| c.0).sum();
        Self::from_dvec3(sum / samples.len() as f64)
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::from_dvec3(self.0 + rhs.0)
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color::from_dvec3(self.0 * rhs.0)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Color {
        Color::from_dvec3(self.0 * rhs)
    }
}

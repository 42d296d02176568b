//! Color values and ARGB interpolation
//!
//! Background-color tracks interpolate per channel rather than treating
//! the packed ARGB word as one number, which is what a naive float track
//! over packed colors would do.

/// An ARGB color with normalized channels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub a: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::new(1.0, 0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    /// Create a color from normalized channels
    pub const fn new(a: f32, r: f32, g: f32, b: f32) -> Self {
        Self { a, r, g, b }
    }

    /// Create an opaque color from normalized RGB channels
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { a: 1.0, r, g, b }
    }

    /// Unpack a `0xAARRGGBB` word
    pub fn from_argb(argb: u32) -> Self {
        Self {
            a: ((argb >> 24) & 0xff) as f32 / 255.0,
            r: ((argb >> 16) & 0xff) as f32 / 255.0,
            g: ((argb >> 8) & 0xff) as f32 / 255.0,
            b: (argb & 0xff) as f32 / 255.0,
        }
    }

    /// Pack into a `0xAARRGGBB` word
    pub fn to_argb(self) -> u32 {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (quantize(self.a) << 24) | (quantize(self.r) << 16) | (quantize(self.g) << 8) | quantize(self.b)
    }

    /// Channel-wise linear interpolation between two colors
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        Color {
            a: self.a + (other.a - self.a) * t,
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

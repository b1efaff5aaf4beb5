//! Linear RGBA colors used by resolved paint tokens.

/// Linear RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Transparent black, the color of [`Paint::Clear`](crate::Paint::Clear).
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    /// Builds a color from linear channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Builds an opaque color from 8-bit channels, as design tokens list them.
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        let channel = |value: u8| f32::from(value) / 255.0;
        Self::new(channel(r), channel(g), channel(b), 1.0)
    }

    /// Returns the same color with its alpha replaced.
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Composites `overlay` on top of `self` with the given overlay alpha.
    pub fn blend_over(self, overlay: Color, overlay_alpha: f32) -> Color {
        let alpha = overlay_alpha.clamp(0.0, 1.0);
        Color::new(
            overlay.r * alpha + self.r * (1.0 - alpha),
            overlay.g * alpha + self.g * (1.0 - alpha),
            overlay.b * alpha + self.b * (1.0 - alpha),
            overlay.a * alpha + self.a * (1.0 - alpha),
        )
    }

    /// Linearly interpolates every channel towards `target`.
    pub fn lerp(self, target: Color, t: f32) -> Color {
        let factor = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (target.r - self.r) * factor,
            g: self.g + (target.g - self.g) * factor,
            b: self.b + (target.b - self.b) * factor,
            a: self.a + (target.a - self.a) * factor,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

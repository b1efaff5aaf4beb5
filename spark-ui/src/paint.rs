//! Resolved paint and font tokens.
//!
//! The theming service hands the controls concrete values, never references
//! into a token table. [`Paint`] is a closed set of paint representations
//! compared structurally, so two independently resolved paints for the same
//! token are equal.

use crate::{Color, Dp};

/// A resolved paint value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Paint {
    /// Nothing is painted.
    #[default]
    Clear,
    /// A single solid color.
    Solid(Color),
    /// A two-stop linear gradient.
    Gradient {
        /// Color at the leading edge.
        start: Color,
        /// Color at the trailing edge.
        end: Color,
    },
}

impl Paint {
    /// Returns the leading and trailing stop colors of this paint.
    ///
    /// `Clear` resolves to transparent stops and `Solid` repeats its color.
    pub fn stops(&self) -> (Color, Color) {
        match *self {
            Paint::Clear => (Color::TRANSPARENT, Color::TRANSPARENT),
            Paint::Solid(color) => (color, color),
            Paint::Gradient { start, end } => (start, end),
        }
    }

    /// Returns `true` when nothing would be painted.
    pub fn is_clear(&self) -> bool {
        match *self {
            Paint::Clear => true,
            Paint::Solid(color) => color.a == 0.0,
            Paint::Gradient { start, end } => start.a == 0.0 && end.a == 0.0,
        }
    }

    /// Returns this paint with every stop scaled by `opacity`.
    pub fn with_opacity(self, opacity: f32) -> Paint {
        let opacity = opacity.clamp(0.0, 1.0);
        match self {
            Paint::Clear => Paint::Clear,
            Paint::Solid(color) => Paint::Solid(color.with_alpha(color.a * opacity)),
            Paint::Gradient { start, end } => Paint::Gradient {
                start: start.with_alpha(start.a * opacity),
                end: end.with_alpha(end.a * opacity),
            },
        }
    }

    /// Crossfades towards `target`.
    ///
    /// The result takes the shape of the target once `t` reaches `1.0`;
    /// in between, the stops of both paints are interpolated, so a solid
    /// fading into a gradient blends per stop.
    pub fn lerp(&self, target: &Paint, t: f32) -> Paint {
        if t >= 1.0 {
            return *target;
        }
        if t <= 0.0 {
            return *self;
        }
        let (from_start, from_end) = self.stops();
        let (to_start, to_end) = target.stops();
        let start = from_start.lerp(to_start, t);
        let end = from_end.lerp(to_end, t);
        if start == end {
            Paint::Solid(start)
        } else {
            Paint::Gradient { start, end }
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

/// Font weight of a typography token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Regular,
    /// Medium weight.
    Medium,
    /// Bold weight.
    Bold,
}

/// A resolved typography token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontToken {
    /// Font size.
    pub size: Dp,
    /// Line height.
    pub line_height: Dp,
    /// Font weight.
    pub weight: FontWeight,
}

impl Default for FontToken {
    fn default() -> Self {
        Self {
            size: Dp(16.0),
            line_height: Dp(24.0),
            weight: FontWeight::Regular,
        }
    }
}

//! Spark theme tokens for color, typography, and geometry.
//!
//! ## Usage
//!
//! Provide a [`SparkTheme`] on the root [`Context`](spark_ui::Context).
//! Controls resolve their styles from it with pure functions and re-resolve
//! whenever the theme's `version` changes.

use spark_ui::{Color, Dp, FontToken, FontWeight};

use crate::selection_controls::SelectionControlsIntent;

/// Standard Spark opacity steps.
pub struct SparkAlpha;

impl SparkAlpha {
    /// Strongest dim.
    pub const DIM_1: f32 = 0.72;
    /// Medium dim.
    pub const DIM_2: f32 = 0.56;
    /// Dim used for disabled controls.
    pub const DIM_3: f32 = 0.40;
    /// Light overlay, used for pressed feedback.
    pub const DIM_4: f32 = 0.16;
    /// Lightest overlay, used for hover feedback.
    pub const DIM_5: f32 = 0.08;
}

/// Resolved colors of one intent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntentColors {
    /// Main intent color.
    pub color: Color,
    /// Content drawn on top of `color`.
    pub on_color: Color,
    /// Low-emphasis container color.
    pub container: Color,
    /// Content drawn on top of `container`.
    pub on_container: Color,
}

/// The color palette of a Spark theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkColorScheme {
    /// Basic intent color.
    pub basic: Color,
    /// Content on basic.
    pub on_basic: Color,
    /// Basic container.
    pub basic_container: Color,
    /// Content on basic container.
    pub on_basic_container: Color,
    /// Error intent color.
    pub error: Color,
    /// Content on error.
    pub on_error: Color,
    /// Error container.
    pub error_container: Color,
    /// Content on error container.
    pub on_error_container: Color,
    /// Default outline.
    pub outline: Color,
    /// High-contrast outline.
    pub outline_high: Color,
    /// Background surface.
    pub surface: Color,
    /// Content on surface.
    pub on_surface: Color,
}

impl Default for SparkColorScheme {
    fn default() -> Self {
        Self {
            basic: Color::from_rgb_u8(0x39, 0x4D, 0x6F),
            on_basic: Color::WHITE,
            basic_container: Color::from_rgb_u8(0xE1, 0xE6, 0xF0),
            on_basic_container: Color::from_rgb_u8(0x22, 0x30, 0x4A),
            error: Color::from_rgb_u8(0xDB, 0x39, 0x39),
            on_error: Color::WHITE,
            error_container: Color::from_rgb_u8(0xFE, 0xD5, 0xD5),
            on_error_container: Color::from_rgb_u8(0x85, 0x1D, 0x1D),
            outline: Color::from_rgb_u8(0x8A, 0x8A, 0x8A),
            outline_high: Color::from_rgb_u8(0x1A, 0x1A, 0x1A),
            surface: Color::WHITE,
            on_surface: Color::from_rgb_u8(0x1A, 0x1A, 0x1A),
        }
    }
}

impl SparkColorScheme {
    /// Colors for `intent`.
    pub fn intent(&self, intent: SelectionControlsIntent) -> IntentColors {
        match intent {
            SelectionControlsIntent::Basic => IntentColors {
                color: self.basic,
                on_color: self.on_basic,
                container: self.basic_container,
                on_container: self.on_basic_container,
            },
            SelectionControlsIntent::Error => IntentColors {
                color: self.error,
                on_color: self.on_error,
                container: self.error_container,
                on_container: self.on_error_container,
            },
        }
    }
}

/// Typography tokens used by control labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkTypography {
    /// Default body text.
    pub body1: FontToken,
    /// Smaller body text.
    pub body2: FontToken,
    /// Group titles.
    pub subhead: FontToken,
}

impl Default for SparkTypography {
    fn default() -> Self {
        Self {
            body1: FontToken {
                size: Dp(16.0),
                line_height: Dp(24.0),
                weight: FontWeight::Regular,
            },
            body2: FontToken {
                size: Dp(14.0),
                line_height: Dp(20.0),
                weight: FontWeight::Regular,
            },
            subhead: FontToken {
                size: Dp(16.0),
                line_height: Dp(24.0),
                weight: FontWeight::Bold,
            },
        }
    }
}

/// Geometry tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkDims {
    /// Medium border width.
    pub border_width_medium: Dp,
    /// Small corner radius.
    pub radius_small: Dp,
    /// Fully rounded corner radius.
    pub radius_full: Dp,
}

impl Default for SparkDims {
    fn default() -> Self {
        Self {
            border_width_medium: Dp(2.0),
            radius_small: Dp(4.0),
            radius_full: Dp(1000.0),
        }
    }
}

/// A complete token set.
///
/// `version` identifies the token set; bump it whenever any token changes so
/// that controls holding an older theme know to re-resolve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SparkTheme {
    /// Token-set version.
    pub version: u64,
    /// Colors.
    pub colors: SparkColorScheme,
    /// Typography.
    pub typography: SparkTypography,
    /// Geometry.
    pub dims: SparkDims,
}

impl SparkTheme {
    /// Returns a copy with different colors and the next version.
    pub fn with_colors(&self, colors: SparkColorScheme) -> Self {
        Self {
            version: self.version + 1,
            colors,
            ..*self
        }
    }

    /// Applies the hover overlay to `color`.
    pub fn hovered(&self, color: Color) -> Color {
        color.blend_over(self.colors.on_surface, SparkAlpha::DIM_5)
    }

    /// Applies the pressed overlay to `color`.
    pub fn pressed(&self, color: Color) -> Color {
        color.blend_over(self.colors.on_surface, SparkAlpha::DIM_4)
    }
}

//! # Density-Independent Pixels (Dp)
//!
//! Geometry tokens (border widths, radii, dot sizes) are expressed in [`Dp`],
//! a virtual pixel unit that the host renderer scales to the device density.
//! The selection controls never convert to physical pixels themselves.

use std::fmt;

/// Density-independent pixels (dp) for UI scaling.
///
/// ## Examples
///
/// ```
/// use spark_ui::Dp;
///
/// let border = Dp(2.0);
/// let doubled = Dp(border.0 * 2.0);
/// assert_eq!(doubled, Dp(4.0));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// A constant representing zero dp.
    pub const ZERO: Dp = Dp(0.0);

    /// Creates a new `Dp` instance with the specified value.
    pub const fn new(value: f64) -> Self {
        Dp(value)
    }

    /// Linearly interpolates towards `target`; `t` is clamped to `[0.0, 1.0]`.
    pub fn lerp(self, target: Dp, t: f32) -> Dp {
        let factor = f64::from(t.clamp(0.0, 1.0));
        Dp(self.0 + (target.0 - self.0) * factor)
    }
}

impl fmt::Display for Dp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}dp", self.0)
    }
}

impl From<f64> for Dp {
    fn from(value: f64) -> Self {
        Dp(value)
    }
}

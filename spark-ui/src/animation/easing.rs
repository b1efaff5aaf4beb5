//! Progress curves for stage animations.

/// Maps linear stage progress in `[0.0, 1.0]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Cubic ease-in-out.
    #[default]
    EaseInOut,
    /// Cubic ease-out.
    EaseOut,
}

impl Easing {
    /// Applies the curve. Input is clamped to `[0.0, 1.0]`.
    pub fn apply(self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

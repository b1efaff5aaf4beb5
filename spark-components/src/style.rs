//! Resolved visual state of a selection control.
//!
//! A [`StyleSnapshot`] is what a control looks like in one `(intent, state,
//! enabled, interaction)` combination. Snapshots are plain values compared
//! structurally; the transition driver only animates when the target differs
//! from what is on screen.
//!
//! The `blend_*` helpers each own a disjoint group of fields. Controls map
//! their animation stages onto those groups, so a stage only ever touches the
//! properties it owns.

use spark_ui::{Dp, FontToken, Paint};

/// Glyph drawn inside the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndicatorGlyph {
    /// No glyph.
    #[default]
    None,
    /// A checkmark.
    Checkmark,
    /// A horizontal dash, used for indeterminate checkboxes.
    Dash,
    /// A cross, used by the toggle's off icon.
    Cross,
}

/// Immutable bundle of resolved tokens and geometry for one visual state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StyleSnapshot {
    /// Box fill, track or ring interior.
    pub background: Paint,
    /// Outline paint.
    pub border: Paint,
    /// Outline width.
    pub border_width: Dp,
    /// Corner radius of the container.
    pub border_radius: Dp,
    /// Toggle dot or radio inner dot.
    pub foreground: Paint,
    /// Diameter of the foreground indicator.
    pub indicator_size: Dp,
    /// Horizontal position of the indicator inside its track, `0.0..=1.0`.
    pub indicator_offset: f32,
    /// Paint of the glyph.
    pub icon: Paint,
    /// Which glyph is drawn.
    pub glyph: IndicatorGlyph,
    /// Opacity of the glyph.
    pub icon_opacity: f32,
    /// Label paint.
    pub text: Paint,
    /// Label font.
    pub font: FontToken,
    /// Opacity of the whole control.
    pub opacity: f32,
}

fn lerp(from: f32, to: f32, progress: f32) -> f32 {
    from + (to - from) * progress
}

impl StyleSnapshot {
    /// Container paints, outline geometry and label.
    pub fn blend_container(&mut self, from: &Self, to: &Self, progress: f32) {
        self.background = from.background.lerp(&to.background, progress);
        self.border = from.border.lerp(&to.border, progress);
        self.border_width = from.border_width.lerp(to.border_width, progress);
        self.border_radius = from.border_radius.lerp(to.border_radius, progress);
        self.text = from.text.lerp(&to.text, progress);
        // Fonts do not interpolate.
        self.font = to.font;
    }

    /// Whole-control opacity.
    pub fn blend_opacity(&mut self, from: &Self, to: &Self, progress: f32) {
        self.opacity = if progress >= 1.0 {
            to.opacity
        } else {
            lerp(from.opacity, to.opacity, progress)
        };
    }

    /// Foreground paint.
    pub fn blend_foreground(&mut self, from: &Self, to: &Self, progress: f32) {
        self.foreground = from.foreground.lerp(&to.foreground, progress);
    }

    /// Indicator size and position.
    pub fn blend_indicator(&mut self, from: &Self, to: &Self, progress: f32) {
        if progress >= 1.0 {
            self.indicator_size = to.indicator_size;
            self.indicator_offset = to.indicator_offset;
            return;
        }
        self.indicator_size = from.indicator_size.lerp(to.indicator_size, progress);
        self.indicator_offset = lerp(from.indicator_offset, to.indicator_offset, progress);
    }

    /// Glyph paint, shape and opacity.
    ///
    /// Swapping one visible glyph for another fades the old one out during
    /// the first half and the new one in during the second half.
    pub fn blend_icon(&mut self, from: &Self, to: &Self, progress: f32) {
        self.icon = from.icon.lerp(&to.icon, progress);
        if progress >= 1.0 {
            self.glyph = to.glyph;
            self.icon_opacity = to.icon_opacity;
            return;
        }
        match (from.glyph, to.glyph) {
            (old, new) if old == new => {
                self.glyph = new;
                self.icon_opacity = lerp(from.icon_opacity, to.icon_opacity, progress);
            }
            (IndicatorGlyph::None, new) => {
                self.glyph = new;
                self.icon_opacity = lerp(0.0, to.icon_opacity, progress);
            }
            (old, IndicatorGlyph::None) => {
                self.glyph = old;
                self.icon_opacity = lerp(from.icon_opacity, 0.0, progress);
            }
            (old, new) => {
                if progress < 0.5 {
                    self.glyph = old;
                    self.icon_opacity = from.icon_opacity * (1.0 - progress * 2.0);
                } else {
                    self.glyph = new;
                    self.icon_opacity = to.icon_opacity * (progress * 2.0 - 1.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use spark_ui::Color;

    use super::*;

    fn checked() -> StyleSnapshot {
        StyleSnapshot {
            background: Paint::Solid(Color::BLACK),
            glyph: IndicatorGlyph::Checkmark,
            icon: Paint::Solid(Color::WHITE),
            icon_opacity: 1.0,
            opacity: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn snapshots_compare_structurally() {
        assert_eq!(checked(), checked());
        let mut dimmed = checked();
        dimmed.opacity = 0.4;
        assert_ne!(checked(), dimmed);
    }

    #[test]
    fn glyph_swap_crosses_through_invisible() {
        let from = checked();
        let to = StyleSnapshot {
            glyph: IndicatorGlyph::Dash,
            ..checked()
        };
        let mut current = from;

        current.blend_icon(&from, &to, 0.25);
        assert_eq!(current.glyph, IndicatorGlyph::Checkmark);
        assert!((current.icon_opacity - 0.5).abs() < 1e-6);

        current.blend_icon(&from, &to, 0.75);
        assert_eq!(current.glyph, IndicatorGlyph::Dash);
        assert!((current.icon_opacity - 0.5).abs() < 1e-6);

        current.blend_icon(&from, &to, 1.0);
        assert_eq!(current.glyph, IndicatorGlyph::Dash);
        assert_eq!(current.icon_opacity, 1.0);
    }

    #[test]
    fn glyph_appears_from_none() {
        let from = StyleSnapshot {
            glyph: IndicatorGlyph::None,
            icon_opacity: 0.0,
            ..checked()
        };
        let to = checked();
        let mut current = from;
        current.blend_icon(&from, &to, 0.5);
        assert_eq!(current.glyph, IndicatorGlyph::Checkmark);
        assert!((current.icon_opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn full_progress_reaches_target_exactly() {
        let from = StyleSnapshot::default();
        let to = StyleSnapshot {
            indicator_size: Dp(10.0),
            indicator_offset: 1.0,
            border_width: Dp(2.0),
            ..checked()
        };
        let mut current = from;
        current.blend_container(&from, &to, 1.0);
        current.blend_opacity(&from, &to, 1.0);
        current.blend_foreground(&from, &to, 1.0);
        current.blend_indicator(&from, &to, 1.0);
        current.blend_icon(&from, &to, 1.0);
        assert_eq!(current, to);
    }
}

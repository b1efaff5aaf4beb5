//! An animated radio button.
//!
//! ## Usage
//!
//! Use inside a [`RadioButtonGroup`](crate::radio_button_group::RadioButtonGroup)
//! for a single choice out of several. A radio button never deselects its
//! siblings itself; mutual exclusion belongs to the group.
use std::time::Instant;

use derive_setters::Setters;
use spark_ui::{
    Callback, Context, Dp, Paint,
    accesskit::Role,
    animation::{
        Completion, PRIMARY_STAGE_DURATION, Stage, StageSet, StageSpec, Staged, TrackerHandle,
        TransitionOutcome, TransitionToken,
    },
};
use tracing::debug;

use crate::{
    accessibility::{self, AccessibilitySemantics, toggled_from},
    control::ControlCore,
    selection_controls::{
        Interaction, SelectionControlsAlignment, SelectionControlsConfig, SelectionControlsIntent,
    },
    style::{IndicatorGlyph, StyleSnapshot},
    theme::{SparkAlpha, SparkTheme},
};

/// Animation stages of a radio button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadioButtonStage {
    /// Ring color and label.
    Ring,
    /// Inner dot scale and color.
    Dot,
}

impl Stage for RadioButtonStage {
    const TIMELINE: &'static [StageSpec<Self>] = &[
        StageSpec::new(RadioButtonStage::Ring, PRIMARY_STAGE_DURATION),
        StageSpec::new(RadioButtonStage::Dot, PRIMARY_STAGE_DURATION),
    ];
}

impl Staged<RadioButtonStage> for StyleSnapshot {
    fn blend_stage(&mut self, stage: RadioButtonStage, from: &Self, to: &Self, progress: f32) {
        match stage {
            RadioButtonStage::Ring => {
                self.blend_container(from, to, progress);
                self.blend_opacity(from, to, progress);
                self.blend_icon(from, to, progress);
            }
            RadioButtonStage::Dot => {
                self.blend_foreground(from, to, progress);
                self.blend_indicator(from, to, progress);
            }
        }
    }
}

/// Spark defaults for [`RadioButton`].
pub struct RadioButtonDefaults;

impl RadioButtonDefaults {
    /// Outer ring diameter.
    pub const SIZE: Dp = Dp(20.0);
    /// Inner dot diameter when selected.
    pub const DOT_SIZE: Dp = Dp(10.0);

    /// Resolves the snapshot for one combination of inputs.
    pub fn resolve_style(
        theme: &SparkTheme,
        intent: SelectionControlsIntent,
        selected: bool,
        enabled: bool,
        interaction: Interaction,
    ) -> StyleSnapshot {
        let scheme = &theme.colors;
        let colors = scheme.intent(intent);
        let background = match (enabled, interaction) {
            (true, Interaction { pressed: true, .. }) => theme.pressed(scheme.surface),
            (true, Interaction { hovered: true, .. }) => theme.hovered(scheme.surface),
            _ => scheme.surface,
        };
        StyleSnapshot {
            background: Paint::Solid(background),
            border: Paint::Solid(colors.color),
            border_width: theme.dims.border_width_medium,
            border_radius: theme.dims.radius_full,
            foreground: Paint::Solid(colors.color),
            indicator_size: if selected { Self::DOT_SIZE } else { Dp::ZERO },
            indicator_offset: 0.5,
            icon: Paint::Clear,
            glyph: IndicatorGlyph::None,
            icon_opacity: 0.0,
            text: Paint::Solid(scheme.on_surface),
            font: theme.typography.body1,
            opacity: if enabled { 1.0 } else { SparkAlpha::DIM_3 },
        }
    }
}

/// Arguments for [`RadioButton`].
#[derive(PartialEq, Clone, Setters)]
pub struct RadioButtonArgs {
    /// Label shown next to the button.
    #[setters(strip_option, into)]
    pub title: Option<String>,
    /// Initial selection.
    pub selected: bool,
    /// Intent override. Inherited from the context when `None`.
    #[setters(strip_option)]
    pub intent: Option<SelectionControlsIntent>,
    /// Label position override. Inherited from the context when `None`.
    #[setters(strip_option)]
    pub alignment: Option<SelectionControlsAlignment>,
    /// Whether the button accepts input.
    pub enabled: bool,
    /// Accessibility label; falls back to `title`.
    #[setters(strip_option, into)]
    pub accessibility_label: Option<String>,
    /// Accessibility identifier of the root node.
    #[setters(into)]
    pub identifier: String,
    /// Stage timeline, for per-stage duration overrides.
    pub stages: StageSet<RadioButtonStage>,
}

impl Default for RadioButtonArgs {
    fn default() -> Self {
        Self {
            title: None,
            selected: false,
            intent: None,
            alignment: None,
            enabled: true,
            accessibility_label: None,
            identifier: accessibility::RADIO_BUTTON.to_string(),
            stages: StageSet::declared(),
        }
    }
}

/// View-model of one radio button.
pub struct RadioButton {
    title: Option<String>,
    accessibility_label: Option<String>,
    identifier: String,
    alignment: SelectionControlsAlignment,
    selected: bool,
    core: ControlCore<RadioButtonStage>,
}

impl RadioButton {
    /// Creates a radio button showing `args.selected` without animation.
    pub fn new(ctx: &Context, args: RadioButtonArgs) -> Self {
        let selected = args.selected;
        let alignment = args
            .alignment
            .unwrap_or(ctx.get::<SelectionControlsConfig>().alignment);
        let core = ControlCore::new(
            ctx,
            args.intent,
            args.enabled,
            args.stages,
            |theme, intent, enabled| {
                RadioButtonDefaults::resolve_style(
                    theme,
                    intent,
                    selected,
                    enabled,
                    Interaction::default(),
                )
            },
        );
        Self {
            title: args.title,
            accessibility_label: args.accessibility_label,
            identifier: args.identifier,
            alignment,
            selected,
            core,
        }
    }

    /// Whether the button is selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Label shown next to the button.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Which side of the label the button sits on.
    pub fn alignment(&self) -> SelectionControlsAlignment {
        self.alignment
    }

    /// Current intent.
    pub fn intent(&self) -> SelectionControlsIntent {
        self.core.intent
    }

    /// Whether the button accepts input.
    pub fn is_enabled(&self) -> bool {
        self.core.enabled
    }

    /// Selects or deselects the button, animating unless motion is reduced.
    pub fn set_selection(
        &mut self,
        selected: bool,
        now: Instant,
    ) -> TransitionOutcome<RadioButtonStage> {
        self.selected = selected;
        self.restyle(now)
    }

    /// Enables or disables the button.
    pub fn set_enabled(&mut self, enabled: bool, now: Instant) {
        if self.core.enabled != enabled {
            self.core.enabled = enabled;
            self.restyle(now);
        }
    }

    /// Changes the intent.
    pub fn set_intent(&mut self, intent: SelectionControlsIntent, now: Instant) {
        if self.core.intent != intent {
            self.core.intent = intent;
            self.restyle(now);
        }
    }

    /// Updates the hover flag.
    pub fn set_hovered(&mut self, hovered: bool, now: Instant) {
        if self.core.interaction.hovered != hovered {
            self.core.interaction.hovered = hovered;
            self.restyle(now);
        }
    }

    /// Updates the pressed flag.
    pub fn set_pressed(&mut self, pressed: bool, now: Instant) {
        if self.core.interaction.pressed != pressed {
            self.core.interaction.pressed = pressed;
            self.restyle(now);
        }
    }

    /// Switches to another token set. The new style is applied at once.
    pub fn set_theme(&mut self, theme: SparkTheme, now: Instant) {
        if self.core.replace_theme(theme) {
            let style = self.style();
            self.core.apply_now(style, now);
        }
    }

    /// The snapshot resolved from the current inputs.
    pub fn style(&self) -> StyleSnapshot {
        RadioButtonDefaults::resolve_style(
            &self.core.theme,
            self.core.intent,
            self.selected,
            self.core.enabled,
            self.core.interaction,
        )
    }

    /// The snapshot currently on screen.
    pub fn rendered(&self) -> &StyleSnapshot {
        self.core.rendered()
    }

    /// Advances the running transition to `now`.
    pub fn tick(&mut self, now: Instant) -> Option<TransitionToken> {
        self.core.tick(now)
    }

    /// Reports a stage finished by a host-driven animation.
    pub fn report_complete(
        &mut self,
        handle: TrackerHandle<RadioButtonStage>,
        stage: RadioButtonStage,
        now: Instant,
    ) -> Completion {
        self.core.report_complete(handle, stage, now)
    }

    /// Handle of the running transition, if any.
    pub fn active_handle(&self) -> Option<TrackerHandle<RadioButtonStage>> {
        self.core.active_handle()
    }

    /// Returns `true` while a transition is running.
    pub fn is_animating(&self) -> bool {
        self.core.is_animating()
    }

    /// Accessibility description of the button.
    pub fn accessibility(&self) -> AccessibilitySemantics {
        AccessibilitySemantics::new(self.identifier.clone(), Role::RadioButton)
            .label(self.accessibility_label.clone().or_else(|| self.title.clone()))
            .toggled(toggled_from(self.selected))
            .enabled(self.core.enabled)
    }

    fn restyle(&mut self, now: Instant) -> TransitionOutcome<RadioButtonStage> {
        let target = self.style();
        let selected = self.selected;
        self.core.animate_to(
            target,
            Callback::new(move || debug!(selected, "radio button settled")),
            now,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use spark_ui::MotionSettings;

    use super::*;

    #[test]
    fn ring_and_dot_run_together() {
        let start = Instant::now();
        let mut radio = RadioButton::new(&Context::new(), RadioButtonArgs::default());
        assert_eq!(radio.rendered().indicator_size, Dp::ZERO);

        let TransitionOutcome::Animating(handle) = radio.set_selection(true, start) else {
            panic!("expected an animated transition");
        };
        assert_eq!(radio.tick(start + Duration::from_millis(100)), None);
        let size = radio.rendered().indicator_size;
        assert!(size > Dp::ZERO && size < RadioButtonDefaults::DOT_SIZE);

        assert_eq!(
            radio.tick(start + Duration::from_millis(200)),
            Some(handle.token())
        );
        assert_eq!(radio.rendered().indicator_size, RadioButtonDefaults::DOT_SIZE);
    }

    #[test]
    fn unchanged_selection_settles_without_animation() {
        let mut radio = RadioButton::new(
            &Context::new(),
            RadioButtonArgs::default().selected(true),
        );
        assert!(radio.set_selection(true, Instant::now()).is_settled());
        assert!(!radio.is_animating());
    }

    #[test]
    fn reduced_motion_and_alignment_come_from_context() {
        let ctx = Context::new()
            .provide(MotionSettings::new(true))
            .provide(SelectionControlsConfig {
                alignment: SelectionControlsAlignment::Trailing,
                ..Default::default()
            });
        let mut radio = RadioButton::new(&ctx, RadioButtonArgs::default().title("Email"));
        assert_eq!(radio.alignment(), SelectionControlsAlignment::Trailing);
        assert!(radio.set_selection(true, Instant::now()).is_settled());
        assert_eq!(*radio.rendered(), radio.style());
    }

    #[test]
    fn accessibility_uses_radio_role() {
        let radio = RadioButton::new(
            &Context::new(),
            RadioButtonArgs::default().title("Email").enabled(false),
        );
        let semantics = radio.accessibility();
        assert_eq!(semantics.role, Role::RadioButton);
        assert_eq!(semantics.identifier, accessibility::RADIO_BUTTON);
        assert!(!semantics.enabled);
    }
}

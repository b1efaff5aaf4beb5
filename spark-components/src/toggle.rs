//! An animated on/off toggle.
//!
//! ## Usage
//!
//! Use for settings that take effect immediately, such as enabling Wi-Fi.
//!
//! A flip runs three stages: the track and dot colors crossfade while the
//! dot travels, and the dot icon swaps once the dot has arrived. The dot
//! stays expanded from the flip until every stage has settled.
use std::time::Instant;

use derive_setters::Setters;
use spark_ui::{
    Callback, CallbackWith, Context, Dp, Paint, State,
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

/// Animation stages of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleStage {
    /// Track, dot and label colors.
    DynamicColors,
    /// Dot travel along the track.
    ShowSpace,
    /// Dot icon swap, once the dot has arrived.
    IsIcon,
}

impl Stage for ToggleStage {
    const TIMELINE: &'static [StageSpec<Self>] = &[
        StageSpec::new(ToggleStage::DynamicColors, PRIMARY_STAGE_DURATION),
        StageSpec::new(ToggleStage::ShowSpace, PRIMARY_STAGE_DURATION),
        StageSpec::new(ToggleStage::IsIcon, PRIMARY_STAGE_DURATION).after(ToggleStage::ShowSpace),
    ];
}

impl Staged<ToggleStage> for StyleSnapshot {
    fn blend_stage(&mut self, stage: ToggleStage, from: &Self, to: &Self, progress: f32) {
        match stage {
            ToggleStage::DynamicColors => {
                self.blend_container(from, to, progress);
                self.blend_opacity(from, to, progress);
                self.blend_foreground(from, to, progress);
            }
            ToggleStage::ShowSpace => self.blend_indicator(from, to, progress),
            ToggleStage::IsIcon => self.blend_icon(from, to, progress),
        }
    }
}

/// Spark defaults for [`Toggle`].
pub struct ToggleDefaults;

impl ToggleDefaults {
    /// Track width.
    pub const TRACK_WIDTH: Dp = Dp(52.0);
    /// Track height.
    pub const TRACK_HEIGHT: Dp = Dp(32.0);
    /// Dot diameter at rest.
    pub const DOT_SIZE: Dp = Dp(24.0);
    /// Dot diameter while pressed or flipping.
    pub const DOT_EXPANDED_SIZE: Dp = Dp(28.0);

    /// Resolves the snapshot for one combination of inputs.
    pub fn resolve_style(
        theme: &SparkTheme,
        intent: SelectionControlsIntent,
        is_on: bool,
        show_icon: bool,
        enabled: bool,
        interaction: Interaction,
    ) -> StyleSnapshot {
        let scheme = &theme.colors;
        let colors = scheme.intent(intent);
        let track = if is_on { colors.color } else { scheme.outline };
        let track = if !enabled {
            track
        } else if interaction.pressed {
            theme.pressed(track)
        } else if interaction.hovered {
            theme.hovered(track)
        } else {
            track
        };
        let (glyph, icon_opacity) = match (show_icon, is_on) {
            (false, _) => (IndicatorGlyph::None, 0.0),
            (true, true) => (IndicatorGlyph::Checkmark, 1.0),
            (true, false) => (IndicatorGlyph::Cross, 1.0),
        };
        StyleSnapshot {
            background: Paint::Solid(track),
            border: Paint::Clear,
            border_width: Dp::ZERO,
            border_radius: theme.dims.radius_full,
            foreground: Paint::Solid(scheme.surface),
            indicator_size: Self::DOT_SIZE,
            indicator_offset: if is_on { 1.0 } else { 0.0 },
            icon: Paint::Solid(if is_on { colors.color } else { scheme.outline }),
            glyph,
            icon_opacity,
            text: Paint::Solid(scheme.on_surface),
            font: theme.typography.body1,
            opacity: if enabled { 1.0 } else { SparkAlpha::DIM_3 },
        }
    }
}

/// Arguments for [`Toggle`].
#[derive(PartialEq, Clone, Setters)]
pub struct ToggleArgs {
    /// Label shown next to the track.
    #[setters(strip_option, into)]
    pub label: Option<String>,
    /// Initial value.
    pub is_on: bool,
    /// Draws a check or cross inside the dot.
    pub show_icon: bool,
    /// Intent override. Inherited from the context when `None`.
    #[setters(strip_option)]
    pub intent: Option<SelectionControlsIntent>,
    /// Label position override. Inherited from the context when `None`.
    #[setters(strip_option)]
    pub alignment: Option<SelectionControlsAlignment>,
    /// Whether the toggle accepts input.
    pub enabled: bool,
    /// Accessibility label; falls back to `label`.
    #[setters(strip_option, into)]
    pub accessibility_label: Option<String>,
    /// Stage timeline, for per-stage duration overrides.
    pub stages: StageSet<ToggleStage>,
    /// Called with the new value after a user flip.
    #[setters(skip)]
    pub on_toggle: CallbackWith<bool>,
}

impl ToggleArgs {
    /// Sets the on_toggle handler.
    pub fn on_toggle<F>(mut self, on_toggle: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_toggle = CallbackWith::new(on_toggle);
        self
    }

    /// Sets the on_toggle handler using a shared callback.
    pub fn on_toggle_shared(mut self, on_toggle: impl Into<CallbackWith<bool>>) -> Self {
        self.on_toggle = on_toggle.into();
        self
    }
}

impl Default for ToggleArgs {
    fn default() -> Self {
        Self {
            label: None,
            is_on: false,
            show_icon: true,
            intent: None,
            alignment: None,
            enabled: true,
            accessibility_label: None,
            stages: StageSet::declared(),
            on_toggle: CallbackWith::default(),
        }
    }
}

#[derive(Debug, Default)]
struct TransientFlags {
    dot_expanded: bool,
    pressed: bool,
}

/// View-model of one toggle.
pub struct Toggle {
    label: Option<String>,
    accessibility_label: Option<String>,
    show_icon: bool,
    alignment: SelectionControlsAlignment,
    on_toggle: CallbackWith<bool>,
    is_on: bool,
    flags: State<TransientFlags>,
    core: ControlCore<ToggleStage>,
}

impl Toggle {
    /// Creates a toggle showing `args.is_on` without animation.
    pub fn new(ctx: &Context, args: ToggleArgs) -> Self {
        let is_on = args.is_on;
        let show_icon = args.show_icon;
        let alignment = args
            .alignment
            .unwrap_or(ctx.get::<SelectionControlsConfig>().alignment);
        let core = ControlCore::new(
            ctx,
            args.intent,
            args.enabled,
            args.stages,
            |theme, intent, enabled| {
                ToggleDefaults::resolve_style(
                    theme,
                    intent,
                    is_on,
                    show_icon,
                    enabled,
                    Interaction::default(),
                )
            },
        );
        Self {
            label: args.label,
            accessibility_label: args.accessibility_label,
            show_icon,
            alignment,
            on_toggle: args.on_toggle,
            is_on,
            flags: State::default(),
            core,
        }
    }

    /// Current value.
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Label shown next to the track.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Which side of the label the track sits on.
    pub fn alignment(&self) -> SelectionControlsAlignment {
        self.alignment
    }

    /// Current intent.
    pub fn intent(&self) -> SelectionControlsIntent {
        self.core.intent
    }

    /// Whether the toggle accepts input.
    pub fn is_enabled(&self) -> bool {
        self.core.enabled
    }

    /// Whether the dot is expanded.
    ///
    /// Set while pressed and by every animated flip; a flip clears it only
    /// once all of its stages have settled.
    pub fn is_dot_expanded(&self) -> bool {
        self.flags.with(|flags| flags.dot_expanded)
    }

    /// Diameter to draw the dot at this frame.
    ///
    /// [`ToggleDefaults::DOT_EXPANDED_SIZE`] while the dot is expanded,
    /// otherwise the rendered indicator size.
    pub fn dot_size(&self) -> Dp {
        if self.is_dot_expanded() {
            ToggleDefaults::DOT_EXPANDED_SIZE
        } else {
            self.rendered().indicator_size
        }
    }

    /// Sets the value, animating unless motion is reduced.
    ///
    /// Programmatic changes do not call `on_toggle`.
    pub fn set_on(&mut self, is_on: bool, now: Instant) -> TransitionOutcome<ToggleStage> {
        if self.is_on != is_on {
            debug!(is_on, "toggle flipped");
            self.is_on = is_on;
            self.flags.with_mut(|flags| flags.dot_expanded = true);
        }
        self.restyle(now)
    }

    /// Handles a user tap. Disabled toggles ignore it.
    pub fn toggle(&mut self, now: Instant) -> Option<TransitionOutcome<ToggleStage>> {
        if !self.core.enabled {
            return None;
        }
        let next = !self.is_on;
        let outcome = self.set_on(next, now);
        self.on_toggle.call(next);
        Some(outcome)
    }

    /// Enables or disables the toggle.
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

    /// Updates the pressed flag. Pressing expands the dot.
    pub fn set_pressed(&mut self, pressed: bool, now: Instant) {
        if self.core.interaction.pressed == pressed {
            return;
        }
        self.core.interaction.pressed = pressed;
        self.flags.with_mut(|flags| {
            flags.pressed = pressed;
            if pressed {
                flags.dot_expanded = true;
            }
        });
        self.restyle(now);
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
        ToggleDefaults::resolve_style(
            &self.core.theme,
            self.core.intent,
            self.is_on,
            self.show_icon,
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
        handle: TrackerHandle<ToggleStage>,
        stage: ToggleStage,
        now: Instant,
    ) -> Completion {
        self.core.report_complete(handle, stage, now)
    }

    /// Handle of the running transition, if any.
    pub fn active_handle(&self) -> Option<TrackerHandle<ToggleStage>> {
        self.core.active_handle()
    }

    /// Returns `true` while a transition is running.
    pub fn is_animating(&self) -> bool {
        self.core.is_animating()
    }

    /// Accessibility description of the switch.
    pub fn accessibility(&self) -> AccessibilitySemantics {
        AccessibilitySemantics::new(accessibility::TOGGLE, Role::Switch)
            .label(self.accessibility_label.clone().or_else(|| self.label.clone()))
            .toggled(toggled_from(self.is_on))
            .enabled(self.core.enabled)
    }

    /// Accessibility description of the label, when there is one.
    pub fn label_accessibility(&self) -> Option<AccessibilitySemantics> {
        self.label.as_ref().map(|label| {
            AccessibilitySemantics::new(accessibility::TOGGLE_LABEL, Role::Label)
                .label(Some(label.clone()))
                .enabled(self.core.enabled)
        })
    }

    fn restyle(&mut self, now: Instant) -> TransitionOutcome<ToggleStage> {
        let target = self.style();
        let flags = self.flags.clone();
        let is_on = self.is_on;
        self.core.animate_to(
            target,
            Callback::new(move || {
                flags.with_mut(|flags| {
                    if !flags.pressed {
                        flags.dot_expanded = false;
                    }
                });
                debug!(is_on, "toggle settled");
            }),
            now,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use spark_ui::MotionSettings;

    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn declared_timeline_is_valid() {
        let stages = StageSet::<ToggleStage>::declared();
        assert_eq!(stages.validate(), Ok(()));
        assert_eq!(stages.total_duration(), ms(400));
    }

    #[test]
    fn icon_waits_for_dot_travel() {
        let start = Instant::now();
        let mut toggle = Toggle::new(&Context::new(), ToggleArgs::default());
        assert_eq!(toggle.rendered().glyph, IndicatorGlyph::Cross);

        toggle.toggle(start);
        toggle.tick(start + ms(100));
        let rendered = *toggle.rendered();
        assert!(rendered.indicator_offset > 0.0 && rendered.indicator_offset < 1.0);
        assert_eq!(rendered.glyph, IndicatorGlyph::Cross);
        assert_eq!(rendered.icon_opacity, 1.0);

        toggle.tick(start + ms(300));
        assert_eq!(toggle.rendered().indicator_offset, 1.0);
        assert_eq!(toggle.rendered().glyph, IndicatorGlyph::Checkmark);

        assert!(toggle.tick(start + ms(400)).is_some());
        assert_eq!(*toggle.rendered(), toggle.style());
    }

    #[test]
    fn dot_stays_expanded_until_fully_settled() {
        let start = Instant::now();
        let mut toggle = Toggle::new(&Context::new(), ToggleArgs::default());
        assert!(!toggle.is_dot_expanded());

        toggle.set_on(true, start);
        assert!(toggle.is_dot_expanded());
        toggle.tick(start + ms(200));
        assert_eq!(toggle.rendered().indicator_offset, 1.0);
        assert!(toggle.is_dot_expanded());
        toggle.tick(start + ms(400));
        assert!(!toggle.is_dot_expanded());
    }

    #[test]
    fn dot_is_drawn_expanded_while_flipping_or_pressed() {
        let start = Instant::now();
        let mut toggle = Toggle::new(&Context::new(), ToggleArgs::default());
        assert_eq!(toggle.dot_size(), ToggleDefaults::DOT_SIZE);

        toggle.set_on(true, start);
        assert_eq!(toggle.dot_size(), ToggleDefaults::DOT_EXPANDED_SIZE);
        toggle.tick(start + ms(400));
        assert_eq!(toggle.dot_size(), ToggleDefaults::DOT_SIZE);

        toggle.set_pressed(true, start + ms(500));
        assert_eq!(toggle.dot_size(), ToggleDefaults::DOT_EXPANDED_SIZE);
        toggle.set_pressed(false, start + ms(600));
        toggle.tick(start + ms(1600));
        assert_eq!(toggle.dot_size(), ToggleDefaults::DOT_SIZE);
    }

    #[test]
    fn superseding_flip_clears_on_its_own_settle() {
        let start = Instant::now();
        let mut toggle = Toggle::new(&Context::new(), ToggleArgs::default());
        let TransitionOutcome::Animating(first) = toggle.set_on(true, start) else {
            panic!("expected an animated transition");
        };
        toggle.tick(start + ms(50));
        toggle.set_on(false, start + ms(50));

        for stage in [
            ToggleStage::DynamicColors,
            ToggleStage::ShowSpace,
            ToggleStage::IsIcon,
        ] {
            assert_eq!(
                toggle.report_complete(first, stage, start + ms(60)),
                Completion::Stale
            );
        }
        assert!(toggle.is_dot_expanded());

        assert!(toggle.tick(start + ms(1000)).is_some());
        assert!(!toggle.is_dot_expanded());
        assert!(!toggle.is_on());
        assert_eq!(toggle.rendered().indicator_offset, 0.0);
    }

    #[test]
    fn host_reported_stages_settle_in_any_order() {
        let start = Instant::now();
        let mut toggle = Toggle::new(&Context::new(), ToggleArgs::default());
        let TransitionOutcome::Animating(handle) = toggle.set_on(true, start) else {
            panic!("expected an animated transition");
        };
        assert_eq!(
            toggle.report_complete(handle, ToggleStage::ShowSpace, start),
            Completion::Recorded { remaining: 2 }
        );
        assert_eq!(
            toggle.report_complete(handle, ToggleStage::IsIcon, start),
            Completion::Recorded { remaining: 1 }
        );
        assert!(toggle.is_dot_expanded());
        assert_eq!(
            toggle.report_complete(handle, ToggleStage::DynamicColors, start),
            Completion::Settled
        );
        assert!(!toggle.is_dot_expanded());
        assert_eq!(*toggle.rendered(), toggle.style());
    }

    #[test]
    fn reduced_motion_flip_settles_before_returning() {
        let flips = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&flips);
        let ctx = Context::new().provide(MotionSettings::new(true));
        let mut toggle = Toggle::new(
            &ctx,
            ToggleArgs::default().on_toggle(move |_| {
                sink.fetch_add(1, Ordering::SeqCst);
            }),
        );
        let outcome = toggle.toggle(Instant::now());
        assert_eq!(outcome, Some(TransitionOutcome::Settled));
        assert!(toggle.is_on());
        assert!(!toggle.is_dot_expanded());
        assert_eq!(flips.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn pressing_keeps_dot_expanded() {
        let start = Instant::now();
        let mut toggle = Toggle::new(&Context::new(), ToggleArgs::default());
        toggle.set_pressed(true, start);
        assert!(toggle.is_dot_expanded());
        toggle.tick(start + ms(1000));
        assert!(toggle.is_dot_expanded());

        toggle.set_pressed(false, start + ms(1000));
        toggle.tick(start + ms(2000));
        assert!(!toggle.is_dot_expanded());
    }

    #[test]
    fn disabled_toggle_ignores_taps() {
        let mut toggle = Toggle::new(
            &Context::new(),
            ToggleArgs::default().enabled(false).label("Wi-Fi"),
        );
        assert!(toggle.toggle(Instant::now()).is_none());
        assert!(!toggle.is_on());
        let semantics = toggle.accessibility();
        assert_eq!(semantics.role, Role::Switch);
        assert_eq!(semantics.label.as_deref(), Some("Wi-Fi"));
        let label = toggle.label_accessibility();
        assert_eq!(
            label.map(|l| l.identifier),
            Some(accessibility::TOGGLE_LABEL.to_string())
        );
    }
}

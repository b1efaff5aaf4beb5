//! A tri-state, animated checkbox.
//!
//! ## Usage
//!
//! Use in forms, settings or lists for independent on/off choices, and for
//! "select all" rows whose children are partially selected.
use std::time::Instant;

use derive_setters::Setters;
use spark_ui::{
    Callback, CallbackWith, Context, Dp, Paint,
    accesskit::{Role, Toggled},
    animation::{
        Completion, PRIMARY_STAGE_DURATION, SECONDARY_STAGE_DURATION, Stage, StageSet, StageSpec,
        Staged, TrackerHandle, TransitionOutcome, TransitionToken,
    },
};
use tracing::debug;

use crate::{
    accessibility::{self, AccessibilitySemantics},
    control::ControlCore,
    selection_controls::{Interaction, SelectionControlsIntent},
    style::{IndicatorGlyph, StyleSnapshot},
    theme::{SparkAlpha, SparkTheme},
};

/// Selection state of a checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckboxSelectionState {
    /// Checked.
    Selected,
    /// Partially checked; drawn with a dash.
    Indeterminate,
    /// Not checked.
    #[default]
    Unselected,
}

impl CheckboxSelectionState {
    /// The state a user tap moves to.
    ///
    /// Indeterminate and unselected both become selected; selected becomes
    /// unselected.
    pub fn toggled(self) -> Self {
        match self {
            CheckboxSelectionState::Selected => CheckboxSelectionState::Unselected,
            CheckboxSelectionState::Indeterminate | CheckboxSelectionState::Unselected => {
                CheckboxSelectionState::Selected
            }
        }
    }

    fn accessibility_toggled(self) -> Toggled {
        match self {
            CheckboxSelectionState::Selected => Toggled::True,
            CheckboxSelectionState::Indeterminate => Toggled::Mixed,
            CheckboxSelectionState::Unselected => Toggled::False,
        }
    }
}

/// Animation stages of a checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckboxStage {
    /// Box fill, outline and label.
    Fill,
    /// Checkmark or dash reveal, once the fill has finished.
    Icon,
}

impl Stage for CheckboxStage {
    const TIMELINE: &'static [StageSpec<Self>] = &[
        StageSpec::new(CheckboxStage::Fill, PRIMARY_STAGE_DURATION),
        StageSpec::new(CheckboxStage::Icon, SECONDARY_STAGE_DURATION).after(CheckboxStage::Fill),
    ];
}

impl Staged<CheckboxStage> for StyleSnapshot {
    fn blend_stage(&mut self, stage: CheckboxStage, from: &Self, to: &Self, progress: f32) {
        match stage {
            CheckboxStage::Fill => {
                self.blend_container(from, to, progress);
                self.blend_opacity(from, to, progress);
                self.blend_foreground(from, to, progress);
                self.blend_indicator(from, to, progress);
            }
            CheckboxStage::Icon => self.blend_icon(from, to, progress),
        }
    }
}

/// Spark defaults for [`Checkbox`].
pub struct CheckboxDefaults;

impl CheckboxDefaults {
    /// Edge length of the box.
    pub const SIZE: Dp = Dp(20.0);
    /// Minimum recommended touch target size.
    pub const TOUCH_TARGET_SIZE: Dp = Dp(44.0);

    /// Resolves the snapshot for one combination of inputs.
    pub fn resolve_style(
        theme: &SparkTheme,
        intent: SelectionControlsIntent,
        state: CheckboxSelectionState,
        enabled: bool,
        interaction: Interaction,
    ) -> StyleSnapshot {
        let scheme = &theme.colors;
        let colors = scheme.intent(intent);
        let filled = state != CheckboxSelectionState::Unselected;

        let mut background = if filled { colors.color } else { scheme.surface };
        if enabled && interaction.pressed {
            background = theme.pressed(background);
        } else if enabled && interaction.hovered {
            background = theme.hovered(background);
        }
        let glyph = match state {
            CheckboxSelectionState::Selected => IndicatorGlyph::Checkmark,
            CheckboxSelectionState::Indeterminate => IndicatorGlyph::Dash,
            CheckboxSelectionState::Unselected => IndicatorGlyph::None,
        };

        StyleSnapshot {
            background: Paint::Solid(background),
            border: Paint::Solid(colors.color),
            border_width: theme.dims.border_width_medium,
            border_radius: theme.dims.radius_small,
            foreground: Paint::Clear,
            indicator_size: Dp::ZERO,
            indicator_offset: 0.0,
            icon: Paint::Solid(colors.on_color),
            glyph,
            icon_opacity: if filled { 1.0 } else { 0.0 },
            text: Paint::Solid(scheme.on_surface),
            font: theme.typography.body1,
            opacity: if enabled { 1.0 } else { SparkAlpha::DIM_3 },
        }
    }
}

/// Arguments for [`Checkbox`].
#[derive(PartialEq, Clone, Setters)]
pub struct CheckboxArgs {
    /// Label shown next to the box.
    #[setters(strip_option, into)]
    pub title: Option<String>,
    /// Initial selection state.
    pub selection_state: CheckboxSelectionState,
    /// Intent override. Inherited from the context when `None`.
    #[setters(strip_option)]
    pub intent: Option<SelectionControlsIntent>,
    /// Whether the checkbox accepts input.
    pub enabled: bool,
    /// Accessibility label; falls back to `title`.
    #[setters(strip_option, into)]
    pub accessibility_label: Option<String>,
    /// Accessibility identifier of the root node.
    #[setters(into)]
    pub identifier: String,
    /// Stage timeline, for per-stage duration overrides.
    pub stages: StageSet<CheckboxStage>,
    /// Called with the new state after a user toggle.
    #[setters(skip)]
    pub on_change: CallbackWith<CheckboxSelectionState>,
}

impl CheckboxArgs {
    /// Sets the on_change handler.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(CheckboxSelectionState) + Send + Sync + 'static,
    {
        self.on_change = CallbackWith::new(on_change);
        self
    }

    /// Sets the on_change handler using a shared callback.
    pub fn on_change_shared(
        mut self,
        on_change: impl Into<CallbackWith<CheckboxSelectionState>>,
    ) -> Self {
        self.on_change = on_change.into();
        self
    }
}

impl Default for CheckboxArgs {
    fn default() -> Self {
        Self {
            title: None,
            selection_state: CheckboxSelectionState::default(),
            intent: None,
            enabled: true,
            accessibility_label: None,
            identifier: accessibility::CHECKBOX.to_string(),
            stages: StageSet::declared(),
            on_change: CallbackWith::default(),
        }
    }
}

/// View-model of one checkbox.
pub struct Checkbox {
    title: Option<String>,
    accessibility_label: Option<String>,
    identifier: String,
    on_change: CallbackWith<CheckboxSelectionState>,
    state: CheckboxSelectionState,
    core: ControlCore<CheckboxStage>,
}

impl Checkbox {
    /// Creates a checkbox showing `args.selection_state` without animation.
    pub fn new(ctx: &Context, args: CheckboxArgs) -> Self {
        let state = args.selection_state;
        let core = ControlCore::new(
            ctx,
            args.intent,
            args.enabled,
            args.stages,
            |theme, intent, enabled| {
                CheckboxDefaults::resolve_style(
                    theme,
                    intent,
                    state,
                    enabled,
                    Interaction::default(),
                )
            },
        );
        Self {
            title: args.title,
            accessibility_label: args.accessibility_label,
            identifier: args.identifier,
            on_change: args.on_change,
            state,
            core,
        }
    }

    /// Current selection state.
    pub fn selection_state(&self) -> CheckboxSelectionState {
        self.state
    }

    /// Label shown next to the box.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Current intent.
    pub fn intent(&self) -> SelectionControlsIntent {
        self.core.intent
    }

    /// Whether the checkbox accepts input.
    pub fn is_enabled(&self) -> bool {
        self.core.enabled
    }

    /// Moves to `state`, animating unless motion is reduced.
    ///
    /// Programmatic changes do not call `on_change`.
    pub fn set_selection(
        &mut self,
        state: CheckboxSelectionState,
        now: Instant,
    ) -> TransitionOutcome<CheckboxStage> {
        debug!(from = ?self.state, to = ?state, "checkbox selection changed");
        self.state = state;
        self.restyle(now)
    }

    /// Handles a user tap. Disabled checkboxes ignore it.
    pub fn toggle(&mut self, now: Instant) -> Option<TransitionOutcome<CheckboxStage>> {
        if !self.core.enabled {
            return None;
        }
        let next = self.state.toggled();
        let outcome = self.set_selection(next, now);
        self.on_change.call(next);
        Some(outcome)
    }

    /// Enables or disables the checkbox.
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
        CheckboxDefaults::resolve_style(
            &self.core.theme,
            self.core.intent,
            self.state,
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
        handle: TrackerHandle<CheckboxStage>,
        stage: CheckboxStage,
        now: Instant,
    ) -> Completion {
        self.core.report_complete(handle, stage, now)
    }

    /// Handle of the running transition, if any.
    pub fn active_handle(&self) -> Option<TrackerHandle<CheckboxStage>> {
        self.core.active_handle()
    }

    /// Returns `true` while a transition is running.
    pub fn is_animating(&self) -> bool {
        self.core.is_animating()
    }

    /// Accessibility description of the checkbox.
    pub fn accessibility(&self) -> AccessibilitySemantics {
        AccessibilitySemantics::new(self.identifier.clone(), Role::CheckBox)
            .label(self.accessibility_label.clone().or_else(|| self.title.clone()))
            .toggled(self.state.accessibility_toggled())
            .enabled(self.core.enabled)
    }

    fn restyle(&mut self, now: Instant) -> TransitionOutcome<CheckboxStage> {
        let target = self.style();
        let state = self.state;
        self.core.animate_to(
            target,
            Callback::new(move || debug!(?state, "checkbox settled")),
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

    use spark_ui::{Color, MotionSettings};

    use super::*;
    use crate::theme::SparkColorScheme;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn default_state_is_unselected() {
        assert_eq!(
            CheckboxSelectionState::default(),
            CheckboxSelectionState::Unselected
        );
        let checkbox = Checkbox::new(&Context::new(), CheckboxArgs::default());
        assert_eq!(checkbox.selection_state(), CheckboxSelectionState::Unselected);
        assert!(!checkbox.is_animating());
    }

    #[test]
    fn declared_timeline_is_valid() {
        let stages = StageSet::<CheckboxStage>::declared();
        assert_eq!(stages.validate(), Ok(()));
        assert_eq!(stages.total_duration(), ms(500));
    }

    #[test]
    fn indeterminate_to_selected_runs_every_stage() {
        let start = Instant::now();
        let ctx = Context::new();
        let mut checkbox = Checkbox::new(
            &ctx,
            CheckboxArgs::default().selection_state(CheckboxSelectionState::Indeterminate),
        );
        assert_eq!(checkbox.rendered().glyph, IndicatorGlyph::Dash);

        let outcome = checkbox.set_selection(CheckboxSelectionState::Selected, start);
        let TransitionOutcome::Animating(handle) = outcome else {
            panic!("expected an animated transition");
        };

        assert_eq!(checkbox.tick(start + ms(200)), None);
        assert_eq!(checkbox.rendered().glyph, IndicatorGlyph::Dash);
        assert!(checkbox.is_animating());

        assert_eq!(checkbox.tick(start + ms(500)), Some(handle.token()));
        let expected = CheckboxDefaults::resolve_style(
            &SparkTheme::default(),
            SelectionControlsIntent::Basic,
            CheckboxSelectionState::Selected,
            true,
            Interaction::default(),
        );
        assert_eq!(*checkbox.rendered(), expected);
        assert_eq!(checkbox.rendered().glyph, IndicatorGlyph::Checkmark);
    }

    #[test]
    fn reduced_motion_settles_immediately() {
        let ctx = Context::new().provide(MotionSettings::new(true));
        let mut checkbox = Checkbox::new(&ctx, CheckboxArgs::default());
        let outcome = checkbox.set_selection(CheckboxSelectionState::Selected, Instant::now());
        assert!(outcome.is_settled());
        assert_eq!(*checkbox.rendered(), checkbox.style());
    }

    #[test]
    fn toggle_cycles_and_reports_changes() {
        let changes = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&changes);
        let ctx = Context::new().provide(MotionSettings::new(true));
        let mut checkbox = Checkbox::new(
            &ctx,
            CheckboxArgs::default()
                .selection_state(CheckboxSelectionState::Indeterminate)
                .on_change(move |_| {
                    sink.fetch_add(1, Ordering::SeqCst);
                }),
        );
        let now = Instant::now();
        checkbox.toggle(now);
        assert_eq!(checkbox.selection_state(), CheckboxSelectionState::Selected);
        checkbox.toggle(now);
        assert_eq!(checkbox.selection_state(), CheckboxSelectionState::Unselected);
        checkbox.toggle(now);
        assert_eq!(checkbox.selection_state(), CheckboxSelectionState::Selected);
        assert_eq!(changes.load(Ordering::SeqCst), 3);

        checkbox.set_enabled(false, now);
        assert!(checkbox.toggle(now).is_none());
        assert_eq!(checkbox.selection_state(), CheckboxSelectionState::Selected);
        assert_eq!(changes.load(Ordering::SeqCst), 3);
        assert_eq!(checkbox.rendered().opacity, SparkAlpha::DIM_3);
    }

    #[test]
    fn error_intent_comes_from_context() {
        let ctx = Context::new().provide(crate::SelectionControlsConfig {
            intent: SelectionControlsIntent::Error,
            ..Default::default()
        });
        let checkbox = Checkbox::new(&ctx, CheckboxArgs::default());
        assert_eq!(checkbox.intent(), SelectionControlsIntent::Error);
        let overridden = Checkbox::new(
            &ctx,
            CheckboxArgs::default().intent(SelectionControlsIntent::Basic),
        );
        assert_eq!(overridden.intent(), SelectionControlsIntent::Basic);
    }

    #[test]
    fn theme_change_applies_atomically() {
        let start = Instant::now();
        let mut checkbox = Checkbox::new(&Context::new(), CheckboxArgs::default());
        checkbox.set_selection(CheckboxSelectionState::Selected, start);
        checkbox.tick(start + ms(50));

        let theme = SparkTheme::default();
        let colors = SparkColorScheme {
            basic: Color::BLACK,
            ..theme.colors
        };
        checkbox.set_theme(theme.with_colors(colors), start + ms(60));
        assert!(!checkbox.is_animating());
        assert_eq!(checkbox.rendered().background, Paint::Solid(Color::BLACK));
    }

    #[test]
    fn accessibility_reports_mixed_state() {
        let checkbox = Checkbox::new(
            &Context::new(),
            CheckboxArgs::default()
                .title("Select all")
                .selection_state(CheckboxSelectionState::Indeterminate),
        );
        let semantics = checkbox.accessibility();
        assert_eq!(semantics.identifier, accessibility::CHECKBOX);
        assert_eq!(semantics.role, Role::CheckBox);
        assert_eq!(semantics.label.as_deref(), Some("Select all"));
        assert_eq!(semantics.toggled, Some(Toggled::Mixed));
    }
}

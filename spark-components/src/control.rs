//! Plumbing shared by the checkbox, radio button and toggle view-models.

use std::time::Instant;

use spark_ui::{
    Callback, Context, MotionSettings,
    animation::{
        Completion, Stage, StageSet, Staged, TrackerHandle, TransitionDriver, TransitionOutcome,
        TransitionToken,
    },
};
use tracing::debug;

use crate::{
    selection_controls::{Interaction, SelectionControlsConfig, SelectionControlsIntent},
    style::StyleSnapshot,
    theme::SparkTheme,
};

/// Inputs every control resolves its style from, plus the driver that moves
/// the rendered snapshot towards the resolved one.
pub(crate) struct ControlCore<S: Stage>
where
    StyleSnapshot: Staged<S>,
{
    pub(crate) theme: SparkTheme,
    pub(crate) intent: SelectionControlsIntent,
    pub(crate) enabled: bool,
    pub(crate) interaction: Interaction,
    motion: MotionSettings,
    stages: StageSet<S>,
    driver: TransitionDriver<S, StyleSnapshot>,
}

impl<S: Stage> ControlCore<S>
where
    StyleSnapshot: Staged<S>,
{
    /// Reads theme, ambient intent and motion settings from `ctx`.
    ///
    /// `resolve` computes the initial snapshot from the finished core.
    pub(crate) fn new(
        ctx: &Context,
        intent: Option<SelectionControlsIntent>,
        enabled: bool,
        stages: StageSet<S>,
        resolve: impl FnOnce(&SparkTheme, SelectionControlsIntent, bool) -> StyleSnapshot,
    ) -> Self {
        let theme = *ctx.get::<SparkTheme>();
        let intent = intent.unwrap_or(ctx.get::<SelectionControlsConfig>().intent);
        let initial = resolve(&theme, intent, enabled);
        Self {
            theme,
            intent,
            enabled,
            interaction: Interaction::default(),
            motion: (*ctx.get::<MotionSettings>()).clone(),
            stages,
            driver: TransitionDriver::new(initial),
        }
    }

    /// Animates towards `target`, sampling the motion setting once.
    pub(crate) fn animate_to(
        &mut self,
        target: StyleSnapshot,
        on_settled: Callback,
        now: Instant,
    ) -> TransitionOutcome<S> {
        let reduce_motion = self.motion.reduce_motion();
        self.driver.transition(target, reduce_motion, &self.stages, on_settled, now)
    }

    /// Applies `target` without animation.
    ///
    /// A transition still running is settled first so its callback fires
    /// with the state it was started for.
    pub(crate) fn apply_now(&mut self, target: StyleSnapshot, now: Instant) {
        self.driver.snap();
        self.driver.transition(target, true, &self.stages, Callback::noop(), now);
    }

    /// Stores `theme` and reports whether the token set actually changed.
    pub(crate) fn replace_theme(&mut self, theme: SparkTheme) -> bool {
        if theme == self.theme {
            return false;
        }
        debug!(
            from = self.theme.version,
            to = theme.version,
            "token set changed"
        );
        self.theme = theme;
        true
    }

    pub(crate) fn tick(&mut self, now: Instant) -> Option<TransitionToken> {
        self.driver.tick(now)
    }

    pub(crate) fn report_complete(
        &mut self,
        handle: TrackerHandle<S>,
        stage: S,
        now: Instant,
    ) -> Completion {
        self.driver.report_complete(handle, stage, now)
    }

    pub(crate) fn rendered(&self) -> &StyleSnapshot {
        self.driver.rendered()
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    pub(crate) fn active_handle(&self) -> Option<TrackerHandle<S>> {
        self.driver.active_handle()
    }
}

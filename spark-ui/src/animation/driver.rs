//! Frame-driven orchestration of compound transitions.
//!
//! A [`TransitionDriver`] owns the currently rendered value of a control and
//! moves it towards a target one stage at a time. Each stage interpolates
//! only the properties it owns (see [`Staged`]); stages gated on a
//! prerequisite start at the instant that prerequisite finished.
//!
//! When motion is reduced, or the target equals what is on screen, the
//! target is applied in a single step and the settle callback runs before
//! [`TransitionDriver::transition`] returns.

use std::time::Instant;

use smallvec::SmallVec;
use tracing::{debug, instrument, trace};

use super::{
    Completion, CompletionTracker, Stage, StageSet, StageSpec, TrackerHandle, TransitionToken,
};
use crate::Callback;

/// A value whose properties are partitioned between the stages of `S`.
pub trait Staged<S: Stage>: Clone + PartialEq {
    /// Overwrites the properties owned by `stage` with their value at eased
    /// `progress` between `from` and `to`. Progress `1.0` must yield exactly
    /// the values of `to`.
    fn blend_stage(&mut self, stage: S, from: &Self, to: &Self, progress: f32);
}

/// Result of starting a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome<S> {
    /// The target was applied at once and the settle callback has run.
    Settled,
    /// Stages are running; drive them with [`TransitionDriver::tick`].
    Animating(TrackerHandle<S>),
}

impl<S> TransitionOutcome<S> {
    /// Returns `true` for the single-step path.
    pub fn is_settled(&self) -> bool {
        matches!(self, TransitionOutcome::Settled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RunPhase {
    Waiting,
    Running { started: Instant },
    Finished,
}

#[derive(Debug, Clone, Copy)]
struct StageRun<S> {
    spec: StageSpec<S>,
    phase: RunPhase,
}

/// Drives the rendered value of one control through staged transitions.
pub struct TransitionDriver<S: Stage, V: Staged<S>> {
    rendered: V,
    origin: V,
    target: V,
    tracker: CompletionTracker<S>,
    runs: SmallVec<[StageRun<S>; 4]>,
    handle: Option<TrackerHandle<S>>,
}

impl<S: Stage, V: Staged<S>> TransitionDriver<S, V> {
    /// Creates a driver showing `initial`.
    pub fn new(initial: V) -> Self {
        Self {
            rendered: initial.clone(),
            origin: initial.clone(),
            target: initial,
            tracker: CompletionTracker::new(),
            runs: SmallVec::new(),
            handle: None,
        }
    }

    /// The value currently on screen.
    pub fn rendered(&self) -> &V {
        &self.rendered
    }

    /// The value the driver is heading to (or resting at).
    pub fn target(&self) -> &V {
        &self.target
    }

    /// Returns `true` while a transition has stages outstanding.
    pub fn is_animating(&self) -> bool {
        self.handle.is_some()
    }

    /// Handle of the running transition, if any.
    pub fn active_handle(&self) -> Option<TrackerHandle<S>> {
        self.handle
    }

    /// Stages of the running transition that have not finished yet.
    pub fn pending_stages(&self) -> SmallVec<[S; 4]> {
        self.tracker.pending_stages()
    }

    /// Moves from the rendered value to `to`.
    ///
    /// The transition always starts from what is currently rendered, so a
    /// call made while another transition is running picks up mid-flight;
    /// the superseded transition's callback never fires and its stage
    /// reports become no-ops.
    #[instrument(level = "debug", skip(self, to, stages, on_settled))]
    pub fn transition(
        &mut self,
        to: V,
        reduce_motion: bool,
        stages: &StageSet<S>,
        on_settled: Callback,
        now: Instant,
    ) -> TransitionOutcome<S> {
        debug_assert!(
            stages.validate().is_ok(),
            "malformed stage set: {:?}",
            stages.validate()
        );

        if reduce_motion || self.rendered == to {
            debug!(reduce_motion, "applying target without animation");
            self.tracker.invalidate();
            self.runs.clear();
            self.handle = None;
            self.origin = to.clone();
            self.rendered = to.clone();
            self.target = to;
            on_settled.call();
            return TransitionOutcome::Settled;
        }

        self.origin = self.rendered.clone();
        self.target = to;
        let handle = self.tracker.begin_transition(stages, on_settled);
        self.handle = Some(handle);
        self.runs = stages
            .iter()
            .map(|spec| StageRun {
                spec: *spec,
                phase: match spec.after {
                    None => RunPhase::Running { started: now },
                    Some(_) => RunPhase::Waiting,
                },
            })
            .collect();
        debug!(token = handle.token().get(), stages = stages.len(), "transition started");
        TransitionOutcome::Animating(handle)
    }

    /// Advances every running stage to `now`.
    ///
    /// Returns the token of the transition that settled during this call.
    pub fn tick(&mut self, now: Instant) -> Option<TransitionToken> {
        let handle = self.handle?;
        loop {
            let finished = self.advance(now);
            if finished.is_empty() {
                return None;
            }
            for (stage, finished_at) in finished {
                if let Some(token) = self.complete_stage(handle, stage, finished_at) {
                    return Some(token);
                }
            }
        }
    }

    /// Reports a stage finished by a host-driven animation.
    ///
    /// The stage's properties snap to their target and any stage gated on it
    /// starts at `now`. Reports with a stale handle are ignored.
    pub fn report_complete(
        &mut self,
        handle: TrackerHandle<S>,
        stage: S,
        now: Instant,
    ) -> Completion {
        if !self.tracker.is_current(handle) {
            return self.tracker.report_complete(handle, stage);
        }
        let Some(run) = self.runs.iter_mut().find(|run| run.spec.stage == stage) else {
            return self.tracker.report_complete(handle, stage);
        };
        if run.phase == RunPhase::Finished {
            return Completion::Duplicate;
        }
        run.phase = RunPhase::Finished;
        self.rendered.blend_stage(stage, &self.origin, &self.target, 1.0);
        let completion = self.tracker.report_complete(handle, stage);
        match completion {
            Completion::Settled => self.settle(),
            _ => self.start_dependents(stage, now),
        }
        completion
    }

    /// Applies the target at once, settling the running transition.
    ///
    /// Returns the token of the transition that settled, if one was running.
    pub fn snap(&mut self) -> Option<TransitionToken> {
        let handle = self.handle?;
        for run in self.runs.iter_mut() {
            run.phase = RunPhase::Finished;
        }
        for stage in self.tracker.pending_stages() {
            self.tracker.report_complete(handle, stage);
        }
        self.settle();
        Some(handle.token())
    }

    fn advance(&mut self, now: Instant) -> SmallVec<[(S, Instant); 4]> {
        let mut finished = SmallVec::new();
        for run in self.runs.iter_mut() {
            let RunPhase::Running { started } = run.phase else {
                continue;
            };
            let duration = run.spec.duration;
            let elapsed = now.saturating_duration_since(started);
            let fraction = if duration.is_zero() {
                1.0
            } else {
                (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
            };
            let progress = run.spec.easing.apply(fraction);
            self.rendered
                .blend_stage(run.spec.stage, &self.origin, &self.target, progress);
            trace!(stage = ?run.spec.stage, fraction, "stage progress");
            if fraction >= 1.0 {
                run.phase = RunPhase::Finished;
                finished.push((run.spec.stage, started + duration));
            }
        }
        finished
    }

    fn complete_stage(
        &mut self,
        handle: TrackerHandle<S>,
        stage: S,
        finished_at: Instant,
    ) -> Option<TransitionToken> {
        debug!(?stage, "stage finished");
        match self.tracker.report_complete(handle, stage) {
            Completion::Settled => {
                self.settle();
                Some(handle.token())
            }
            _ => {
                self.start_dependents(stage, finished_at);
                None
            }
        }
    }

    fn start_dependents(&mut self, stage: S, started: Instant) {
        for run in self.runs.iter_mut() {
            if run.phase == RunPhase::Waiting && run.spec.after == Some(stage) {
                debug!(stage = ?run.spec.stage, after = ?stage, "gated stage started");
                run.phase = RunPhase::Running { started };
            }
        }
    }

    fn settle(&mut self) {
        self.rendered = self.target.clone();
        self.origin = self.target.clone();
        self.runs.clear();
        self.handle = None;
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

    use super::*;
    use crate::animation::{Easing, PRIMARY_STAGE_DURATION, SECONDARY_STAGE_DURATION};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Phase {
        Fill,
        Mark,
    }

    impl Stage for Phase {
        const TIMELINE: &'static [StageSpec<Self>] = &[
            StageSpec::new(Phase::Fill, PRIMARY_STAGE_DURATION).easing(Easing::Linear),
            StageSpec::new(Phase::Mark, SECONDARY_STAGE_DURATION)
                .easing(Easing::Linear)
                .after(Phase::Fill),
        ];
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Glyph {
        fill: f32,
        mark: f32,
    }

    impl Glyph {
        const OFF: Glyph = Glyph {
            fill: 0.0,
            mark: 0.0,
        };
        const ON: Glyph = Glyph {
            fill: 1.0,
            mark: 1.0,
        };
    }

    impl Staged<Phase> for Glyph {
        fn blend_stage(&mut self, stage: Phase, from: &Self, to: &Self, progress: f32) {
            match stage {
                Phase::Fill => self.fill = from.fill + (to.fill - from.fill) * progress,
                Phase::Mark => self.mark = from.mark + (to.mark - from.mark) * progress,
            }
        }
    }

    fn counter() -> (Callback, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&count);
        (
            Callback::new(move || {
                sink.fetch_add(1, Ordering::SeqCst);
            }),
            count,
        )
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn reduced_motion_applies_target_in_one_step() {
        let mut driver = TransitionDriver::new(Glyph::OFF);
        let (callback, count) = counter();
        let outcome = driver.transition(
            Glyph::ON,
            true,
            &StageSet::declared(),
            callback,
            Instant::now(),
        );
        assert!(outcome.is_settled());
        assert_eq!(*driver.rendered(), Glyph::ON);
        assert!(!driver.is_animating());
        assert!(driver.active_handle().is_none());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(driver.tick(Instant::now() + ms(1000)), None);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn equal_target_settles_without_animating() {
        let mut driver = TransitionDriver::new(Glyph::ON);
        let (callback, count) = counter();
        let outcome = driver.transition(
            Glyph::ON,
            false,
            &StageSet::declared(),
            callback,
            Instant::now(),
        );
        assert_eq!(outcome, TransitionOutcome::Settled);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn gated_stage_waits_for_prerequisite() {
        let start = Instant::now();
        let mut driver = TransitionDriver::new(Glyph::OFF);
        let (callback, count) = counter();
        let outcome = driver.transition(Glyph::ON, false, &StageSet::declared(), callback, start);
        let TransitionOutcome::Animating(handle) = outcome else {
            panic!("expected an animated transition");
        };

        assert_eq!(driver.tick(start + ms(100)), None);
        assert!((driver.rendered().fill - 0.5).abs() < 1e-3);
        assert_eq!(driver.rendered().mark, 0.0);

        assert_eq!(driver.tick(start + ms(200)), None);
        assert_eq!(driver.rendered().fill, 1.0);
        assert_eq!(driver.rendered().mark, 0.0);
        assert_eq!(driver.pending_stages().as_slice(), &[Phase::Mark]);

        assert_eq!(driver.tick(start + ms(350)), None);
        assert!((driver.rendered().mark - 0.5).abs() < 1e-3);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        assert_eq!(driver.tick(start + ms(500)), Some(handle.token()));
        assert_eq!(*driver.rendered(), Glyph::ON);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(driver.tick(start + ms(900)), None);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn late_frame_runs_whole_chain_in_one_tick() {
        let start = Instant::now();
        let mut driver = TransitionDriver::new(Glyph::OFF);
        let (callback, count) = counter();
        driver.transition(Glyph::ON, false, &StageSet::declared(), callback, start);
        assert!(driver.tick(start + ms(2000)).is_some());
        assert_eq!(*driver.rendered(), Glyph::ON);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn new_transition_supersedes_and_starts_from_rendered() {
        let start = Instant::now();
        let mut driver = TransitionDriver::new(Glyph::OFF);
        let (first_cb, first_count) = counter();
        let (second_cb, second_count) = counter();

        let TransitionOutcome::Animating(first) =
            driver.transition(Glyph::ON, false, &StageSet::declared(), first_cb, start)
        else {
            panic!("expected an animated transition");
        };
        driver.tick(start + ms(100));
        let midway = *driver.rendered();

        let TransitionOutcome::Animating(second) = driver.transition(
            Glyph::OFF,
            false,
            &StageSet::declared(),
            second_cb,
            start + ms(100),
        ) else {
            panic!("expected an animated transition");
        };
        assert_eq!(*driver.rendered(), midway);

        assert_eq!(
            driver.report_complete(first, Phase::Fill, start + ms(110)),
            Completion::Stale
        );
        assert_eq!(
            driver.report_complete(first, Phase::Mark, start + ms(110)),
            Completion::Stale
        );
        assert_eq!(*driver.rendered(), midway);

        assert_eq!(driver.tick(start + ms(1000)), Some(second.token()));
        assert_eq!(*driver.rendered(), Glyph::OFF);
        assert_eq!(first_count.load(Ordering::SeqCst), 0);
        assert_eq!(second_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn host_reported_stages_settle_transition() {
        let start = Instant::now();
        let mut driver = TransitionDriver::new(Glyph::OFF);
        let (callback, count) = counter();
        let TransitionOutcome::Animating(handle) =
            driver.transition(Glyph::ON, false, &StageSet::declared(), callback, start)
        else {
            panic!("expected an animated transition");
        };
        assert_eq!(
            driver.report_complete(handle, Phase::Fill, start + ms(5)),
            Completion::Recorded { remaining: 1 }
        );
        assert_eq!(driver.rendered().fill, 1.0);
        assert_eq!(
            driver.report_complete(handle, Phase::Fill, start + ms(6)),
            Completion::Duplicate
        );
        assert_eq!(
            driver.report_complete(handle, Phase::Mark, start + ms(7)),
            Completion::Settled
        );
        assert!(!driver.is_animating());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn snap_settles_running_transition() {
        let start = Instant::now();
        let mut driver = TransitionDriver::new(Glyph::OFF);
        let (callback, count) = counter();
        driver.transition(Glyph::ON, false, &StageSet::declared(), callback, start);
        assert!(driver.snap().is_some());
        assert_eq!(*driver.rendered(), Glyph::ON);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(driver.snap(), None);
    }

    #[test]
    fn per_stage_duration_override_is_honored() {
        let start = Instant::now();
        let mut driver = TransitionDriver::new(Glyph::OFF);
        let (callback, _) = counter();
        let stages = StageSet::declared().with_duration(Phase::Fill, ms(50));
        driver.transition(Glyph::ON, false, &stages, callback, start);
        assert_eq!(driver.tick(start + ms(50)), None);
        assert_eq!(driver.rendered().fill, 1.0);
        assert!(driver.tick(start + ms(350)).is_some());
    }
}

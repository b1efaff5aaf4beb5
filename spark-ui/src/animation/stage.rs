//! Stage enumeration and per-stage timelines.
//!
//! A compound transition is split into named stages, each animating one
//! group of properties. Every control declares its own closed set of stages
//! through [`Stage::TIMELINE`].

use std::{fmt::Debug, hash::Hash, time::Duration};

use smallvec::SmallVec;
use thiserror::Error;

use super::Easing;

/// Primary stage duration used by the design system.
pub const PRIMARY_STAGE_DURATION: Duration = Duration::from_millis(200);
/// Secondary stage duration for controls with a two-phase animation.
pub const SECONDARY_STAGE_DURATION: Duration = Duration::from_millis(300);

/// A tag identifying one sub-animation of a compound transition.
///
/// Implemented by small fieldless enums. `TIMELINE` must list every variant
/// exactly once; this is checked by [`StageSet::validate`].
pub trait Stage: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Default timeline for this control.
    const TIMELINE: &'static [StageSpec<Self>];
}

/// Timing of a single stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StageSpec<S> {
    /// Stage tag.
    pub stage: S,
    /// How long the stage animates once started.
    pub duration: Duration,
    /// Progress curve.
    pub easing: Easing,
    /// Stage that must complete before this one starts, if any.
    pub after: Option<S>,
}

impl<S: Copy> StageSpec<S> {
    /// Creates a stage that starts with the transition.
    pub const fn new(stage: S, duration: Duration) -> Self {
        Self {
            stage,
            duration,
            easing: Easing::EaseInOut,
            after: None,
        }
    }

    /// Sets the progress curve.
    pub const fn easing(self, easing: Easing) -> Self {
        Self {
            stage: self.stage,
            duration: self.duration,
            easing,
            after: self.after,
        }
    }

    /// Gates this stage on the completion of `prerequisite`.
    pub const fn after(self, prerequisite: S) -> Self {
        Self {
            stage: self.stage,
            duration: self.duration,
            easing: self.easing,
            after: Some(prerequisite),
        }
    }
}

/// Reasons a stage timeline is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageSetError {
    /// The timeline declares no stages.
    #[error("a stage set must declare at least one stage")]
    Empty,
    /// A stage appears more than once.
    #[error("stage {0} is declared more than once")]
    DuplicateStage(String),
    /// A stage waits on a stage that is not part of the set.
    #[error("stage {stage} waits on undeclared stage {after}")]
    UnknownPrerequisite {
        /// The gated stage.
        stage: String,
        /// The missing prerequisite.
        after: String,
    },
    /// A stage waits on itself.
    #[error("stage {0} waits on itself")]
    SelfPrerequisite(String),
    /// Prerequisites form a cycle, so the stage can never start.
    #[error("stage {0} is part of a prerequisite cycle")]
    PrerequisiteCycle(String),
}

/// The finite, non-empty set of stages run by one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSet<S: Stage> {
    specs: SmallVec<[StageSpec<S>; 4]>,
}

impl<S: Stage> StageSet<S> {
    /// The control's declared default timeline.
    pub fn declared() -> Self {
        Self {
            specs: S::TIMELINE.iter().copied().collect(),
        }
    }

    /// Builds a custom timeline, rejecting malformed ones.
    pub fn new(specs: impl IntoIterator<Item = StageSpec<S>>) -> Result<Self, StageSetError> {
        let set = Self {
            specs: specs.into_iter().collect(),
        };
        set.validate()?;
        Ok(set)
    }

    /// Checks that the set is non-empty, duplicate-free and that every
    /// prerequisite is declared and reachable.
    pub fn validate(&self) -> Result<(), StageSetError> {
        if self.specs.is_empty() {
            return Err(StageSetError::Empty);
        }
        for (index, spec) in self.specs.iter().enumerate() {
            if self.specs[..index].iter().any(|s| s.stage == spec.stage) {
                return Err(StageSetError::DuplicateStage(format!("{:?}", spec.stage)));
            }
        }
        for spec in &self.specs {
            let Some(after) = spec.after else {
                continue;
            };
            if after == spec.stage {
                return Err(StageSetError::SelfPrerequisite(format!("{:?}", spec.stage)));
            }
            if !self.contains(after) {
                return Err(StageSetError::UnknownPrerequisite {
                    stage: format!("{:?}", spec.stage),
                    after: format!("{after:?}"),
                });
            }
            // Walking the chain for longer than the set size means we looped.
            let mut cursor = Some(after);
            let mut steps = 0;
            while let Some(current) = cursor {
                steps += 1;
                if steps > self.specs.len() {
                    return Err(StageSetError::PrerequisiteCycle(format!(
                        "{:?}",
                        spec.stage
                    )));
                }
                cursor = self.spec(current).and_then(|s| s.after);
            }
        }
        Ok(())
    }

    /// Overrides the duration of one stage. Unknown stages are left alone.
    pub fn with_duration(mut self, stage: S, duration: Duration) -> Self {
        if let Some(spec) = self.specs.iter_mut().find(|s| s.stage == stage) {
            spec.duration = duration;
        }
        self
    }

    /// Overrides the curve of one stage. Unknown stages are left alone.
    pub fn with_easing(mut self, stage: S, easing: Easing) -> Self {
        if let Some(spec) = self.specs.iter_mut().find(|s| s.stage == stage) {
            spec.easing = easing;
        }
        self
    }

    /// Returns the timing of `stage`, if declared.
    pub fn spec(&self, stage: S) -> Option<&StageSpec<S>> {
        self.specs.iter().find(|s| s.stage == stage)
    }

    /// Returns `true` when `stage` is part of the set.
    pub fn contains(&self, stage: S) -> bool {
        self.spec(stage).is_some()
    }

    /// Iterates over stage timings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &StageSpec<S>> {
        self.specs.iter()
    }

    /// Iterates over stage tags in declaration order.
    pub fn stages(&self) -> impl Iterator<Item = S> + '_ {
        self.specs.iter().map(|s| s.stage)
    }

    /// Number of declared stages.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` for a set without stages. Valid sets never are.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Wall-clock length of the whole transition, following prerequisites.
    pub fn total_duration(&self) -> Duration {
        self.specs
            .iter()
            .map(|spec| self.finish_offset(spec, 0))
            .max()
            .unwrap_or_default()
    }

    fn finish_offset(&self, spec: &StageSpec<S>, depth: usize) -> Duration {
        let start = match spec.after.and_then(|after| self.spec(after)) {
            Some(prerequisite) if depth < self.specs.len() => {
                self.finish_offset(prerequisite, depth + 1)
            }
            _ => Duration::ZERO,
        };
        start + spec.duration
    }
}

impl<'a, S: Stage> IntoIterator for &'a StageSet<S> {
    type Item = &'a StageSpec<S>;
    type IntoIter = std::slice::Iter<'a, StageSpec<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Phase {
        Fill,
        Mark,
        Glow,
    }

    impl Stage for Phase {
        const TIMELINE: &'static [StageSpec<Self>] = &[
            StageSpec::new(Phase::Fill, PRIMARY_STAGE_DURATION),
            StageSpec::new(Phase::Mark, SECONDARY_STAGE_DURATION).after(Phase::Fill),
            StageSpec::new(Phase::Glow, PRIMARY_STAGE_DURATION),
        ];
    }

    #[test]
    fn declared_timeline_is_valid() {
        let set = StageSet::<Phase>::declared();
        assert_eq!(set.validate(), Ok(()));
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.stages().collect::<Vec<_>>(),
            vec![Phase::Fill, Phase::Mark, Phase::Glow]
        );
    }

    #[test]
    fn total_duration_follows_prerequisites() {
        let set = StageSet::<Phase>::declared();
        assert_eq!(set.total_duration(), Duration::from_millis(500));
        let shortened = set.with_duration(Phase::Mark, Duration::from_millis(50));
        assert_eq!(shortened.total_duration(), Duration::from_millis(250));
    }

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(StageSet::<Phase>::new([]), Err(StageSetError::Empty));
    }

    #[test]
    fn duplicates_are_rejected() {
        let result = StageSet::new([
            StageSpec::new(Phase::Fill, PRIMARY_STAGE_DURATION),
            StageSpec::new(Phase::Fill, SECONDARY_STAGE_DURATION),
        ]);
        assert_eq!(
            result,
            Err(StageSetError::DuplicateStage("Fill".to_string()))
        );
    }

    #[test]
    fn missing_and_cyclic_prerequisites_are_rejected() {
        let missing = StageSet::new([
            StageSpec::new(Phase::Mark, PRIMARY_STAGE_DURATION).after(Phase::Fill)
        ]);
        assert!(matches!(
            missing,
            Err(StageSetError::UnknownPrerequisite { .. })
        ));

        let own = StageSet::new([
            StageSpec::new(Phase::Mark, PRIMARY_STAGE_DURATION).after(Phase::Mark)
        ]);
        assert_eq!(
            own,
            Err(StageSetError::SelfPrerequisite("Mark".to_string()))
        );

        let cycle = StageSet::new([
            StageSpec::new(Phase::Fill, PRIMARY_STAGE_DURATION).after(Phase::Mark),
            StageSpec::new(Phase::Mark, PRIMARY_STAGE_DURATION).after(Phase::Fill),
        ]);
        assert!(matches!(cycle, Err(StageSetError::PrerequisiteCycle(_))));
    }

    #[test]
    fn overrides_touch_only_named_stage() {
        let set = StageSet::<Phase>::declared()
            .with_duration(Phase::Glow, Duration::from_millis(10))
            .with_easing(Phase::Glow, Easing::Linear);
        let glow = set.spec(Phase::Glow).copied();
        assert_eq!(
            glow,
            Some(StageSpec {
                stage: Phase::Glow,
                duration: Duration::from_millis(10),
                easing: Easing::Linear,
                after: None,
            })
        );
        assert_eq!(
            set.spec(Phase::Fill).map(|s| s.duration),
            Some(PRIMARY_STAGE_DURATION)
        );
    }
}

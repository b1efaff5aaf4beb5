//! Staged transitions for selection controls.
//!
//! A state change on a control becomes one compound transition made of
//! several stages (a color crossfade, an icon reveal, a layout shift...).
//! This module provides the pieces, from the leaves up:
//!
//! - [`Stage`] / [`StageSet`]: the closed set of stages a control declares,
//!   with per-stage duration, curve and optional prerequisite.
//! - [`CompletionTracker`]: records which stages of the current transition
//!   finished and fires a callback once all of them did.
//! - [`TransitionDriver`]: owns the rendered value and runs the stages frame
//!   by frame, or applies the target in one step when motion is reduced.

mod driver;
mod easing;
mod stage;
mod tracker;

pub use driver::{Staged, TransitionDriver, TransitionOutcome};
pub use easing::Easing;
pub use stage::{
    PRIMARY_STAGE_DURATION, SECONDARY_STAGE_DURATION, Stage, StageSet, StageSetError, StageSpec,
};
pub use tracker::{Completion, CompletionTracker, TrackerHandle, TransitionToken};

//! Per-transition completion bookkeeping.
//!
//! ## Usage
//!
//! Begin a transition, hand its [`TrackerHandle`] to every sub-animation and
//! report each stage as it finishes. The registered callback fires once, on
//! the report that completes the declared set.
//!
//! Only one transition is active at a time. Beginning another one abandons the
//! previous bookkeeping: reports carrying an old handle are ignored.

use std::marker::PhantomData;

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::{Stage, StageSet};
use crate::Callback;

/// Identity of one transition, unique per tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionToken(u64);

impl TransitionToken {
    /// Raw sequence number; later transitions have larger values.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Ties stage reports to the transition that issued them.
pub struct TrackerHandle<S> {
    token: TransitionToken,
    _stage: PhantomData<fn() -> S>,
}

impl<S> TrackerHandle<S> {
    fn new(token: TransitionToken) -> Self {
        Self {
            token,
            _stage: PhantomData,
        }
    }

    /// The transition this handle belongs to.
    pub fn token(&self) -> TransitionToken {
        self.token
    }
}

impl<S> Clone for TrackerHandle<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for TrackerHandle<S> {}

impl<S> PartialEq for TrackerHandle<S> {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl<S> Eq for TrackerHandle<S> {}

impl<S> std::fmt::Debug for TrackerHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TrackerHandle").field(&self.token.0).finish()
    }
}

/// What a stage report did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The handle belongs to a superseded transition; nothing changed.
    Stale,
    /// The stage is not part of the active transition; nothing changed.
    Undeclared,
    /// The stage had already reported; nothing changed.
    Duplicate,
    /// The stage was recorded and others are still outstanding.
    Recorded {
        /// Stages that have not reported yet.
        remaining: usize,
    },
    /// The stage was the last outstanding one; the callback has fired.
    Settled,
}

struct ActiveTransition<S> {
    token: TransitionToken,
    declared: SmallVec<[S; 4]>,
    reported: SmallVec<[S; 4]>,
    on_complete: Option<Callback>,
}

impl<S: Stage> ActiveTransition<S> {
    fn is_complete(&self) -> bool {
        self.reported.len() == self.declared.len()
    }
}

/// Tracks which stages of the current transition have finished.
pub struct CompletionTracker<S: Stage> {
    next_token: u64,
    active: Option<ActiveTransition<S>>,
}

impl<S: Stage> Default for CompletionTracker<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Stage> CompletionTracker<S> {
    /// Creates a tracker with no active transition.
    pub fn new() -> Self {
        Self {
            next_token: 0,
            active: None,
        }
    }

    /// Starts bookkeeping for a new transition over `stages`.
    ///
    /// Any transition still in flight is abandoned without firing its
    /// callback.
    pub fn begin_transition(
        &mut self,
        stages: &StageSet<S>,
        on_complete: Callback,
    ) -> TrackerHandle<S> {
        debug_assert!(!stages.is_empty(), "a transition needs at least one stage");
        self.next_token += 1;
        let token = TransitionToken(self.next_token);
        if let Some(previous) = self.active.as_ref().filter(|a| !a.is_complete()) {
            debug!(
                previous = previous.token.0,
                next = token.0,
                "superseding unfinished transition"
            );
        }
        self.active = Some(ActiveTransition {
            token,
            declared: stages.stages().collect(),
            reported: SmallVec::new(),
            on_complete: Some(on_complete),
        });
        TrackerHandle::new(token)
    }

    /// Records that `stage` finished for the transition behind `handle`.
    ///
    /// Reports for superseded transitions, undeclared stages and repeated
    /// stages are ignored.
    pub fn report_complete(&mut self, handle: TrackerHandle<S>, stage: S) -> Completion {
        let Some(active) = self
            .active
            .as_mut()
            .filter(|active| active.token == handle.token)
        else {
            trace!(token = handle.token.0, ?stage, "ignoring stale stage report");
            return Completion::Stale;
        };
        if !active.declared.contains(&stage) {
            trace!(token = handle.token.0, ?stage, "ignoring undeclared stage");
            return Completion::Undeclared;
        }
        if active.reported.contains(&stage) {
            trace!(token = handle.token.0, ?stage, "ignoring duplicate stage report");
            return Completion::Duplicate;
        }
        active.reported.push(stage);
        if !active.is_complete() {
            let remaining = active.declared.len() - active.reported.len();
            trace!(token = handle.token.0, ?stage, remaining, "stage complete");
            return Completion::Recorded { remaining };
        }
        debug!(token = handle.token.0, "transition settled");
        if let Some(on_complete) = active.on_complete.take() {
            on_complete.call();
        }
        Completion::Settled
    }

    /// Returns `true` iff `handle` is the active transition and every
    /// declared stage has reported.
    pub fn is_fully_complete(&self, handle: TrackerHandle<S>) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.token == handle.token && active.is_complete())
    }

    /// Returns `true` while `handle` identifies the active transition.
    pub fn is_current(&self, handle: TrackerHandle<S>) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.token == handle.token)
    }

    /// Handle of the active transition, if any.
    pub fn active_handle(&self) -> Option<TrackerHandle<S>> {
        self.active
            .as_ref()
            .map(|active| TrackerHandle::new(active.token))
    }

    /// Stages of the active transition that have not reported yet.
    pub fn pending_stages(&self) -> SmallVec<[S; 4]> {
        self.active
            .as_ref()
            .map(|active| {
                active
                    .declared
                    .iter()
                    .copied()
                    .filter(|stage| !active.reported.contains(stage))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Drops the active transition without firing its callback.
    ///
    /// Returns `true` if an unfinished transition was abandoned.
    pub fn invalidate(&mut self) -> bool {
        match self.active.take() {
            Some(active) if !active.is_complete() => {
                debug!(token = active.token.0, "abandoning unfinished transition");
                true
            }
            _ => false,
        }
    }
}

//! Motion-reduction signal.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Handle to the platform's "reduce motion" accessibility setting.
///
/// The host keeps one clone and updates it when the system setting changes;
/// controls keep another and sample it once at the start of every
/// transition. A transition already in flight is never re-checked.
#[derive(Clone, Debug, Default)]
pub struct MotionSettings {
    reduce_motion: Arc<AtomicBool>,
}

impl MotionSettings {
    /// Creates a handle with the given initial value.
    pub fn new(reduce_motion: bool) -> Self {
        Self {
            reduce_motion: Arc::new(AtomicBool::new(reduce_motion)),
        }
    }

    /// Returns whether motion is currently reduced.
    pub fn reduce_motion(&self) -> bool {
        self.reduce_motion.load(Ordering::Acquire)
    }

    /// Updates the signal for every clone of this handle.
    pub fn set_reduce_motion(&self, reduce_motion: bool) {
        self.reduce_motion.store(reduce_motion, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_signal() {
        let host = MotionSettings::default();
        let control = host.clone();
        assert!(!control.reduce_motion());
        host.set_reduce_motion(true);
        assert!(control.reduce_motion());
    }
}

//! Core runtime for the Spark selection controls.
//!
//! `spark-ui` holds everything the controls need that is not a control:
//! color and length primitives, resolved paint and font tokens, comparable
//! callbacks, shared state handles, the explicit scoped [`Context`], the
//! motion-reduction signal and the [`animation`] subsystem that sequences
//! multi-stage transitions.
//!
//! Rendering, gesture recognition and theme-token storage belong to the host;
//! this crate only computes what should be on screen.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod color;
pub mod context;
pub mod dp;
pub mod logging;
pub mod motion;
pub mod paint;
pub mod prop;
pub mod state;

pub use accesskit;

pub use crate::{
    color::Color,
    context::Context,
    dp::Dp,
    motion::MotionSettings,
    paint::{FontToken, FontWeight, Paint},
    prop::{Callback, CallbackWith},
    state::State,
};

//! Spark selection controls.
//!
//! # Usage
//!
//! Provide a theme and, optionally, ambient configuration on a
//! [`Context`](spark_ui::Context), then build the controls from it and feed
//! them frame instants.
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use spark_components::{
//!     theme::SparkTheme,
//!     toggle::{Toggle, ToggleArgs},
//! };
//! use spark_ui::Context;
//!
//! let ctx = Context::new().provide(SparkTheme::default());
//! let mut toggle = Toggle::new(&ctx, ToggleArgs::default().label("Wi-Fi"));
//!
//! let start = Instant::now();
//! toggle.toggle(start);
//! assert!(toggle.is_animating());
//! toggle.tick(start + Duration::from_millis(400));
//! assert!(toggle.is_on());
//! assert!(!toggle.is_animating());
//! ```
//!
//! Every control resolves a [`StyleSnapshot`](style::StyleSnapshot) from its
//! inputs and hands it to a transition driver, which moves the rendered
//! snapshot there one stage at a time, or at once when motion is reduced.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod accessibility;
pub mod checkbox;
pub mod checkbox_group;
mod control;
pub mod group;
pub mod radio_button;
pub mod radio_button_group;
pub mod selection_controls;
pub mod style;
pub mod theme;
pub mod toggle;

pub use crate::{
    group::{GroupError, GroupId, GroupItem},
    selection_controls::{
        Interaction, SelectionControlsAlignment, SelectionControlsAxis, SelectionControlsConfig,
        SelectionControlsIntent,
    },
    style::StyleSnapshot,
    theme::SparkTheme,
};

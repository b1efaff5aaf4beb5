//! Headless showcase of the Spark selection controls.
//!
//! Builds a context, drives a few controls through a simulated 60 Hz frame
//! loop and logs what would be drawn. Pass `--reduce-motion` to take the
//! single-step path. Set `RUST_LOG=debug` to see every stage.

use std::time::{Duration, Instant};

use spark_components::{
    checkbox::{Checkbox, CheckboxArgs, CheckboxSelectionState},
    checkbox_group::{CheckboxGroup, CheckboxGroupArgs},
    group::GroupItem,
    radio_button_group::{RadioButtonGroup, RadioButtonGroupArgs},
    selection_controls::{SelectionControlsAxis, SelectionControlsConfig},
    theme::SparkTheme,
    toggle::{Toggle, ToggleArgs},
};
use spark_ui::{Context, MotionSettings, State, logging::init_tracing};
use tracing::{info, warn};

const FRAME: Duration = Duration::from_micros(16_667);
const MAX_FRAMES: u32 = 120;

/// Ticks `step` once per simulated frame until it reports no more motion.
fn run_frames(label: &str, start: Instant, mut step: impl FnMut(Instant) -> bool) -> Instant {
    let mut now = start;
    for frame in 1..=MAX_FRAMES {
        now += FRAME;
        if !step(now) {
            info!(label, frame, "settled");
            return now;
        }
    }
    warn!(label, "still animating after {MAX_FRAMES} frames");
    now
}

fn main() {
    init_tracing();

    let motion = MotionSettings::new(std::env::args().any(|arg| arg == "--reduce-motion"));
    let ctx = Context::new()
        .provide(SparkTheme::default())
        .provide(motion.clone())
        .provide(SelectionControlsConfig {
            axis: SelectionControlsAxis::Horizontal,
            ..Default::default()
        });
    info!(reduce_motion = motion.reduce_motion(), "context ready");

    let mut now = Instant::now();

    let mut wifi = Toggle::new(
        &ctx,
        ToggleArgs::default()
            .label("Wi-Fi")
            .on_toggle(|on| info!(on, "wi-fi toggled")),
    );
    wifi.toggle(now);
    now = run_frames("toggle", now, |now| {
        wifi.tick(now);
        info!(
            offset = wifi.rendered().indicator_offset,
            glyph = ?wifi.rendered().glyph,
            dot_size = wifi.dot_size().0,
            "toggle frame"
        );
        wifi.is_animating()
    });

    let mut select_all = Checkbox::new(
        &ctx,
        CheckboxArgs::default()
            .title("Select all")
            .selection_state(CheckboxSelectionState::Indeterminate)
            .on_change(|state| info!(?state, "select all changed")),
    );
    select_all.toggle(now);
    now = run_frames("checkbox", now, |now| {
        select_all.tick(now);
        select_all.is_animating()
    });

    let contact = State::new(Some("email"));
    let mut contact_group = RadioButtonGroup::new(
        &ctx,
        RadioButtonGroupArgs::default()
            .title("Contact me by")
            .items(vec![
                GroupItem::new("email", "Email"),
                GroupItem::new("phone", "Phone"),
                GroupItem::new("mail", "Mail").enabled(false),
            ])
            .selection(contact.clone())
            .on_change(|id| info!(id, "contact changed")),
    );
    if let Err(error) = contact_group.select(&"mail", now) {
        warn!(%error, "selection rejected");
    }
    if let Err(error) = contact_group.select(&"phone", now) {
        warn!(%error, "selection rejected");
    }
    now = run_frames("radio group", now, |now| contact_group.tick(now));
    info!(selected = ?contact.get(), axis = ?contact_group.axis(), "radio group done");

    let mut fruit = CheckboxGroup::new(
        &ctx,
        CheckboxGroupArgs::default()
            .title("Fruit")
            .items(vec![
                GroupItem::new(1u32, "Apples"),
                GroupItem::new(2, "Pears"),
            ])
            .on_change(|(id, state)| info!(id, ?state, "fruit changed")),
    );
    for id in [1, 2, 1] {
        if let Err(error) = fruit.toggle(&id, now) {
            warn!(%error, "toggle rejected");
        }
    }
    run_frames("checkbox group", now, |now| fruit.tick(now));
    for checkbox in fruit.checkboxes() {
        let semantics = checkbox.accessibility();
        info!(
            identifier = %semantics.identifier,
            toggled = ?semantics.toggled,
            "fruit item"
        );
    }
    info!(selected = ?fruit.selected_ids(), "done");
}

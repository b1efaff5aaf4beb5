//! A titled group of mutually exclusive radio buttons.
//!
//! ## Usage
//!
//! Bind the selection to a [`State<Option<ID>>`](spark_ui::State) owned by
//! the caller. The group is the only writer of the per-button selection, so
//! at most one button is ever selected.
use std::time::Instant;

use derive_setters::Setters;
use spark_ui::{CallbackWith, Context, State, accesskit::Role};
use tracing::debug;

use crate::{
    accessibility::{self, AccessibilitySemantics, radio_button_item},
    group::{GroupError, GroupId, GroupItem, position_of},
    radio_button::{RadioButton, RadioButtonArgs},
    selection_controls::{SelectionControlsAxis, SelectionControlsConfig, SelectionControlsIntent},
    theme::SparkTheme,
};

/// Arguments for [`RadioButtonGroup`].
#[derive(PartialEq, Clone, Setters)]
pub struct RadioButtonGroupArgs<ID: GroupId> {
    /// Group title.
    #[setters(strip_option, into)]
    pub title: Option<String>,
    /// Items, in display order.
    pub items: Vec<GroupItem<ID>>,
    /// Axis override. Inherited from the context when `None`.
    #[setters(strip_option)]
    pub axis: Option<SelectionControlsAxis>,
    /// Intent override. Inherited from the context when `None`.
    #[setters(strip_option)]
    pub intent: Option<SelectionControlsIntent>,
    /// External storage of the selected identifier.
    #[setters(skip)]
    pub selection: State<Option<ID>>,
    /// Called with the newly selected identifier.
    #[setters(skip)]
    pub on_change: CallbackWith<ID>,
}

impl<ID: GroupId> RadioButtonGroupArgs<ID> {
    /// Binds the selection to caller-owned storage.
    pub fn selection(mut self, selection: State<Option<ID>>) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the on_change handler.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(ID) + Send + Sync + 'static,
    {
        self.on_change = CallbackWith::new(on_change);
        self
    }
}

impl<ID: GroupId> Default for RadioButtonGroupArgs<ID> {
    fn default() -> Self {
        Self {
            title: None,
            items: Vec::new(),
            axis: None,
            intent: None,
            selection: State::new(None),
            on_change: CallbackWith::default(),
        }
    }
}

/// View-model of a radio button group.
pub struct RadioButtonGroup<ID: GroupId> {
    title: Option<String>,
    axis: SelectionControlsAxis,
    items: Vec<GroupItem<ID>>,
    buttons: Vec<RadioButton>,
    selection: State<Option<ID>>,
    on_change: CallbackWith<ID>,
}

impl<ID: GroupId> RadioButtonGroup<ID> {
    /// Builds one radio button per item, showing the bound selection.
    ///
    /// Intent and axis are passed to the buttons through a child context.
    pub fn new(ctx: &Context, args: RadioButtonGroupArgs<ID>) -> Self {
        let config = ctx.get::<SelectionControlsConfig>();
        let axis = args.axis.unwrap_or(config.axis);
        let intent = args.intent.unwrap_or(config.intent);
        let child_ctx = ctx.provide_with::<SelectionControlsConfig>(|config| {
            config.axis = axis;
            config.intent = intent;
        });

        let selected = args.selection.get();
        let buttons: Vec<RadioButton> = args
            .items
            .iter()
            .map(|item| {
                RadioButton::new(
                    &child_ctx,
                    RadioButtonArgs::default()
                        .title(item.title.clone())
                        .selected(selected.as_ref() == Some(&item.id))
                        .enabled(item.enabled)
                        .identifier(radio_button_item(&item.id)),
                )
            })
            .collect();

        Self {
            title: args.title,
            axis,
            items: args.items,
            buttons,
            selection: args.selection,
            on_change: args.on_change,
        }
    }

    /// Group title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Stacking direction of the buttons.
    pub fn axis(&self) -> SelectionControlsAxis {
        self.axis
    }

    /// Items, in display order.
    pub fn items(&self) -> &[GroupItem<ID>] {
        &self.items
    }

    /// Buttons, parallel to [`RadioButtonGroup::items`].
    pub fn buttons(&self) -> &[RadioButton] {
        &self.buttons
    }

    /// The button for `id`, if any.
    pub fn button(&self, id: &ID) -> Option<&RadioButton> {
        self.items
            .iter()
            .position(|item| &item.id == id)
            .map(|index| &self.buttons[index])
    }

    /// The selected identifier, read from the binding.
    pub fn selected_id(&self) -> Option<ID> {
        self.selection.get()
    }

    /// Selects `id` and deselects every other item in one step.
    ///
    /// Selecting the item that is already selected, both on screen and in
    /// the binding, does nothing.
    pub fn select(&mut self, id: &ID, now: Instant) -> Result<(), GroupError> {
        let index = position_of(&self.items, id)?;
        let shown = self
            .buttons
            .iter()
            .enumerate()
            .all(|(i, button)| button.is_selected() == (i == index));
        if shown && self.selection.with(|selected| selected.as_ref() == Some(id)) {
            return Ok(());
        }
        debug!(id = %id, "radio button group selection changed");
        self.show_selected(Some(index), now);
        self.selection.set(Some(id.clone()));
        self.on_change.call(id.clone());
        Ok(())
    }

    /// Re-reads the binding after the owner changed it.
    ///
    /// Returns `true` when the buttons had to change. An identifier no item
    /// carries leaves every button deselected.
    pub fn sync_from_binding(&mut self, now: Instant) -> bool {
        let selected = self.selection.get();
        let index = selected
            .as_ref()
            .and_then(|id| self.items.iter().position(|item| &item.id == id));
        let changed = self
            .buttons
            .iter()
            .enumerate()
            .any(|(i, button)| button.is_selected() != (Some(i) == index));
        if changed {
            self.show_selected(index, now);
        }
        changed
    }

    /// Changes the intent of every button.
    pub fn set_intent(&mut self, intent: SelectionControlsIntent, now: Instant) {
        for button in &mut self.buttons {
            button.set_intent(intent, now);
        }
    }

    /// Switches every button to another token set.
    pub fn set_theme(&mut self, theme: SparkTheme, now: Instant) {
        for button in &mut self.buttons {
            button.set_theme(theme, now);
        }
    }

    /// Advances every button and reports whether any is still animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.buttons.iter_mut().fold(false, |animating, button| {
            button.tick(now);
            animating | button.is_animating()
        })
    }

    /// Returns `true` while any button is animating.
    pub fn is_animating(&self) -> bool {
        self.buttons.iter().any(RadioButton::is_animating)
    }

    /// Accessibility description of the group node.
    pub fn accessibility(&self) -> AccessibilitySemantics {
        AccessibilitySemantics::new(accessibility::RADIO_BUTTON_GROUP, Role::RadioGroup)
            .label(self.title.clone())
    }

    /// Accessibility description of the title, when there is one.
    pub fn title_accessibility(&self) -> Option<AccessibilitySemantics> {
        self.title.as_ref().map(|title| {
            AccessibilitySemantics::new(accessibility::RADIO_BUTTON_GROUP_TITLE, Role::Label)
                .label(Some(title.clone()))
        })
    }

    // Deselects before selecting so no two buttons are ever selected.
    fn show_selected(&mut self, index: Option<usize>, now: Instant) {
        for (i, button) in self.buttons.iter_mut().enumerate() {
            if button.is_selected() && Some(i) != index {
                button.set_selection(false, now);
            }
        }
        if let Some(button) = index.and_then(|i| self.buttons.get_mut(i)) {
            if !button.is_selected() {
                button.set_selection(true, now);
            }
        }
    }
}

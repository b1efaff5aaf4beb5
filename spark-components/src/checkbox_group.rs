//! A titled group of independent checkboxes.
//!
//! ## Usage
//!
//! Bind the per-item states to a [`State`](spark_ui::State) map owned by the
//! caller. Items missing from the map are unselected.
use std::{collections::HashMap, time::Instant};

use derive_setters::Setters;
use spark_ui::{CallbackWith, Context, State, accesskit::Role};
use tracing::debug;

use crate::{
    accessibility::{self, AccessibilitySemantics, checkbox_item},
    checkbox::{Checkbox, CheckboxArgs, CheckboxSelectionState},
    group::{GroupError, GroupId, GroupItem, position_of},
    selection_controls::{SelectionControlsAxis, SelectionControlsConfig, SelectionControlsIntent},
    theme::SparkTheme,
};

/// Arguments for [`CheckboxGroup`].
#[derive(PartialEq, Clone, Setters)]
pub struct CheckboxGroupArgs<ID: GroupId> {
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
    /// External storage of the per-item states.
    #[setters(skip)]
    pub selection: State<HashMap<ID, CheckboxSelectionState>>,
    /// Called with an item and its new state.
    #[setters(skip)]
    pub on_change: CallbackWith<(ID, CheckboxSelectionState)>,
}

impl<ID: GroupId> CheckboxGroupArgs<ID> {
    /// Binds the states to caller-owned storage.
    pub fn selection(mut self, selection: State<HashMap<ID, CheckboxSelectionState>>) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the on_change handler.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn((ID, CheckboxSelectionState)) + Send + Sync + 'static,
    {
        self.on_change = CallbackWith::new(on_change);
        self
    }
}

impl<ID: GroupId> Default for CheckboxGroupArgs<ID> {
    fn default() -> Self {
        Self {
            title: None,
            items: Vec::new(),
            axis: None,
            intent: None,
            selection: State::new(HashMap::new()),
            on_change: CallbackWith::default(),
        }
    }
}

/// View-model of a checkbox group.
pub struct CheckboxGroup<ID: GroupId> {
    title: Option<String>,
    axis: SelectionControlsAxis,
    items: Vec<GroupItem<ID>>,
    checkboxes: Vec<Checkbox>,
    selection: State<HashMap<ID, CheckboxSelectionState>>,
    on_change: CallbackWith<(ID, CheckboxSelectionState)>,
}

impl<ID: GroupId> CheckboxGroup<ID> {
    /// Builds one checkbox per item, showing the bound states.
    pub fn new(ctx: &Context, args: CheckboxGroupArgs<ID>) -> Self {
        let config = ctx.get::<SelectionControlsConfig>();
        let axis = args.axis.unwrap_or(config.axis);
        let intent = args.intent.unwrap_or(config.intent);
        let child_ctx = ctx.provide_with::<SelectionControlsConfig>(|config| {
            config.axis = axis;
            config.intent = intent;
        });

        let checkboxes: Vec<Checkbox> = args.selection.with(|states| {
            args.items
                .iter()
                .map(|item| {
                    Checkbox::new(
                        &child_ctx,
                        CheckboxArgs::default()
                            .title(item.title.clone())
                            .selection_state(states.get(&item.id).copied().unwrap_or_default())
                            .enabled(item.enabled)
                            .identifier(checkbox_item(&item.id)),
                    )
                })
                .collect()
        });

        Self {
            title: args.title,
            axis,
            items: args.items,
            checkboxes,
            selection: args.selection,
            on_change: args.on_change,
        }
    }

    /// Group title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Stacking direction of the checkboxes.
    pub fn axis(&self) -> SelectionControlsAxis {
        self.axis
    }

    /// Items, in display order.
    pub fn items(&self) -> &[GroupItem<ID>] {
        &self.items
    }

    /// Checkboxes, parallel to [`CheckboxGroup::items`].
    pub fn checkboxes(&self) -> &[Checkbox] {
        &self.checkboxes
    }

    /// State of the item `id`, if there is one.
    pub fn state(&self, id: &ID) -> Option<CheckboxSelectionState> {
        self.items
            .iter()
            .position(|item| &item.id == id)
            .map(|index| self.checkboxes[index].selection_state())
    }

    /// Identifiers of every selected item, in display order.
    pub fn selected_ids(&self) -> Vec<ID> {
        self.items
            .iter()
            .zip(&self.checkboxes)
            .filter(|(_, checkbox)| checkbox.selection_state() == CheckboxSelectionState::Selected)
            .map(|(item, _)| item.id.clone())
            .collect()
    }

    /// Sets the state of one item.
    pub fn set_selection(
        &mut self,
        id: &ID,
        state: CheckboxSelectionState,
        now: Instant,
    ) -> Result<(), GroupError> {
        let index = position_of(&self.items, id)?;
        if self.checkboxes[index].selection_state() != state {
            self.checkboxes[index].set_selection(state, now);
            self.commit(id, state);
        }
        Ok(())
    }

    /// Handles a tap on one item and returns its new state.
    pub fn toggle(&mut self, id: &ID, now: Instant) -> Result<CheckboxSelectionState, GroupError> {
        let index = position_of(&self.items, id)?;
        let state = self.checkboxes[index].selection_state().toggled();
        self.checkboxes[index].set_selection(state, now);
        self.commit(id, state);
        Ok(state)
    }

    /// Re-reads the bound states after the owner changed them.
    ///
    /// Returns `true` when any checkbox had to change.
    pub fn sync_from_binding(&mut self, now: Instant) -> bool {
        let states = self.selection.get();
        let mut changed = false;
        for (item, checkbox) in self.items.iter().zip(self.checkboxes.iter_mut()) {
            let state = states.get(&item.id).copied().unwrap_or_default();
            if checkbox.selection_state() != state {
                checkbox.set_selection(state, now);
                changed = true;
            }
        }
        changed
    }

    /// Changes the intent of every checkbox.
    pub fn set_intent(&mut self, intent: SelectionControlsIntent, now: Instant) {
        for checkbox in &mut self.checkboxes {
            checkbox.set_intent(intent, now);
        }
    }

    /// Switches every checkbox to another token set.
    pub fn set_theme(&mut self, theme: SparkTheme, now: Instant) {
        for checkbox in &mut self.checkboxes {
            checkbox.set_theme(theme, now);
        }
    }

    /// Advances every checkbox and reports whether any is still animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.checkboxes.iter_mut().fold(false, |animating, checkbox| {
            checkbox.tick(now);
            animating | checkbox.is_animating()
        })
    }

    /// Returns `true` while any checkbox is animating.
    pub fn is_animating(&self) -> bool {
        self.checkboxes.iter().any(Checkbox::is_animating)
    }

    /// Accessibility description of the group node.
    pub fn accessibility(&self) -> AccessibilitySemantics {
        AccessibilitySemantics::new(accessibility::CHECKBOX_GROUP, Role::Group)
            .label(self.title.clone())
    }

    /// Accessibility description of the title, when there is one.
    pub fn title_accessibility(&self) -> Option<AccessibilitySemantics> {
        self.title.as_ref().map(|title| {
            AccessibilitySemantics::new(accessibility::CHECKBOX_GROUP_TITLE, Role::Label)
                .label(Some(title.clone()))
        })
    }

    fn commit(&self, id: &ID, state: CheckboxSelectionState) {
        debug!(id = %id, ?state, "checkbox group item changed");
        self.selection.with_mut(|states| {
            states.insert(id.clone(), state);
        });
        self.on_change.call((id.clone(), state));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use spark_ui::MotionSettings;

    use super::*;

    fn items() -> Vec<GroupItem<u32>> {
        vec![
            GroupItem::new(1, "Apples"),
            GroupItem::new(2, "Pears"),
            GroupItem::new(3, "Plums").enabled(false),
        ]
    }

    #[test]
    fn toggles_write_through_to_binding() {
        let binding = State::new(HashMap::from([(2, CheckboxSelectionState::Indeterminate)]));
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);
        let ctx = Context::new().provide(MotionSettings::new(true));
        let mut group = CheckboxGroup::new(
            &ctx,
            CheckboxGroupArgs::default()
                .items(items())
                .selection(binding.clone())
                .on_change(move |change| sink.lock().push(change)),
        );
        assert_eq!(group.state(&2), Some(CheckboxSelectionState::Indeterminate));

        let now = Instant::now();
        assert_eq!(group.toggle(&2, now), Ok(CheckboxSelectionState::Selected));
        assert_eq!(group.toggle(&1, now), Ok(CheckboxSelectionState::Selected));
        assert_eq!(group.selected_ids(), vec![1, 2]);
        assert_eq!(
            binding.with(|states| states.get(&1).copied()),
            Some(CheckboxSelectionState::Selected)
        );
        assert_eq!(
            *changes.lock(),
            vec![
                (2, CheckboxSelectionState::Selected),
                (1, CheckboxSelectionState::Selected)
            ]
        );
    }

    #[test]
    fn disabled_and_unknown_items_are_rejected() {
        let mut group = CheckboxGroup::new(
            &Context::new(),
            CheckboxGroupArgs::default().items(items()),
        );
        let now = Instant::now();
        assert_eq!(
            group.toggle(&3, now),
            Err(GroupError::ItemDisabled("3".to_string()))
        );
        assert_eq!(
            group.set_selection(&7, CheckboxSelectionState::Selected, now),
            Err(GroupError::UnknownItem("7".to_string()))
        );
        assert!(group.selected_ids().is_empty());
    }

    #[test]
    fn sync_picks_up_external_changes() {
        let binding = State::new(HashMap::new());
        let mut group = CheckboxGroup::new(
            &Context::new(),
            CheckboxGroupArgs::default()
                .items(items())
                .selection(binding.clone()),
        );
        binding.with_mut(|states| {
            states.insert(3, CheckboxSelectionState::Selected);
        });
        let now = Instant::now();
        assert!(group.sync_from_binding(now));
        assert!(group.is_animating());
        assert!(!group.sync_from_binding(now));
        assert_eq!(group.selected_ids(), vec![3]);
    }

    #[test]
    fn item_identifiers_use_checkbox_base() {
        let group = CheckboxGroup::new(
            &Context::new(),
            CheckboxGroupArgs::default()
                .title("Fruit")
                .items(vec![GroupItem::new("complex.id-with_symbols", "Odd")]),
        );
        assert_eq!(
            group.checkboxes()[0].accessibility().identifier,
            "spark-checkbox-complex.id-with_symbols"
        );
        assert_eq!(group.accessibility().identifier, accessibility::CHECKBOX_GROUP);
        assert_eq!(group.axis(), SelectionControlsAxis::Vertical);
    }
}

//! Stable accessibility identifiers and semantics for the selection controls.
//!
//! ## Usage
//!
//! Map [`AccessibilitySemantics`] onto the host's accessibility tree. The
//! identifiers are stable across releases and safe to use in UI tests.

use std::fmt::Display;

use spark_ui::accesskit::{Role, Toggled};

/// Root of a standalone checkbox, and base of checkbox group items.
pub const CHECKBOX: &str = "spark-checkbox";
/// Root of a checkbox group.
pub const CHECKBOX_GROUP: &str = "spark-checkbox-group";
/// Title of a checkbox group.
pub const CHECKBOX_GROUP_TITLE: &str = "spark-checkbox-group-title";
/// Root of a standalone radio button.
pub const RADIO_BUTTON: &str = "spark-radio-button";
/// Root of a radio button group, and base of its items.
pub const RADIO_BUTTON_GROUP: &str = "spark-radio-button-group";
/// Title of a radio button group.
pub const RADIO_BUTTON_GROUP_TITLE: &str = "spark-radio-button-group-title";
/// Root of a toggle.
pub const TOGGLE: &str = "spark-toggle";
/// Label of a toggle.
pub const TOGGLE_LABEL: &str = "spark-toggle-label";

/// Joins a base identifier with an item's stringified id.
///
/// ```
/// use spark_components::accessibility::item_identifier;
///
/// assert_eq!(item_identifier("spark-checkbox", "a.b"), "spark-checkbox-a.b");
/// ```
pub fn item_identifier(base: &str, id: impl Display) -> String {
    format!("{base}-{id}")
}

/// Identifier of a checkbox group item.
pub fn checkbox_item(id: impl Display) -> String {
    item_identifier(CHECKBOX, id)
}

/// Identifier of a radio button group item.
pub fn radio_button_item(id: impl Display) -> String {
    item_identifier(RADIO_BUTTON_GROUP, id)
}

/// Accessibility description of one control or group node.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessibilitySemantics {
    /// Stable identifier, mapped to the accessibility key.
    pub identifier: String,
    /// Node role.
    pub role: Role,
    /// Text announced by assistive technologies.
    pub label: Option<String>,
    /// Checked state, for checkable roles.
    pub toggled: Option<Toggled>,
    /// Whether the node accepts input.
    pub enabled: bool,
}

impl AccessibilitySemantics {
    /// An enabled node without label or toggled state.
    pub fn new(identifier: impl Into<String>, role: Role) -> Self {
        Self {
            identifier: identifier.into(),
            role,
            label: None,
            toggled: None,
            enabled: true,
        }
    }

    /// Set the announced label.
    pub fn label(mut self, label: Option<impl Into<String>>) -> Self {
        self.label = label.map(Into::into);
        self
    }

    /// Set the toggled state.
    pub fn toggled(mut self, toggled: Toggled) -> Self {
        self.toggled = Some(toggled);
        self
    }

    /// Set whether the node accepts input.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

pub(crate) fn toggled_from(value: bool) -> Toggled {
    if value { Toggled::True } else { Toggled::False }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_item_identifiers() {
        assert_eq!(checkbox_item(123), "spark-checkbox-123");
        assert_eq!(
            checkbox_item("complex.id-with_symbols"),
            "spark-checkbox-complex.id-with_symbols"
        );
    }

    #[test]
    fn radio_button_item_identifiers() {
        assert_eq!(radio_button_item(2), "spark-radio-button-group-2");
        assert_eq!(item_identifier(TOGGLE, "wifi"), "spark-toggle-wifi");
    }

    #[test]
    fn semantics_builder() {
        let semantics = AccessibilitySemantics::new(TOGGLE, Role::Switch)
            .label(Some("Wi-Fi"))
            .toggled(toggled_from(true))
            .enabled(false);
        assert_eq!(semantics.identifier, "spark-toggle");
        assert_eq!(semantics.label.as_deref(), Some("Wi-Fi"));
        assert_eq!(semantics.toggled, Some(Toggled::True));
        assert!(!semantics.enabled);
    }
}

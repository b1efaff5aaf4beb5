//! Configuration shared by every selection control.
//!
//! ## Usage
//!
//! Provide a [`SelectionControlsConfig`] on a [`Context`](spark_ui::Context)
//! to set the intent and group axis for everything built below it. Each
//! control's `*Args` can still override the ambient values.

/// Color intent of a selection control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionControlsIntent {
    /// Regular emphasis.
    #[default]
    Basic,
    /// Signals an invalid choice.
    Error,
}

/// Stacking direction of group items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionControlsAxis {
    /// Items side by side.
    Horizontal,
    /// Items stacked top to bottom.
    #[default]
    Vertical,
}

/// Which side of its label a control sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionControlsAlignment {
    /// Control before the label.
    #[default]
    Leading,
    /// Control after the label.
    Trailing,
}

/// Ambient configuration inherited by descendant controls and groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionControlsConfig {
    /// Default intent.
    pub intent: SelectionControlsIntent,
    /// Default axis for groups.
    pub axis: SelectionControlsAxis,
    /// Default label alignment.
    pub alignment: SelectionControlsAlignment,
}

/// Pointer interaction flags that participate in style resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interaction {
    /// A pointer hovers the control.
    pub hovered: bool,
    /// The control is being pressed.
    pub pressed: bool,
}

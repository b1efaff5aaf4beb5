//! Items and errors shared by the group containers.

use std::{fmt::Display, hash::Hash};

use thiserror::Error;

/// Capabilities required of a group item identifier.
///
/// Implemented for every type that can be compared, hashed and rendered as a
/// string, such as integers, `String` or custom enums with a `Display` impl.
pub trait GroupId: Clone + Eq + Hash + Display + Send + Sync + 'static {}

impl<T> GroupId for T where T: Clone + Eq + Hash + Display + Send + Sync + 'static {}

/// One entry of a checkbox or radio button group.
///
/// Identifiers must be unique within a group; duplicates lead to unspecified
/// selection behavior.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupItem<ID> {
    /// Identifier the selection is bound by.
    pub id: ID,
    /// Label shown next to the control.
    pub title: String,
    /// Whether the item accepts input.
    pub enabled: bool,
}

impl<ID> GroupItem<ID> {
    /// Creates an enabled item.
    pub fn new(id: ID, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            enabled: true,
        }
    }

    /// Sets whether the item accepts input.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Caller mistakes a group container rejects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    /// No item carries the identifier.
    #[error("no group item with id `{0}`")]
    UnknownItem(String),
    /// The item exists but is disabled.
    #[error("group item `{0}` is disabled")]
    ItemDisabled(String),
}

pub(crate) fn position_of<ID: GroupId>(
    items: &[GroupItem<ID>],
    id: &ID,
) -> Result<usize, GroupError> {
    let index = items
        .iter()
        .position(|item| &item.id == id)
        .ok_or_else(|| GroupError::UnknownItem(id.to_string()))?;
    if !items[index].enabled {
        return Err(GroupError::ItemDisabled(id.to_string()));
    }
    Ok(index)
}

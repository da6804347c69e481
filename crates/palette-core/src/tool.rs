//! The closed set of editing tools.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Editing tool.
///
/// Serialized (and parsed) with the same lowercase / camelCase identifiers
/// frontends use, e.g. `"boxselect"` or `"rotateLeft90"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    /// Paint the clicked cell with the selected color.
    #[serde(rename = "paint")]
    Paint,
    /// Single-cell select; clicking the selected cell clears the selection.
    #[serde(rename = "select")]
    Select,
    /// Toggle cells in and out of the selection.
    #[serde(rename = "multiselect")]
    MultiSelect,
    /// Rectangle drag select.
    #[serde(rename = "boxselect")]
    BoxSelect,
    /// Freehand path drag select.
    #[serde(rename = "ropeselect")]
    RopeSelect,
    /// Single-cell lock toggle.
    #[serde(rename = "lock")]
    Lock,
    /// Lock every selected cell.
    #[serde(rename = "lockselected")]
    LockSelected,
    /// Unlock every selected cell.
    #[serde(rename = "unlockselected")]
    UnlockSelected,
    /// Rectangle drag lock.
    #[serde(rename = "boxlock")]
    BoxLock,
    /// Freehand path drag lock.
    #[serde(rename = "ropelock")]
    RopeLock,
    /// Lock every cell.
    #[serde(rename = "lockall")]
    LockAll,
    /// Unlock every cell.
    #[serde(rename = "unlockall")]
    UnlockAll,
    /// Fill every unlocked cell.
    #[serde(rename = "fillall")]
    FillAll,
    /// Fill every selected unlocked cell.
    #[serde(rename = "fillselected")]
    FillSelected,
    /// Fill the clicked row.
    #[serde(rename = "fillrow")]
    FillRow,
    /// Fill the clicked column.
    #[serde(rename = "fillcolumn")]
    FillColumn,
    /// Select whole rows.
    #[serde(rename = "rowselect")]
    RowSelect,
    /// Select whole columns.
    #[serde(rename = "columnselect")]
    ColumnSelect,
    /// Grid layout controls are active.
    #[serde(rename = "transform")]
    Transform,
    /// Move the selection so its first cell lands on the clicked cell.
    #[serde(rename = "move")]
    Move,
    /// Rotate the selection a quarter turn left.
    #[serde(rename = "rotateLeft90")]
    RotateLeft90,
    /// Rotate the selection a quarter turn right.
    #[serde(rename = "rotateRight90")]
    RotateRight90,
}

impl Tool {
    /// Every tool, in toolbar order.
    pub const ALL: [Tool; 22] = [
        Tool::Paint,
        Tool::Select,
        Tool::MultiSelect,
        Tool::BoxSelect,
        Tool::RopeSelect,
        Tool::Lock,
        Tool::LockSelected,
        Tool::UnlockSelected,
        Tool::BoxLock,
        Tool::RopeLock,
        Tool::LockAll,
        Tool::UnlockAll,
        Tool::FillAll,
        Tool::FillSelected,
        Tool::FillRow,
        Tool::FillColumn,
        Tool::RowSelect,
        Tool::ColumnSelect,
        Tool::Transform,
        Tool::Move,
        Tool::RotateLeft90,
        Tool::RotateRight90,
    ];

    /// Frontend identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Paint => "paint",
            Tool::Select => "select",
            Tool::MultiSelect => "multiselect",
            Tool::BoxSelect => "boxselect",
            Tool::RopeSelect => "ropeselect",
            Tool::Lock => "lock",
            Tool::LockSelected => "lockselected",
            Tool::UnlockSelected => "unlockselected",
            Tool::BoxLock => "boxlock",
            Tool::RopeLock => "ropelock",
            Tool::LockAll => "lockall",
            Tool::UnlockAll => "unlockall",
            Tool::FillAll => "fillall",
            Tool::FillSelected => "fillselected",
            Tool::FillRow => "fillrow",
            Tool::FillColumn => "fillcolumn",
            Tool::RowSelect => "rowselect",
            Tool::ColumnSelect => "columnselect",
            Tool::Transform => "transform",
            Tool::Move => "move",
            Tool::RotateLeft90 => "rotateLeft90",
            Tool::RotateRight90 => "rotateRight90",
        }
    }

    /// Tools that act once when chosen instead of becoming the active tool.
    pub fn is_immediate(self) -> bool {
        matches!(
            self,
            Tool::LockSelected
                | Tool::UnlockSelected
                | Tool::LockAll
                | Tool::UnlockAll
                | Tool::FillAll
                | Tool::FillSelected
        )
    }

    /// Tools driven by a down / move / up drag.
    pub fn is_drag(self) -> bool {
        self.is_selection_drag() || self.is_lock_drag()
    }

    /// Box or rope selection.
    pub fn is_selection_drag(self) -> bool {
        matches!(self, Tool::BoxSelect | Tool::RopeSelect)
    }

    /// Box or rope lock.
    pub fn is_lock_drag(self) -> bool {
        matches!(self, Tool::BoxLock | Tool::RopeLock)
    }

    /// Either rotation tool.
    pub fn is_rotate(self) -> bool {
        matches!(self, Tool::RotateLeft90 | Tool::RotateRight90)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown tool identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool '{0}'")]
pub struct ParseToolError(pub String);

impl FromStr for Tool {
    type Err = ParseToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| ParseToolError(s.to_string()))
    }
}

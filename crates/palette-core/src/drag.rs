//! Two-phase drag gestures for box and rope selection/locking.
//!
//! A gesture is `Idle` until a pointer-down starts it. While dragging it owns
//! the temporary cell set that frontends render; nothing is committed until
//! [`DragGesture::finish`] hands the cells to the selection or lock engine.
//! Finishing or cancelling always returns the gesture to `Idle`.

use crate::cell_set::CellSet;
use crate::geometry::{Dimensions, cells_in_box, cells_in_rope};

/// Rasterization used by a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragShape {
    /// Rectangle between the anchor and the current cell.
    Box,
    /// Connected path through every visited cell.
    Rope,
}

/// Result of a finished drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragCommit {
    /// Cells covered by the gesture.
    pub cells: CellSet,
    /// Whether the gesture extends (unions with) the existing set.
    pub extend: bool,
}

/// In-progress drag state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragGesture {
    /// No drag in progress.
    #[default]
    Idle,
    /// Rectangle drag.
    Box {
        /// Cell where the drag started.
        anchor: usize,
        /// Cell under the pointer.
        current: usize,
        /// Cells inside the rectangle.
        cells: CellSet,
        /// Shift was held on pointer-down.
        extend: bool,
    },
    /// Freehand drag.
    Rope {
        /// Waypoints, without consecutive duplicates.
        points: Vec<usize>,
        /// Cells on the rasterized path.
        cells: CellSet,
        /// Shift was held on pointer-down.
        extend: bool,
    },
}

impl DragGesture {
    /// Start a drag at `cell`.
    pub fn begin(shape: DragShape, cell: usize, extend: bool) -> Self {
        let cells: CellSet = std::iter::once(cell).collect();
        match shape {
            DragShape::Box => DragGesture::Box {
                anchor: cell,
                current: cell,
                cells,
                extend,
            },
            DragShape::Rope => DragGesture::Rope {
                points: vec![cell],
                cells,
                extend,
            },
        }
    }

    /// Feed the cell under the pointer. Ignored while idle.
    ///
    /// Returns `true` when the temporary cell set changed.
    pub fn update(&mut self, cell: usize, dims: Dimensions) -> bool {
        match self {
            DragGesture::Idle => false,
            DragGesture::Box {
                anchor,
                current,
                cells,
                ..
            } => {
                if *current == cell {
                    return false;
                }
                *current = cell;
                *cells = cells_in_box(*anchor, cell, dims).into_iter().collect();
                true
            }
            DragGesture::Rope { points, cells, .. } => {
                if points.last() == Some(&cell) {
                    return false;
                }
                points.push(cell);
                *cells = cells_in_rope(points, dims);
                true
            }
        }
    }

    /// Finish the drag, returning its cells. `None` when idle.
    ///
    /// `shift` is the modifier state on pointer-up; the commit extends only
    /// when shift was held on both ends.
    pub fn finish(&mut self, shift: bool) -> Option<DragCommit> {
        match std::mem::take(self) {
            DragGesture::Idle => None,
            DragGesture::Box { cells, extend, .. } | DragGesture::Rope { cells, extend, .. } => {
                Some(DragCommit {
                    cells,
                    extend: extend && shift,
                })
            }
        }
    }

    /// Abandon the drag without committing.
    pub fn cancel(&mut self) {
        *self = DragGesture::Idle;
    }

    /// Whether a drag is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, DragGesture::Idle)
    }

    /// Whether the drag was started with shift held.
    pub fn is_extending(&self) -> bool {
        match self {
            DragGesture::Idle => false,
            DragGesture::Box { extend, .. } | DragGesture::Rope { extend, .. } => *extend,
        }
    }

    /// Box anchor, if this is a box drag.
    pub fn anchor(&self) -> Option<usize> {
        match self {
            DragGesture::Box { anchor, .. } => Some(*anchor),
            _ => None,
        }
    }

    /// Rope waypoints so far; empty unless this is a rope drag.
    pub fn points(&self) -> &[usize] {
        match self {
            DragGesture::Rope { points, .. } => points,
            _ => &[],
        }
    }

    /// Temporary cells; `None` while idle.
    pub fn cells(&self) -> Option<&CellSet> {
        match self {
            DragGesture::Idle => None,
            DragGesture::Box { cells, .. } | DragGesture::Rope { cells, .. } => Some(cells),
        }
    }
}

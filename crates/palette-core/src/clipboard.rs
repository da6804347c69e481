//! Cell and line clipboards.
//!
//! Two distinct clipboards exist. [`CellClipboard`] snapshots an arbitrary
//! shape eagerly at copy time. [`LineClipboard`] only records which row or
//! column was copied; its colors are read from the palette at paste time.

use crate::cell_set::CellSet;
use crate::color::Color;
use crate::geometry::Line;
use crate::palette::Palette;
use serde::{Deserialize, Serialize};

/// An anchored, shape-preserving snapshot of copied cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellClipboard {
    indices: Vec<usize>,
    colors: Vec<Color>,
}

impl CellClipboard {
    /// Snapshot the unlocked cells of `selection`.
    ///
    /// Returns `None` when nothing is left after dropping locked cells.
    pub fn copy(selection: &CellSet, palette: &Palette, locked: &CellSet) -> Option<Self> {
        let (indices, colors): (Vec<_>, Vec<_>) = selection
            .iter()
            .filter(|&i| !locked.contains(i))
            .filter_map(|i| palette.get(i).map(|color| (i, color)))
            .unzip();
        if indices.is_empty() {
            return None;
        }
        Some(Self { indices, colors })
    }

    /// Source cell indices, in copy order. The first one is the anchor.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Colors parallel to [`indices`](Self::indices).
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of copied cells.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Never `true` for a clipboard built by [`copy`](Self::copy).
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Paste so that the anchor cell lands on `target`.
    ///
    /// Cells falling outside the grid or onto locked cells are dropped.
    pub fn paste(&self, target: usize, palette: &Palette, locked: &CellSet) -> Palette {
        palette.write_cells(self.destinations(target, palette), locked)
    }

    /// In-grid `(destination, color)` pairs for a paste at `target`, locks ignored.
    pub fn destinations(&self, target: usize, palette: &Palette) -> Vec<(usize, Color)> {
        let dims = palette.dimensions();
        let Some(&anchor) = self.indices.first() else {
            return Vec::new();
        };
        let (anchor_row, anchor_col) = dims.row_col(anchor);
        let (target_row, target_col) = dims.row_col(target);

        self.indices
            .iter()
            .zip(&self.colors)
            .filter_map(|(&source, &color)| {
                let (row, col) = dims.row_col(source);
                let dest_row = target_row as isize + row as isize - anchor_row as isize;
                let dest_col = target_col as isize + col as isize - anchor_col as isize;
                dims.checked_index(dest_row, dest_col).map(|dest| (dest, color))
            })
            .collect()
    }
}

/// A copied row or column, resolved lazily at paste time.
pub type LineClipboard = Line;

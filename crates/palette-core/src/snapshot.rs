//! Headless render snapshot.
//!
//! Flattens committed state, previews and in-progress drags into the per-cell
//! data a frontend draws. The rotation preview overrides the hover preview,
//! which overrides the committed palette.

use crate::color::Color;
use crate::geometry::Dimensions;
use crate::state::{CoreState, UiState};
use crate::tool::Tool;

/// Cell render information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    /// Color to draw.
    pub color: Color,
    /// Part of the selection (committed or in-progress drag).
    pub is_selected: bool,
    /// Locked (committed or in-progress lock drag).
    pub is_locked: bool,
    /// The drawn color comes from a preview and differs from the palette.
    pub is_previewed: bool,
}

/// Render snapshot of the whole grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    /// Grid size.
    pub dimensions: Dimensions,
    /// Cells, row-major.
    pub cells: Vec<CellView>,
    /// Active tool.
    pub tool: Option<Tool>,
    /// Paint color.
    pub selected_color: Color,
}

impl GridSnapshot {
    /// Build a snapshot.
    pub fn new(core: &CoreState, ui: &UiState) -> Self {
        let palette = &core.palette;
        let effective = ui
            .rotation_preview
            .as_ref()
            .or(ui.preview_palette.as_ref())
            .filter(|preview| preview.dimensions() == palette.dimensions())
            .unwrap_or(palette);

        let selection_drag = ui.selection_drag.cells();
        // A non-extending drag replaces the selection once committed, so hide it meanwhile.
        let hide_committed_selection =
            ui.selection_drag.is_active() && !ui.selection_drag.is_extending();
        let lock_drag = ui.lock_drag.cells();

        let cells = (0..palette.len())
            .map(|i| {
                let color = effective.get(i).unwrap_or_default();
                let committed_selected = !hide_committed_selection
                    && (core.selected_cell == Some(i) || core.selected_cells.contains(i));
                CellView {
                    color,
                    is_selected: committed_selected
                        || selection_drag.is_some_and(|cells| cells.contains(i)),
                    is_locked: core.locked_cells.contains(i)
                        || lock_drag.is_some_and(|cells| cells.contains(i)),
                    is_previewed: palette.get(i) != Some(color),
                }
            })
            .collect();

        Self {
            dimensions: palette.dimensions(),
            cells,
            tool: core.selected_tool,
            selected_color: core.selected_color,
        }
    }

    /// Cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellView> {
        if row >= self.dimensions.height || col >= self.dimensions.width {
            return None;
        }
        self.cells.get(self.dimensions.index(row, col))
    }

    /// Cells of one row.
    pub fn row(&self, row: usize) -> &[CellView] {
        let width = self.dimensions.width;
        let start = (row * width).min(self.cells.len());
        let end = (start + width).min(self.cells.len());
        &self.cells[start..end]
    }
}

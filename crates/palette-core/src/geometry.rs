//! Grid geometry
//!
//! Index arithmetic for the row-major cell grid plus the two rasterizers used
//! by drag gestures: rectangles (box select/lock) and connected line paths
//! (rope select/lock).

use crate::cell_set::CellSet;
use crate::error::CommandError;
use serde::{Deserialize, Serialize};

/// Grid size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct Dimensions {
    /// Number of columns (must be greater than 0).
    pub width: usize,
    /// Number of rows (must be greater than 0).
    pub height: usize,
}

#[derive(Deserialize)]
struct RawDimensions {
    width: usize,
    height: usize,
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = CommandError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Dimensions::new(raw.width, raw.height)
    }
}

impl Dimensions {
    /// Create validated dimensions.
    pub fn new(width: usize, height: usize) -> Result<Self, CommandError> {
        let dims = Self { width, height };
        dims.validate()?;
        Ok(dims)
    }

    /// Fail with [`CommandError::InvalidDimensions`] when either axis is 0 or
    /// `width * height` does not fit in `usize`.
    pub fn validate(&self) -> Result<(), CommandError> {
        if self.width == 0 || self.height == 0 || self.width.checked_mul(self.height).is_none() {
            return Err(CommandError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Total number of cells (`width * height`), saturating on unvalidated input.
    pub fn cell_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Convert a cell index into `(row, col)`.
    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    /// Convert `(row, col)` into a cell index. Does not bounds-check.
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Whether `index` addresses a cell of this grid.
    pub fn contains(&self, index: usize) -> bool {
        index < self.cell_count()
    }

    /// Signed variant of [`index`](Self::index): `None` when `(row, col)` falls outside the grid.
    pub fn checked_index(&self, row: isize, col: isize) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        (row < self.height && col < self.width).then(|| self.index(row, col))
    }

    /// Cell reached from `index` by stepping `rows` down and `columns` right.
    ///
    /// `None` when the step leaves the grid, including on `isize` overflow.
    pub fn offset(&self, index: usize, rows: isize, columns: isize) -> Option<usize> {
        let (row, col) = self.row_col(index);
        let row = isize::try_from(row).ok()?.checked_add(rows)?;
        let col = isize::try_from(col).ok()?.checked_add(columns)?;
        self.checked_index(row, col)
    }

    /// Fail with [`CommandError::InvalidCell`] when `index` is outside the grid.
    pub fn check_cell(&self, index: usize) -> Result<(), CommandError> {
        if self.contains(index) {
            Ok(())
        } else {
            Err(CommandError::InvalidCell {
                index,
                cell_count: self.cell_count(),
            })
        }
    }

    /// Fail with [`CommandError::InvalidRow`] when `row` is outside the grid.
    pub fn check_row(&self, row: usize) -> Result<(), CommandError> {
        if row < self.height {
            Ok(())
        } else {
            Err(CommandError::InvalidRow {
                row,
                height: self.height,
            })
        }
    }

    /// Fail with [`CommandError::InvalidColumn`] when `column` is outside the grid.
    pub fn check_column(&self, column: usize) -> Result<(), CommandError> {
        if column < self.width {
            Ok(())
        } else {
            Err(CommandError::InvalidColumn {
                column,
                width: self.width,
            })
        }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
        }
    }
}

/// Grid edge removed by [`Palette::pop_section`](crate::Palette::pop_section).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopEdge {
    /// Drop the first row.
    Top,
    /// Drop the last row.
    Bottom,
    /// Drop the first column.
    Left,
    /// Drop the last column.
    Right,
}

/// Target shape for [`Palette::transform_layout`](crate::Palette::transform_layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridLayout {
    /// A single row holding every cell.
    Horizontal,
    /// A single column holding every cell.
    Vertical,
    /// The most square-like grid: `ceil(sqrt(n))` columns.
    Square,
}

impl GridLayout {
    /// Dimensions this layout produces for `cell_count` cells.
    pub fn dimensions_for(self, cell_count: usize) -> Dimensions {
        let cell_count = cell_count.max(1);
        match self {
            GridLayout::Horizontal => Dimensions {
                width: cell_count,
                height: 1,
            },
            GridLayout::Vertical => Dimensions {
                width: 1,
                height: cell_count,
            },
            GridLayout::Square => {
                let mut width = (cell_count as f64).sqrt().ceil() as usize;
                // Guard against float rounding on perfect squares.
                while width > 1 && (width - 1) * (width - 1) >= cell_count {
                    width -= 1;
                }
                while width * width < cell_count {
                    width += 1;
                }
                Dimensions {
                    width,
                    height: cell_count.div_ceil(width),
                }
            }
        }
    }
}

/// A whole row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Line {
    /// Row index.
    Row(usize),
    /// Column index.
    Column(usize),
}

impl Line {
    /// Row index, if this is a row.
    pub fn row(self) -> Option<usize> {
        match self {
            Line::Row(row) => Some(row),
            Line::Column(_) => None,
        }
    }

    /// Column index, if this is a column.
    pub fn column(self) -> Option<usize> {
        match self {
            Line::Column(column) => Some(column),
            Line::Row(_) => None,
        }
    }

    /// The line of the same kind that contains `cell`.
    pub fn through(self, cell: usize, dims: Dimensions) -> Line {
        let (row, col) = dims.row_col(cell);
        match self {
            Line::Row(_) => Line::Row(row),
            Line::Column(_) => Line::Column(col),
        }
    }

    /// Row or column index, whichever this is.
    pub fn position(self) -> usize {
        match self {
            Line::Row(i) | Line::Column(i) => i,
        }
    }

    /// Same kind of line at another position.
    pub fn with_position(self, position: usize) -> Line {
        match self {
            Line::Row(_) => Line::Row(position),
            Line::Column(_) => Line::Column(position),
        }
    }

    /// Fail when the line lies outside the grid.
    pub fn check(self, dims: Dimensions) -> Result<(), CommandError> {
        match self {
            Line::Row(row) => dims.check_row(row),
            Line::Column(column) => dims.check_column(column),
        }
    }

    /// Cells of this line, in row-major order.
    pub fn cells(self, dims: Dimensions) -> Vec<usize> {
        match self {
            Line::Row(row) => row_cells(row, dims),
            Line::Column(column) => column_cells(column, dims),
        }
    }
}

/// All cells of `row`, left to right.
pub fn row_cells(row: usize, dims: Dimensions) -> Vec<usize> {
    (0..dims.width).map(|col| dims.index(row, col)).collect()
}

/// All cells of `column`, top to bottom.
pub fn column_cells(column: usize, dims: Dimensions) -> Vec<usize> {
    (0..dims.height).map(|row| dims.index(row, column)).collect()
}

/// Cells of the inclusive rectangle spanned by two corner cells, row-major.
pub fn cells_in_box(anchor: usize, current: usize, dims: Dimensions) -> Vec<usize> {
    let (anchor_row, anchor_col) = dims.row_col(anchor);
    let (current_row, current_col) = dims.row_col(current);

    let (min_row, max_row) = (anchor_row.min(current_row), anchor_row.max(current_row));
    let (min_col, max_col) = (anchor_col.min(current_col), anchor_col.max(current_col));

    let mut cells = Vec::with_capacity((max_row - min_row + 1) * (max_col - min_col + 1));
    for row in min_row..=max_row {
        for col in min_col..=max_col {
            cells.push(dims.index(row, col));
        }
    }
    cells
}

/// Cells visited by a polyline through `points`.
///
/// Every consecutive pair of waypoints is rasterized with integer Bresenham;
/// the union of all segments is returned in first-visit order. No points
/// yields an empty set, one point yields just that cell.
pub fn cells_in_rope(points: &[usize], dims: Dimensions) -> CellSet {
    let mut cells = CellSet::new();
    match points {
        [] => {}
        [single] => {
            cells.insert(*single);
        }
        _ => {
            for pair in points.windows(2) {
                rasterize_segment(pair[0], pair[1], dims, &mut cells);
            }
        }
    }
    cells
}

fn rasterize_segment(start: usize, end: usize, dims: Dimensions, out: &mut CellSet) {
    let (start_row, start_col) = dims.row_col(start);
    let (end_row, end_col) = dims.row_col(end);
    let (end_x, end_y) = (end_col as isize, end_row as isize);

    let dx = (end_x - start_col as isize).abs();
    let dy = (end_y - start_row as isize).abs();
    let sx = if (start_col as isize) < end_x { 1 } else { -1 };
    let sy = if (start_row as isize) < end_y { 1 } else { -1 };
    let mut err = dx - dy;

    let mut x = start_col as isize;
    let mut y = start_row as isize;

    loop {
        out.insert(dims.index(y as usize, x as usize));
        if x == end_x && y == end_y {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

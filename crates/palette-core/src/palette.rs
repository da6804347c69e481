//! Grid contents and the pure operations over them.
//!
//! A [`Palette`] owns its [`Dimensions`] together with the dense row-major
//! color array, so `cells().len() == width * height` holds for every value
//! that can be constructed. Every operation returns a new palette; none of
//! them mutate in place.
//!
//! Operations that take a `locked` set skip writes onto locked cells. The
//! rest are lock-unaware and callers that need lock protection pair them
//! with [`Palette::restore_locked`].

use crate::cell_set::CellSet;
use crate::color::Color;
use crate::error::CommandError;
use crate::geometry::{Dimensions, GridLayout, PopEdge, column_cells, row_cells};
use serde::{Deserialize, Serialize};

/// Rotation direction for [`Palette::rotate90`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateDirection {
    /// `(row, col) -> (col, height - 1 - row)`.
    Left,
    /// `(row, col) -> (width - 1 - col, row)`.
    Right,
}

#[derive(Deserialize)]
struct RawPalette {
    dimensions: Dimensions,
    cells: Vec<Color>,
}

/// A rectangular grid of colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPalette")]
pub struct Palette {
    dimensions: Dimensions,
    cells: Vec<Color>,
}

impl TryFrom<RawPalette> for Palette {
    type Error = CommandError;

    fn try_from(raw: RawPalette) -> Result<Self, Self::Error> {
        Palette::from_cells(raw.dimensions, raw.cells)
    }
}

impl Palette {
    /// A grid of `dims` with every cell set to `color`.
    pub fn new(dims: Dimensions, color: Color) -> Result<Self, CommandError> {
        dims.validate()?;
        Ok(Self::filled(dims, color))
    }

    pub(crate) fn filled(dimensions: Dimensions, color: Color) -> Self {
        Self {
            dimensions,
            cells: vec![color; dimensions.cell_count()],
        }
    }

    /// Wrap an existing color array, checking its length against `dims`.
    pub fn from_cells(dims: Dimensions, cells: Vec<Color>) -> Result<Self, CommandError> {
        dims.validate()?;
        if cells.len() != dims.cell_count() {
            return Err(CommandError::PaletteLength {
                expected: dims.cell_count(),
                actual: cells.len(),
            });
        }
        Ok(Self {
            dimensions: dims,
            cells,
        })
    }

    /// Grid size.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; a palette has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All colors, row-major.
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Color at `index`.
    pub fn get(&self, index: usize) -> Option<Color> {
        self.cells.get(index).copied()
    }

    /// Lossy, position-preserving resize.
    ///
    /// The overlapping top-left rectangle is copied cell for cell; new cells
    /// are `background`.
    pub fn reshape(&self, new_dims: Dimensions, background: Color) -> Palette {
        if new_dims == self.dimensions {
            return self.clone();
        }
        let mut out = Palette::filled(new_dims, background);
        let rows = self.height().min(new_dims.height);
        let cols = self.width().min(new_dims.width);
        for row in 0..rows {
            for col in 0..cols {
                out.cells[new_dims.index(row, col)] = self.cells[self.dimensions.index(row, col)];
            }
        }
        out
    }

    /// Drop the row or column on `edge`. Unchanged when that axis is already 1.
    pub fn pop_section(&self, edge: PopEdge) -> Palette {
        match edge {
            PopEdge::Top => self.remove_row(0),
            PopEdge::Bottom => self.remove_row(self.height() - 1),
            PopEdge::Left => self.remove_column(0),
            PopEdge::Right => self.remove_column(self.width() - 1),
        }
    }

    /// Delete `row`, compacting the rest. Unchanged when height is 1 or `row` is out of range.
    pub fn remove_row(&self, row: usize) -> Palette {
        if self.height() <= 1 || row >= self.height() {
            return self.clone();
        }
        let width = self.width();
        let cells = self
            .cells
            .chunks(width)
            .enumerate()
            .filter(|(r, _)| *r != row)
            .flat_map(|(_, line)| line.iter().copied())
            .collect();
        Palette {
            dimensions: Dimensions {
                width,
                height: self.height() - 1,
            },
            cells,
        }
    }

    /// Delete `column`, compacting the rest. Unchanged when width is 1 or `column` is out of range.
    pub fn remove_column(&self, column: usize) -> Palette {
        if self.width() <= 1 || column >= self.width() {
            return self.clone();
        }
        let width = self.width();
        let cells = self
            .cells
            .iter()
            .enumerate()
            .filter(|(i, _)| i % width != column)
            .map(|(_, color)| *color)
            .collect();
        Palette {
            dimensions: Dimensions {
                width: width - 1,
                height: self.height(),
            },
            cells,
        }
    }

    /// Set every cell of `row` to `background`.
    pub fn clear_row(&self, row: usize, background: Color) -> Palette {
        self.overwrite(row_cells(row, self.dimensions), background, None)
    }

    /// Set every cell of `column` to `background`.
    pub fn clear_column(&self, column: usize, background: Color) -> Palette {
        self.overwrite(column_cells(column, self.dimensions), background, None)
    }

    /// Copy row `source` onto row `target`, reading the current colors.
    pub fn paste_row(&self, source: usize, target: usize) -> Palette {
        let mut out = self.clone();
        if source == target || source >= self.height() || target >= self.height() {
            return out;
        }
        for col in 0..self.width() {
            out.cells[self.dimensions.index(target, col)] =
                self.cells[self.dimensions.index(source, col)];
        }
        out
    }

    /// Copy column `source` onto column `target`, reading the current colors.
    pub fn paste_column(&self, source: usize, target: usize) -> Palette {
        let mut out = self.clone();
        if source == target || source >= self.width() || target >= self.width() {
            return out;
        }
        for row in 0..self.height() {
            out.cells[self.dimensions.index(row, target)] =
                self.cells[self.dimensions.index(row, source)];
        }
        out
    }

    /// Offset that moves the first selected cell onto `target`.
    pub fn move_offset(&self, selection: &CellSet, target: usize) -> Option<(isize, isize)> {
        let first = selection.first()?;
        let (first_row, first_col) = self.dimensions.row_col(first);
        let (target_row, target_col) = self.dimensions.row_col(target);
        Some((
            target_row as isize - first_row as isize,
            target_col as isize - first_col as isize,
        ))
    }

    /// Translate the selected cells by `(row_offset, col_offset)`.
    ///
    /// Sources are cleared to `background` first, including locked ones.
    /// Destinations outside the grid or locked are skipped.
    pub fn move_cells(
        &self,
        selection: &CellSet,
        row_offset: isize,
        col_offset: isize,
        locked: &CellSet,
        background: Color,
    ) -> Palette {
        let dims = self.dimensions;
        self.relocate(selection, locked, background, |index| {
            dims.offset(index, row_offset, col_offset)
        })
    }

    /// Rotate the selected cells a quarter turn about the grid.
    ///
    /// Sources are cleared to `background` first. Destinations that fall
    /// outside a non-square grid are dropped, as are locked ones.
    pub fn rotate90(
        &self,
        selection: &CellSet,
        direction: RotateDirection,
        locked: &CellSet,
        background: Color,
    ) -> Palette {
        let dims = self.dimensions;
        self.relocate(selection, locked, background, |index| {
            let (row, col) = dims.row_col(index);
            let (dest_row, dest_col) = match direction {
                RotateDirection::Left => (col as isize, (dims.height - 1) as isize - row as isize),
                RotateDirection::Right => ((dims.width - 1) as isize - col as isize, row as isize),
            };
            dims.checked_index(dest_row, dest_col)
        })
    }

    fn relocate<F>(
        &self,
        selection: &CellSet,
        locked: &CellSet,
        background: Color,
        dest: F,
    ) -> Palette
    where
        F: Fn(usize) -> Option<usize>,
    {
        let mut out = self.clone();
        for index in selection.iter().filter(|&i| self.dimensions.contains(i)) {
            out.cells[index] = background;
        }
        for index in selection.iter().filter(|&i| self.dimensions.contains(i)) {
            if let Some(target) = dest(index)
                && !locked.contains(target)
            {
                out.cells[target] = self.cells[index];
            }
        }
        out
    }

    /// Set every unlocked cell to `color`.
    pub fn fill_all(&self, color: Color, locked: &CellSet) -> Palette {
        self.overwrite(0..self.len(), color, Some(locked))
    }

    /// Set every listed unlocked cell to `color`. Out-of-range indices are skipped.
    pub fn fill_cells<I>(&self, cells: I, color: Color, locked: &CellSet) -> Palette
    where
        I: IntoIterator<Item = usize>,
    {
        self.overwrite(cells, color, Some(locked))
    }

    /// Set every unlocked cell of `row` to `color`.
    pub fn fill_row(&self, row: usize, color: Color, locked: &CellSet) -> Palette {
        self.overwrite(row_cells(row, self.dimensions), color, Some(locked))
    }

    /// Set every unlocked cell of `column` to `color`.
    pub fn fill_column(&self, column: usize, color: Color, locked: &CellSet) -> Palette {
        self.overwrite(column_cells(column, self.dimensions), color, Some(locked))
    }

    /// Apply `(index, color)` writes, skipping locked and out-of-range cells.
    pub fn write_cells<I>(&self, writes: I, locked: &CellSet) -> Palette
    where
        I: IntoIterator<Item = (usize, Color)>,
    {
        let mut out = self.clone();
        for (index, color) in writes {
            if index < out.cells.len() && !locked.contains(index) {
                out.cells[index] = color;
            }
        }
        out
    }

    fn overwrite<I>(&self, cells: I, color: Color, locked: Option<&CellSet>) -> Palette
    where
        I: IntoIterator<Item = usize>,
    {
        let mut out = self.clone();
        for index in cells {
            if index >= out.cells.len() || locked.is_some_and(|l| l.contains(index)) {
                continue;
            }
            out.cells[index] = color;
        }
        out
    }

    /// Reflow all cells, row-major, into `layout`. Trailing cells are `background`.
    pub fn transform_layout(&self, layout: GridLayout, background: Color) -> Palette {
        let dims = layout.dimensions_for(self.len());
        let mut cells = self.cells.clone();
        cells.resize(dims.cell_count(), background);
        Palette {
            dimensions: dims,
            cells,
        }
    }

    /// Copy locked cells back from `before`, undoing any write to them.
    ///
    /// Does nothing when the two palettes differ in shape.
    pub fn restore_locked(&mut self, before: &Palette, locked: &CellSet) {
        if before.dimensions != self.dimensions {
            return;
        }
        let len = self.cells.len();
        for index in locked.iter().filter(|&i| i < len) {
            self.cells[index] = before.cells[index];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    fn numbered(width: usize, height: usize) -> Palette {
        let dims = Dimensions { width, height };
        let cells = (0..dims.cell_count())
            .map(|i| Color::rgb(i as u8, 0, 0))
            .collect();
        Palette::from_cells(dims, cells).unwrap()
    }

    fn reds(p: &Palette) -> Vec<u8> {
        p.cells().iter().map(|c| c.r).collect()
    }

    #[test]
    fn test_from_cells_checks_length() {
        let dims = Dimensions { width: 2, height: 2 };
        assert_eq!(
            Palette::from_cells(dims, vec![Color::WHITE; 3]),
            Err(CommandError::PaletteLength {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_reshape_grow_and_shrink() {
        let p = numbered(2, 2);
        let grown = p.reshape(Dimensions { width: 3, height: 3 }, Color::WHITE);
        assert_eq!(grown.get(0), Some(Color::rgb(0, 0, 0)));
        assert_eq!(grown.get(1), Some(Color::rgb(1, 0, 0)));
        assert_eq!(grown.get(3), Some(Color::rgb(2, 0, 0)));
        assert_eq!(grown.get(4), Some(Color::rgb(3, 0, 0)));
        assert_eq!(grown.get(2), Some(Color::WHITE));
        assert_eq!(grown.get(8), Some(Color::WHITE));

        let shrunk = numbered(3, 3).reshape(Dimensions { width: 2, height: 1 }, Color::WHITE);
        assert_eq!(reds(&shrunk), vec![0, 1]);
    }

    #[test]
    fn test_pop_section_edges() {
        let p = numbered(3, 2);
        assert_eq!(reds(&p.pop_section(PopEdge::Top)), vec![3, 4, 5]);
        assert_eq!(reds(&p.pop_section(PopEdge::Bottom)), vec![0, 1, 2]);
        assert_eq!(reds(&p.pop_section(PopEdge::Left)), vec![1, 2, 4, 5]);
        assert_eq!(reds(&p.pop_section(PopEdge::Right)), vec![0, 1, 3, 4]);
        assert_eq!(p.pop_section(PopEdge::Left).width(), 2);

        let single_row = numbered(3, 1);
        assert_eq!(single_row.pop_section(PopEdge::Top), single_row);
    }

    #[test]
    fn test_remove_middle_column() {
        let p = numbered(3, 3).remove_column(1);
        assert_eq!(p.dimensions(), Dimensions { width: 2, height: 3 });
        assert_eq!(reds(&p), vec![0, 2, 3, 5, 6, 8]);
    }

    #[test]
    fn test_paste_row_and_column() {
        let p = numbered(3, 3);
        assert_eq!(reds(&p.paste_row(0, 2)), vec![0, 1, 2, 3, 4, 5, 0, 1, 2]);
        assert_eq!(reds(&p.paste_column(2, 0)), vec![2, 1, 2, 5, 4, 5, 8, 7, 8]);
        assert_eq!(p.paste_row(1, 1), p);
    }

    #[test]
    fn test_move_clears_sources_and_skips_locked_destinations() {
        let p = numbered(3, 3);
        let selection: CellSet = vec![0, 1].into();
        let locked: CellSet = vec![4].into();
        let moved = p.move_cells(&selection, 1, 0, &locked, Color::WHITE);
        assert_eq!(moved.get(0), Some(Color::WHITE));
        assert_eq!(moved.get(1), Some(Color::WHITE));
        assert_eq!(moved.get(3), Some(Color::rgb(0, 0, 0)));
        // Destination 4 is locked: keeps its own color.
        assert_eq!(moved.get(4), Some(Color::rgb(4, 0, 0)));
    }

    #[test]
    fn test_move_drops_out_of_bounds_destinations() {
        let p = numbered(3, 3);
        let selection: CellSet = vec![2].into();
        let moved = p.move_cells(&selection, 0, 1, &CellSet::new(), Color::WHITE);
        assert_eq!(moved.get(2), Some(Color::WHITE));
        assert_eq!(moved.get(3), Some(Color::rgb(3, 0, 0)));
    }

    #[test]
    fn test_move_with_overflowing_offset_drops_writes() {
        let p = numbered(4, 4);
        let selection: CellSet = vec![5].into();
        let extremes = [(isize::MAX, 0), (isize::MIN, 0), (0, isize::MAX), (0, isize::MIN)];
        for (rows, cols) in extremes {
            let moved = p.move_cells(&selection, rows, cols, &CellSet::new(), Color::WHITE);
            assert_eq!(moved.get(5), Some(Color::WHITE));
            assert_eq!(moved.cells().iter().filter(|c| **c == Color::WHITE).count(), 1);
        }
    }

    #[test]
    fn test_from_cells_rejects_overflowing_dimensions() {
        let dims = Dimensions {
            width: usize::MAX,
            height: 2,
        };
        assert_eq!(
            Palette::from_cells(dims, vec![Color::WHITE; 4]),
            Err(CommandError::InvalidDimensions {
                width: usize::MAX,
                height: 2
            })
        );
    }

    #[test]
    fn test_restore_locked_ignores_out_of_range() {
        let p = numbered(2, 2);
        let mut cleared = p.fill_all(RED, &CellSet::new());
        cleared.restore_locked(&p, &vec![0, 9].into());
        assert_eq!(cleared.get(0), Some(Color::rgb(0, 0, 0)));
        assert_eq!(cleared.get(3), Some(RED));
    }

    #[test]
    fn test_move_offset_from_first_selected() {
        let p = numbered(4, 4);
        let selection: CellSet = vec![5, 0].into();
        assert_eq!(p.move_offset(&selection, 15), Some((2, 2)));
        assert_eq!(p.move_offset(&CellSet::new(), 15), None);
    }

    #[test]
    fn test_rotate_square() {
        let p = numbered(3, 3);
        let selection: CellSet = vec![0, 1].into();
        let left = p.rotate90(&selection, RotateDirection::Left, &CellSet::new(), Color::WHITE);
        // (0,0) -> (0,2), (0,1) -> (1,2)
        assert_eq!(left.get(2), Some(Color::rgb(0, 0, 0)));
        assert_eq!(left.get(5), Some(Color::rgb(1, 0, 0)));
        assert_eq!(left.get(0), Some(Color::WHITE));

        let right = p.rotate90(&selection, RotateDirection::Right, &CellSet::new(), Color::WHITE);
        // (0,0) -> (2,0), (0,1) -> (1,0)
        assert_eq!(right.get(6), Some(Color::rgb(0, 0, 0)));
        assert_eq!(right.get(3), Some(Color::rgb(1, 0, 0)));
    }

    #[test]
    fn test_rotate_rectangular_drops_outside() {
        // 3 wide, 2 tall: (0,2) rotated left lands at (2,1), outside.
        let p = numbered(3, 2);
        let selection: CellSet = vec![2].into();
        let out = p.rotate90(&selection, RotateDirection::Left, &CellSet::new(), Color::WHITE);
        assert_eq!(out.get(2), Some(Color::WHITE));
        assert_eq!(out.len(), 6);
        assert_eq!(
            out.cells().iter().filter(|c| **c == Color::WHITE).count(),
            1
        );
    }

    #[test]
    fn test_fills_skip_locked() {
        let p = Palette::new(Dimensions { width: 2, height: 2 }, Color::WHITE).unwrap();
        let locked: CellSet = vec![1].into();
        let all = p.fill_all(RED, &locked);
        assert_eq!(all.cells(), &[RED, Color::WHITE, RED, RED]);
        let row = p.fill_row(0, RED, &locked);
        assert_eq!(row.cells(), &[RED, Color::WHITE, Color::WHITE, Color::WHITE]);
        let col = p.fill_column(1, RED, &locked);
        assert_eq!(col.cells(), &[Color::WHITE, Color::WHITE, Color::WHITE, RED]);
    }

    #[test]
    fn test_transform_layout_pads_with_background() {
        let p = numbered(5, 2);
        let square = p.transform_layout(GridLayout::Square, Color::WHITE);
        assert_eq!(square.dimensions(), Dimensions { width: 4, height: 3 });
        assert_eq!(square.get(9), Some(Color::rgb(9, 0, 0)));
        assert_eq!(square.get(10), Some(Color::WHITE));

        let row = p.transform_layout(GridLayout::Horizontal, Color::WHITE);
        assert_eq!(row.dimensions(), Dimensions { width: 10, height: 1 });
        assert_eq!(reds(&row), reds(&p));
    }

    #[test]
    fn test_restore_locked() {
        let p = numbered(2, 2);
        let mut cleared = p.clear_row(0, Color::WHITE);
        cleared.restore_locked(&p, &vec![1].into());
        assert_eq!(cleared.get(0), Some(Color::WHITE));
        assert_eq!(cleared.get(1), Some(Color::rgb(1, 0, 0)));
    }

    #[test]
    fn test_deserialize_rejects_bad_length() {
        let json = r##"{"dimensions":{"width":2,"height":1},"cells":["#ffffff"]}"##;
        assert!(serde_json::from_str::<Palette>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_overflowing_dimensions() {
        let json = format!(
            r##"{{"dimensions":{{"width":{},"height":2}},"cells":["#ffffff"]}}"##,
            usize::MAX
        );
        assert!(serde_json::from_str::<Palette>(&json).is_err());
    }
}

//! Error types for the palette engine.
//!
//! Semantic no-ops (popping a 1-wide axis, pasting with an empty clipboard,
//! writes onto locked cells) are never errors. These types only cover caller
//! contract violations, which are rejected before anything is applied.

use crate::color::ColorError;
use thiserror::Error;

/// Command execution error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("invalid cell index {index} (grid has {cell_count} cells)")]
    /// Cell index outside the grid.
    InvalidCell {
        /// Offending index.
        index: usize,
        /// `width * height` of the grid.
        cell_count: usize,
    },

    #[error("invalid row {row} (grid has {height} rows)")]
    /// Row index outside the grid.
    InvalidRow {
        /// Offending row.
        row: usize,
        /// Grid height.
        height: usize,
    },

    #[error("invalid column {column} (grid has {width} columns)")]
    /// Column index outside the grid.
    InvalidColumn {
        /// Offending column.
        column: usize,
        /// Grid width.
        width: usize,
    },

    #[error("invalid dimensions {width}x{height} (must be at least 1x1 and addressable)")]
    /// Zero-sized axis or a cell count that overflows.
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    #[error("palette has {actual} colors but the grid needs {expected}")]
    /// Palette length does not match `width * height`.
    PaletteLength {
        /// `width * height`.
        expected: usize,
        /// Colors supplied.
        actual: usize,
    },

    #[error(transparent)]
    /// Malformed color value.
    Color(#[from] ColorError),
}

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    /// JSON syntax or type error.
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    /// Well-formed JSON with an unusable value.
    Invalid(String),
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Grid layout.
//!
//! [`layout_grid`] is a pure function from item count and canvas size to a [`GridGeometry`]. The
//! growth loop matches the multiplexer's tiled pane layout: rows grow before columns on every
//! round, so the grid is taller-or-equal before it is widened.
//!
//! Minimum cell sizes act asymmetrically. A too-narrow cell reflows the grid into fewer columns,
//! which changes adjacency and the logical row count. A too-short cell only changes how many rows
//! are visible at once; item placement stays fixed and the rest is reached by scrolling.

use serde::{Deserialize, Serialize};

/// Smallest cell that can still hold a border on every side.
pub const MIN_RENDERABLE_CELL: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCellSize {
    pub width: usize,
    pub height: usize,
}

impl MinCellSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl Default for MinCellSize {
    fn default() -> Self {
        Self::new(20, 6)
    }
}

/// Immutable grid geometry. All zero when the catalog is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridGeometry {
    pub columns: usize,
    pub rows: usize,
    pub cell_width: usize,
    pub cell_height: usize,
    /// `ceil(n / columns)`: how many rows the items occupy, visible or not.
    pub logical_rows: usize,
}

impl GridGeometry {
    pub const EMPTY: Self =
        Self { columns: 0, rows: 0, cell_width: 0, cell_height: 0, logical_rows: 0 };

    pub fn is_empty(&self) -> bool {
        self.columns == 0
    }

    /// Rows that fit in `canvas_height` at the current cell height, never less than one.
    pub fn visible_rows(&self, canvas_height: usize) -> usize {
        if self.cell_height == 0 {
            return 1;
        }
        (canvas_height / self.cell_height).max(1)
    }

    pub fn linear_index(&self, column: usize, row: usize) -> usize {
        row * self.columns + column
    }

    /// `(column, row)` of linear `index`. Degenerate geometry maps everything to the origin.
    pub fn position_of(&self, index: usize) -> (usize, usize) {
        if self.columns == 0 {
            return (0, 0);
        }
        (index % self.columns, index / self.columns)
    }
}

/// Computes the grid for `n` items on a `canvas_width` × `canvas_height` canvas.
pub fn layout_grid(
    n: usize,
    canvas_width: usize,
    canvas_height: usize,
    min_cell: MinCellSize,
) -> GridGeometry {
    if n == 0 {
        return GridGeometry::EMPTY;
    }

    let (mut columns, rows) = grow_grid(n);

    let mut cell_width = canvas_width / columns;
    let mut cell_height = canvas_height / rows;

    if cell_width < min_cell.width && min_cell.width > 0 && canvas_width >= min_cell.width {
        columns = (canvas_width / min_cell.width).max(1);
        cell_width = canvas_width / columns;
    }

    if cell_height < min_cell.height && min_cell.height > 0 && canvas_height >= min_cell.height {
        let visible_rows = (canvas_height / min_cell.height).max(1);
        cell_height = canvas_height / visible_rows;
    }

    cell_width = cell_width.max(MIN_RENDERABLE_CELL);
    cell_height = cell_height.max(MIN_RENDERABLE_CELL);

    let logical_rows = (n + columns - 1) / columns;

    GridGeometry {
        columns,
        // Once the column count is settled the item rows are the grid rows.
        rows: rows.max(logical_rows),
        cell_width,
        cell_height,
        logical_rows,
    }
}

fn grow_grid(n: usize) -> (usize, usize) {
    let mut rows = 1usize;
    let mut columns = 1usize;
    while rows * columns < n {
        rows += 1;
        if rows * columns < n {
            columns += 1;
        }
    }
    (columns, rows)
}

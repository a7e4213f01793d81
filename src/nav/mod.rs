// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cursor navigation.
//!
//! The cursor is a `(column, row)` cell plus the first visible row. Every transition leaves it on
//! an existing item (or at the origin when there is none) with the cursor row on screen.

use serde::{Deserialize, Serialize};

use crate::layout::GridGeometry;

/// Navigation input, already decoded from keys or the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavInput {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    /// Cyclic step back (`(`).
    Previous,
    /// Cyclic step forward (`)`).
    Next,
    /// Jump to linear index `0..=9`.
    Digit(u8),
    /// Pointer press at canvas coordinates.
    Click { x: usize, y: usize },
    DoubleClick { x: usize, y: usize },
    Select,
    Cancel,
}

/// Optional input families. Disabled inputs are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavFeatures {
    pub paging: bool,
    pub wraparound: bool,
    pub digit_jump: bool,
    pub mouse: bool,
}

impl NavFeatures {
    pub const ALL: Self = Self { paging: true, wraparound: true, digit_jump: true, mouse: true };

    pub const PAGING_ONLY: Self =
        Self { paging: true, wraparound: false, digit_jump: false, mouse: false };

    pub fn allows(&self, input: NavInput) -> bool {
        match input {
            NavInput::PageUp | NavInput::PageDown => self.paging,
            NavInput::Previous | NavInput::Next => self.wraparound,
            NavInput::Digit(_) => self.digit_jump,
            NavInput::Click { .. } | NavInput::DoubleClick { .. } => self.mouse,
            _ => true,
        }
    }
}

impl Default for NavFeatures {
    fn default() -> Self {
        Self::PAGING_ONLY
    }
}

/// Everything a transition needs to know about the grid it moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavContext {
    pub geometry: GridGeometry,
    pub item_count: usize,
    pub canvas_height: usize,
}

impl NavContext {
    pub fn new(geometry: GridGeometry, item_count: usize, canvas_height: usize) -> Self {
        Self { geometry, item_count, canvas_height }
    }

    /// Nothing to navigate: all inputs but cancel are no-ops.
    pub fn is_inert(&self) -> bool {
        self.item_count == 0 || self.geometry.columns == 0
    }

    pub fn visible_rows(&self) -> usize {
        self.geometry.visible_rows(self.canvas_height)
    }
}

/// What a transition asks of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    /// The cursor or scroll offset moved; redraw.
    Moved,
    /// Commit the item under the cursor.
    Commit,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    pub column: usize,
    pub row: usize,
    pub scroll_offset: usize,
}

impl CursorState {
    pub fn index(&self, columns: usize) -> usize {
        self.row * columns + self.column
    }

    pub fn apply(
        &mut self,
        input: NavInput,
        ctx: &NavContext,
        features: NavFeatures,
    ) -> Transition {
        if input == NavInput::Cancel {
            return Transition::Cancel;
        }
        if ctx.is_inert() || !features.allows(input) {
            return Transition::Unchanged;
        }

        let before = *self;
        let columns = ctx.geometry.columns;
        let n = ctx.item_count;
        let index = self.index(columns);

        match input {
            NavInput::Left => {
                if self.column > 0 {
                    self.column -= 1;
                }
            }
            NavInput::Right => {
                if self.column + 1 < columns && index + 1 < n {
                    self.column += 1;
                }
            }
            NavInput::Up => {
                if self.row > 0 {
                    self.row -= 1;
                }
            }
            NavInput::Down => {
                if self.row + 1 < ctx.geometry.logical_rows && index + columns < n {
                    self.row += 1;
                }
            }
            NavInput::PageUp => {
                self.row = self.row.saturating_sub(ctx.visible_rows());
            }
            NavInput::PageDown => {
                let last_row = ctx.geometry.logical_rows.saturating_sub(1);
                self.row = (self.row + ctx.visible_rows()).min(last_row);
                if self.index(columns) >= n {
                    self.set_index(n - 1, &ctx.geometry);
                }
            }
            NavInput::Previous => {
                let previous = if index == 0 { n - 1 } else { (index - 1).min(n - 1) };
                self.set_index(previous, &ctx.geometry);
            }
            NavInput::Next => {
                self.set_index((index + 1) % n, &ctx.geometry);
            }
            NavInput::Digit(digit) => {
                let target = usize::from(digit);
                if target < n {
                    self.set_index(target, &ctx.geometry);
                }
            }
            NavInput::Click { x, y } | NavInput::DoubleClick { x, y } => {
                let Some(target) = self.pointer_index(x, y, ctx) else {
                    return Transition::Unchanged;
                };
                self.set_index(target, &ctx.geometry);
                if matches!(input, NavInput::DoubleClick { .. }) {
                    self.reconcile_scroll(ctx.visible_rows());
                    return Transition::Commit;
                }
            }
            NavInput::Select => return Transition::Commit,
            NavInput::Cancel => return Transition::Cancel,
        }

        self.reconcile_scroll(ctx.visible_rows());
        if *self == before {
            Transition::Unchanged
        } else {
            Transition::Moved
        }
    }

    /// Keeps the cursor row inside `[scroll_offset, scroll_offset + visible_rows)`.
    pub fn reconcile_scroll(&mut self, visible_rows: usize) {
        let visible_rows = visible_rows.max(1);
        if self.row < self.scroll_offset {
            self.scroll_offset = self.row;
        } else if self.row >= self.scroll_offset + visible_rows {
            self.scroll_offset = self.row - visible_rows + 1;
        }
    }

    /// Re-validates the cursor after the catalog or geometry changed.
    ///
    /// The item the cursor pointed at under `previous_columns` keeps its linear index when it
    /// still exists; otherwise the cursor snaps to the last item. An empty grid resets the cursor.
    pub fn reconcile(&mut self, previous_columns: usize, ctx: &NavContext) {
        if ctx.is_inert() {
            *self = Self::default();
            return;
        }
        let index = if previous_columns == 0 { 0 } else { self.index(previous_columns) };
        self.set_index(index.min(ctx.item_count - 1), &ctx.geometry);
        self.reconcile_scroll(ctx.visible_rows());
    }

    fn set_index(&mut self, index: usize, geometry: &GridGeometry) {
        let (column, row) = geometry.position_of(index);
        self.column = column;
        self.row = row;
    }

    fn pointer_index(&self, x: usize, y: usize, ctx: &NavContext) -> Option<usize> {
        let geometry = &ctx.geometry;
        if geometry.cell_width == 0 || geometry.cell_height == 0 {
            return None;
        }
        let column = x / geometry.cell_width;
        let visible_row = y / geometry.cell_height;
        if column >= geometry.columns || visible_row >= ctx.visible_rows() {
            return None;
        }
        let row = visible_row + self.scroll_offset;
        let index = geometry.linear_index(column, row);
        (index < ctx.item_count).then_some(index)
    }
}

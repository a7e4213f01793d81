// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Off-screen drawing for the grid.
//!
//! The mode paints into its own [`Canvas`]: a fixed-size grid of characters, each tagged with a
//! [`CellStyle`] that the terminal shell maps to colours. Drawing primitives clip silently; only
//! construction and explicit lookups report errors.

use std::fmt;

use crate::host::PaneContent;

mod grid;
mod text;

pub use grid::render_grid;
pub(crate) use text::{text_len, truncate_with_ellipsis};

pub const BOX_HORIZONTAL: char = '─';
pub const BOX_VERTICAL: char = '│';
pub const BOX_TOP_LEFT: char = '┌';
pub const BOX_TOP_RIGHT: char = '┐';
pub const BOX_BOTTOM_LEFT: char = '└';
pub const BOX_BOTTOM_RIGHT: char = '┘';

/// Semantic style of one canvas cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellStyle {
    #[default]
    Blank,
    Border,
    /// Border of the cell under the cursor.
    Highlight,
    Label,
    HighlightLabel,
    Preview,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("canvas area overflow: {width}*{height}")]
    AreaOverflow { width: usize, height: usize },
    #[error("out of bounds: ({x},{y}) for {width}x{height} canvas")]
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    styles: Vec<CellStyle>,
}

impl Canvas {
    /// Creates a blank canvas.
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = area(width, height)?;
        Ok(Self { width, height, cells: vec![' '; len], styles: vec![CellStyle::Blank; len] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Resizes and blanks the canvas. On error the canvas is left untouched.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), CanvasError> {
        let len = area(width, height)?;
        self.width = width;
        self.height = height;
        self.cells = vec![' '; len];
        self.styles = vec![CellStyle::Blank; len];
        Ok(())
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.cells[idx])
    }

    pub fn style_at(&self, x: usize, y: usize) -> Result<CellStyle, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.styles[idx])
    }

    /// Writes one cell. Out-of-range writes are dropped.
    pub fn put(&mut self, x: usize, y: usize, ch: char, style: CellStyle) {
        if let Ok(idx) = self.index_of(x, y) {
            self.cells[idx] = ch;
            self.styles[idx] = style;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(' ');
        self.styles.fill(CellStyle::Blank);
    }

    /// Writes `text` left-to-right from `(x, y)`, clipped at the right edge.
    pub fn write_str(&mut self, x: usize, y: usize, text: &str, style: CellStyle) {
        if y >= self.height {
            return;
        }
        for (offset, ch) in text.chars().enumerate() {
            let cx = x.saturating_add(offset);
            if cx >= self.width {
                break;
            }
            self.put(cx, y, ch, style);
        }
    }

    /// Draws a `width` × `height` bordered box with its top-left corner at `(x, y)`.
    ///
    /// `label` is padded to `" label "`, centred in the top border and cut with `…` when it does
    /// not fit between the corners. Boxes smaller than 2×2 draw nothing.
    pub fn draw_box(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        label: Option<&str>,
        highlighted: bool,
    ) {
        if width < 2 || height < 2 {
            return;
        }
        let (border, label_style) = if highlighted {
            (CellStyle::Highlight, CellStyle::HighlightLabel)
        } else {
            (CellStyle::Border, CellStyle::Label)
        };
        let right = x + width - 1;
        let bottom = y + height - 1;

        for cx in (x + 1)..right {
            self.put(cx, y, BOX_HORIZONTAL, border);
            self.put(cx, bottom, BOX_HORIZONTAL, border);
        }
        for cy in (y + 1)..bottom {
            self.put(x, cy, BOX_VERTICAL, border);
            self.put(right, cy, BOX_VERTICAL, border);
        }
        self.put(x, y, BOX_TOP_LEFT, border);
        self.put(right, y, BOX_TOP_RIGHT, border);
        self.put(x, bottom, BOX_BOTTOM_LEFT, border);
        self.put(right, bottom, BOX_BOTTOM_RIGHT, border);

        let Some(label) = label else {
            return;
        };
        let room = width - 2;
        let padded = truncate_with_ellipsis(&format!(" {label} "), room);
        let start = x + 1 + (room - text_len(&padded)) / 2;
        self.write_str(start, y, &padded, label_style);
    }

    /// Copies the top-left `width` × `height` corner of `content` to `(x, y)`.
    pub fn draw_preview(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        content: &PaneContent,
    ) {
        for (row, line) in content.lines().iter().take(height).enumerate() {
            for (col, ch) in line.chars().take(width).enumerate() {
                let ch = if ch.is_control() { ' ' } else { ch };
                self.put(x + col, y + row, ch, CellStyle::Preview);
            }
        }
    }

    /// Canvas text with trailing spaces and trailing empty lines removed.
    pub fn to_string_trimmed(&self) -> String {
        let mut lines = self
            .cells
            .chunks(self.width.max(1))
            .take(self.height)
            .map(|row| row.iter().collect::<String>().trim_end_matches(' ').to_owned())
            .collect::<Vec<_>>();
        while matches!(lines.last(), Some(line) if line.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if !self.in_bounds(x, y) {
            return Err(CanvasError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y * self.width) + x)
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            for x in 0..self.width {
                f.write_char(self.cells[(y * self.width) + x])?;
            }
            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

fn area(width: usize, height: usize) -> Result<usize, CanvasError> {
    width.checked_mul(height).ok_or(CanvasError::AreaOverflow { width, height })
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::Canvas;
use crate::catalog::{Catalog, DEAD_LABEL};
use crate::host::Registry;
use crate::layout::GridGeometry;
use crate::nav::CursorState;

/// Repaints `canvas` from scratch: one bordered cell per visible catalog item.
///
/// Items are re-resolved against `registry`; one whose entity vanished is drawn with the
/// [`DEAD_LABEL`] and no preview. The cursor's scroll offset selects the first drawn row.
pub fn render_grid<R>(
    canvas: &mut Canvas,
    catalog: &Catalog,
    geometry: &GridGeometry,
    cursor: &CursorState,
    registry: &R,
) where
    R: Registry + ?Sized,
{
    canvas.clear();
    if catalog.is_empty() || geometry.is_empty() {
        return;
    }

    let cell_w = geometry.cell_width;
    let cell_h = geometry.cell_height;
    let visible_rows = geometry.visible_rows(canvas.height());
    let selected = cursor.index(geometry.columns);
    let end_row = geometry.logical_rows.min(cursor.scroll_offset + visible_rows);

    for row in cursor.scroll_offset..end_row {
        let y = (row - cursor.scroll_offset) * cell_h;
        for column in 0..geometry.columns {
            let index = geometry.linear_index(column, row);
            let Some(item) = catalog.get(index) else {
                break;
            };
            let x = column * cell_w;
            let target = item.resolve(registry);
            let label = target.map_or(DEAD_LABEL, |target| target.label);

            canvas.draw_box(x, y, cell_w, cell_h, Some(label), index == selected);

            if cell_w > 2 && cell_h > 2 {
                if let Some(content) = target.and_then(|target| target.content) {
                    canvas.draw_preview(x + 1, y + 1, cell_w - 2, cell_h - 2, content);
                }
            }
        }
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::nav::NavInput;

/// Two left presses on the same grid cell within this window form a double click.
pub(crate) const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

pub(crate) fn nav_input_for_key(key: KeyEvent) -> Option<NavInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(NavInput::Cancel);
    }

    let input = match key.code {
        KeyCode::Left | KeyCode::Char('h') => NavInput::Left,
        KeyCode::Right | KeyCode::Char('l') => NavInput::Right,
        KeyCode::Up | KeyCode::Char('k') => NavInput::Up,
        KeyCode::Down | KeyCode::Char('j') => NavInput::Down,
        KeyCode::PageUp => NavInput::PageUp,
        KeyCode::PageDown => NavInput::PageDown,
        KeyCode::Char('(') => NavInput::Previous,
        KeyCode::Char(')') => NavInput::Next,
        KeyCode::Char(ch @ '0'..='9') => NavInput::Digit(ch as u8 - b'0'),
        KeyCode::Enter => NavInput::Select,
        KeyCode::Char('q') | KeyCode::Esc => NavInput::Cancel,
        _ => return None,
    };
    Some(input)
}

/// Turns left presses into clicks, promoting a quick second press on the same cell.
#[derive(Debug, Clone, Default)]
pub(crate) struct ClickTracker {
    last: Option<PressRecord>,
}

#[derive(Debug, Clone, Copy)]
struct PressRecord {
    cell: (usize, usize),
    at: Instant,
}

impl ClickTracker {
    /// `grid` is the terminal area the canvas occupies and `cell_size` the current cell
    /// dimensions. Presses outside the grid are ignored.
    pub(crate) fn translate(
        &mut self,
        mouse: MouseEvent,
        grid: Rect,
        cell_size: (usize, usize),
        now: Instant,
    ) -> Option<NavInput> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        if mouse.column < grid.x
            || mouse.row < grid.y
            || mouse.column >= grid.x.saturating_add(grid.width)
            || mouse.row >= grid.y.saturating_add(grid.height)
        {
            return None;
        }

        let x = usize::from(mouse.column - grid.x);
        let y = usize::from(mouse.row - grid.y);
        let cell = (x / cell_size.0.max(1), y / cell_size.1.max(1));

        let double = self.last.is_some_and(|last| {
            last.cell == cell && now.saturating_duration_since(last.at) <= DOUBLE_CLICK_WINDOW
        });
        if double {
            self.last = None;
            Some(NavInput::DoubleClick { x, y })
        } else {
            self.last = Some(PressRecord { cell, at: now });
            Some(NavInput::Click { x, y })
        }
    }
}

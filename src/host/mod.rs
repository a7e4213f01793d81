// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Host collaborators.
//!
//! The overview mode never owns sessions, windows or panes. It reads them through a [`Registry`]
//! and asks a [`Host`] to switch focus and repaint. Entities are addressed by stable numeric ids
//! and re-resolved on every use, so a lookup returning `None` is an ordinary outcome.

use std::fmt;

mod memory;

pub use memory::MemoryHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub u32);

/// Slot of a window inside its session (`session:index`).
pub type WindowIndex = u32;

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client-{}", self.0)
    }
}

/// The visible text of a pane's active leaf buffer, top line first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneContent {
    lines: Vec<String>,
}

impl PaneContent {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn from_text(text: &str) -> Self {
        Self { lines: text.lines().map(str::to_owned).collect() }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Read-only view of the host's live entity registry.
pub trait Registry {
    /// All sessions in enumeration order, dead ones included.
    fn sessions(&self) -> Vec<SessionId>;

    fn session_alive(&self, session: SessionId) -> bool;

    fn session_name(&self, session: SessionId) -> Option<&str>;

    /// Windows linked into `session`, ordered by index.
    fn windows(&self, session: SessionId) -> Vec<(WindowIndex, WindowId)>;

    fn window_at(&self, session: SessionId, index: WindowIndex) -> Option<WindowId>;

    fn window_name(&self, window: WindowId) -> Option<&str>;

    fn current_window(&self, session: SessionId) -> Option<WindowId>;

    /// Content of the active pane of `window`.
    fn active_content(&self, window: WindowId) -> Option<&PaneContent>;
}

/// The mutating side of the host: focus switches and repaint requests.
pub trait Host: Registry {
    /// Makes `session` the active session of `client`. Returns `false` if either is gone.
    fn attach_client(&mut self, client: ClientId, session: SessionId) -> bool;

    /// Makes window `index` current inside `session`. Returns `false` if the slot is empty.
    fn select_window(&mut self, session: SessionId, index: WindowIndex) -> bool;

    fn request_repaint(&mut self);
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use super::{ClientId, Host, PaneContent, Registry, SessionId, WindowId, WindowIndex};

#[derive(Debug, Clone)]
struct SessionEntry {
    name: String,
    alive: bool,
    windows: BTreeMap<WindowIndex, WindowId>,
    current: Option<WindowIndex>,
}

#[derive(Debug, Clone)]
struct WindowEntry {
    name: String,
    content: Option<PaneContent>,
}

/// A deterministic in-memory host.
///
/// Sessions enumerate in ascending id order. A window may be linked into several sessions; it is
/// destroyed once the last link goes away.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    sessions: BTreeMap<SessionId, SessionEntry>,
    windows: BTreeMap<WindowId, WindowEntry>,
    attachments: BTreeMap<ClientId, SessionId>,
    next_session: u32,
    next_window: u32,
    repaint_requests: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_session(&mut self, name: impl Into<String>) -> SessionId {
        let id = SessionId(self.next_session);
        self.next_session += 1;
        self.sessions.insert(
            id,
            SessionEntry {
                name: name.into(),
                alive: true,
                windows: BTreeMap::new(),
                current: None,
            },
        );
        id
    }

    /// Destroys `session` outright; later lookups by its id fail.
    pub fn kill_session(&mut self, session: SessionId) -> bool {
        if self.sessions.remove(&session).is_none() {
            return false;
        }
        self.attachments.retain(|_, attached| *attached != session);
        self.prune_unlinked_windows();
        true
    }

    /// Keeps `session` findable by id but no longer alive (a session being torn down).
    pub fn mark_dead(&mut self, session: SessionId) -> bool {
        match self.sessions.get_mut(&session) {
            Some(entry) => {
                entry.alive = false;
                true
            }
            None => false,
        }
    }

    pub fn rename_session(&mut self, session: SessionId, name: impl Into<String>) -> bool {
        match self.sessions.get_mut(&session) {
            Some(entry) => {
                entry.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Creates a window in the first free slot of `session`.
    pub fn create_window(
        &mut self,
        session: SessionId,
        name: impl Into<String>,
        content: PaneContent,
    ) -> Option<(WindowIndex, WindowId)> {
        if !self.sessions.contains_key(&session) {
            return None;
        }
        let window = WindowId(self.next_window);
        self.next_window += 1;
        self.windows.insert(window, WindowEntry { name: name.into(), content: Some(content) });
        let index = self.link_window(session, window)?;
        Some((index, window))
    }

    /// Links an existing window into the first free slot of `session`.
    pub fn link_window(&mut self, session: SessionId, window: WindowId) -> Option<WindowIndex> {
        if !self.windows.contains_key(&window) {
            return None;
        }
        let entry = self.sessions.get_mut(&session)?;
        let index = (0..).find(|idx| !entry.windows.contains_key(idx))?;
        entry.windows.insert(index, window);
        if entry.current.is_none() {
            entry.current = Some(index);
        }
        Some(index)
    }

    pub fn unlink_window(&mut self, session: SessionId, index: WindowIndex) -> bool {
        let Some(entry) = self.sessions.get_mut(&session) else {
            return false;
        };
        if entry.windows.remove(&index).is_none() {
            return false;
        }
        if entry.current == Some(index) {
            entry.current = entry.windows.keys().next().copied();
        }
        self.prune_unlinked_windows();
        true
    }

    pub fn rename_window(&mut self, window: WindowId, name: impl Into<String>) -> bool {
        match self.windows.get_mut(&window) {
            Some(entry) => {
                entry.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Replaces the active pane content of `window`; `None` leaves the window without a pane.
    pub fn set_content(&mut self, window: WindowId, content: Option<PaneContent>) -> bool {
        match self.windows.get_mut(&window) {
            Some(entry) => {
                entry.content = content;
                true
            }
            None => false,
        }
    }

    pub fn attached_session(&self, client: ClientId) -> Option<SessionId> {
        self.attachments.get(&client).copied()
    }

    pub fn current_index(&self, session: SessionId) -> Option<WindowIndex> {
        self.sessions.get(&session).and_then(|entry| entry.current)
    }

    pub fn repaint_requests(&self) -> usize {
        self.repaint_requests
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn prune_unlinked_windows(&mut self) {
        let linked = self
            .sessions
            .values()
            .flat_map(|entry| entry.windows.values().copied())
            .collect::<BTreeSet<_>>();
        self.windows.retain(|window, _| linked.contains(window));
    }
}

impl Registry for MemoryHost {
    fn sessions(&self) -> Vec<SessionId> {
        self.sessions.keys().copied().collect()
    }

    fn session_alive(&self, session: SessionId) -> bool {
        self.sessions.get(&session).is_some_and(|entry| entry.alive)
    }

    fn session_name(&self, session: SessionId) -> Option<&str> {
        self.sessions.get(&session).map(|entry| entry.name.as_str())
    }

    fn windows(&self, session: SessionId) -> Vec<(WindowIndex, WindowId)> {
        self.sessions
            .get(&session)
            .map(|entry| entry.windows.iter().map(|(index, window)| (*index, *window)).collect())
            .unwrap_or_default()
    }

    fn window_at(&self, session: SessionId, index: WindowIndex) -> Option<WindowId> {
        self.sessions.get(&session)?.windows.get(&index).copied()
    }

    fn window_name(&self, window: WindowId) -> Option<&str> {
        self.windows.get(&window).map(|entry| entry.name.as_str())
    }

    fn current_window(&self, session: SessionId) -> Option<WindowId> {
        let entry = self.sessions.get(&session)?;
        entry.current.and_then(|index| entry.windows.get(&index).copied())
    }

    fn active_content(&self, window: WindowId) -> Option<&PaneContent> {
        self.windows.get(&window)?.content.as_ref()
    }
}

impl Host for MemoryHost {
    fn attach_client(&mut self, client: ClientId, session: SessionId) -> bool {
        if !self.session_alive(session) {
            return false;
        }
        self.attachments.insert(client, session);
        true
    }

    fn select_window(&mut self, session: SessionId, index: WindowIndex) -> bool {
        let Some(entry) = self.sessions.get_mut(&session) else {
            return false;
        };
        if !entry.windows.contains_key(&index) {
            return false;
        }
        entry.current = Some(index);
        true
    }

    fn request_repaint(&mut self) {
        self.repaint_requests += 1;
    }
}

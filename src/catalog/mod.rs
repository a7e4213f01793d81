// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Catalog snapshots.
//!
//! A catalog is the ordered list of targets the grid offers. It is rebuilt from the registry on
//! every refresh and never merged with the previous snapshot.

use serde::{Deserialize, Serialize};

use crate::host::{PaneContent, Registry, SessionId, WindowId, WindowIndex};

/// Capacity of the bounded preset. Entities past this count are silently left out.
pub const BOUNDED_CAPACITY: usize = 64;

/// Label drawn for an item whose entity vanished after the snapshot.
pub const DEAD_LABEL: &str = "(dead)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    /// Every alive session.
    Sessions,
    /// Windows of the session owning the hosting pane's window.
    Windows,
}

/// A reference to one selectable target, by id only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogItem {
    session: SessionId,
    window: Option<WindowIndex>,
}

impl CatalogItem {
    pub fn session(session: SessionId) -> Self {
        Self { session, window: None }
    }

    pub fn window(session: SessionId, index: WindowIndex) -> Self {
        Self { session, window: Some(index) }
    }

    pub fn session_id(&self) -> SessionId {
        self.session
    }

    pub fn window_index(&self) -> Option<WindowIndex> {
        self.window
    }

    /// Re-resolves the item against the registry. `None` means the entity is gone or dying.
    pub fn resolve<'a, R>(&self, registry: &'a R) -> Option<Target<'a>>
    where
        R: Registry + ?Sized,
    {
        if !registry.session_alive(self.session) {
            return None;
        }
        let session_name = registry.session_name(self.session)?;
        match self.window {
            None => {
                let content = registry
                    .current_window(self.session)
                    .and_then(|window| registry.active_content(window));
                Some(Target { label: session_name, content })
            }
            Some(index) => {
                let window = registry.window_at(self.session, index)?;
                let label = registry.window_name(window)?;
                Some(Target { label, content: registry.active_content(window) })
            }
        }
    }
}

/// A resolved, live view of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target<'a> {
    pub label: &'a str,
    pub content: Option<&'a PaneContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }
}

/// Snapshots the registry into a fresh catalog.
///
/// `host_window` is the window occupying the pane that hosts the mode; it only matters for
/// [`CatalogKind::Windows`]. `capacity` truncates the enumeration when set.
pub fn build_catalog<R>(
    registry: &R,
    kind: CatalogKind,
    host_window: WindowId,
    capacity: Option<usize>,
) -> Catalog
where
    R: Registry + ?Sized,
{
    let limit = capacity.unwrap_or(usize::MAX);
    let mut items = Vec::new();
    let mut dropped = 0usize;

    match kind {
        CatalogKind::Sessions => {
            for session in registry.sessions() {
                if !registry.session_alive(session) {
                    continue;
                }
                if items.len() >= limit {
                    dropped += 1;
                    continue;
                }
                items.push(CatalogItem::session(session));
            }
        }
        CatalogKind::Windows => {
            let Some(owner) = owning_session(registry, host_window) else {
                tracing::debug!(window = %host_window, "no alive session owns the hosting window");
                return Catalog::default();
            };
            for (index, _) in registry.windows(owner) {
                if items.len() >= limit {
                    dropped += 1;
                    continue;
                }
                items.push(CatalogItem::window(owner, index));
            }
        }
    }

    tracing::debug!(?kind, items = items.len(), dropped, "catalog rebuilt");
    Catalog::new(items)
}

/// First alive session, in enumeration order, that links `window`.
pub fn owning_session<R>(registry: &R, window: WindowId) -> Option<SessionId>
where
    R: Registry + ?Sized,
{
    registry.sessions().into_iter().find(|&session| {
        registry.session_alive(session)
            && registry.windows(session).iter().any(|(_, linked)| *linked == window)
    })
}

#[cfg(test)]
mod tests {
    use super::{build_catalog, owning_session, CatalogItem, CatalogKind, BOUNDED_CAPACITY};
    use crate::host::{Host, MemoryHost, PaneContent, Registry, WindowId};

    fn host_with_sessions(count: usize) -> MemoryHost {
        let mut host = MemoryHost::new();
        for idx in 0..count {
            let session = host.create_session(format!("s{idx}"));
            host.create_window(session, "main", PaneContent::from_text("$ ")).expect("window");
        }
        host
    }

    #[test]
    fn sessions_kind_skips_dead_sessions() {
        let mut host = host_with_sessions(3);
        let sessions = host.sessions();
        host.mark_dead(sessions[1]);

        let catalog = build_catalog(&host, CatalogKind::Sessions, WindowId(0), None);
        assert_eq!(
            catalog.items(),
            &[CatalogItem::session(sessions[0]), CatalogItem::session(sessions[2])]
        );
    }

    #[test]
    fn bounded_capacity_truncates_in_enumeration_order() {
        let host = host_with_sessions(70);
        let catalog =
            build_catalog(&host, CatalogKind::Sessions, WindowId(0), Some(BOUNDED_CAPACITY));
        assert_eq!(catalog.len(), 64);
        assert_eq!(catalog.get(63).map(|item| item.session_id()), Some(host.sessions()[63]));
    }

    #[test]
    fn windows_kind_lists_windows_of_the_owning_session() {
        let mut host = MemoryHost::new();
        let other = host.create_session("other");
        host.create_window(other, "x", PaneContent::default()).expect("window");
        let owner = host.create_session("owner");
        let (_, hosting) = host.create_window(owner, "edit", PaneContent::default()).expect("w");
        host.create_window(owner, "build", PaneContent::default()).expect("window");

        let catalog = build_catalog(&host, CatalogKind::Windows, hosting, None);
        assert_eq!(
            catalog.items(),
            &[CatalogItem::window(owner, 0), CatalogItem::window(owner, 1)]
        );
    }

    #[test]
    fn windows_kind_without_owner_is_empty() {
        let mut host = host_with_sessions(2);
        let session = host.sessions()[0];
        let window = host.current_window(session).expect("window");
        host.mark_dead(session);

        assert_eq!(owning_session(&host, window), None);
        let catalog = build_catalog(&host, CatalogKind::Windows, window, None);
        assert!(catalog.is_empty());
    }

    #[test]
    fn resolve_follows_the_sessions_current_window() {
        let mut host = MemoryHost::new();
        let session = host.create_session("work");
        host.create_window(session, "a", PaneContent::from_text("first")).expect("window");
        host.create_window(session, "b", PaneContent::from_text("second")).expect("window");
        assert!(host.select_window(session, 1));

        let target = CatalogItem::session(session).resolve(&host).expect("live");
        assert_eq!(target.label, "work");
        assert_eq!(target.content.map(|c| c.lines()[0].as_str()), Some("second"));

        let target = CatalogItem::window(session, 0).resolve(&host).expect("live");
        assert_eq!(target.label, "a");
    }

    #[test]
    fn resolve_reports_vanished_entities() {
        let mut host = host_with_sessions(1);
        let session = host.sessions()[0];
        assert!(CatalogItem::window(session, 5).resolve(&host).is_none());

        host.mark_dead(session);
        assert!(CatalogItem::session(session).resolve(&host).is_none());

        host.kill_session(session);
        assert!(CatalogItem::session(session).resolve(&host).is_none());
    }
}

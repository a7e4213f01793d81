// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The overview mode instance.
//!
//! [`OverviewMode`] ties the pieces together: it snapshots the catalog, lays out the grid, moves
//! the cursor, paints its private canvas and commits the selection. Every call runs to completion
//! and the instance is owned by exactly one [`Driver`], so there is no locking anywhere.
//!
//! Rebuilds happen on open, on every refresh tick and on host refresh notifications. A resize only
//! recomputes the geometry. The cursor is reconciled after each of them.

use std::time::Instant;

use crate::catalog::{build_catalog, Catalog, CatalogItem};
use crate::config::GridOptions;
use crate::host::{ClientId, Host, Registry, WindowId};
use crate::layout::{layout_grid, GridGeometry};
use crate::nav::{CursorState, NavContext, NavInput, Transition};
use crate::render::{render_grid, Canvas, CanvasError};

pub mod events;
mod scheduler;

pub use events::{Driver, EventQueue, EventSender, ExitReason, ModeEvent, ModeFlow};
pub use scheduler::RefreshTimer;

#[derive(Debug)]
pub struct OverviewMode {
    options: GridOptions,
    host_window: WindowId,
    canvas: Canvas,
    catalog: Catalog,
    geometry: GridGeometry,
    cursor: CursorState,
    timer: RefreshTimer,
}

impl OverviewMode {
    /// Enters the mode on a `width` × `height` pane showing `host_window`.
    ///
    /// The catalog is built, the first frame painted and the refresh timer armed at `now`.
    pub fn open<R>(
        options: GridOptions,
        host_window: WindowId,
        width: usize,
        height: usize,
        registry: &R,
        now: Instant,
    ) -> Result<Self, CanvasError>
    where
        R: Registry + ?Sized,
    {
        let mut mode = Self {
            options,
            host_window,
            canvas: Canvas::new(width, height)?,
            catalog: Catalog::default(),
            geometry: GridGeometry::EMPTY,
            cursor: CursorState::default(),
            timer: RefreshTimer::new(options.refresh_interval),
        };
        mode.rebuild(registry);
        mode.redraw(registry);
        mode.timer.arm(now);
        tracing::debug!(
            kind = ?options.kind,
            items = mode.catalog.len(),
            width,
            height,
            "overview mode opened"
        );
        Ok(mode)
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    /// Item under the cursor, if any.
    pub fn selected(&self) -> Option<&CatalogItem> {
        self.catalog.get(self.cursor.index(self.geometry.columns))
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn tick_due(&self, now: Instant) -> bool {
        self.timer.due(now)
    }

    pub fn handle<H>(&mut self, event: ModeEvent, host: &mut H, now: Instant) -> ModeFlow
    where
        H: Host + ?Sized,
    {
        match event {
            ModeEvent::Input { input, client } => self.handle_input(input, client, host),
            ModeEvent::Tick => self.tick(host, now),
            ModeEvent::Refresh => {
                self.refresh(host);
                ModeFlow::REPAINT
            }
            ModeEvent::Resize { width, height } => self.resize(width, height, host),
            ModeEvent::Takeover => ModeFlow::Exit(ExitReason::Takeover),
        }
    }

    /// Tears the mode down. The timer is disarmed before the instance is dropped.
    pub fn close(mut self, reason: ExitReason) {
        self.timer.disarm();
        tracing::debug!(?reason, "overview mode closed");
    }

    fn handle_input<H>(
        &mut self,
        input: NavInput,
        client: Option<ClientId>,
        host: &mut H,
    ) -> ModeFlow
    where
        H: Host + ?Sized,
    {
        let before = self.cursor;
        let ctx = self.nav_context();
        match self.cursor.apply(input, &ctx, self.options.features) {
            Transition::Unchanged => ModeFlow::IDLE,
            Transition::Moved => {
                self.redraw(&*host);
                host.request_repaint();
                ModeFlow::REPAINT
            }
            Transition::Cancel => ModeFlow::Exit(ExitReason::Cancelled),
            Transition::Commit => {
                if let Some(item) = self.commit(client, host) {
                    return ModeFlow::Exit(ExitReason::Committed(item));
                }
                // A double click may have moved the cursor before its commit was refused.
                if self.cursor == before {
                    return ModeFlow::IDLE;
                }
                self.redraw(&*host);
                host.request_repaint();
                ModeFlow::REPAINT
            }
        }
    }

    fn tick<H>(&mut self, host: &mut H, now: Instant) -> ModeFlow
    where
        H: Host + ?Sized,
    {
        if !self.timer.is_armed() {
            return ModeFlow::IDLE;
        }
        self.timer.disarm();
        self.refresh(host);
        self.timer.arm(now);
        ModeFlow::REPAINT
    }

    fn refresh<H>(&mut self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        self.rebuild(&*host);
        self.redraw(&*host);
        host.request_repaint();
    }

    fn resize<H>(&mut self, width: usize, height: usize, host: &mut H) -> ModeFlow
    where
        H: Host + ?Sized,
    {
        if let Err(error) = self.canvas.resize(width, height) {
            tracing::warn!(%error, "canvas resize refused");
            return ModeFlow::IDLE;
        }
        let previous_columns = self.geometry.columns;
        self.relayout(previous_columns);
        self.redraw(&*host);
        ModeFlow::REPAINT
    }

    fn rebuild<R>(&mut self, registry: &R)
    where
        R: Registry + ?Sized,
    {
        let previous_columns = self.geometry.columns;
        self.catalog =
            build_catalog(registry, self.options.kind, self.host_window, self.options.capacity);
        self.relayout(previous_columns);
    }

    fn relayout(&mut self, previous_columns: usize) {
        self.geometry = layout_grid(
            self.catalog.len(),
            self.canvas.width(),
            self.canvas.height(),
            self.options.min_cell,
        );
        let ctx = self.nav_context();
        self.cursor.reconcile(previous_columns, &ctx);
    }

    fn redraw<R>(&mut self, registry: &R)
    where
        R: Registry + ?Sized,
    {
        render_grid(&mut self.canvas, &self.catalog, &self.geometry, &self.cursor, registry);
    }

    fn nav_context(&self) -> NavContext {
        NavContext::new(self.geometry, self.catalog.len(), self.canvas.height())
    }

    /// Switches focus to the item under the cursor. `None` leaves the mode running.
    fn commit<H>(&mut self, client: Option<ClientId>, host: &mut H) -> Option<CatalogItem>
    where
        H: Host + ?Sized,
    {
        let index = self.cursor.index(self.geometry.columns);
        let Some(item) = self.catalog.get(index).copied() else {
            tracing::debug!(index, "commit ignored: cursor past the catalog");
            return None;
        };
        let session = item.session_id();
        if item.resolve(&*host).is_none() {
            tracing::debug!(%session, "commit ignored: target vanished");
            return None;
        }

        let switched = match item.window_index() {
            None => match client {
                Some(client) => host.attach_client(client, session),
                None => {
                    tracing::debug!(%session, "commit ignored: no client to attach");
                    false
                }
            },
            Some(window) => host.select_window(session, window),
        };

        if switched {
            tracing::info!(%session, window = ?item.window_index(), "selection committed");
            Some(item)
        } else {
            tracing::debug!(%session, window = ?item.window_index(), "commit refused by host");
            None
        }
    }
}

#[cfg(test)]
mod tests;

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The mode's single-consumer event channel.
//!
//! Producers (input decoding, the host's refresh notifications, resize handling) hold an
//! [`EventSender`]. The [`Driver`] is the only consumer: it drains the queue synchronously, feeds
//! timer ticks when the refresh deadline has passed and tears the mode down on exit.

use std::time::Instant;

use tokio::sync::mpsc::{self, error::TryRecvError};

use super::OverviewMode;
use crate::catalog::CatalogItem;
use crate::host::{ClientId, Host};
use crate::nav::NavInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    Input { input: NavInput, client: Option<ClientId> },
    /// The refresh timer fired.
    Tick,
    /// The host's entity list may have changed.
    Refresh,
    Resize { width: usize, height: usize },
    /// The host switched the pane to another mode.
    Takeover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Cancelled,
    Committed(CatalogItem),
    Takeover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFlow {
    Continue { repaint: bool },
    Exit(ExitReason),
}

impl ModeFlow {
    pub const IDLE: Self = Self::Continue { repaint: false };
    pub const REPAINT: Self = Self::Continue { repaint: true };
}

#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<ModeEvent>,
}

impl EventSender {
    /// Queues `event`. Returns `false` once the queue is gone.
    pub fn send(&self, event: ModeEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

#[derive(Debug)]
pub struct EventQueue {
    rx: mpsc::UnboundedReceiver<ModeEvent>,
}

impl EventQueue {
    pub fn new() -> (EventSender, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (EventSender { tx }, Self { rx })
    }

    /// Next queued event, without waiting.
    pub fn try_next(&mut self) -> Option<ModeEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

/// Owns a running [`OverviewMode`] and serializes everything delivered to it.
#[derive(Debug)]
pub struct Driver {
    mode: Option<OverviewMode>,
    queue: EventQueue,
    sender: EventSender,
    outcome: Option<ExitReason>,
}

impl Driver {
    pub fn new(mode: OverviewMode) -> Self {
        let (sender, queue) = EventQueue::new();
        Self { mode: Some(mode), queue, sender, outcome: None }
    }

    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    /// The running mode; `None` after teardown.
    pub fn mode(&self) -> Option<&OverviewMode> {
        self.mode.as_ref()
    }

    pub fn outcome(&self) -> Option<ExitReason> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.mode.is_none()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.mode.as_ref().and_then(OverviewMode::next_deadline)
    }

    /// Delivers one event straight to the mode.
    pub fn dispatch<H>(&mut self, event: ModeEvent, host: &mut H, now: Instant) -> ModeFlow
    where
        H: Host + ?Sized,
    {
        let Some(mode) = self.mode.as_mut() else {
            tracing::trace!(?event, "event after teardown dropped");
            return ModeFlow::IDLE;
        };
        let flow = mode.handle(event, host, now);
        if let ModeFlow::Exit(reason) = flow {
            self.teardown(reason);
        }
        flow
    }

    /// Drains queued events, then fires the refresh tick if it is due.
    ///
    /// Returns whether the canvas changed.
    pub fn pump<H>(&mut self, host: &mut H, now: Instant) -> bool
    where
        H: Host + ?Sized,
    {
        let mut repaint = false;
        while let Some(event) = self.queue.try_next() {
            match self.dispatch(event, host, now) {
                ModeFlow::Continue { repaint: changed } => repaint |= changed,
                ModeFlow::Exit(_) => return true,
            }
        }

        let tick_due = self.mode.as_ref().is_some_and(|mode| mode.tick_due(now));
        if tick_due {
            match self.dispatch(ModeEvent::Tick, host, now) {
                ModeFlow::Continue { repaint: changed } => repaint |= changed,
                ModeFlow::Exit(_) => return true,
            }
        }
        repaint
    }

    fn teardown(&mut self, reason: ExitReason) {
        if let Some(mode) = self.mode.take() {
            mode.close(reason);
            self.outcome = Some(reason);
        }
    }
}

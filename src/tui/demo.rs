// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in demo workload.
//!
//! The binary has no real multiplexer behind it, so it drives a [`MemoryHost`] that looks busy:
//! pane content changes every second and a scratch session comes and goes.

use std::time::{Duration, Instant};

use crate::host::{MemoryHost, PaneContent, Registry, SessionId, WindowId};

const SESSION_NAMES: &[&str] = &["main", "build", "logs", "notes", "deploy", "scratch"];
const WINDOW_NAMES: &[&str] = &["shell", "editor", "server"];
const UPDATE_INTERVAL: Duration = Duration::from_secs(1);
/// Updates between scratch session create/kill.
const CHURN_EVERY: u64 = 5;

/// Seeds `sessions` demo sessions with one to three windows each.
///
/// Returns the host and the window standing in for the pane the picker runs in. With no
/// sessions that window does not exist, so a windows catalog comes out empty.
pub fn demo_host(sessions: usize) -> (MemoryHost, WindowId) {
    let mut host = MemoryHost::new();
    let mut hosting = None;

    for idx in 0..sessions {
        let name = match SESSION_NAMES.get(idx) {
            Some(name) => (*name).to_owned(),
            None => format!("s{idx}"),
        };
        let session = host.create_session(name.as_str());
        for window_name in WINDOW_NAMES.iter().take(1 + idx % WINDOW_NAMES.len()) {
            let content = pane_text(&name, window_name, 0);
            if let Some((_, window)) = host.create_window(session, *window_name, content) {
                hosting.get_or_insert(window);
            }
        }
    }

    (host, hosting.unwrap_or(WindowId(u32::MAX)))
}

/// Fake activity for a [`demo_host`].
#[derive(Debug, Clone)]
pub struct DemoActivity {
    next_update: Instant,
    frame: u64,
    spawned: usize,
    scratch: Option<SessionId>,
}

impl DemoActivity {
    pub fn new(now: Instant) -> Self {
        Self { next_update: now + UPDATE_INTERVAL, frame: 0, spawned: 0, scratch: None }
    }

    /// Advances the workload if an update is due. Returns whether the session list changed.
    pub fn advance(&mut self, host: &mut MemoryHost, now: Instant) -> bool {
        if now < self.next_update {
            return false;
        }
        self.next_update = now + UPDATE_INTERVAL;
        self.frame += 1;

        for session in host.sessions() {
            let session_name = host.session_name(session).unwrap_or_default().to_owned();
            for (_, window) in host.windows(session) {
                let window_name = host.window_name(window).unwrap_or_default().to_owned();
                let content = pane_text(&session_name, &window_name, self.frame);
                host.set_content(window, Some(content));
            }
        }

        if self.frame % CHURN_EVERY != 0 {
            return false;
        }
        match self.scratch.take() {
            Some(session) => {
                host.kill_session(session);
                tracing::debug!(%session, "demo scratch session killed");
            }
            None => {
                let name = format!("tmp-{}", self.spawned);
                self.spawned += 1;
                let session = host.create_session(name.as_str());
                host.create_window(session, "shell", pane_text(&name, "shell", self.frame));
                self.scratch = Some(session);
                tracing::debug!(%session, name = %name, "demo scratch session created");
            }
        }
        true
    }
}

fn pane_text(session: &str, window: &str, frame: u64) -> PaneContent {
    let width = 12usize;
    let filled = (frame as usize) % (width + 1);
    let bar = format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled));
    let lines = match window {
        "editor" => vec![
            format!("~/{session}/src/main.rs"),
            "fn main() {".to_owned(),
            format!("    tick({frame});"),
            "}".to_owned(),
        ],
        "server" => vec![
            format!("$ serve --name {session}"),
            format!("listening on :{}", 8000 + frame % 100),
            format!("GET /health 200 ({frame} reqs)"),
        ],
        _ => vec![
            format!("{session}:{window} $ make"),
            format!("step {}/{}", frame % 10, 10),
            bar,
        ],
    };
    PaneContent::new(lines)
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Shared deterministic benchmark fixtures (no RNG).

use muxgrid::host::{MemoryHost, PaneContent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub sessions: usize,
    pub lines_per_pane: usize,
    pub line_len: usize,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumDense,
    BoundedFull,
    TinyCanvas,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumDense => "medium_dense",
            Self::BoundedFull => "bounded_full",
            Self::TinyCanvas => "tiny_canvas",
        }
    }

    pub const fn params(self) -> Params {
        match self {
            Self::Small => {
                Params { sessions: 5, lines_per_pane: 8, line_len: 40, width: 80, height: 24 }
            }
            Self::MediumDense => {
                Params { sessions: 24, lines_per_pane: 40, line_len: 120, width: 200, height: 60 }
            }
            Self::BoundedFull => {
                Params { sessions: 64, lines_per_pane: 60, line_len: 160, width: 320, height: 90 }
            }
            Self::TinyCanvas => {
                Params { sessions: 12, lines_per_pane: 20, line_len: 80, width: 10, height: 4 }
            }
        }
    }
}

/// Host with one window per session, each filled with `lines_per_pane` lines of text.
pub fn host(params: Params) -> MemoryHost {
    let mut host = MemoryHost::new();
    for idx in 0..params.sessions {
        let session = host.create_session(format!("session-{idx:02}"));
        let lines = (0..params.lines_per_pane)
            .map(|line| {
                let prefix = format!("{idx}:{line} ");
                let fill = params.line_len.saturating_sub(prefix.len());
                format!("{prefix}{}", "x".repeat(fill))
            })
            .collect();
        host.create_window(session, "shell", PaneContent::new(lines));
    }
    host
}

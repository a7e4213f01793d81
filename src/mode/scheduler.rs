// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

/// A one-shot refresh timer, re-armed by its owner after each fire.
///
/// The clock is always passed in, so nothing here reads the system time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl RefreshTimer {
    pub fn new(interval: Duration) -> Self {
        Self { interval, deadline: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn arm(&mut self, now: Instant) {
        let deadline = now + self.interval;
        tracing::trace!(interval_ms = self.interval.as_millis() as u64, "refresh timer armed");
        self.deadline = Some(deadline);
    }

    pub fn disarm(&mut self) {
        if self.deadline.take().is_some() {
            tracing::trace!("refresh timer disarmed");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Armed and past its deadline.
    pub fn due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Muxgrid: a tiled overview/picker mode for terminal multiplexers.
//!
//! The core ([`catalog`], [`layout`], [`nav`], [`render`], [`mode`]) runs against the
//! [`host::Registry`] / [`host::Host`] capabilities only. [`tui`] hosts it in a terminal on top of
//! an in-memory demo host.

pub mod catalog;
pub mod config;
pub mod host;
pub mod layout;
pub mod mode;
pub mod nav;
pub mod render;
pub mod tui;

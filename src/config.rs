// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mode configuration.
//!
//! Both grid variants are one core with different [`GridOptions`]. A JSON [`GridConfig`] file can
//! override any field of a preset; absent fields keep the preset's value.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CatalogKind, BOUNDED_CAPACITY};
use crate::layout::MinCellSize;
use crate::nav::NavFeatures;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value {field}={value}")]
    Invalid { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub kind: CatalogKind,
    /// Maximum catalog length; `None` is unbounded.
    pub capacity: Option<usize>,
    pub min_cell: MinCellSize,
    pub features: NavFeatures,
    pub refresh_interval: Duration,
}

impl GridOptions {
    /// The general variant: either catalog kind, unbounded, paging only.
    pub fn general(kind: CatalogKind) -> Self {
        Self {
            kind,
            capacity: None,
            min_cell: MinCellSize::default(),
            features: NavFeatures::PAGING_ONLY,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    /// The bounded session picker: 64 entries, every input family enabled.
    pub fn bounded() -> Self {
        Self {
            kind: CatalogKind::Sessions,
            capacity: Some(BOUNDED_CAPACITY),
            min_cell: MinCellSize::default(),
            features: NavFeatures::ALL,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    pub fn with_config(mut self, config: &GridConfig) -> Result<Self, ConfigError> {
        if let Some(kind) = config.kind.as_deref() {
            self.kind = parse_kind(kind)?;
        }
        if let Some(capacity) = config.capacity {
            if capacity == 0 {
                return Err(ConfigError::Invalid { field: "capacity", value: "0".to_owned() });
            }
            self.capacity = Some(capacity);
        }
        if let Some(width) = config.min_cell_width {
            self.min_cell.width = width;
        }
        if let Some(height) = config.min_cell_height {
            self.min_cell.height = height;
        }
        if let Some(paging) = config.paging {
            self.features.paging = paging;
        }
        if let Some(wraparound) = config.wraparound {
            self.features.wraparound = wraparound;
        }
        if let Some(digit_jump) = config.digit_jump {
            self.features.digit_jump = digit_jump;
        }
        if let Some(mouse) = config.mouse {
            self.features.mouse = mouse;
        }
        if let Some(ms) = config.refresh_interval_ms {
            if ms == 0 {
                return Err(ConfigError::Invalid {
                    field: "refresh_interval_ms",
                    value: "0".to_owned(),
                });
            }
            self.refresh_interval = Duration::from_millis(ms);
        }
        Ok(self)
    }
}

/// File form of [`GridOptions`]. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub kind: Option<String>,
    pub capacity: Option<usize>,
    pub min_cell_width: Option<usize>,
    pub min_cell_height: Option<usize>,
    pub paging: Option<bool>,
    pub wraparound: Option<bool>,
    pub digit_jump: Option<bool>,
    pub mouse: Option<bool>,
    pub refresh_interval_ms: Option<u64>,
}

impl GridConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&text)
    }
}

fn parse_kind(value: &str) -> Result<CatalogKind, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "sessions" => Ok(CatalogKind::Sessions),
        "windows" => Ok(CatalogKind::Windows),
        _ => Err(ConfigError::Invalid { field: "kind", value: value.to_owned() }),
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Muxgrid CLI entrypoint.
//!
//! Runs the picker full-screen against the built-in demo host and prints the committed target.

use std::error::Error;
use std::path::{Path, PathBuf};

use muxgrid::catalog::CatalogKind;
use muxgrid::config::{GridConfig, GridOptions};
use muxgrid::tui::RunOptions;

const DEFAULT_SESSIONS: usize = 6;
const LOG_ENV: &str = "MUXGRID_LOG";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--windows] [--bounded] [--config <path>] [--log <path>] [--sessions <n>]\n\n--windows picks among the windows of the hosting session instead of sessions.\n--bounded uses the bounded picker (64 entries, wraparound, digit jump, mouse).\n--config applies a JSON file of grid options on top of the preset.\n--log selects the log file (default muxgrid.log in the temp dir; filter via {LOG_ENV}).\n--sessions seeds the demo host (default {DEFAULT_SESSIONS})."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    windows: bool,
    bounded: bool,
    config: Option<PathBuf>,
    log: Option<PathBuf>,
    sessions: Option<usize>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--windows" => {
                if options.windows {
                    return Err(());
                }
                options.windows = true;
            }
            "--bounded" => {
                if options.bounded {
                    return Err(());
                }
                options.bounded = true;
            }
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(PathBuf::from(args.next().ok_or(())?));
            }
            "--log" => {
                if options.log.is_some() {
                    return Err(());
                }
                options.log = Some(PathBuf::from(args.next().ok_or(())?));
            }
            "--sessions" => {
                if options.sessions.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.sessions = Some(raw.parse().map_err(|_| ())?);
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn grid_options(options: &CliOptions) -> Result<GridOptions, Box<dyn Error>> {
    let mut grid = if options.bounded {
        GridOptions::bounded()
    } else {
        GridOptions::general(CatalogKind::Sessions)
    };
    if options.windows {
        grid.kind = CatalogKind::Windows;
    }
    if let Some(path) = options.config.as_deref() {
        grid = grid.with_config(&GridConfig::load(path)?)?;
    }
    Ok(grid)
}

fn init_file_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!("failed to create log directory '{}': {error}", parent.display())
            })?;
        }
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("failed to open log file '{}': {error}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();

    Ok(())
}

fn main() {
    let result = (|| -> Result<Option<String>, Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "muxgrid".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let grid = grid_options(&options)?;
        let log_path =
            options.log.clone().unwrap_or_else(|| std::env::temp_dir().join("muxgrid.log"));
        init_file_logging(&log_path)?;
        tracing::info!(kind = ?grid.kind, capacity = ?grid.capacity, "starting picker");

        muxgrid::tui::run(RunOptions {
            grid,
            sessions: options.sessions.unwrap_or(DEFAULT_SESSIONS),
        })
    })();

    match result {
        Ok(Some(target)) => println!("{target}"),
        Ok(None) => {}
        Err(err) => {
            eprintln!("muxgrid: {err}");
            std::process::exit(1);
        }
    }
}

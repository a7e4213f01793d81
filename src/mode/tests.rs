// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use rstest::rstest;

use super::{Driver, ExitReason, ModeEvent, ModeFlow, OverviewMode};
use crate::catalog::{CatalogItem, CatalogKind};
use crate::config::GridOptions;
use crate::host::{ClientId, Host, MemoryHost, PaneContent, Registry, SessionId, WindowId};
use crate::layout::GridGeometry;
use crate::nav::{CursorState, NavInput};

const CLIENT: ClientId = ClientId(7);

fn host_with_sessions(count: usize) -> MemoryHost {
    let mut host = MemoryHost::new();
    for idx in 0..count {
        let session = host.create_session(format!("s{idx}"));
        host.create_window(session, "sh", PaneContent::from_text(&format!("pane {idx}")))
            .expect("window");
    }
    host
}

fn open(
    options: GridOptions,
    host: &MemoryHost,
    width: usize,
    height: usize,
    now: Instant,
) -> OverviewMode {
    OverviewMode::open(options, WindowId(0), width, height, host, now).expect("mode")
}

fn key(input: NavInput) -> ModeEvent {
    ModeEvent::Input { input, client: Some(CLIENT) }
}

#[test]
fn open_builds_the_catalog_and_arms_the_timer() {
    let host = host_with_sessions(5);
    let now = Instant::now();
    let mode = open(GridOptions::general(CatalogKind::Sessions), &host, 80, 24, now);

    assert_eq!(mode.catalog().len(), 5);
    assert_eq!(
        *mode.geometry(),
        GridGeometry { columns: 2, rows: 3, cell_width: 40, cell_height: 8, logical_rows: 3 }
    );
    assert!(mode.timer_armed());
    assert_eq!(mode.next_deadline(), Some(now + Duration::from_secs(1)));
    assert!(mode.canvas().to_string().contains(" s0 "));
    assert_eq!(mode.selected(), Some(&CatalogItem::session(SessionId(0))));
}

#[test]
fn empty_catalog_ignores_everything_but_cancel() {
    let mut host = MemoryHost::new();
    let now = Instant::now();
    let mut mode = open(GridOptions::bounded(), &host, 80, 24, now);
    assert_eq!(*mode.geometry(), GridGeometry::EMPTY);

    for input in [
        NavInput::Left,
        NavInput::Right,
        NavInput::Up,
        NavInput::Down,
        NavInput::PageUp,
        NavInput::PageDown,
        NavInput::Previous,
        NavInput::Next,
        NavInput::Digit(0),
        NavInput::Click { x: 3, y: 3 },
        NavInput::DoubleClick { x: 3, y: 3 },
        NavInput::Select,
    ] {
        assert_eq!(mode.handle(key(input), &mut host, now), ModeFlow::IDLE);
    }
    assert_eq!(mode.canvas().to_string_trimmed(), "");
    assert_eq!(host.repaint_requests(), 0);
    assert_eq!(
        mode.handle(key(NavInput::Cancel), &mut host, now),
        ModeFlow::Exit(ExitReason::Cancelled)
    );
}

#[test]
fn only_real_moves_request_a_repaint() {
    let mut host = host_with_sessions(5);
    let now = Instant::now();
    let mut mode = open(GridOptions::general(CatalogKind::Sessions), &host, 80, 24, now);

    assert_eq!(mode.handle(key(NavInput::Right), &mut host, now), ModeFlow::REPAINT);
    assert_eq!(host.repaint_requests(), 1);
    assert_eq!(mode.handle(key(NavInput::Right), &mut host, now), ModeFlow::IDLE);
    assert_eq!(host.repaint_requests(), 1);
    assert_eq!(*mode.cursor(), CursorState { column: 1, row: 0, scroll_offset: 0 });
}

#[test]
fn committing_a_vanished_target_keeps_the_mode_running() {
    let mut host = host_with_sessions(3);
    let now = Instant::now();
    let mut mode = open(GridOptions::general(CatalogKind::Sessions), &host, 80, 24, now);
    mode.handle(key(NavInput::Right), &mut host, now);
    host.kill_session(SessionId(1));

    assert_eq!(mode.handle(key(NavInput::Select), &mut host, now), ModeFlow::IDLE);
    assert_eq!(host.attached_session(CLIENT), None);
}

#[test]
fn committing_a_dead_session_is_ignored() {
    let mut host = host_with_sessions(2);
    let now = Instant::now();
    let mut mode = open(GridOptions::general(CatalogKind::Sessions), &host, 80, 24, now);
    host.mark_dead(SessionId(0));

    assert_eq!(mode.handle(key(NavInput::Select), &mut host, now), ModeFlow::IDLE);
    assert_eq!(host.attached_session(CLIENT), None);
}

#[test]
fn sessions_commit_attaches_the_requesting_client() {
    let mut host = host_with_sessions(3);
    let now = Instant::now();
    let mut mode = open(GridOptions::general(CatalogKind::Sessions), &host, 80, 24, now);
    mode.handle(key(NavInput::Down), &mut host, now);

    let flow = mode.handle(key(NavInput::Select), &mut host, now);
    assert_eq!(flow, ModeFlow::Exit(ExitReason::Committed(CatalogItem::session(SessionId(2)))));
    assert_eq!(host.attached_session(CLIENT), Some(SessionId(2)));
}

#[test]
fn sessions_commit_without_a_client_stays_open() {
    let mut host = host_with_sessions(2);
    let now = Instant::now();
    let mut mode = open(GridOptions::general(CatalogKind::Sessions), &host, 80, 24, now);
    let event = ModeEvent::Input { input: NavInput::Select, client: None };
    assert_eq!(mode.handle(event, &mut host, now), ModeFlow::IDLE);
}

#[test]
fn windows_commit_selects_the_window_in_its_session() {
    let mut host = MemoryHost::new();
    let session = host.create_session("work");
    let (_, hosting) = host.create_window(session, "edit", PaneContent::default()).expect("w");
    host.create_window(session, "build", PaneContent::default()).expect("w");
    host.create_window(session, "logs", PaneContent::default()).expect("w");

    let now = Instant::now();
    let options = GridOptions::general(CatalogKind::Windows);
    let mut mode = OverviewMode::open(options, hosting, 80, 24, &host, now).expect("mode");
    assert_eq!(mode.catalog().len(), 3);
    mode.handle(key(NavInput::Right), &mut host, now);

    let flow = mode.handle(key(NavInput::Select), &mut host, now);
    assert_eq!(flow, ModeFlow::Exit(ExitReason::Committed(CatalogItem::window(session, 1))));
    assert_eq!(host.current_index(session), Some(1));
    assert_eq!(host.attached_session(CLIENT), None);
}

#[test]
fn tick_rebuilds_and_rearms_the_timer() {
    let mut host = host_with_sessions(2);
    let start = Instant::now();
    let mut mode = open(GridOptions::general(CatalogKind::Sessions), &host, 80, 24, start);
    host.create_session("late");

    let fired = start + Duration::from_secs(1);
    assert!(mode.tick_due(fired));
    assert_eq!(mode.handle(ModeEvent::Tick, &mut host, fired), ModeFlow::REPAINT);
    assert_eq!(mode.catalog().len(), 3);
    assert_eq!(mode.next_deadline(), Some(fired + Duration::from_secs(1)));
    assert_eq!(host.repaint_requests(), 1);
    assert!(mode.canvas().to_string().contains(" late "));
}

#[test]
fn refresh_rebuilds_without_touching_the_timer() {
    let mut host = host_with_sessions(2);
    let start = Instant::now();
    let mut mode = open(GridOptions::general(CatalogKind::Sessions), &host, 80, 24, start);
    host.kill_session(SessionId(0));

    let later = start + Duration::from_millis(400);
    assert_eq!(mode.handle(ModeEvent::Refresh, &mut host, later), ModeFlow::REPAINT);
    assert_eq!(mode.catalog().items(), &[CatalogItem::session(SessionId(1))]);
    assert_eq!(mode.next_deadline(), Some(start + Duration::from_secs(1)));
    assert_eq!(host.repaint_requests(), 1);
}

#[test]
fn rebuild_snaps_the_cursor_to_the_last_item() {
    let mut host = host_with_sessions(5);
    let now = Instant::now();
    let mut mode = open(GridOptions::bounded(), &host, 80, 24, now);
    mode.handle(key(NavInput::Digit(4)), &mut host, now);
    host.kill_session(SessionId(3));
    host.kill_session(SessionId(4));

    mode.handle(ModeEvent::Refresh, &mut host, now);
    assert_eq!(mode.selected(), Some(&CatalogItem::session(SessionId(2))));
    assert_eq!(*mode.cursor(), CursorState { column: 0, row: 1, scroll_offset: 0 });
}

#[test]
fn rebuild_to_empty_resets_the_cursor() {
    let mut host = host_with_sessions(3);
    let now = Instant::now();
    let mut mode = open(GridOptions::general(CatalogKind::Sessions), &host, 80, 24, now);
    mode.handle(key(NavInput::Down), &mut host, now);
    for session in host.sessions() {
        host.kill_session(session);
    }

    mode.handle(ModeEvent::Refresh, &mut host, now);
    assert_eq!(*mode.cursor(), CursorState::default());
    assert_eq!(*mode.geometry(), GridGeometry::EMPTY);
    assert_eq!(mode.canvas().to_string_trimmed(), "");
}

#[test]
fn resize_keeps_the_selected_item_and_skips_the_repaint_request() {
    let mut host = host_with_sessions(9);
    let now = Instant::now();
    let mut mode = open(GridOptions::bounded(), &host, 90, 60, now);
    assert_eq!(mode.geometry().columns, 3);
    mode.handle(key(NavInput::Digit(5)), &mut host, now);
    let requests = host.repaint_requests();

    let flow = mode.handle(ModeEvent::Resize { width: 50, height: 60 }, &mut host, now);
    assert_eq!(flow, ModeFlow::REPAINT);
    assert_eq!(mode.geometry().columns, 2);
    assert_eq!(mode.selected(), Some(&CatalogItem::session(SessionId(5))));
    assert_eq!((mode.canvas().width(), mode.canvas().height()), (50, 60));
    assert_eq!(host.repaint_requests(), requests);
}

#[test]
fn small_canvas_scrolls_to_keep_the_cursor_visible() {
    let mut host = host_with_sessions(5);
    let now = Instant::now();
    let mut mode = open(GridOptions::general(CatalogKind::Sessions), &host, 10, 4, now);
    assert_eq!(mode.geometry().cell_width, 5);
    assert_eq!(mode.geometry().cell_height, 3);

    mode.handle(key(NavInput::Down), &mut host, now);
    mode.handle(key(NavInput::Down), &mut host, now);
    assert_eq!(*mode.cursor(), CursorState { column: 0, row: 2, scroll_offset: 2 });
    assert!(mode.canvas().to_string_trimmed().starts_with("┌ s…┐"));
    assert_eq!(mode.canvas().get(5, 0).unwrap(), ' ');
}

#[test]
fn double_click_selects_and_commits() {
    let mut host = host_with_sessions(5);
    let now = Instant::now();
    let mut mode = open(GridOptions::bounded(), &host, 80, 24, now);

    let flow = mode.handle(key(NavInput::DoubleClick { x: 45, y: 9 }), &mut host, now);
    assert_eq!(flow, ModeFlow::Exit(ExitReason::Committed(CatalogItem::session(SessionId(3)))));
    assert_eq!(host.attached_session(CLIENT), Some(SessionId(3)));
}

#[test]
fn refused_double_click_still_moves_the_cursor() {
    let mut host = host_with_sessions(5);
    let now = Instant::now();
    let mut mode = open(GridOptions::bounded(), &host, 80, 24, now);

    let event = ModeEvent::Input { input: NavInput::DoubleClick { x: 45, y: 9 }, client: None };
    assert_eq!(mode.handle(event, &mut host, now), ModeFlow::REPAINT);
    assert_eq!(mode.selected(), Some(&CatalogItem::session(SessionId(3))));
    assert_eq!(host.repaint_requests(), 1);
}

#[rstest]
#[case::cancel(key(NavInput::Cancel), ExitReason::Cancelled)]
#[case::commit(key(NavInput::Select), ExitReason::Committed(CatalogItem::session(SessionId(0))))]
#[case::takeover(ModeEvent::Takeover, ExitReason::Takeover)]
fn every_exit_tears_the_mode_down(#[case] event: ModeEvent, #[case] expected: ExitReason) {
    let mut host = host_with_sessions(2);
    let start = Instant::now();
    let mode = open(GridOptions::general(CatalogKind::Sessions), &host, 80, 24, start);
    let mut driver = Driver::new(mode);
    assert!(driver.next_deadline().is_some());

    let sender = driver.sender();
    assert!(sender.send(event));
    assert!(sender.send(ModeEvent::Refresh));
    assert!(driver.pump(&mut host, start));

    assert!(driver.is_finished());
    assert!(driver.mode().is_none());
    assert_eq!(driver.outcome(), Some(expected));
    assert_eq!(driver.next_deadline(), None);

    // Nothing reaches a torn-down mode: neither queued events nor the old deadline.
    let requests = host.repaint_requests();
    assert!(!driver.pump(&mut host, start + Duration::from_secs(10)));
    assert_eq!(host.repaint_requests(), requests);
    assert_eq!(driver.outcome(), Some(expected));
}

#[test]
fn pump_fires_the_tick_only_once_due() {
    let mut host = host_with_sessions(1);
    let start = Instant::now();
    let mode = open(GridOptions::general(CatalogKind::Sessions), &host, 80, 24, start);
    let mut driver = Driver::new(mode);
    host.create_session("new");

    assert!(!driver.pump(&mut host, start + Duration::from_millis(500)));
    assert_eq!(driver.mode().map(|mode| mode.catalog().len()), Some(1));

    assert!(driver.pump(&mut host, start + Duration::from_secs(1)));
    assert_eq!(driver.mode().map(|mode| mode.catalog().len()), Some(2));
    assert_eq!(driver.next_deadline(), Some(start + Duration::from_secs(2)));
}

#[test]
fn queued_inputs_are_applied_in_order() {
    let mut host = host_with_sessions(5);
    let start = Instant::now();
    let mode = open(GridOptions::general(CatalogKind::Sessions), &host, 80, 24, start);
    let mut driver = Driver::new(mode);
    let sender = driver.sender();
    for input in [NavInput::Down, NavInput::Right, NavInput::Down] {
        sender.send(key(input));
    }

    assert!(driver.pump(&mut host, start));
    let cursor = driver.mode().map(|mode| *mode.cursor());
    // The second Down would land past the last item, so only two moves stick.
    assert_eq!(cursor, Some(CursorState { column: 1, row: 1, scroll_offset: 0 }));
    assert_eq!(host.repaint_requests(), 2);
}

#[test]
fn registry_trait_objects_drive_the_mode() {
    let mut host = host_with_sessions(2);
    let now = Instant::now();
    let registry: &dyn Registry = &host;
    let mut mode = OverviewMode::open(
        GridOptions::general(CatalogKind::Sessions),
        WindowId(0),
        40,
        12,
        registry,
        now,
    )
    .expect("mode");
    let dyn_host: &mut dyn Host = &mut host;
    assert_eq!(mode.handle(key(NavInput::Down), dyn_host, now), ModeFlow::REPAINT);
}

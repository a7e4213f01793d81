// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Muxgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Hosts the overview mode in a ratatui + crossterm shell on top of the built-in demo host. The
//! mode's canvas fills the terminal except for a one-line footer of key hints.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

use crate::catalog::{CatalogItem, CatalogKind};
use crate::config::GridOptions;
use crate::host::{ClientId, MemoryHost, Registry};
use crate::mode::{Driver, EventSender, ExitReason, ModeEvent, OverviewMode};
use crate::nav::NavFeatures;
use crate::render::Canvas;

mod demo;
mod input;
mod theme;

pub use demo::{demo_host, DemoActivity};

use input::{nav_input_for_key, ClickTracker};
use theme::TuiTheme;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
/// The single client the shell stands in for.
const TUI_CLIENT: ClientId = ClientId(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub grid: GridOptions,
    /// Sessions seeded into the demo host.
    pub sessions: usize,
}

/// Runs the picker until it exits. Returns a description of the committed target, if any.
pub fn run(options: RunOptions) -> Result<Option<String>, Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let area = terminal.area()?;
    let mut app = App::new(options, area, Instant::now())?;

    // The first frame and every terminal event force a draw.
    let mut needs_draw = true;
    loop {
        needs_draw |= app.tick(Instant::now());
        if app.is_finished() {
            break;
        }
        if needs_draw {
            terminal.draw(|frame| draw(frame, &app, &theme))?;
            needs_draw = false;
        }

        if event::poll(POLL_INTERVAL)? {
            app.handle_event(event::read()?, Instant::now());
            needs_draw = true;
        }
    }

    drop(terminal);
    Ok(app.outcome_label())
}

struct App {
    host: MemoryHost,
    driver: Driver,
    sender: EventSender,
    clicks: ClickTracker,
    activity: DemoActivity,
    features: NavFeatures,
    grid_area: Rect,
}

impl App {
    fn new(options: RunOptions, area: Rect, now: Instant) -> Result<Self, Box<dyn Error>> {
        let (host, hosting) = demo_host(options.sessions);
        let (grid_area, _) = split_area(area);
        let mode = OverviewMode::open(
            options.grid,
            hosting,
            usize::from(grid_area.width),
            usize::from(grid_area.height),
            &host,
            now,
        )?;
        let driver = Driver::new(mode);
        let sender = driver.sender();
        Ok(Self {
            host,
            driver,
            sender,
            clicks: ClickTracker::default(),
            activity: DemoActivity::new(now),
            features: options.grid.features,
            grid_area,
        })
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        let mode_event = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => nav_input_for_key(key)
                .map(|input| ModeEvent::Input { input, client: Some(TUI_CLIENT) }),
            Event::Mouse(mouse) if self.features.mouse => {
                let cell_size = self
                    .driver
                    .mode()
                    .map(|mode| (mode.geometry().cell_width, mode.geometry().cell_height))
                    .unwrap_or((1, 1));
                self.clicks
                    .translate(mouse, self.grid_area, cell_size, now)
                    .map(|input| ModeEvent::Input { input, client: Some(TUI_CLIENT) })
            }
            Event::Resize(width, height) => {
                let (grid_area, _) = split_area(Rect::new(0, 0, width, height));
                self.grid_area = grid_area;
                Some(ModeEvent::Resize {
                    width: usize::from(grid_area.width),
                    height: usize::from(grid_area.height),
                })
            }
            _ => None,
        };
        if let Some(mode_event) = mode_event {
            self.sender.send(mode_event);
        }
    }

    /// Advances the demo workload and lets the mode consume its queue.
    fn tick(&mut self, now: Instant) -> bool {
        if self.activity.advance(&mut self.host, now) {
            self.sender.send(ModeEvent::Refresh);
        }
        self.driver.pump(&mut self.host, now)
    }

    fn is_finished(&self) -> bool {
        self.driver.is_finished()
    }

    fn outcome_label(&self) -> Option<String> {
        match self.driver.outcome()? {
            ExitReason::Committed(item) => Some(describe_target(&self.host, &item)),
            ExitReason::Cancelled | ExitReason::Takeover => None,
        }
    }
}

/// `session <name>` or `window <session>:<index>`.
fn describe_target<R>(registry: &R, item: &CatalogItem) -> String
where
    R: Registry + ?Sized,
{
    let session = registry
        .session_name(item.session_id())
        .map(str::to_owned)
        .unwrap_or_else(|| item.session_id().to_string());
    match item.window_index() {
        Some(index) => format!("window {session}:{index}"),
        None => format!("session {session}"),
    }
}

fn split_area(area: Rect) -> (Rect, Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    (layout[0], layout[1])
}

fn draw(frame: &mut Frame<'_>, app: &App, theme: &TuiTheme) {
    let (grid_area, footer_area) = split_area(frame.size());

    if let Some(mode) = app.driver.mode() {
        frame.render_widget(GridView { canvas: mode.canvas(), theme }, grid_area);
        let footer = Paragraph::new(footer_help_line(theme, mode.options().features))
            .style(theme.base_style());
        frame.render_widget(footer, footer_area);
        let status = Paragraph::new(footer_status_line(theme, mode))
            .alignment(Alignment::Right)
            .style(theme.base_style());
        frame.render_widget(status, footer_area);
    }
}

/// Copies the mode's canvas into the terminal buffer, clipped to the widget area.
struct GridView<'a> {
    canvas: &'a Canvas,
    theme: &'a TuiTheme,
}

impl Widget for GridView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width.min(u16::try_from(self.canvas.width()).unwrap_or(u16::MAX));
        let height = area.height.min(u16::try_from(self.canvas.height()).unwrap_or(u16::MAX));
        for y in 0..height {
            for x in 0..width {
                let (cx, cy) = (usize::from(x), usize::from(y));
                let (Ok(ch), Ok(style)) = (self.canvas.get(cx, cy), self.canvas.style_at(cx, cy))
                else {
                    continue;
                };
                buf.get_mut(area.x + x, area.y + y)
                    .set_char(ch)
                    .set_style(self.theme.cell_style(style));
            }
        }
    }
}

fn footer_help_line(theme: &TuiTheme, features: NavFeatures) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    push_footer_entry(&mut spans, theme, "MOVE", "←↓↑→/hjkl");
    if features.paging {
        push_footer_entry(&mut spans, theme, "PAGE", "PgUp/PgDn");
    }
    if features.wraparound {
        push_footer_entry(&mut spans, theme, "CYCLE", "()");
    }
    if features.digit_jump {
        push_footer_entry(&mut spans, theme, "JUMP", "0-9");
    }
    if features.mouse {
        push_footer_entry(&mut spans, theme, "CLICK", "mouse");
    }
    push_footer_entry(&mut spans, theme, "PICK", "⏎");
    push_footer_entry(&mut spans, theme, "QUIT", "q");
    Line::from(spans)
}

fn footer_status_line(theme: &TuiTheme, mode: &OverviewMode) -> Line<'static> {
    let noun = match mode.options().kind {
        CatalogKind::Sessions => "sessions",
        CatalogKind::Windows => "windows",
    };
    let position = match mode.catalog().len() {
        0 => "0".to_owned(),
        len => {
            let index = mode.cursor().index(mode.geometry().columns);
            format!("{}/{len}", index + 1)
        }
    };
    Line::from(vec![Span::styled(format!(" {noun} {position} "), theme.footer_label_style())])
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, theme: &TuiTheme, label: &str, key: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ".to_owned(), theme.footer_label_style()));
    }
    spans.push(Span::styled(format!("{label} "), theme.footer_label_style()));
    spans.push(Span::styled(key.to_owned(), theme.footer_key_style()));
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn area(&self) -> io::Result<Rect> {
        self.terminal.size()
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}

use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use lifeweeks::{
    clock::Clock,
    constants::TIME_SETTINGS,
    domain::{InputError, ViewMode},
    schedule::{Dashboard, Snapshot, Ticker},
};

mod event_handlers;
mod render_views;
mod ui_helpers;
mod view_style;

struct App {
    dashboard: Dashboard<Box<dyn Clock>>,
    snapshot: Snapshot,
    scroll: u16,
    render_needed: bool,
}

impl App {
    fn new(dashboard: Dashboard<Box<dyn Clock>>) -> Self {
        let snapshot = dashboard.snapshot();
        Self {
            dashboard,
            snapshot,
            scroll: 0,
            render_needed: true,
        }
    }

    fn recompute(&mut self) {
        let snapshot = self.dashboard.snapshot();
        if snapshot != self.snapshot {
            self.snapshot = snapshot;
            self.render_needed = true;
        }
    }

    fn set_view(&mut self, view: ViewMode) {
        if view != self.dashboard.view() {
            self.dashboard.set_view(view);
            self.scroll = 0;
        }
        self.recompute();
        self.render_needed = true;
    }

    fn edit_input(&mut self, edit: impl FnOnce(&mut String)) {
        let mut raw = self.dashboard.raw_input().to_string();
        edit(&mut raw);
        self.dashboard.set_input(&raw);
        self.recompute();
        self.render_needed = true;
    }

    fn input_error(&self) -> Option<InputError> {
        self.dashboard.input_error_at(self.snapshot.now)
    }
}

pub fn run_ui(dashboard: Dashboard<Box<dyn Clock>>) -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(dashboard);
    let mut ticker = Ticker::new(Duration::from_millis(TIME_SETTINGS.tick_ms));
    let poll_rate = Duration::from_millis(TIME_SETTINGS.poll_ms).min(ticker.interval());

    loop {
        let now = Instant::now();
        if ticker.due(now) {
            app.recompute();
            ticker.mark(now);
        }

        if app.render_needed {
            terminal.draw(|f| {
                app.draw_frame(f);
            })?;
            app.render_needed = false;
        }

        if event::poll(poll_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) {
                        break;
                    }
                }
                Event::Resize(_, _) => app.render_needed = true,
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

use std::{
    ops::ControlFlow,
    thread,
    time::{Duration, Instant},
};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    clock::Clock,
    domain::{BirthInput, InputError, LifeStats, ViewMode},
    grid::Grid,
    progress,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub now: NaiveDateTime,
    pub input: Option<BirthInput>,
    pub stats: LifeStats,
    pub grid: Grid,
}

pub struct Dashboard<C: Clock> {
    clock: C,
    raw_input: String,
    input: Result<BirthInput, InputError>,
    view: ViewMode,
}

impl<C: Clock> Dashboard<C> {
    pub fn new(clock: C, view: ViewMode) -> Self {
        Self {
            clock,
            raw_input: String::new(),
            input: Err(InputError::Empty),
            view,
        }
    }

    pub fn with_input(mut self, raw: &str) -> Self {
        self.set_input(raw);
        self
    }

    pub fn set_input(&mut self, raw: &str) {
        self.raw_input = raw.to_string();
        self.input = BirthInput::parse(raw);
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn input_error(&self) -> Option<InputError> {
        self.input_error_at(self.clock.now())
    }

    pub fn input_error_at(&self, now: NaiveDateTime) -> Option<InputError> {
        match &self.input {
            Err(InputError::Empty) => None,
            Err(e) => Some(e.clone()),
            Ok(input) => input.validate(now).err(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_at(self.clock.now())
    }

    pub fn snapshot_at(&self, now: NaiveDateTime) -> Snapshot {
        let input = self.input.as_ref().ok().copied();
        let stats = progress::compute(input.as_ref(), now);
        let grid = Grid::new(self.view, &stats, now);

        Snapshot {
            now,
            input,
            stats,
            grid,
        }
    }
}

pub struct Ticker {
    interval: Duration,
    last: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn due(&self, now: Instant) -> bool {
        self.last
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }

    pub fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.last.map_or(Duration::ZERO, |last| {
            self.interval
                .saturating_sub(now.saturating_duration_since(last))
        })
    }
}

// Blocks until `render` breaks.
pub fn run_every<C, F>(dashboard: &Dashboard<C>, interval: Duration, mut render: F) -> usize
where
    C: Clock,
    F: FnMut(&Snapshot) -> ControlFlow<()>,
{
    let mut ticker = Ticker::new(interval);
    let mut rendered = 0;
    info!(interval_ms = interval.as_millis() as u64, "recompute loop started");

    loop {
        let now = Instant::now();
        if !ticker.due(now) {
            thread::sleep(ticker.remaining(now));
            continue;
        }
        ticker.mark(now);

        let snapshot = dashboard.snapshot();
        rendered += 1;
        debug!(
            weeks_lived = snapshot.stats.weeks_lived,
            view = snapshot.grid.view.key(),
            "tick"
        );

        if render(&snapshot).is_break() {
            break;
        }
    }

    info!(rendered, "recompute loop stopped");
    rendered
}

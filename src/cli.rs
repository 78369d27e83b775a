use std::{io, ops::ControlFlow, str::FromStr, time::Duration};

use chrono::{Month, NaiveDateTime};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use tracing::warn;

use lifeweeks::{
    clock::{Clock, FixedClock, SystemClock, parse_now},
    constants::TIME_SETTINGS,
    display,
    domain::{BirthInput, ViewMode},
    grid::suggested_columns,
    schedule::{Dashboard, Snapshot, run_every},
};

#[derive(Parser, Debug)]
#[command(name = "lifeweeks")]
#[command(about = "Your life in weeks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Open the live terminal view (default)")]
    Ui,

    #[command(about = "Show weeks lived, weeks remaining and progress")]
    Stats {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    #[command(about = "Print the grid for a view")]
    Grid {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[arg(long, help = "Cells per row (defaults to the view's widest layout)")]
        columns: Option<usize>,
    },

    #[command(about = "Reprint the stats on every tick")]
    Watch {
        #[arg(long, help = "Tick interval in milliseconds")]
        interval_ms: Option<u64>,

        #[arg(long, help = "Stop after this many ticks")]
        ticks: Option<usize>,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    #[arg(
        long,
        global = true,
        help = "Birth date (YYYY-MM-DD)",
        conflicts_with = "age"
    )]
    pub birth_date: Option<String>,

    #[arg(long, global = true, allow_hyphen_values = true, help = "Age in years")]
    pub age: Option<String>,

    #[arg(long, global = true, value_enum, help = "Grid view")]
    pub view: Option<ViewArg>,

    #[arg(long, global = true, help = "Month for the monthly view (1-12 or name)")]
    pub month: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Pretend it is this time (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)"
    )]
    pub now: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Lifetime,
    Year,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl InputArgs {
    pub fn clock(&self) -> Result<Box<dyn Clock>, String> {
        match &self.now {
            Some(raw) => {
                let now = parse_now(raw).map_err(|e| e.to_string())?;
                Ok(Box::new(FixedClock(now)))
            }
            None => Ok(Box::new(SystemClock)),
        }
    }

    pub fn raw_birth_input(&self) -> &str {
        self.birth_date
            .as_deref()
            .or(self.age.as_deref())
            .unwrap_or("")
    }

    pub fn view_mode(&self, now: NaiveDateTime) -> Result<ViewMode, String> {
        let month = self.month.as_deref().map(parse_month).transpose()?;

        let view = match (self.view, month) {
            (Some(ViewArg::Lifetime), _) | (None, None) => ViewMode::Lifetime,
            (Some(ViewArg::Year), _) => ViewMode::CurrentYear,
            (Some(ViewArg::Monthly), None) => ViewMode::current_month(now),
            (Some(ViewArg::Monthly), Some(month)) | (None, Some(month)) => {
                ViewMode::Monthly(month)
            }
        };
        Ok(view)
    }

    pub fn dashboard(&self) -> Result<Dashboard<Box<dyn Clock>>, String> {
        let clock = self.clock()?;
        let view = self.view_mode(clock.now())?;
        Ok(Dashboard::new(clock, view).with_input(self.raw_birth_input()))
    }
}

pub fn parse_month(raw: &str) -> Result<Month, String> {
    let value = raw.trim();
    if let Ok(number) = value.parse::<u8>() {
        return Month::try_from(number)
            .map_err(|_| format!("Month '{}' is not in 1..=12", value));
    }
    Month::from_str(value).map_err(|_| format!("Unknown month '{}'", value))
}

fn warn_on_invalid_input<C: Clock>(dashboard: &Dashboard<C>, now: NaiveDateTime) -> bool {
    match dashboard.input_error_at(now) {
        Some(e) => {
            warn!("{}; showing a journey that has not started", e);
            false
        }
        None => true,
    }
}

pub fn show_stats(input: &InputArgs, format: OutputFormat) -> Result<(), String> {
    let dashboard = input.dashboard()?;
    let snapshot = dashboard.snapshot();
    let valid = warn_on_invalid_input(&dashboard, snapshot.now);

    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&snapshot.stats).map_err(|e| e.to_string())?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            for line in display::stats_lines(&snapshot.stats, snapshot.now, 20) {
                println!("{}", line);
            }
            if let Some(birth) = snapshot.input.filter(|_| valid) {
                println!("{:<16}{}", "Age", display::describe_age(&birth, snapshot.now));
            }
        }
    }

    Ok(())
}

pub fn show_grid(
    input: &InputArgs,
    format: OutputFormat,
    columns: Option<usize>,
) -> Result<(), String> {
    let dashboard = input.dashboard()?;
    let snapshot = dashboard.snapshot();
    warn_on_invalid_input(&dashboard, snapshot.now);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&snapshot.grid).map_err(|e| e.to_string())?;
            println!("{}", json);
        }
        OutputFormat::Text => print_text_grid(&snapshot, columns),
    }

    Ok(())
}

fn print_text_grid(snapshot: &Snapshot, columns: Option<usize>) {
    let grid = &snapshot.grid;
    let columns = columns.unwrap_or_else(|| suggested_columns(grid.view, usize::MAX));

    println!("{}", grid.title);
    println!("{}", "-".repeat(grid.title.chars().count()));
    for line in display::text_grid(grid, columns) {
        println!("{}", line);
    }
    println!();
    println!("{}", display::legend_line(grid.view));
}

pub fn watch(
    input: &InputArgs,
    interval_ms: Option<u64>,
    ticks: Option<usize>,
) -> Result<(), String> {
    let dashboard = input.dashboard()?;
    warn_on_invalid_input(&dashboard, dashboard.now());
    let interval = Duration::from_millis(interval_ms.unwrap_or(TIME_SETTINGS.tick_ms).max(1));

    let mut printed = 0usize;
    run_every(&dashboard, interval, |snapshot| {
        println!("{}", display::summary_line(&snapshot.stats, snapshot.now));
        printed += 1;
        match ticks {
            Some(limit) if printed >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    });

    Ok(())
}

pub fn print_completions(shell: &str) -> Result<(), String> {
    use clap_complete::Shell;

    let shell = match shell {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        _ => {
            return Err(format!(
                "Unsupported shell: {}. Use bash, zsh, or fish.",
                shell
            ));
        }
    };

    clap_complete::generate(shell, &mut Cli::command(), "lifeweeks", &mut io::stdout());
    Ok(())
}

pub fn run_command(command: Command, input: &InputArgs) {
    let result = match command {
        Command::Ui => Ok(()),
        Command::Stats { format } => show_stats(input, format),
        Command::Grid { format, columns } => show_grid(input, format, columns),
        Command::Watch { interval_ms, ticks } => watch(input, interval_ms, ticks),
        Command::Completions { shell } => print_completions(&shell),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

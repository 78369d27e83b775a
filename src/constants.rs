use ratatui::style::Color;

pub const LIFE_SPAN: LifeSpanSettings = LifeSpanSettings {
    weeks_per_year: 52,
    assumed_lifespan_years: 80,
    total_life_weeks: 4160,
    max_age_years: 120,
};

const _: () = assert!(
    LIFE_SPAN.total_life_weeks == LIFE_SPAN.weeks_per_year * LIFE_SPAN.assumed_lifespan_years
);

pub const TIME_SETTINGS: TimeSettings = TimeSettings {
    tick_ms: 1000,
    poll_ms: 50,
    days_per_year_approx: 365.25,
};

pub const GLYPHS: GlyphSettings = GlyphSettings {
    lived: "✓",
    current: "●",
    empty: "·",
    placeholder: " ",
};

pub const GRID_LAYOUT: GridLayout = GridLayout {
    lifetime_columns: &[52, 26, 20],
    year_columns: &[26, 13],
    month_columns: 7,
    cell_width: 2,
    day_cell_width: 3,
};

pub const PALETTE: Palette = Palette {
    lived: Color::Rgb(0, 176, 80),
    current: Color::Rgb(255, 153, 0),
    empty: Color::Rgb(90, 90, 90),
    year_progress: Color::Rgb(0, 153, 255),
    accent: Color::White,
};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub struct LifeSpanSettings {
    pub weeks_per_year: u32,
    pub assumed_lifespan_years: u32,
    pub total_life_weeks: u32,
    pub max_age_years: u32,
}

pub struct TimeSettings {
    pub tick_ms: u64,
    pub poll_ms: u64,
    pub days_per_year_approx: f64,
}

pub struct GlyphSettings {
    pub lived: &'static str,
    pub current: &'static str,
    pub empty: &'static str,
    pub placeholder: &'static str,
}

pub struct GridLayout {
    pub lifetime_columns: &'static [usize],
    pub year_columns: &'static [usize],
    pub month_columns: usize,
    pub cell_width: usize,
    pub day_cell_width: usize,
}

pub struct Palette {
    pub lived: Color,
    pub current: Color,
    pub empty: Color,
    pub year_progress: Color,
    pub accent: Color,
}

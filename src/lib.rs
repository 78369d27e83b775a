pub mod age;
pub mod clock;
pub mod constants;
pub mod display;
pub mod domain;
pub mod grid;
pub mod logging;
pub mod progress;
pub mod schedule;

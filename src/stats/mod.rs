//! Stats module - descriptive statistics

mod calculator;

pub use calculator::{HistogramBin, StatsCalculator, DEFAULT_BINS};

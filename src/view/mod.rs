//! View module - binders that turn tables and selections into view specs

pub mod chart;
pub mod choropleth;
pub mod format;
pub mod map;
pub mod payroll;

use crate::data::ProcessorError;
use polars::prelude::PolarsError;
use thiserror::Error;

pub use chart::{BarSpec, ChartBinder, HistogramSpec, MetricSpec, TableSpec};
pub use choropleth::{ChoroplethBinder, ChoroplethBinding, ChoroplethSpec, ChoroplethStyle};
pub use map::{DeckSpec, LayerSpec, MapBinder, MapExplorer, ViewState};
pub use payroll::{PayrollDashboard, PayrollView};

#[derive(Error, Debug)]
pub enum BindError {
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Selection has no value for '{0}'")]
    MissingParameter(String),
    #[error("'{value}' is not a known {param}")]
    UnknownChoice { param: String, value: String },
}

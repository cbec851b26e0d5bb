//! Analysis module - survey aggregation

mod availability;
mod categorical;

pub use availability::{
    summarize_availability, AvailabilitySummary, Period, SlotCount, Weekday,
};
pub use categorical::{value_counts, ColumnSummary, ValueCount};

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("column operation failed: {0}")]
    Polars(#[from] PolarsError),
}

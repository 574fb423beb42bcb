//! Core types for peatland water table time series.
//!
//! A [`TimeSeries`] is an ordered list of [`Sample`]s, each holding a water
//! table depth and a precipitation increment. Series are usually read from
//! CSV files with [`read_time_series`].

pub mod error;
pub mod time_series;

pub use error::{Result, SeriesError};
pub use time_series::{read_time_series, Sample, TimeSeries, TIME_SERIES_COLUMNS};

//! The Sy summary table and its CSV persistence.
//!
//! # CSV Format
//!
//! One header line with the [`SY_TABLE_COLUMNS`], then one line per event:
//!
//! ```text
//! date_beginning,date_ending,precipitation_sum,max_wtd,min_wtd,durations,intensities,delta_h,depth,sy,idx_max,idx_min,accuracy_mean,accuracy_std
//! 2011-08-03 22:00:00,2011-08-04 01:00:00,6.2,-0.21,-0.243,3.0,2.0666666666666664,0.03300000000000003,-0.2265,0.18787878787878768,2011-08-04 03:00:00,2011-08-03 22:00:00,0.0011,0.0023
//! ```
//!
//! Timestamps are written as `YYYY-MM-DD hh:mm:ss`; a missing extremum
//! timestamp is an empty cell. Degenerate values are written `NaN`, `inf`
//! or `-inf`.

use crate::error::{Result, SyError};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Columns of the Sy table, in output order.
pub const SY_TABLE_COLUMNS: [&str; 14] = [
    "date_beginning",
    "date_ending",
    "precipitation_sum",
    "max_wtd",
    "min_wtd",
    "durations",
    "intensities",
    "delta_h",
    "depth",
    "sy",
    "idx_max",
    "idx_min",
    "accuracy_mean",
    "accuracy_std",
];

/// Results for one precipitation event.
///
/// Field order matches [`SY_TABLE_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyRow {
    /// Bin of the first raining hour.
    #[serde(with = "pts_utils::dates::date_time_format")]
    pub date_beginning: NaiveDateTime,
    /// Bin of the last raining hour.
    #[serde(with = "pts_utils::dates::date_time_format")]
    pub date_ending: NaiveDateTime,
    /// Precipitation over the raining bins (mm).
    #[serde(with = "pts_utils::nan_float_format")]
    pub precipitation_sum: f64,
    /// Highest water table depth in the response window.
    #[serde(with = "pts_utils::nan_float_format")]
    pub max_wtd: f64,
    /// Lowest water table depth in the response window.
    #[serde(with = "pts_utils::nan_float_format")]
    pub min_wtd: f64,
    /// Event duration in hours (0.5 for a single-bin event).
    #[serde(with = "pts_utils::nan_float_format")]
    pub durations: f64,
    /// precipitation_sum / durations (mm/h).
    #[serde(with = "pts_utils::nan_float_format")]
    pub intensities: f64,
    /// max_wtd - min_wtd (m).
    #[serde(with = "pts_utils::nan_float_format")]
    pub delta_h: f64,
    /// Mid-point of the water table rise (m).
    #[serde(with = "pts_utils::nan_float_format")]
    pub depth: f64,
    /// Specific yield: (precipitation_sum / delta_h) / 1000.
    #[serde(with = "pts_utils::nan_float_format")]
    pub sy: f64,
    #[serde(with = "pts_utils::dates::optional_date_time_format")]
    pub idx_max: Option<NaiveDateTime>,
    #[serde(with = "pts_utils::dates::optional_date_time_format")]
    pub idx_min: Option<NaiveDateTime>,
    #[serde(with = "pts_utils::nan_float_format")]
    pub accuracy_mean: f64,
    #[serde(with = "pts_utils::nan_float_format")]
    pub accuracy_std: f64,
}

/// Per-event Sy results in chronological order.
///
/// Never mutated once built: filtering yields a new table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyTable {
    rows: Vec<SyRow>,
}

impl SyTable {
    pub fn new(rows: Vec<SyRow>) -> Self {
        SyTable { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &SY_TABLE_COLUMNS
    }

    pub fn rows(&self) -> &[SyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyRow> {
        self.rows.iter()
    }

    pub fn get(&self, index: usize) -> Option<&SyRow> {
        self.rows.get(index)
    }

    /// Write the table as CSV. The header is written even when there are no rows.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
        wtr.write_record(SY_TABLE_COLUMNS)?;
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Parse CSV text holding at least the [`SY_TABLE_COLUMNS`].
    ///
    /// Extra columns (such as a leading index column) are ignored. `source`
    /// only names the data in error messages.
    pub fn from_csv_str(csv_data: &str, source: &str) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::Headers)
            .from_reader(csv_data.as_bytes());

        let headers = rdr.headers()?.clone();
        let complete = SY_TABLE_COLUMNS
            .iter()
            .all(|column| headers.iter().any(|header| header == *column));
        if !complete {
            return Err(SyError::MissingColumns {
                columns: SY_TABLE_COLUMNS.join(", "),
                path: source.to_string(),
            });
        }

        let rows = rdr
            .deserialize::<SyRow>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(SyTable { rows })
    }
}

impl<'a> IntoIterator for &'a SyTable {
    type Item = &'a SyRow;
    type IntoIter = std::slice::Iter<'a, SyRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Write a Sy table to a CSV file.
pub fn write_sy(table: &SyTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    table.write_csv(io::BufWriter::new(file))?;
    log::info!("Wrote {} events to {}", table.len(), path.display());
    Ok(())
}

/// Read a Sy table previously written with [`write_sy`].
pub fn read_sy(path: impl AsRef<Path>) -> Result<SyTable> {
    let path = path.as_ref();
    let csv_data = std::fs::read_to_string(path)?;
    let table = SyTable::from_csv_str(&csv_data, &path.display().to_string())?;
    log::info!("Loaded {} events from {}", table.len(), path.display());
    Ok(table)
}

use crate::error::{Result, SeriesError};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use pts_utils::dates::parse_date_time;
use std::path::Path;

/// Columns a time series CSV must provide. Any other column is ignored.
pub const TIME_SERIES_COLUMNS: [&str; 3] = ["date", "data_wtd", "data_prec"];

/// Cell contents read as a missing measurement.
const MISSING_MARKERS: [&str; 5] = ["", "na", "nan", "null", "none"];

/// A single acquisition: water table depth (m) and precipitation (mm).
///
/// Either value may be NaN when the logger recorded nothing. The sign of
/// `wtd` is kept exactly as recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub date: NaiveDateTime,
    pub wtd: f64,
    pub prec: f64,
}

impl Sample {
    pub fn new(date: NaiveDateTime, wtd: f64, prec: f64) -> Self {
        Sample { date, wtd, prec }
    }
}

/// Samples ordered by strictly increasing timestamp.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    /// Build a series, sorting the samples by date.
    ///
    /// Fails when two samples carry the same timestamp.
    pub fn new(mut samples: Vec<Sample>) -> Result<Self> {
        samples.sort_by_key(|sample| sample.date);
        if let Some(pair) = samples.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(SeriesError::DuplicateTimestamp(pair[0].date));
        }
        Ok(TimeSeries { samples })
    }

    /// Parse CSV text holding at least the [`TIME_SERIES_COLUMNS`].
    ///
    /// `source` only names the data in error messages (usually the file path).
    pub fn from_csv_str(csv_data: &str, source: &str) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(csv_data.as_bytes());

        let headers = rdr.headers()?.clone();
        let positions = column_positions(&headers).ok_or_else(|| SeriesError::MissingColumns {
            columns: TIME_SERIES_COLUMNS.join(", "),
            path: source.to_string(),
        })?;

        let mut samples = Vec::new();
        for (index, result) in rdr.records().enumerate() {
            let record = result?;
            // header is line 1
            let row = index + 2;
            let date_str = record.get(positions[0]).unwrap_or("");
            let date = parse_date_time(date_str).map_err(|_| SeriesError::DateParse {
                row,
                value: date_str.to_string(),
            })?;
            let wtd = parse_value(&record, positions[1], TIME_SERIES_COLUMNS[1], row)?;
            let prec = parse_value(&record, positions[2], TIME_SERIES_COLUMNS[2], row)?;
            samples.push(Sample { date, wtd, prec });
        }
        log::debug!("{}: parsed {} samples", source, samples.len());
        TimeSeries::new(samples)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDateTime> {
        self.samples.first().map(|sample| sample.date)
    }

    pub fn last_date(&self) -> Option<NaiveDateTime> {
        self.samples.last().map(|sample| sample.date)
    }

    /// Samples whose timestamp lies in `[from, to]`, as a new series.
    pub fn between(&self, from: NaiveDateTime, to: NaiveDateTime) -> TimeSeries {
        let start = self.samples.partition_point(|sample| sample.date < from);
        let end = self.samples.partition_point(|sample| sample.date <= to);
        TimeSeries {
            samples: self.samples[start..end.max(start)].to_vec(),
        }
    }
}

fn column_positions(headers: &StringRecord) -> Option<[usize; 3]> {
    let mut positions = [0usize; 3];
    for (slot, column) in positions.iter_mut().zip(TIME_SERIES_COLUMNS) {
        *slot = headers.iter().position(|header| header == column)?;
    }
    Some(positions)
}

fn parse_value(record: &StringRecord, position: usize, column: &str, row: usize) -> Result<f64> {
    let raw = record.get(position).unwrap_or("");
    if MISSING_MARKERS.contains(&raw.to_lowercase().as_str()) {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>().map_err(|_| SeriesError::ValueParse {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Read a time series CSV file.
///
/// Expected format (with headers, extra columns ignored):
///
/// ```text
/// date,data_wtd,data_prec
/// 2011-06-15 15:00:00,-0.231,0.0
/// 2011-06-15 15:30:00,-0.229,0.4
/// ```
pub fn read_time_series(path: impl AsRef<Path>) -> Result<TimeSeries> {
    let path = path.as_ref();
    let csv_data = std::fs::read_to_string(path)?;
    let series = TimeSeries::from_csv_str(&csv_data, &path.display().to_string())?;
    log::info!("Loaded {} samples from {}", series.len(), path.display());
    Ok(series)
}

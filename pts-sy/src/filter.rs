use crate::{
    error::{Result, SyError},
    table::{SyRow, SyTable},
};
use chrono::NaiveDateTime;
use std::{fmt, str::FromStr};

/// A Sy table column that can be bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyField {
    DateBeginning,
    DateEnding,
    PrecipitationSum,
    MaxWtd,
    MinWtd,
    Durations,
    Intensities,
    DeltaH,
    Depth,
    Sy,
    IdxMax,
    IdxMin,
    AccuracyMean,
    AccuracyStd,
}

/// Value of one cell, as seen by a filter.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Number(f64),
    Date(Option<NaiveDateTime>),
}

impl SyField {
    pub const ALL: [SyField; 14] = [
        SyField::DateBeginning,
        SyField::DateEnding,
        SyField::PrecipitationSum,
        SyField::MaxWtd,
        SyField::MinWtd,
        SyField::Durations,
        SyField::Intensities,
        SyField::DeltaH,
        SyField::Depth,
        SyField::Sy,
        SyField::IdxMax,
        SyField::IdxMin,
        SyField::AccuracyMean,
        SyField::AccuracyStd,
    ];

    /// Column name in the Sy table.
    pub fn name(&self) -> &'static str {
        match self {
            SyField::DateBeginning => "date_beginning",
            SyField::DateEnding => "date_ending",
            SyField::PrecipitationSum => "precipitation_sum",
            SyField::MaxWtd => "max_wtd",
            SyField::MinWtd => "min_wtd",
            SyField::Durations => "durations",
            SyField::Intensities => "intensities",
            SyField::DeltaH => "delta_h",
            SyField::Depth => "depth",
            SyField::Sy => "sy",
            SyField::IdxMax => "idx_max",
            SyField::IdxMin => "idx_min",
            SyField::AccuracyMean => "accuracy_mean",
            SyField::AccuracyStd => "accuracy_std",
        }
    }

    /// True for timestamp columns, which take [`Bound::Date`] bounds.
    pub fn is_date(&self) -> bool {
        matches!(
            self,
            SyField::DateBeginning | SyField::DateEnding | SyField::IdxMax | SyField::IdxMin
        )
    }

    fn cell(&self, row: &SyRow) -> Cell {
        match self {
            SyField::DateBeginning => Cell::Date(Some(row.date_beginning)),
            SyField::DateEnding => Cell::Date(Some(row.date_ending)),
            SyField::PrecipitationSum => Cell::Number(row.precipitation_sum),
            SyField::MaxWtd => Cell::Number(row.max_wtd),
            SyField::MinWtd => Cell::Number(row.min_wtd),
            SyField::Durations => Cell::Number(row.durations),
            SyField::Intensities => Cell::Number(row.intensities),
            SyField::DeltaH => Cell::Number(row.delta_h),
            SyField::Depth => Cell::Number(row.depth),
            SyField::Sy => Cell::Number(row.sy),
            SyField::IdxMax => Cell::Date(row.idx_max),
            SyField::IdxMin => Cell::Date(row.idx_min),
            SyField::AccuracyMean => Cell::Number(row.accuracy_mean),
            SyField::AccuracyStd => Cell::Number(row.accuracy_std),
        }
    }
}

impl FromStr for SyField {
    type Err = SyError;

    fn from_str(s: &str) -> Result<Self> {
        SyField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| SyError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for SyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An inclusive limit on a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Number(f64),
    Date(NaiveDateTime),
}

impl From<f64> for Bound {
    fn from(value: f64) -> Self {
        Bound::Number(value)
    }
}

impl From<NaiveDateTime> for Bound {
    fn from(value: NaiveDateTime) -> Self {
        Bound::Date(value)
    }
}

/// Optional lower and upper bound on one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub field: SyField,
    pub min: Option<Bound>,
    pub max: Option<Bound>,
}

impl FieldRange {
    fn check(&self) -> Result<()> {
        for bound in [self.min, self.max].into_iter().flatten() {
            let fits = match bound {
                Bound::Number(_) => !self.field.is_date(),
                Bound::Date(_) => self.field.is_date(),
            };
            if !fits {
                return Err(SyError::BoundKind {
                    field: self.field.to_string(),
                    expected: if self.field.is_date() { "date" } else { "number" },
                });
            }
        }
        Ok(())
    }

    fn accepts(&self, row: &SyRow) -> bool {
        let cell = self.field.cell(row);
        let above = self.min.map_or(true, |min| match (cell, min) {
            (Cell::Number(value), Bound::Number(min)) => value >= min,
            (Cell::Date(Some(value)), Bound::Date(min)) => value >= min,
            _ => false,
        });
        let below = self.max.map_or(true, |max| match (cell, max) {
            (Cell::Number(value), Bound::Number(max)) => value <= max,
            (Cell::Date(Some(value)), Bound::Date(max)) => value <= max,
            _ => false,
        });
        above && below
    }
}

/// Inclusive bounds on Sy table fields, combined with AND.
///
/// A bound is applied whenever it is present, whatever its value: a lower
/// bound of `0.0` keeps only non-negative values.
///
/// ```
/// use pts_sy::filter::SyFilter;
///
/// let filter = SyFilter::new()
///     .min("sy", 0.0)?
///     .between("precipitation_sum", Some(2.0), Some(7.0))?;
/// # Ok::<(), pts_sy::SyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyFilter {
    ranges: Vec<FieldRange>,
}

impl SyFilter {
    pub fn new() -> Self {
        SyFilter::default()
    }

    /// Bound `field` by `min` and/or `max`; `None` leaves that side open.
    pub fn between(
        mut self,
        field: &str,
        min: Option<impl Into<Bound>>,
        max: Option<impl Into<Bound>>,
    ) -> Result<Self> {
        let range = FieldRange {
            field: field.parse()?,
            min: min.map(Into::into),
            max: max.map(Into::into),
        };
        range.check()?;
        self.ranges.push(range);
        Ok(self)
    }

    pub fn min(self, field: &str, min: impl Into<Bound>) -> Result<Self> {
        self.between(field, Some(min), None::<Bound>)
    }

    pub fn max(self, field: &str, max: impl Into<Bound>) -> Result<Self> {
        self.between(field, None::<Bound>, Some(max))
    }

    pub fn ranges(&self) -> &[FieldRange] {
        &self.ranges
    }

    pub fn accepts(&self, row: &SyRow) -> bool {
        self.ranges.iter().all(|range| range.accepts(row))
    }
}

/// Rows of `table` satisfying every bound of `filter`, as a new table.
pub fn filter_sy(table: &SyTable, filter: &SyFilter) -> SyTable {
    let rows: Vec<SyRow> = table
        .iter()
        .filter(|row| filter.accepts(row))
        .cloned()
        .collect();
    log::debug!("Filter kept {} of {} events", rows.len(), table.len());
    SyTable::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2011, 8, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn row(day: u32, precipitation_sum: f64, sy: f64) -> SyRow {
        SyRow {
            date_beginning: at(day, 6),
            date_ending: at(day, 9),
            precipitation_sum,
            max_wtd: -0.1,
            min_wtd: -0.2,
            durations: 3.0,
            intensities: precipitation_sum / 3.0,
            delta_h: 0.1,
            depth: -0.15,
            sy,
            idx_max: Some(at(day, 11)),
            idx_min: None,
            accuracy_mean: 0.0,
            accuracy_std: 0.0,
        }
    }

    fn table() -> SyTable {
        SyTable::new(vec![
            row(3, 1.5, -0.05),
            row(5, 2.0, 0.0),
            row(9, 6.5, 0.22),
            row(12, 7.0, 0.3),
            row(20, 12.0, f64::NAN),
        ])
    }

    #[test]
    fn test_inclusive_bounds() {
        let filter = SyFilter::new()
            .between("precipitation_sum", Some(2.0), Some(7.0))
            .unwrap();
        let result = filter_sy(&table(), &filter);
        let sums: Vec<f64> = result.iter().map(|r| r.precipitation_sum).collect();
        assert_eq!(sums, vec![2.0, 6.5, 7.0]);
    }

    #[test]
    fn test_zero_bound_is_honoured() {
        let filter = SyFilter::new().min("sy", 0.0).unwrap();
        let result = filter_sy(&table(), &filter);
        let sy: Vec<f64> = result.iter().map(|r| r.sy).collect();
        assert_eq!(sy, vec![0.0, 0.22, 0.3]);
    }

    #[test]
    fn test_no_bounds_is_a_no_op() {
        let filter = SyFilter::new()
            .between("depth", None::<f64>, None::<f64>)
            .unwrap();
        assert_eq!(filter_sy(&table(), &filter).len(), 5);
        assert_eq!(filter_sy(&table(), &SyFilter::new()).len(), 5);
    }

    #[test]
    fn test_date_and_number_bounds_combine() {
        let filter = SyFilter::new()
            .min("date_beginning", at(4, 0))
            .unwrap()
            .max("date_ending", at(12, 9))
            .unwrap()
            .max("sy", 0.25)
            .unwrap();
        let result = filter_sy(&table(), &filter);
        let days: Vec<NaiveDateTime> = result.iter().map(|r| r.date_beginning).collect();
        assert_eq!(days, vec![at(5, 6), at(9, 6)]);
    }

    #[test]
    fn test_missing_timestamp_never_matches() {
        let filter = SyFilter::new().min("idx_min", at(1, 0)).unwrap();
        assert!(filter_sy(&table(), &filter).is_empty());
    }

    #[test]
    fn test_unknown_field_fails_fast() {
        let err = SyFilter::new().min("intesities", 1.0).unwrap_err();
        assert!(matches!(err, SyError::UnknownField(ref name) if name == "intesities"));
    }

    #[test]
    fn test_bound_kind_mismatch() {
        assert!(matches!(
            SyFilter::new().min("sy", at(1, 0)),
            Err(SyError::BoundKind { .. })
        ));
        assert!(matches!(
            SyFilter::new().max("date_ending", 3.0),
            Err(SyError::BoundKind { .. })
        ));
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in SyField::ALL {
            assert_eq!(field.name().parse::<SyField>().unwrap(), field);
        }
    }
}

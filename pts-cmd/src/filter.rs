//! Range filtering of an existing Sy table.

use anyhow::{anyhow, Context};
use log::info;
use pts_sy::{filter_sy, read_sy, write_sy, Bound, SyField, SyFilter};
use pts_utils::dates::parse_date_time;

/// A parsed `FIELD=MIN..MAX` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArg {
    pub field: SyField,
    pub min: Option<Bound>,
    pub max: Option<Bound>,
}

fn parse_side(field: SyField, text: &str) -> anyhow::Result<Option<Bound>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let bound = if field.is_date() {
        Bound::Date(parse_date_time(text)?)
    } else {
        Bound::Number(
            text.parse::<f64>()
                .with_context(|| format!("Invalid bound \"{}\" for {}", text, field))?,
        )
    };
    Ok(Some(bound))
}

/// Parse `FIELD=MIN..MAX`, where either side may be left empty.
///
/// Dates are accepted in any format `parse_date_time` understands, such as
/// `date_beginning=2011-08-01 00:00:00..2011-09-01`.
pub fn parse_bound(arg: &str) -> anyhow::Result<BoundArg> {
    let (field, range) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Bound \"{}\" must look like FIELD=MIN..MAX", arg))?;
    let (min, max) = range
        .split_once("..")
        .ok_or_else(|| anyhow!("Bound \"{}\" must look like FIELD=MIN..MAX", arg))?;
    let field: SyField = field.trim().parse()?;
    Ok(BoundArg {
        field,
        min: parse_side(field, min)?,
        max: parse_side(field, max)?,
    })
}

/// Build a filter from `FIELD=MIN..MAX` arguments.
pub fn build_filter(bounds: &[String]) -> anyhow::Result<SyFilter> {
    bounds.iter().try_fold(SyFilter::new(), |filter, arg| -> anyhow::Result<SyFilter> {
        let bound = parse_bound(arg)?;
        Ok(filter.between(bound.field.name(), bound.min, bound.max)?)
    })
}

/// Keep the rows of the Sy table at `input` within `bounds` and write them
/// to `output`.
pub fn run_filter(input: &str, output: &str, bounds: &[String]) -> anyhow::Result<()> {
    let filter = build_filter(bounds)?;
    let table = read_sy(input)?;
    let filtered = filter_sy(&table, &filter);
    info!(
        "Kept {} of {} events with {} bounds",
        filtered.len(),
        table.len(),
        filter.ranges().len()
    );
    write_sy(&filtered, output)?;
    info!("Filter complete. Output: {}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_number_bounds() {
        let bound = parse_bound("sy=0..0.5").unwrap();
        assert_eq!(bound.field, SyField::Sy);
        assert_eq!(bound.min, Some(Bound::Number(0.0)));
        assert_eq!(bound.max, Some(Bound::Number(0.5)));

        let open = parse_bound("precipitation_sum=..10").unwrap();
        assert_eq!(open.min, None);
        assert_eq!(open.max, Some(Bound::Number(10.0)));

        let negative = parse_bound("depth=-0.4..").unwrap();
        assert_eq!(negative.min, Some(Bound::Number(-0.4)));
        assert_eq!(negative.max, None);
    }

    #[test]
    fn test_parse_date_bounds() {
        let bound = parse_bound("date_beginning=2011-08-01 06:30:00..2011-09-01").unwrap();
        let day = NaiveDate::from_ymd_opt(2011, 8, 1).unwrap();
        assert_eq!(
            bound.min,
            Some(Bound::Date(day.and_hms_opt(6, 30, 0).unwrap()))
        );
        assert_eq!(
            bound.max,
            Some(Bound::Date(
                NaiveDate::from_ymd_opt(2011, 9, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            ))
        );
    }

    #[test]
    fn test_rejects_malformed_bounds() {
        assert!(parse_bound("sy").is_err());
        assert!(parse_bound("sy=0.5").is_err());
        assert!(parse_bound("sy=abc..").is_err());
        assert!(parse_bound("not_a_column=0..1").is_err());
        assert!(parse_bound("idx_max=yesterday..").is_err());
    }

    #[test]
    fn test_build_filter_combines_bounds() {
        let filter = build_filter(&[
            "sy=0..".to_string(),
            "durations=..12".to_string(),
        ])
        .unwrap();
        assert_eq!(filter.ranges().len(), 2);
        assert!(build_filter(&[]).unwrap().ranges().is_empty());
    }
}

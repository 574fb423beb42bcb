//! Shared utility functions for peatland time series crates.

pub mod period;

pub use period::{PeriodError, ResamplePeriod};

/// Timestamp utility functions
pub mod dates {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

    /// Canonical timestamp format used when writing files: "YYYY-MM-DD hh:mm:ss"
    pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Timestamp layouts accepted when reading, tried in order.
    const ACCEPTED_FORMATS: [&str; 5] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    /// Format a NaiveDateTime as "YYYY-MM-DD hh:mm:ss"
    pub fn format_date_time(date: &NaiveDateTime) -> String {
        date.format(DATE_TIME_FORMAT).to_string()
    }

    /// Parse an ISO-like timestamp.
    ///
    /// Accepts a space or `T` separator, optional fractional seconds,
    /// minute precision, and a bare `YYYY-MM-DD` date (taken as midnight).
    pub fn parse_date_time(s: &str) -> anyhow::Result<NaiveDateTime> {
        let s = s.trim();
        for format in ACCEPTED_FORMATS {
            if let Ok(date) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(date);
            }
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
        Ok(date.and_time(NaiveTime::MIN))
    }

    /// Floor a timestamp onto a grid of `step` wide bins anchored at
    /// midnight of the timestamp's own day.
    pub fn floor_to_step(date: NaiveDateTime, step: TimeDelta) -> NaiveDateTime {
        let midnight = date.date().and_time(NaiveTime::MIN);
        let step_seconds = step.num_seconds().max(1);
        let offset = (date - midnight).num_seconds();
        midnight + TimeDelta::seconds(offset - offset % step_seconds)
    }

    /// serde adapter writing timestamps in [`DATE_TIME_FORMAT`].
    pub mod date_time_format {
        use chrono::NaiveDateTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&super::format_date_time(date))
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            super::parse_date_time(&s).map_err(de::Error::custom)
        }
    }

    /// Same as [`date_time_format`], with an empty cell standing for `None`.
    pub mod optional_date_time_format {
        use chrono::NaiveDateTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(date: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(date) => serializer.serialize_str(&super::format_date_time(date)),
                None => serializer.serialize_str(""),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            if s.trim().is_empty() {
                return Ok(None);
            }
            super::parse_date_time(&s).map(Some).map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2011, 6, 15)
                .unwrap()
                .and_hms_opt(h, m, s)
                .unwrap()
        }

        #[test]
        fn test_parse_accepted_formats() {
            assert_eq!(parse_date_time("2011-06-15 15:00:00").unwrap(), at(15, 0, 0));
            assert_eq!(parse_date_time("2011-06-15T15:00:00").unwrap(), at(15, 0, 0));
            assert_eq!(parse_date_time(" 2011-06-15 15:30 ").unwrap(), at(15, 30, 0));
            assert_eq!(parse_date_time("2011-06-15").unwrap(), at(0, 0, 0));
            assert!(parse_date_time("15/06/2011").is_err());
        }

        #[test]
        fn test_format_and_parse() {
            let date = at(9, 5, 7);
            let formatted = format_date_time(&date);
            assert_eq!(formatted, "2011-06-15 09:05:07");
            assert_eq!(parse_date_time(&formatted).unwrap(), date);
        }

        #[test]
        fn test_floor_to_step() {
            let hour = TimeDelta::hours(1);
            assert_eq!(floor_to_step(at(15, 42, 10), hour), at(15, 0, 0));
            assert_eq!(floor_to_step(at(15, 0, 0), hour), at(15, 0, 0));
            assert_eq!(floor_to_step(at(15, 42, 10), TimeDelta::minutes(15)), at(15, 30, 0));
            assert_eq!(floor_to_step(at(15, 42, 10), TimeDelta::days(2)), at(0, 0, 0));
        }
    }
}

/// Closed-form power law used to describe depth as a function of Sy.
pub mod power_law {
    /// `a * x^b`
    pub fn power_law(x: f64, a: f64, b: f64) -> f64 {
        a * x.powf(b)
    }

    /// Inverse of [`power_law`]: the `x` for which `a * x^b == y`.
    pub fn inverse_power_law(y: f64, a: f64, b: f64) -> f64 {
        (y / a).powf(1.0 / b)
    }

}

/// serde adapter for float cells where an empty cell means NaN.
///
/// Values are written with the csv writer's shortest round-trip form
/// (`NaN`, `inf` and `-inf` included); blank cells, as pandas writes for
/// NaN, read back as `f64::NAN`.
pub mod nan_float_format {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(f64::NAN);
        }
        s.parse::<f64>().map_err(de::Error::custom)
    }

    #[cfg(test)]
    mod tests {
        use serde::Deserialize;

        #[derive(Deserialize)]
        struct Cell {
            #[serde(with = "super")]
            value: f64,
        }

        fn read(cell: &str) -> Result<f64, csv::Error> {
            let data = format!("value\n{cell}\n");
            let mut rdr = csv::Reader::from_reader(data.as_bytes());
            let row: Cell = rdr
                .deserialize()
                .next()
                .expect("one row")?;
            Ok(row.value)
        }

        #[test]
        fn test_blank_cell_is_nan() {
            assert!(read("\"\"").unwrap().is_nan());
            assert!(read("\" \"").unwrap().is_nan());
        }

        #[test]
        fn test_numbers_and_special_values() {
            assert_eq!(read("-0.243").unwrap(), -0.243);
            assert!(read("NaN").unwrap().is_nan());
            assert_eq!(read("inf").unwrap(), f64::INFINITY);
            assert_eq!(read("-inf").unwrap(), f64::NEG_INFINITY);
            assert!(read("deep").is_err());
        }
    }
}

/// NaN-skipping reductions over plain slices.
pub mod stats {
    /// Successive differences `values[i + 1] - values[i]`.
    pub fn first_difference(values: &[f64]) -> Vec<f64> {
        values.windows(2).map(|pair| pair[1] - pair[0]).collect()
    }

    /// Arithmetic mean of the non-NaN values, NaN when there are none.
    pub fn nan_mean(values: &[f64]) -> f64 {
        let (sum, count) = values
            .iter()
            .filter(|v| !v.is_nan())
            .fold((0.0_f64, 0usize), |(sum, count), v| (sum + *v, count + 1));
        if count == 0 {
            return f64::NAN;
        }
        sum / count as f64
    }

    /// Sample standard deviation (n - 1) of the non-NaN values.
    /// NaN when fewer than two values are available.
    pub fn nan_std(values: &[f64]) -> f64 {
        let valid: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if valid.len() < 2 {
            return f64::NAN;
        }
        let mean = valid.iter().sum::<f64>() / valid.len() as f64;
        let squares: f64 = valid.iter().map(|v| (v - mean).powi(2)).sum();
        (squares / (valid.len() - 1) as f64).sqrt()
    }

}

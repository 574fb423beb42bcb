use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Errors raised while parsing a resample rule.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Empty resample rule")]
    Empty,

    #[error("Unknown resample unit {0:?} (expected one of S, T/min, H, D)")]
    UnknownUnit(String),

    #[error("Invalid resample count in {0:?}")]
    InvalidCount(String),

    #[error("Resample period must be positive: {0:?}")]
    NonPositive(String),
}

/// Width of one resampled bin, in whole seconds.
///
/// Parsed from pandas-like aliases (`H`, `30min`, `15T`, `D`) or from
/// spelled-out forms (`1 hour`, `30 minutes`, `2 days`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResamplePeriod {
    seconds: i64,
}

impl ResamplePeriod {
    pub fn seconds(seconds: i64) -> Result<Self, PeriodError> {
        if seconds <= 0 {
            return Err(PeriodError::NonPositive(format!("{seconds}s")));
        }
        Ok(ResamplePeriod { seconds })
    }

    pub fn minutes(minutes: i64) -> Result<Self, PeriodError> {
        Self::seconds(minutes * SECONDS_PER_MINUTE)
    }

    pub fn hours(hours: i64) -> Result<Self, PeriodError> {
        Self::seconds(hours * SECONDS_PER_HOUR)
    }

    pub fn num_seconds(&self) -> i64 {
        self.seconds
    }

    pub fn as_time_delta(&self) -> TimeDelta {
        TimeDelta::seconds(self.seconds)
    }
}

impl Default for ResamplePeriod {
    fn default() -> Self {
        ResamplePeriod {
            seconds: SECONDS_PER_HOUR,
        }
    }
}

fn unit_seconds(unit: &str) -> Option<i64> {
    match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => Some(1),
        "t" | "min" | "mins" | "minute" | "minutes" => Some(SECONDS_PER_MINUTE),
        "h" | "hr" | "hrs" | "hour" | "hours" => Some(SECONDS_PER_HOUR),
        "d" | "day" | "days" => Some(SECONDS_PER_DAY),
        _ => None,
    }
}

impl FromStr for ResamplePeriod {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rule = s.trim().to_lowercase();
        if rule.is_empty() {
            return Err(PeriodError::Empty);
        }
        let split = rule
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rule.len());
        let (count, unit) = rule.split_at(split);
        let count: i64 = if count.is_empty() {
            1
        } else {
            count
                .parse()
                .map_err(|_| PeriodError::InvalidCount(s.to_string()))?
        };
        let unit = unit.trim();
        let seconds =
            unit_seconds(unit).ok_or_else(|| PeriodError::UnknownUnit(unit.to_string()))?;
        if count == 0 {
            return Err(PeriodError::NonPositive(s.to_string()));
        }
        let seconds = count
            .checked_mul(seconds)
            .ok_or_else(|| PeriodError::InvalidCount(s.to_string()))?;
        Ok(ResamplePeriod { seconds })
    }
}

impl fmt::Display for ResamplePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.seconds;
        if s % SECONDS_PER_DAY == 0 {
            write!(f, "{}D", s / SECONDS_PER_DAY)
        } else if s % SECONDS_PER_HOUR == 0 {
            write!(f, "{}H", s / SECONDS_PER_HOUR)
        } else if s % SECONDS_PER_MINUTE == 0 {
            write!(f, "{}min", s / SECONDS_PER_MINUTE)
        } else {
            write!(f, "{}S", s)
        }
    }
}

impl TryFrom<String> for ResamplePeriod {
    type Error = PeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResamplePeriod> for String {
    fn from(value: ResamplePeriod) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pandas_aliases() {
        assert_eq!("H".parse::<ResamplePeriod>().unwrap().num_seconds(), 3_600);
        assert_eq!("h".parse::<ResamplePeriod>().unwrap().num_seconds(), 3_600);
        assert_eq!("2H".parse::<ResamplePeriod>().unwrap().num_seconds(), 7_200);
        assert_eq!("30min".parse::<ResamplePeriod>().unwrap().num_seconds(), 1_800);
        assert_eq!("15T".parse::<ResamplePeriod>().unwrap().num_seconds(), 900);
        assert_eq!("D".parse::<ResamplePeriod>().unwrap().num_seconds(), 86_400);
    }

    #[test]
    fn test_spelled_out_rules() {
        assert_eq!("1 hour".parse::<ResamplePeriod>().unwrap(), ResamplePeriod::default());
        assert_eq!("30 minutes".parse::<ResamplePeriod>().unwrap().num_seconds(), 1_800);
        assert_eq!("2 days".parse::<ResamplePeriod>().unwrap().num_seconds(), 172_800);
    }

    #[test]
    fn test_invalid_rules() {
        assert_eq!("".parse::<ResamplePeriod>(), Err(PeriodError::Empty));
        assert_eq!("0H".parse::<ResamplePeriod>(), Err(PeriodError::NonPositive("0H".into())));
        assert!(matches!(
            "3 fortnights".parse::<ResamplePeriod>(),
            Err(PeriodError::UnknownUnit(_))
        ));
        assert!(ResamplePeriod::hours(-1).is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for rule in ["1H", "30min", "1D", "45S"] {
            let period: ResamplePeriod = rule.parse().unwrap();
            assert_eq!(period.to_string(), rule);
        }
    }
}

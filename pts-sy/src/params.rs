use crate::error::Result;
use pts_utils::ResamplePeriod;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

/// Default minimum hit-index distance that separates two events.
pub const DEFAULT_GAP: usize = 5;
/// Default number of bins scanned past the end of an event.
pub const DEFAULT_MAX_HOUR: usize = 5;
/// Default precipitation (mm per bin) above which a bin counts as raining.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Inclusive range of lookaheads swept by the accuracy estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookaheadSweep {
    pub first: usize,
    pub last: usize,
}

impl LookaheadSweep {
    pub fn range(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }
}

impl Default for LookaheadSweep {
    fn default() -> Self {
        LookaheadSweep { first: 5, last: 14 }
    }
}

/// Parameters of a [`calculate_sy`](crate::calculate_sy) run.
///
/// Every field is optional in JSON and falls back to its default:
///
/// ```json
/// { "gap": 6, "threshold": 0.5, "resample": "30min" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyParams {
    /// Hit bins whose index distance is at least `gap` belong to different events.
    pub gap: usize,
    /// Bins scanned past the last raining bin when looking for the response.
    pub max_hour: usize,
    /// A bin is raining when its summed precipitation is strictly above this.
    pub threshold: f64,
    pub resample: ResamplePeriod,
    pub accuracy_sweep: LookaheadSweep,
}

impl Default for SyParams {
    fn default() -> Self {
        SyParams {
            gap: DEFAULT_GAP,
            max_hour: DEFAULT_MAX_HOUR,
            threshold: DEFAULT_THRESHOLD,
            resample: ResamplePeriod::default(),
            accuracy_sweep: LookaheadSweep::default(),
        }
    }
}

impl SyParams {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SyParams::default();
        assert_eq!(params.gap, 5);
        assert_eq!(params.max_hour, 5);
        assert_eq!(params.threshold, 0.3);
        assert_eq!(params.resample.num_seconds(), 3_600);
        assert_eq!(params.accuracy_sweep.range(), 5..=14);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let params = SyParams::from_json_str(r#"{"gap": 6, "resample": "30min"}"#).unwrap();
        assert_eq!(params.gap, 6);
        assert_eq!(params.max_hour, DEFAULT_MAX_HOUR);
        assert_eq!(params.resample.num_seconds(), 1_800);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(SyParams::from_json_str(r#"{"resample": "fortnight"}"#).is_err());
        assert!(SyParams::from_json_str("not json").is_err());
    }
}

use crate::{events::Event, resample::ResampledSeries};
use chrono::NaiveDateTime;
use std::ops::Range;

/// An extreme water table depth and the bin where it first occurs.
///
/// `value` is NaN and `date` is `None` when the scanned window held no
/// depth measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub value: f64,
    pub date: Option<NaiveDateTime>,
}

impl Extremum {
    pub const MISSING: Extremum = Extremum {
        value: f64::NAN,
        date: None,
    };
}

/// Water table response to one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Response {
    pub max: Extremum,
    pub min: Extremum,
}

/// Bins scanned for `event` with `lookahead` extra bins: `[start, end + lookahead)`,
/// clamped to the series.
pub fn response_window(len: usize, event: &Event, lookahead: usize) -> Range<usize> {
    let end = event.end.saturating_add(lookahead).min(len);
    event.start.min(end)..end
}

/// First occurrence of the value preferred by `better`, skipping NaN bins.
fn first_extremum(
    resampled: &ResampledSeries,
    window: Range<usize>,
    better: impl Fn(f64, f64) -> bool,
) -> Extremum {
    let mut best: Option<usize> = None;
    for i in window {
        let value = resampled.depth[i];
        if value.is_nan() {
            continue;
        }
        match best {
            Some(b) if !better(value, resampled.depth[b]) => {}
            _ => best = Some(i),
        }
    }
    best.map_or(Extremum::MISSING, |i| Extremum {
        value: resampled.depth[i],
        date: Some(resampled.bins[i]),
    })
}

/// Highest depth value in the window, NaN when the window is empty or all NaN.
pub fn window_max(resampled: &ResampledSeries, window: Range<usize>) -> f64 {
    first_extremum(resampled, window, |a, b| a > b).value
}

/// Scan the depth channel from the first raining bin of `event` through
/// `lookahead` bins past its last raining bin.
pub fn find_response(resampled: &ResampledSeries, event: &Event, lookahead: usize) -> Response {
    let window = response_window(resampled.len(), event, lookahead);
    Response {
        max: first_extremum(resampled, window.clone(), |a, b| a > b),
        min: first_extremum(resampled, window, |a, b| a < b),
    }
}

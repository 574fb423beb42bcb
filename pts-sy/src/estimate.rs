use crate::{
    events::Event,
    params::LookaheadSweep,
    resample::ResampledSeries,
    response::{response_window, window_max, Response},
    table::SyRow,
};
use chrono::NaiveDateTime;
use pts_utils::stats::{first_difference, nan_mean, nan_std};

/// Duration given to an event whose first and last raining bins coincide.
pub const SINGLE_BIN_DURATION_HOURS: f64 = 0.5;

/// Sensitivity of the detected maximum to the lookahead length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accuracy {
    pub mean: f64,
    pub std: f64,
}

/// Event duration in whole hours (truncated).
///
/// Zero seconds between beginning and ending is a single-bin burst and
/// counts as half an hour.
///
/// The whole span is counted, so events lasting 24 h or more keep their
/// full length instead of wrapping to the seconds-of-day remainder.
pub fn duration_hours(date_beginning: NaiveDateTime, date_ending: NaiveDateTime) -> f64 {
    let seconds = (date_ending - date_beginning).num_seconds();
    if seconds == 0 {
        SINGLE_BIN_DURATION_HOURS
    } else {
        (seconds / 3_600) as f64
    }
}

/// Maximum depth of every event for every lookahead of the sweep.
///
/// Rows follow the sweep (one per lookahead), columns follow `events`.
pub fn sweep_maxima(
    resampled: &ResampledSeries,
    events: &[Event],
    sweep: LookaheadSweep,
) -> Vec<Vec<f64>> {
    sweep
        .range()
        .map(|lookahead| {
            events
                .iter()
                .map(|event| {
                    window_max(resampled, response_window(resampled.len(), event, lookahead))
                })
                .collect()
        })
        .collect()
}

/// Mean and sample standard deviation of the successive changes of each
/// event's maximum as the lookahead grows.
pub fn accuracy(resampled: &ResampledSeries, events: &[Event], sweep: LookaheadSweep) -> Vec<Accuracy> {
    let maxima = sweep_maxima(resampled, events, sweep);
    (0..events.len())
        .map(|column| {
            let series: Vec<f64> = maxima.iter().map(|row| row[column]).collect();
            let changes = first_difference(&series);
            Accuracy {
                mean: nan_mean(&changes),
                std: nan_std(&changes),
            }
        })
        .collect()
}

/// Combine an event, its response and its accuracy into one table row.
pub fn estimate(event: &Event, response: &Response, accuracy: Accuracy) -> SyRow {
    let durations = duration_hours(event.date_beginning, event.date_ending);
    let max_wtd = response.max.value;
    let min_wtd = response.min.value;
    let delta_h = max_wtd - min_wtd;
    let sy = (event.precipitation_sum / delta_h) / 1000.0;

    if delta_h == 0.0 {
        log::warn!(
            "Event starting {} has no water table rise, sy is {}",
            event.date_beginning,
            sy
        );
    }

    SyRow {
        date_beginning: event.date_beginning,
        date_ending: event.date_ending,
        precipitation_sum: event.precipitation_sum,
        max_wtd,
        min_wtd,
        durations,
        intensities: event.precipitation_sum / durations,
        delta_h,
        depth: (max_wtd + min_wtd) / 2.0,
        sy,
        idx_max: response.max.date,
        idx_min: response.min.date,
        accuracy_mean: accuracy.mean,
        accuracy_std: accuracy.std,
    }
}

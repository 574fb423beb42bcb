use crate::resample::ResampledSeries;
use chrono::NaiveDateTime;
use serde::Serialize;

/// A precipitation event: a run of raining bins merged across short dry gaps.
///
/// `start` and `end` are inclusive bin indices into the resampled series.
/// `precipitation_sum` only counts the raining bins, not the dry bins the
/// event spans.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub start: usize,
    pub end: usize,
    #[serde(with = "pts_utils::dates::date_time_format")]
    pub date_beginning: NaiveDateTime,
    #[serde(with = "pts_utils::dates::date_time_format")]
    pub date_ending: NaiveDateTime,
    pub precipitation_sum: f64,
    pub hits: Vec<usize>,
}

/// Indices of the bins whose precipitation is strictly above `threshold`.
pub fn hit_indices(precipitation: &[f64], threshold: f64) -> Vec<usize> {
    precipitation
        .iter()
        .enumerate()
        .filter(|(_, &prec)| prec > threshold)
        .map(|(i, _)| i)
        .collect()
}

/// Partition ascending hit indices into runs.
///
/// A new run starts wherever two consecutive hits are `gap` or more bins
/// apart.
pub fn split_runs(hits: &[usize], gap: usize) -> Vec<&[usize]> {
    let mut runs = Vec::new();
    let mut run_start = 0;
    for (k, pair) in hits.windows(2).enumerate() {
        if pair[1] - pair[0] >= gap {
            runs.push(&hits[run_start..=k]);
            run_start = k + 1;
        }
    }
    if run_start < hits.len() {
        runs.push(&hits[run_start..]);
    }
    runs
}

/// Detect the precipitation events of a resampled series.
pub fn find_events(resampled: &ResampledSeries, threshold: f64, gap: usize) -> Vec<Event> {
    let hits = hit_indices(&resampled.precipitation, threshold);
    split_runs(&hits, gap)
        .into_iter()
        .filter_map(|run| {
            let (&start, &end) = (run.first()?, run.last()?);
            Some(Event {
                start,
                end,
                date_beginning: resampled.bins[start],
                date_ending: resampled.bins[end],
                precipitation_sum: run.iter().map(|&i| resampled.precipitation[i]).sum(),
                hits: run.to_vec(),
            })
        })
        .collect()
}

use chrono::{NaiveDateTime, TimeDelta};
use pts_series::TimeSeries;
use pts_utils::{dates::floor_to_step, ResamplePeriod};

/// A time series aggregated onto a regular grid of bins.
///
/// `depth[i]` is the mean water table depth of the samples falling in
/// `[bins[i], bins[i] + period)` (NaN when there are none) and
/// `precipitation[i]` their summed precipitation (0 when there are none).
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledSeries {
    pub period: ResamplePeriod,
    pub bins: Vec<NaiveDateTime>,
    pub depth: Vec<f64>,
    pub precipitation: Vec<f64>,
}

impl ResampledSeries {
    pub fn empty(period: ResamplePeriod) -> Self {
        ResampledSeries {
            period,
            bins: Vec::new(),
            depth: Vec::new(),
            precipitation: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Aggregate `series` onto bins of width `period`.
///
/// The grid starts at the first timestamp floored to the period (anchored
/// at midnight of that day) and ends with the bin holding the last sample.
pub fn resample(series: &TimeSeries, period: ResamplePeriod) -> ResampledSeries {
    let samples = series.samples();
    let (first, last) = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return ResampledSeries::empty(period),
    };

    let step = period.num_seconds();
    let origin = floor_to_step(first.date, period.as_time_delta());
    let bin_of = |date: NaiveDateTime| ((date - origin).num_seconds() / step) as usize;
    let len = bin_of(last.date) + 1;

    let mut depth_sum = vec![0.0; len];
    let mut depth_count = vec![0usize; len];
    let mut precipitation = vec![0.0; len];
    for sample in samples {
        let bin = bin_of(sample.date);
        if !sample.wtd.is_nan() {
            depth_sum[bin] += sample.wtd;
            depth_count[bin] += 1;
        }
        if !sample.prec.is_nan() {
            precipitation[bin] += sample.prec;
        }
    }

    let depth = depth_sum
        .iter()
        .zip(&depth_count)
        .map(|(&sum, &count)| if count == 0 { f64::NAN } else { sum / count as f64 })
        .collect();
    let bins = (0..len)
        .map(|i| origin + TimeDelta::seconds(step * i as i64))
        .collect();

    log::debug!(
        "Resampled {} samples into {} bins of {}",
        samples.len(),
        len,
        period
    );
    ResampledSeries {
        period,
        bins,
        depth,
        precipitation,
    }
}

//! Specific yield (Sy) estimation from water table and precipitation series.
//!
//! The pipeline runs in one pass per call:
//!
//! 1. [`resample`](resample::resample) the raw samples onto a regular grid
//!    (mean depth, summed precipitation);
//! 2. [`find_events`](events::find_events): runs of bins raining above a
//!    threshold, merged across dry gaps shorter than `gap` bins;
//! 3. [`find_response`](response::find_response): highest and lowest water
//!    table in `[start, end + max_hour)` for every event;
//! 4. [`estimate`](estimate::estimate) duration, intensity, rise, depth, Sy
//!    and the accuracy of the detected maximum;
//! 5. collect everything into a [`SyTable`].
//!
//! ```
//! use pts_series::TimeSeries;
//! use pts_sy::{calculate_sy, filter_sy, SyFilter, SyParams};
//!
//! let series = TimeSeries::from_csv_str(
//!     "date,data_wtd,data_prec\n2011-08-03 22:00:00,-0.25,1.2\n2011-08-03 23:00:00,-0.21,0.0\n",
//!     "inline",
//! )?;
//! let sy = calculate_sy(&series, &SyParams::default());
//! let sy = filter_sy(&sy, &SyFilter::new().min("sy", 0.0)?);
//! assert_eq!(sy.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod estimate;
pub mod events;
pub mod filter;
pub mod params;
pub mod resample;
pub mod response;
pub mod table;
pub mod window;

pub use error::{Result, SyError};
pub use events::Event;
pub use filter::{filter_sy, Bound, SyField, SyFilter};
pub use params::{LookaheadSweep, SyParams};
pub use table::{read_sy, write_sy, SyRow, SyTable, SY_TABLE_COLUMNS};
pub use window::event_window;

use log::{debug, info};
use pts_series::TimeSeries;

/// Detect precipitation events in `series` and estimate Sy for each.
///
/// Never fails: a series without rain gives an empty table, and degenerate
/// events (no rise, no depth data) carry NaN or infinite values.
pub fn calculate_sy(series: &TimeSeries, params: &SyParams) -> SyTable {
    let resampled = resample::resample(series, params.resample);
    let events = events::find_events(&resampled, params.threshold, params.gap);
    info!(
        "Found {} precipitation events in {} bins of {}",
        events.len(),
        resampled.len(),
        params.resample
    );

    let accuracies = estimate::accuracy(&resampled, &events, params.accuracy_sweep);
    let rows = events
        .iter()
        .zip(accuracies)
        .map(|(event, accuracy)| {
            let response = response::find_response(&resampled, event, params.max_hour);
            let row = estimate::estimate(event, &response, accuracy);
            debug!(
                "Event {} -> {}: {:.2} mm, delta_h {:.4}, sy {:.4}",
                row.date_beginning, row.date_ending, row.precipitation_sum, row.delta_h, row.sy
            );
            row
        })
        .collect();
    SyTable::new(rows)
}

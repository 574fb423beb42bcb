use crate::table::SyTable;
use chrono::TimeDelta;
use pts_series::TimeSeries;

/// Raw samples around event `event_index` of `table`: from `before` ahead
/// of its first raining bin to `after` past its last one, both inclusive.
///
/// Returns `None` when the table has no such event.
pub fn event_window(
    series: &TimeSeries,
    table: &SyTable,
    event_index: usize,
    before: TimeDelta,
    after: TimeDelta,
) -> Option<TimeSeries> {
    let row = table.get(event_index)?;
    Some(series.between(row.date_beginning - before, row.date_ending + after))
}

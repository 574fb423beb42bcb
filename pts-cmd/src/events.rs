//! Listing of the precipitation events found in a time series.

use log::info;
use pts_series::read_time_series;
use pts_sy::{
    events::{find_events, Event},
    resample::resample,
    SyParams,
};
use std::io::Write;

/// Events of the series at `input`, as detected by `calculate`.
pub fn detect_events(input: &str, params: &SyParams) -> anyhow::Result<Vec<Event>> {
    let series = read_time_series(input)?;
    let resampled = resample(&series, params.resample);
    Ok(find_events(&resampled, params.threshold, params.gap))
}

/// Print one JSON object per event on stdout.
pub fn run_events(input: &str, params: &SyParams) -> anyhow::Result<()> {
    let events = detect_events(input, params)?;
    info!("Found {} precipitation events in {}", events.len(), input);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for event in &events {
        serde_json::to_writer(&mut out, event)?;
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_events() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("series.csv");
        std::fs::write(
            &input,
            "date,data_wtd,data_prec\n\
             2011-08-03 00:00:00,-0.30,0.0\n\
             2011-08-03 01:00:00,-0.29,0.8\n\
             2011-08-03 02:00:00,-0.27,0.4\n\
             2011-08-03 03:00:00,-0.26,0.0\n",
        )
        .unwrap();

        let events = detect_events(input.to_str().unwrap(), &SyParams::default()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!((events[0].start, events[0].end), (1, 2));

        let json = serde_json::to_string(&events[0]).unwrap();
        assert!(json.contains(r#""date_beginning":"2011-08-03 01:00:00""#));
        assert!(json.contains(r#""hits":[1,2]"#));
    }
}

//! Sy table computation from a time series CSV.

use log::info;
use pts_series::read_time_series;
use pts_sy::{calculate_sy, write_sy, SyParams};

/// Read the series at `input`, estimate Sy for every event and write the
/// table to `output`.
pub fn run_calculate(input: &str, output: &str, params: &SyParams) -> anyhow::Result<()> {
    let series = read_time_series(input)?;
    info!(
        "Calculating Sy for {} samples (gap {}, max_hour {}, threshold {}, resample {})",
        series.len(),
        params.gap,
        params.max_hour,
        params.threshold,
        params.resample
    );
    let table = calculate_sy(&series, params);
    write_sy(&table, output)?;
    info!("Calculate complete. Output: {}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pts_sy::{read_sy, SY_TABLE_COLUMNS};

    #[test]
    fn test_calculate_writes_table() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("series.csv");
        let output = dir.path().join("sy.csv");
        std::fs::write(
            &input,
            "date,data_wtd,data_prec\n\
             2011-08-03 22:00:00,-0.25,1.2\n\
             2011-08-03 23:00:00,-0.21,0.0\n\
             2011-08-04 00:00:00,-0.22,0.0\n",
        )
        .unwrap();

        run_calculate(
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            &SyParams::default(),
        )
        .unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().next().unwrap(), SY_TABLE_COLUMNS.join(","));
        assert_eq!(read_sy(&output).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sy.csv");
        let result = run_calculate(
            dir.path().join("absent.csv").to_str().unwrap(),
            output.to_str().unwrap(),
            &SyParams::default(),
        );
        assert!(result.is_err());
        assert!(!output.exists());
    }
}

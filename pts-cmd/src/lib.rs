//! Command implementations for the peatland time series CLI.
//!
//! Provides subcommands to compute a Sy table from a time series, to filter
//! an existing Sy table, and to list the detected precipitation events.

use clap::{Args, Subcommand};
use pts_sy::SyParams;
use pts_utils::ResamplePeriod;

pub mod calculate;
pub mod events;
pub mod filter;

/// Event detection options shared by `calculate` and `events`.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// JSON file with Sy parameters (gap, max_hour, threshold, resample, accuracy_sweep)
    #[arg(short = 'p', long)]
    pub params: Option<String>,

    /// Minimum distance, in bins, between the raining bins of two separate events
    #[arg(long)]
    pub gap: Option<usize>,

    /// Bins scanned past the end of an event for the water table response
    #[arg(long)]
    pub max_hour: Option<usize>,

    /// Precipitation per bin (mm) above which a bin is raining
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Resample rule, e.g. "H", "30min", "1 day"
    #[arg(long)]
    pub resample: Option<ResamplePeriod>,
}

impl ParamArgs {
    /// Parameters from the JSON file (or the defaults), overridden by flags.
    pub fn resolve(&self) -> anyhow::Result<SyParams> {
        let mut params = match &self.params {
            Some(path) => SyParams::from_json_file(path)?,
            None => SyParams::default(),
        };
        if let Some(gap) = self.gap {
            params.gap = gap;
        }
        if let Some(max_hour) = self.max_hour {
            params.max_hour = max_hour;
        }
        if let Some(threshold) = self.threshold {
            params.threshold = threshold;
        }
        if let Some(resample) = self.resample {
            params.resample = resample;
        }
        Ok(params)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the Sy table of a time series CSV
    Calculate {
        /// Time series CSV with date, data_wtd and data_prec columns
        #[arg(short = 'i', long)]
        input: String,

        /// Output path for the Sy table CSV
        #[arg(short = 'o', long)]
        output: String,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// Keep the rows of a Sy table whose fields lie within bounds
    Filter {
        /// Sy table CSV written by `calculate`
        #[arg(short = 'i', long)]
        input: String,

        /// Output path for the filtered Sy table CSV
        #[arg(short = 'o', long)]
        output: String,

        /// Inclusive bound as FIELD=MIN..MAX; either side may be empty (e.g. sy=0..)
        #[arg(short = 'b', long = "bound")]
        bounds: Vec<String>,
    },

    /// Print the detected precipitation events as JSON lines
    Events {
        /// Time series CSV with date, data_wtd and data_prec columns
        #[arg(short = 'i', long)]
        input: String,

        #[command(flatten)]
        params: ParamArgs,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Calculate {
            input,
            output,
            params,
        } => calculate::run_calculate(&input, &output, &params.resolve()?),
        Command::Filter {
            input,
            output,
            bounds,
        } => filter::run_filter(&input, &output, &bounds),
        Command::Events { input, params } => events::run_events(&input, &params.resolve()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_params_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"gap": 8, "threshold": 0.5}"#).unwrap();
        let args = ParamArgs {
            params: Some(file.path().display().to_string()),
            threshold: Some(0.1),
            resample: Some("30min".parse().unwrap()),
            ..ParamArgs::default()
        };
        let params = args.resolve().unwrap();
        assert_eq!(params.gap, 8);
        assert_eq!(params.threshold, 0.1);
        assert_eq!(params.max_hour, 5);
        assert_eq!(params.resample.num_seconds(), 1_800);
    }

    #[test]
    fn test_defaults_without_file() {
        let params = ParamArgs::default().resolve().unwrap();
        assert_eq!(params, SyParams::default());
    }
}

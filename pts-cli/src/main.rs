//! PTS CLI - Command line tool for peatland water table time series.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "pts-cli",
    version,
    about = "Specific yield estimation from peatland water table series"
)]
struct Cli {
    #[command(subcommand)]
    command: pts_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Starting pts-cli");
    pts_cmd::run(cli.command)
}

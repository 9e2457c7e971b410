//! WSIM CLI - Command line tool for generating well meter and well test reports.

use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(
    name = "wsim-cli",
    version,
    about = "Synthetic well consumption and well test report generator"
)]
struct Cli {
    #[command(subcommand)]
    command: wsim_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("wsim-cli {}", env!("CARGO_PKG_VERSION"));
    wsim_cmd::run(cli.command)
}

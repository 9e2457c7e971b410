//! Command implementations for the well simulation CLI.
//!
//! Generating a report and exporting it are separate steps: the generate
//! commands write a JSON bundle holding the parameters and the generated
//! rows, and `export` turns a bundle into CSV without regenerating anything.

use clap::Subcommand;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod bundle;
pub mod consumption;
pub mod export;

#[derive(Subcommand)]
pub enum Command {
    /// Generate a daily consumption report from meter readings
    Consumption(consumption::ConsumptionArgs),

    /// Generate a pumping test and the recovery test that follows it
    WellTest(well_test::WellTestArgs),

    /// Export a generated bundle to CSV
    Export {
        /// Path of the bundle written by `consumption` or `well-test`
        #[arg(short = 'b', long)]
        bundle: String,

        /// Output CSV path; well tests write `<stem>-pumping.csv` and `<stem>-recovery.csv`
        #[arg(short = 'o', long)]
        output: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Consumption(args) => consumption::run_consumption(&args),
        Command::WellTest(args) => well_test::run_well_test(&args),
        Command::Export { bundle, output } => export::run_export(&bundle, &output),
    }
}

/// A seeded generator when a seed is given, otherwise one seeded from the OS.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub(crate) fn parse_date_arg(s: &str) -> Result<chrono::NaiveDate, String> {
    wsim_utils::dates::parse_date(s).map_err(|e| format!("{e}; expected YYYY-MM-DD"))
}

pub(crate) fn parse_time_arg(s: &str) -> Result<chrono::NaiveTime, String> {
    wsim_utils::dates::parse_time(s).map_err(|e| format!("{e}; expected HH:MM"))
}

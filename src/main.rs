mod chart;
mod compare;
mod config;
mod manager;
mod metric;
mod month;
mod province;
mod series;
mod source;
mod stats;
mod text;

use crate::manager::Manager;
use crate::metric::Metric;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare the configured years metric by metric.
    Compare,

    /// Month-by-month values and trends of one metric for one year.
    Detail {
        #[arg(long, value_enum)]
        metric: Metric,

        #[arg(long)]
        year: u16,

        /// Defaults to the configured province.
        #[arg(long)]
        province: Option<String>,
    },

    /// Remove generated reports and charts.
    Clean,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(args.data_dir).context("failed to construct mgr")?;

    match args.command {
        Command::Compare => mgr.run_comparison()?,
        Command::Detail {
            metric,
            year,
            province,
        } => mgr.run_detail(metric, year, province.as_deref())?,
        Command::Clean => mgr.clean_results()?,
    }

    Ok(())
}

//! Percentage statistics
//!
//! Computes, for the temperature, the air humidity and the soil moisture, the
//! range, the standard deviation, the variance and the median relative to the mean,
//! prints them and saves them to a CSV file.

use sensor_monitors::{ReadingsLoader, StatisticsReport, Variable, DATA_FILE, RESULTS_FILE};
use std::{path::PathBuf, process};
use structopt::StructOpt;
use strum::IntoEnumIterator;

#[derive(Debug, StructOpt)]
#[structopt(name = "sensor-stats", about = "Estatísticas percentuais das leituras dos sensores")]
struct Opt {
    /// Path to the sensor CSV file
    #[structopt(long, default_value = DATA_FILE, parse(from_os_str))]
    data: PathBuf,
    /// Path to the results CSV file
    #[structopt(long, default_value = RESULTS_FILE, parse(from_os_str))]
    results: PathBuf,
    /// Also print the mean, standard deviation, min and max of each variable
    #[structopt(short, long)]
    summary: bool,
}

fn run(opt: Opt) -> anyhow::Result<()> {
    let readings = ReadingsLoader::default()
        .data_path(&opt.data)
        .required_columns(Variable::iter().map(|v| v.column()))
        .skip_timestamps()
        .load()?;
    let report = StatisticsReport::compute(&readings.numeric(), Variable::iter())?;

    println!("Estatísticas globais (% em relação à média):");
    println!("{}", report);
    if opt.summary {
        report.print_summary();
    }

    report.to_csv(&opt.results)?;
    log::info!("Estatísticas salvas em {:?}", opt.results);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run(Opt::from_args()) {
        eprintln!("{:#}", e);
        process::exit(1);
    }
}

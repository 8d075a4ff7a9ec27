//! Temperature, air humidity and soil moisture on a single time axis

use sensor_monitors::{charts, ReadingsLoader, DATA_FILE, OUTPUT_DIR};
use std::{path::PathBuf, process};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "sensor-plot", about = "Evolução das variáveis ao longo do tempo")]
struct Opt {
    /// Path to the sensor CSV file
    #[structopt(long, default_value = DATA_FILE, parse(from_os_str))]
    data: PathBuf,
    /// Directory where the figure is written
    #[structopt(short, long, default_value = OUTPUT_DIR, parse(from_os_str))]
    output: PathBuf,
}

fn run(opt: Opt) -> anyhow::Result<PathBuf> {
    let readings = ReadingsLoader::default().data_path(&opt.data).load()?;
    let output = charts::output_dir(&opt.output)?;
    let data = charts::ChartData::new(&readings);
    Ok(charts::overlay::render(
        &data,
        &output.join("evolucao_variaveis.png"),
    )?)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run(Opt::from_args()) {
        Ok(path) => println!("Gráfico salvo em {}", path.display()),
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}

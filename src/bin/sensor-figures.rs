//! Exploratory figures
//!
//! Renders into the output directory:
//!  - temporal_combinado.png: the 3 time series stacked
//!  - temporal_umidadear.png, temporal_temp.png, temporal_usolo.png: each time series
//!  - boxplot_variaveis.png: the distribution of each variable
//!  - matriz_correlacao.png: the correlation matrix
//!  - outliers_umidade.png: the air humidity outliers (IQR rule)
//!  - pca_ambiental.png: the principal component projection

use sensor_monitors::{charts, DATA_FILE, OUTPUT_DIR};
use std::{path::PathBuf, process};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "sensor-figures", about = "Gráficos exploratórios das leituras dos sensores")]
struct Opt {
    /// Path to the sensor CSV file
    #[structopt(long, default_value = DATA_FILE, parse(from_os_str))]
    data: PathBuf,
    /// Directory where the figures are written
    #[structopt(short, long, default_value = OUTPUT_DIR, parse(from_os_str))]
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opt = Opt::from_args();

    let report = match charts::generate(&opt.data, &opt.output) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    println!("Processamento concluído. Verifique a pasta '{}/'", opt.output.display());
    println!("Arquivos gerados:");
    for file in &report.files {
        if let Some(name) = file.file_name() {
            println!("- {}", name.to_string_lossy());
        }
    }
    if !report.failures.is_empty() {
        log::warn!("{} gráfico(s) não gerado(s)", report.failures.len());
    }
}

//! # Sensor monitors
//!
//! Descriptive statistics and exploratory charts of environmental sensor logs.
//!
//! The sensor log is a CSV file with a date column (`Data`), a time column (`Hora`)
//! and the readings of the air temperature (`Temp`), the air humidity (`UmidadeAr`)
//! and the soil moisture (`USolo`), next to any other column.
//!
//! ```no_run
//! use sensor_monitors::{ReadingsLoader, StatisticsReport, Variable};
//! use strum::IntoEnumIterator;
//!
//! let readings = ReadingsLoader::default().data_path("DADOS.CSV").load()?;
//! let report = StatisticsReport::compute(&readings.numeric(), Variable::iter())?;
//! println!("{}", report);
//! # Ok::<(), sensor_monitors::Error>(())
//! ```

pub mod cleaner;
mod error;
pub mod loader;
pub mod outliers;
pub mod pca;
pub mod statistics;
mod variable;

#[cfg(feature = "plot")]
pub mod charts;

pub use error::{Error, Result};
pub use loader::{Readings, ReadingsLoader};
pub use statistics::StatisticsReport;
pub use variable::{UnknownVariable, Variable};

/// Sensor log read when no path is given
pub const DATA_FILE: &str = "DADOS.CSV";
/// Percentage statistics results file
pub const RESULTS_FILE: &str = "estatisticas_percentuais.csv";
/// Directory of the chart images
pub const OUTPUT_DIR: &str = "graficos";

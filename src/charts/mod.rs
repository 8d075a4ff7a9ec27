//! Chart renderers
//!
//! Every renderer writes fixed-named PNG files into the output directory.
//! [render_all] runs them one after the other and a failing renderer does
//! not stop the others.

use crate::{
    cleaner::NumericTable, loader::Readings, pca::PcaError, statistics::StatisticsError,
    ReadingsLoader, Variable,
};
use itertools::{Itertools, MinMaxResult};
use plotters::{drawing::DrawingAreaErrorKind, style::RGBColor};
use std::{
    fs,
    ops::Range,
    path::{Path, PathBuf},
};

pub mod boxplot;
pub mod heatmap;
pub mod outliers;
pub mod overlay;
pub mod pca;
pub mod timeseries;

#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    #[error("falha ao desenhar: {0}")]
    Drawing(String),
    #[error("falha ao criar {0:?}")]
    OutputDir(PathBuf, #[source] std::io::Error),
    #[error("coluna '{0}' ausente")]
    MissingColumn(String),
    #[error("sem dados numéricos em '{0}'")]
    NoData(String),
    #[error(transparent)]
    Statistics(#[from] StatisticsError),
    #[error(transparent)]
    Pca(#[from] PcaError),
}
impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(value: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Drawing(value.to_string())
    }
}
pub type Result<T> = std::result::Result<T, ChartError>;

pub(crate) const FONT: &str = "sans-serif";

/// Time stamped numeric readings shared by the renderers
pub struct ChartData {
    /// Seconds since the Unix epoch
    pub time: Vec<f64>,
    pub table: NumericTable,
}
impl ChartData {
    pub fn new(readings: &Readings) -> Self {
        Self {
            time: readings.seconds(),
            table: readings.numeric(),
        }
    }
    pub fn column(&self, var: Variable) -> Result<&[Option<f64>]> {
        self.table
            .column(var.column())
            .ok_or_else(|| ChartError::MissingColumn(var.column().to_string()))
    }
    /// Non-missing values of a variable
    pub fn values(&self, var: Variable) -> Result<Vec<f64>> {
        Ok(self.column(var)?.iter().filter_map(|x| *x).collect())
    }
    /// (time, value) pairs, missing values skipped
    pub fn points(&self, var: Variable) -> Result<Vec<(f64, f64)>> {
        Ok(self
            .time
            .iter()
            .zip(self.column(var)?)
            .filter_map(|(&t, y)| y.map(|y| (t, y)))
            .collect())
    }
    /// Runs of consecutive (time, value) pairs, split at missing values
    pub fn segments(&self, var: Variable) -> Result<Vec<Vec<(f64, f64)>>> {
        Ok(segments(&self.time, self.column(var)?))
    }
    pub fn time_range(&self) -> Range<f64> {
        padded_range(self.time.iter().cloned())
    }
}

pub(crate) fn segments(x: &[f64], y: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = vec![];
    let mut run = vec![];
    for (&x, y) in x.iter().zip(y) {
        match y {
            Some(y) => run.push((x, *y)),
            None if !run.is_empty() => runs.push(std::mem::take(&mut run)),
            None => (),
        }
    }
    if !run.is_empty() {
        runs.push(run);
    }
    runs
}

/// Data range with a 5% margin on both sides
pub(crate) fn padded_range<I: IntoIterator<Item = f64>>(values: I) -> Range<f64> {
    match values.into_iter().filter(|x| x.is_finite()).minmax() {
        MinMaxResult::NoElements => 0f64..1f64,
        MinMaxResult::OneElement(x) => x - 1f64..x + 1f64,
        MinMaxResult::MinMax(lo, hi) if lo == hi => lo - 1f64..hi + 1f64,
        MinMaxResult::MinMax(lo, hi) => {
            let pad = (hi - lo) * 5e-2;
            lo - pad..hi + pad
        }
    }
}

/// Tick label of a time axis in seconds since the Unix epoch
pub(crate) fn time_label(secs: &f64) -> String {
    chrono::DateTime::from_timestamp(secs.round() as i64, 0)
        .map(|t| t.format("%d/%m %H:%M").to_string())
        .unwrap_or_default()
}

pub(crate) fn rgb(color: colorous::Color) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

type Renderer = fn(&ChartData, &Path) -> Result<Vec<PathBuf>>;

/// Files written and renderers that failed
#[derive(Debug, Default)]
pub struct RenderReport {
    pub files: Vec<PathBuf>,
    pub failures: Vec<(&'static str, ChartError)>,
}

/// Creates the output directory
pub fn output_dir<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|e| ChartError::OutputDir(path.to_path_buf(), e))?;
    Ok(path.to_path_buf())
}

/// Renders every exploratory chart into `output`
pub fn render_all<P: AsRef<Path>>(readings: &Readings, output: P) -> Result<RenderReport> {
    let output = output_dir(output)?;
    let data = ChartData::new(readings);
    let renderers: [(&'static str, Renderer); 5] = [
        ("gráficos temporais", timeseries::render),
        ("boxplot", boxplot::render),
        ("matriz de correlação", heatmap::render),
        ("gráfico de outliers", outliers::render),
        ("PCA", pca::render),
    ];
    let mut report = RenderReport::default();
    for (name, render) in renderers {
        log::info!("Gerando {}...", name);
        match render(&data, &output) {
            Ok(files) => report.files.extend(files),
            Err(e) => {
                eprintln!("Erro ao gerar {}: {}", name, e);
                report.failures.push((name, e));
            }
        }
    }
    Ok(report)
}

/// Loads the readings and renders every chart
///
/// Nothing is written when the readings cannot be loaded.
pub fn generate<P, Q>(data_path: P, output: Q) -> crate::Result<RenderReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let readings = ReadingsLoader::default().data_path(data_path).load()?;
    Ok(render_all(&readings, output)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaps_split_lines() {
        let x = [0., 1., 2., 3., 4., 5.];
        let y = [Some(1.), Some(2.), None, None, Some(5.), Some(6.)];
        assert_eq!(
            segments(&x, &y),
            vec![vec![(0., 1.), (1., 2.)], vec![(4., 5.), (5., 6.)]]
        );
        assert!(segments(&x, &[None; 6]).is_empty());
    }

    #[test]
    fn ranges() {
        assert_eq!(padded_range(vec![0., 10.]), -0.5..10.5);
        assert_eq!(padded_range(vec![3.]), 2.0..4.0);
        assert_eq!(padded_range(vec![3., 3.]), 2.0..4.0);
        assert_eq!(padded_range(vec![]), 0.0..1.0);
        assert_eq!(padded_range(vec![f64::NAN, 0., 10.]), -0.5..10.5);
    }

    #[test]
    fn time_ticks() {
        let t = chrono::NaiveDate::from_ymd_opt(2025, 4, 29)
            .unwrap()
            .and_hms_opt(13, 5, 0)
            .unwrap();
        assert_eq!(time_label(&(t.and_utc().timestamp() as f64)), "29/04 13:05");
    }

    #[test]
    fn tab_rgb() {
        assert_eq!(rgb(Variable::USolo.color()), RGBColor(0x2c, 0xa0, 0x2c));
    }
}

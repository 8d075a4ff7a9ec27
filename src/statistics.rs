//! Descriptive statistics
//!
//! All the functions take the non-missing values of a column.

use crate::{cleaner::NumericTable, Variable};
use serde::Serialize;
use std::{fmt, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum StatisticsError {
    #[error("Erro: Coluna '{0}' não encontrada no arquivo CSV.")]
    MissingColumn(String),
    #[error("Erro ao salvar as estatísticas")]
    Csv(#[from] csv::Error),
}
type Result<T> = std::result::Result<T, StatisticsError>;

/// Copy of the data in increasing order
fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    sorted
}

pub fn mean(data: &[f64]) -> Option<f64> {
    match data.len() {
        0 => None,
        n => Some(data.iter().sum::<f64>() / n as f64),
    }
}
pub fn min(data: &[f64]) -> Option<f64> {
    data.iter().cloned().reduce(f64::min)
}
pub fn max(data: &[f64]) -> Option<f64> {
    data.iter().cloned().reduce(f64::max)
}
/// Sample variance (n-1 degrees of freedom)
pub fn var(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let m = mean(data)?;
    Some(data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (data.len() - 1) as f64)
}
/// Sample standard deviation (n-1 degrees of freedom)
pub fn stddev(data: &[f64]) -> Option<f64> {
    var(data).map(f64::sqrt)
}
pub fn median(data: &[f64]) -> Option<f64> {
    let sorted = sorted(data);
    match sorted.len() {
        0 => None,
        even if even % 2 == 0 => Some((sorted[even / 2 - 1] + sorted[even / 2]) / 2.),
        odd => Some(sorted[odd / 2]),
    }
}
/// Quantile `q` in [0,1], linearly interpolated between the closest ranks
pub fn quantile(data: &[f64], q: f64) -> Option<f64> {
    if data.is_empty() || !(0f64..=1f64).contains(&q) {
        return None;
    }
    let sorted = sorted(data);
    let rank = q * (sorted.len() - 1) as f64;
    let (lo, hi) = (rank.floor() as usize, rank.ceil() as usize);
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64))
}
/// Pearson correlation over the pairs where both values are present
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let (x, y): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y.iter())
        .filter_map(|(x, y)| x.zip(*y))
        .unzip();
    if x.len() < 2 {
        return None;
    }
    let (mx, my) = (mean(&x)?, mean(&y)?);
    let (sxy, sxx, syy) = x.iter().zip(y.iter()).fold((0., 0., 0.), |(sxy, sxx, syy), (x, y)| {
        let (dx, dy) = (x - mx, y - my);
        (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
    });
    if sxx == 0. || syy == 0. {
        None
    } else {
        Some(sxy / (sxx * syy).sqrt())
    }
}
/// Rounds half to even at 2 decimals
pub fn round2(x: f64) -> f64 {
    (x * 100.).round_ties_even() / 100.
}

/// Descriptive statistics of one variable
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub range: Option<f64>,
    pub std: Option<f64>,
    pub var: Option<f64>,
    pub median: Option<f64>,
}
impl Summary {
    pub fn new(data: &[f64]) -> Self {
        let (min, max) = (min(data), max(data));
        Self {
            count: data.len(),
            mean: mean(data),
            min,
            max,
            range: max.zip(min).map(|(max, min)| max - min),
            std: stddev(data),
            var: var(data),
            median: median(data),
        }
    }
    /// Statistics relative to the mean
    ///
    /// A zero or missing mean leaves every percentage missing.
    pub fn percentages(&self) -> PercentageStats {
        let mean = self.mean.filter(|&m| m != 0.);
        let pct = |value: Option<f64>| {
            mean.zip(value)
                .map(|(m, v)| v / m * 100.)
                .filter(|x| !x.is_nan())
                .map(round2)
        };
        PercentageStats {
            range_pct: pct(self.range),
            std_pct: pct(self.std),
            var_pct: pct(self.var),
            median: self.median.map(round2),
            median_pct: pct(self.median),
        }
    }
}

/// Statistics as percentage of the mean
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PercentageStats {
    pub range_pct: Option<f64>,
    pub std_pct: Option<f64>,
    pub var_pct: Option<f64>,
    pub median: Option<f64>,
    pub median_pct: Option<f64>,
}
impl PercentageStats {
    pub const HEADERS: [&'static str; 5] = [
        "Intervalo (%)",
        "Desvio Padrão (%)",
        "Variância (%)",
        "Mediana (valor)",
        "Mediana (%)",
    ];
    fn values(&self) -> [Option<f64>; 5] {
        [
            self.range_pct,
            self.std_pct,
            self.var_pct,
            self.median,
            self.median_pct,
        ]
    }
}

/// Results file record
#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "")]
    variable: &'a str,
    #[serde(rename = "Intervalo (%)")]
    range_pct: Option<f64>,
    #[serde(rename = "Desvio Padrão (%)")]
    std_pct: Option<f64>,
    #[serde(rename = "Variância (%)")]
    var_pct: Option<f64>,
    #[serde(rename = "Mediana (valor)")]
    median: Option<f64>,
    #[serde(rename = "Mediana (%)")]
    median_pct: Option<f64>,
}
impl<'a> Row<'a> {
    fn new(var: &'a Variable, stats: &PercentageStats) -> Self {
        Self {
            variable: var.column(),
            range_pct: stats.range_pct,
            std_pct: stats.std_pct,
            var_pct: stats.var_pct,
            median: stats.median,
            median_pct: stats.median_pct,
        }
    }
}

/// Formats a value the way the console table shows it
fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(x) if x.is_finite() && x.fract() == 0. => format!("{:.1}", x),
        Some(x) => format!("{}", x),
        None => "NaN".to_string(),
    }
}

/// Percentage statistics of a set of variables
#[derive(Debug, Default, Clone)]
pub struct StatisticsReport {
    pub rows: Vec<(Variable, Summary, PercentageStats)>,
}
impl StatisticsReport {
    /// Computes the statistics of each variable from the numeric table
    pub fn compute<I>(table: &NumericTable, variables: I) -> Result<Self>
    where
        I: IntoIterator<Item = Variable>,
    {
        let rows = variables
            .into_iter()
            .map(|var| {
                let values = table
                    .values(var.column())
                    .ok_or_else(|| StatisticsError::MissingColumn(var.column().to_string()))?;
                let summary = Summary::new(&values);
                let pct = summary.percentages();
                Ok((var, summary, pct))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }
    pub fn get(&self, var: Variable) -> Option<&PercentageStats> {
        self.rows
            .iter()
            .find(|(v, ..)| *v == var)
            .map(|(_, _, pct)| pct)
    }
    pub fn summary(&self, var: Variable) -> Option<&Summary> {
        self.rows
            .iter()
            .find(|(v, ..)| *v == var)
            .map(|(_, summary, _)| summary)
    }
    /// Writes the percentage table to a CSV file
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        for (var, _, stats) in &self.rows {
            wtr.serialize(Row::new(var, stats))?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }
    /// Absolute statistics, one variable per line
    pub fn summary_table(&self) -> String {
        let mut table = String::from("SUMMARY:\n");
        table.push_str(&format!(
            "    {:^20}: ({:^12}, {:^12})  ({:^12}, {:^12})\n",
            "VARIABLE", "MEAN", "STD", "MIN", "MAX"
        ));
        for (var, summary, _) in &self.rows {
            table.push_str(&format!(
                "  - {:20}: ({:>12}, {:>12})  ({:>12}, {:>12})\n",
                var.label(),
                fmt_value(summary.mean.map(round2)),
                fmt_value(summary.std.map(round2)),
                fmt_value(summary.min),
                fmt_value(summary.max),
            ));
        }
        table
    }
    pub fn print_summary(&self) {
        print!("{}", self.summary_table());
    }
}
impl fmt::Display for StatisticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|(var, ..)| var.column().len())
            .max()
            .unwrap_or_default();
        write!(f, "{:width$}", "", width = width)?;
        for header in PercentageStats::HEADERS {
            write!(f, "  {}", header)?;
        }
        for (var, _, stats) in &self.rows {
            write!(f, "\n{:width$}", var.column(), width = width)?;
            for (header, value) in PercentageStats::HEADERS.iter().zip(stats.values()) {
                write!(
                    f,
                    "  {:>w$}",
                    fmt_value(value),
                    w = header.chars().count()
                )?;
            }
        }
        Ok(())
    }
}

/// Pairwise Pearson correlations
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub variables: Vec<Variable>,
    pub values: Vec<Vec<Option<f64>>>,
}
impl CorrelationMatrix {
    pub fn compute(table: &NumericTable, variables: &[Variable]) -> Result<Self> {
        let columns = variables
            .iter()
            .map(|var| {
                table
                    .column(var.column())
                    .ok_or_else(|| StatisticsError::MissingColumn(var.column().to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        let values = columns
            .iter()
            .enumerate()
            .map(|(i, x)| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(j, y)| {
                        if i == j {
                            pearson(x, y).map(|_| 1.)
                        } else {
                            pearson(x, y)
                        }
                    })
                    .collect()
            })
            .collect();
        Ok(Self {
            variables: variables.to_vec(),
            values,
        })
    }
    pub fn get(&self, a: Variable, b: Variable) -> Option<f64> {
        let i = self.variables.iter().position(|v| *v == a)?;
        let j = self.variables.iter().position(|v| *v == b)?;
        self.values[i][j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strum::IntoEnumIterator;

    fn table(rows: &[[&str; 3]]) -> NumericTable {
        let columns: Vec<Vec<String>> = (0..3)
            .map(|j| rows.iter().map(|r| r[j].to_string()).collect())
            .collect();
        NumericTable::from_columns(
            Variable::iter()
                .zip(columns.iter())
                .map(|(v, c)| (v.column(), c.as_slice())),
        )
    }

    #[test]
    fn median_even_and_odd() {
        assert_eq!(median(&[3., 1., 2.]), Some(2.));
        assert_eq!(median(&[4., 1., 3., 2.]), Some(2.5));
        assert_eq!(median(&[5., 5., 5., 1.]), Some(5.));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn median_of_long_stuck_and_sorted_columns() {
        assert_eq!(median(&vec![100.; 100_000]), Some(100.));
        let ramp: Vec<f64> = (0..100_000).map(|i| i as f64).collect();
        assert_eq!(median(&ramp), Some(49_999.5));
        let descending: Vec<f64> = ramp.iter().rev().cloned().collect();
        assert_eq!(median(&descending), Some(49_999.5));
        assert_eq!(quantile(&ramp, 0.25), Some(24_999.75));
    }

    #[test]
    fn quantiles() {
        let data = [1., 2., 3., 4.];
        assert_relative_eq!(quantile(&data, 0.25).unwrap(), 1.75);
        assert_relative_eq!(quantile(&data, 0.75).unwrap(), 3.25);
        assert_relative_eq!(quantile(&data, 0.5).unwrap(), median(&data).unwrap());
        assert_eq!(quantile(&[7.], 0.25), Some(7.));
        assert_eq!(quantile(&data, 1.5), None);
    }

    #[test]
    fn sample_dispersion() {
        let data = [20., 30.];
        assert_relative_eq!(var(&data).unwrap(), 50.);
        assert_relative_eq!(stddev(&data).unwrap(), 50f64.sqrt());
        assert_eq!(stddev(&[1.]), None);
    }

    #[test]
    fn two_readings_scenario() {
        let t = table(&[["20", "50", "30"], ["30", "70", "50"]]);
        let report = StatisticsReport::compute(&t, Variable::iter()).unwrap();
        let summary = report.summary(Variable::Temp).unwrap();
        assert_eq!(summary.mean, Some(25.));
        assert_eq!(summary.min, Some(20.));
        assert_eq!(summary.max, Some(30.));
        assert_eq!(summary.range, Some(10.));
        assert_eq!(summary.median, Some(25.));
        let pct = report.get(Variable::Temp).unwrap();
        assert_eq!(pct.range_pct, Some(40.));
        assert_eq!(pct.median, Some(25.));
        assert_eq!(pct.median_pct, Some(100.));
        assert_eq!(pct.std_pct, Some(28.28));
        assert_eq!(pct.var_pct, Some(200.));
    }

    #[test]
    fn percentages_match_rounded_ratios() {
        let t = table(&[
            ["21.3", "48", "31"],
            ["22.9", "55.5", "x"],
            ["19.4", "61", "29.5"],
            ["25.1", "NAO", "40"],
        ]);
        let report = StatisticsReport::compute(&t, Variable::iter()).unwrap();
        for (_, s, pct) in &report.rows {
            let m = s.mean.unwrap();
            assert_eq!(pct.median_pct, Some(round2(s.median.unwrap() / m * 100.)));
            assert_eq!(pct.range_pct, Some(round2(s.range.unwrap() / m * 100.)));
            assert_eq!(pct.std_pct, Some(round2(s.std.unwrap() / m * 100.)));
            assert_eq!(pct.var_pct, Some(round2(s.var.unwrap() / m * 100.)));
        }
    }

    #[test]
    fn zero_mean_is_missing() {
        let t = table(&[["-5", "1", "SIM"], ["5", "2", "NAO"]]);
        let report = StatisticsReport::compute(&t, Variable::iter()).unwrap();
        let temp = report.get(Variable::Temp).unwrap();
        assert_eq!(temp.range_pct, None);
        assert_eq!(temp.std_pct, None);
        assert_eq!(temp.var_pct, None);
        assert_eq!(temp.median_pct, None);
        assert_eq!(temp.median, Some(0.));
        let soil = report.get(Variable::USolo).unwrap();
        assert_eq!(soil, &PercentageStats::default());
    }

    #[test]
    fn missing_column() {
        let t = NumericTable::default();
        let err = StatisticsReport::compute(&t, [Variable::USolo]).unwrap_err();
        assert!(matches!(err, StatisticsError::MissingColumn(c) if c == "USolo"));
    }

    #[test]
    fn results_csv() {
        let t = table(&[["20", "50", "30"], ["30", "70", "50"]]);
        let report = StatisticsReport::compute(&t, Variable::iter()).unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        report.to_csv(file.path()).unwrap();
        let contents = std::fs::read_to_string(file.path()).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            ",Intervalo (%),Desvio Padrão (%),Variância (%),Mediana (valor),Mediana (%)"
        );
        assert_eq!(lines.next().unwrap(), "Temp,40.0,28.28,200.0,25.0,100.0");
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn console_table() {
        let t = table(&[["20", "50", "x"], ["30", "70", "y"]]);
        let report = StatisticsReport::compute(&t, Variable::iter()).unwrap();
        let text = report.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].trim_start().starts_with("Intervalo (%)"));
        assert!(lines[1].starts_with("Temp"));
        assert!(lines[1].trim_end().ends_with("100.0"));
        assert!(lines[3].contains("NaN"));
    }

    #[test]
    fn summary_columns_are_aligned() {
        let t = table(&[["20", "50", "30"], ["30", "70", "50"]]);
        let report = StatisticsReport::compute(&t, Variable::iter()).unwrap();
        let text = report.summary_table();
        let lines: Vec<_> = text.lines().skip(1).collect();
        assert_eq!(lines.len(), 4);
        let colon = |line: &str| line.chars().position(|c| c == ':');
        for line in &lines[1..] {
            assert_eq!(colon(line), colon(lines[0]), "{}", line);
            assert_eq!(line.chars().count(), lines[1].chars().count(), "{}", line);
        }
        assert!(lines[3].starts_with("  - Umidade do Solo (%) "));
    }

    #[test]
    fn correlation() {
        let t = table(&[["1", "2", "3"], ["2", "4", "2"], ["3", "6", "1"]]);
        let corr = CorrelationMatrix::compute(&t, &Variable::FIGURE_ORDER).unwrap();
        assert_relative_eq!(corr.get(Variable::Temp, Variable::UmidadeAr).unwrap(), 1.);
        assert_relative_eq!(corr.get(Variable::Temp, Variable::USolo).unwrap(), -1.);
        assert_eq!(corr.get(Variable::USolo, Variable::USolo), Some(1.));
        assert_eq!(
            corr.get(Variable::UmidadeAr, Variable::USolo),
            corr.get(Variable::USolo, Variable::UmidadeAr)
        );
    }

    #[test]
    fn correlation_skips_incomplete_pairs() {
        let x = [Some(1.), Some(2.), None, Some(3.)];
        let y = [Some(2.), Some(4.), Some(100.), Some(6.)];
        assert_relative_eq!(pearson(&x, &y).unwrap(), 1.);
        assert_eq!(pearson(&[Some(1.), Some(1.)], &[Some(1.), Some(2.)]), None);
    }
}

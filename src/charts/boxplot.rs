use super::{padded_range, rgb, ChartData, ChartError, Result, FONT};
use crate::{outliers::IqrBounds, Variable};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const HALF_WIDTH: f64 = 0.3;
const CAP: f64 = 0.15;

/// Name of the variable whose box is centered on `x`, empty between boxes
fn category(x: &f64) -> String {
    if (x.fract() - 0.5).abs() > 1e-6 {
        return String::new();
    }
    Variable::FIGURE_ORDER
        .get(x.floor() as usize)
        .map(|v| v.column().to_string())
        .unwrap_or_default()
}

/// Writes `boxplot_variaveis.png`, one box per variable
pub fn render(data: &ChartData, output: &Path) -> Result<Vec<PathBuf>> {
    // long form: (variable, value)
    let mut long: Vec<(Variable, f64)> = vec![];
    for var in Variable::FIGURE_ORDER {
        long.extend(data.values(var)?.into_iter().map(|v| (var, v)));
    }
    if long.is_empty() {
        return Err(ChartError::NoData("boxplot".to_string()));
    }

    let path = output.join("boxplot_variaveis.png");
    {
        let root = BitMapBackend::new(&path, (1000, 600)).into_drawing_area();
        root.fill(&WHITE)?;
        let n = Variable::FIGURE_ORDER.len();
        let centers: Vec<f64> = (0..n).map(|i| i as f64 + 0.5).collect();
        let mut chart = ChartBuilder::on(&root)
            .caption("Distribuição das Variáveis Ambientais", (FONT, 24))
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .margin(10)
            .build_cartesian_2d(
                0f64..n as f64,
                padded_range(long.iter().map(|(_, v)| *v)),
            )?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(2 * n + 1)
            .x_label_formatter(&category)
            .x_desc("Variável")
            .y_desc("Valor")
            .draw()?;

        for (&var, &x) in Variable::FIGURE_ORDER.iter().zip(centers.iter()) {
            let values: Vec<f64> = long
                .iter()
                .filter(|(v, _)| *v == var)
                .map(|(_, x)| *x)
                .collect();
            let Some(bounds) = IqrBounds::from_values(&values) else {
                continue;
            };
            let Some((lo, hi)) = bounds.whiskers(&values) else {
                continue;
            };
            let color = rgb(var.color());
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - HALF_WIDTH, bounds.q1), (x + HALF_WIDTH, bounds.q3)],
                color.mix(0.6).filled(),
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - HALF_WIDTH, bounds.q1), (x + HALF_WIDTH, bounds.q3)],
                BLACK.stroke_width(1),
            )))?;
            chart.draw_series(
                [
                    vec![(x - HALF_WIDTH, bounds.median), (x + HALF_WIDTH, bounds.median)],
                    vec![(x, bounds.q3), (x, hi)],
                    vec![(x, bounds.q1), (x, lo)],
                    vec![(x - CAP, hi), (x + CAP, hi)],
                    vec![(x - CAP, lo), (x + CAP, lo)],
                ]
                .into_iter()
                .map(|line| PathElement::new(line, BLACK.stroke_width(2))),
            )?;
            chart.draw_series(
                values
                    .iter()
                    .filter(|&&v| bounds.is_outlier(v))
                    .map(|&v| Circle::new((x, v), 4, BLACK.stroke_width(1))),
            )?;
        }
        root.present()?;
    }
    Ok(vec![path])
}

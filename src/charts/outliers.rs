use super::{padded_range, time_label, ChartData, ChartError, Result, FONT};
use crate::{
    outliers::{Classification, IqrBounds},
    Variable,
};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Variable screened for outliers
pub const OUTLIER_VARIABLE: Variable = Variable::UmidadeAr;

/// Writes `outliers_umidade.png`, the readings colored by IQR classification
pub fn render(data: &ChartData, output: &Path) -> Result<Vec<PathBuf>> {
    let var = OUTLIER_VARIABLE;
    let points = data.points(var)?;
    let values: Vec<f64> = points.iter().map(|(_, y)| *y).collect();
    let bounds = IqrBounds::from_values(&values)
        .ok_or_else(|| ChartError::NoData(var.column().to_string()))?;
    log::info!(
        "{}: Q1={:.2} Q3={:.2} limites=[{:.2}, {:.2}], {} outliers",
        var,
        bounds.q1,
        bounds.q3,
        bounds.lower,
        bounds.upper,
        bounds.count_outliers(&values)
    );

    let path = output.join("outliers_umidade.png");
    {
        let root = BitMapBackend::new(&path, (1200, 600)).into_drawing_area();
        root.fill(&WHITE)?;
        let x_range = data.time_range();
        let mut chart = ChartBuilder::on(&root)
            .caption(format!("Identificação de Outliers - {}", var.name()), (FONT, 24))
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 60)
            .margin(10)
            .build_cartesian_2d(
                x_range.clone(),
                padded_range(values.iter().cloned().chain([bounds.lower, bounds.upper])),
            )?;
        chart
            .configure_mesh()
            .x_label_formatter(&time_label)
            .x_desc("Data_Hora")
            .y_desc(var.column())
            .draw()?;

        for (class, color) in [
            (Classification::Normal, BLUE),
            (Classification::Outlier, RED),
        ] {
            chart
                .draw_series(
                    points
                        .iter()
                        .filter(|(_, y)| bounds.classify(*y) == class)
                        .map(|&(x, y)| Circle::new((x, y), 5, color.filled())),
                )?
                .label(class.to_string())
                .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
        }
        for limit in [bounds.upper, bounds.lower] {
            chart.draw_series(DashedLineSeries::new(
                vec![(x_range.start, limit), (x_range.end, limit)],
                10,
                6,
                RED.stroke_width(2),
            ))?;
        }
        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
        root.present()?;
    }
    Ok(vec![path])
}

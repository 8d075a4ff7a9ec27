//! All the variables on a single time axis

use super::{padded_range, time_label, ChartData, Result, FONT};
use crate::Variable;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const MARKER_SIZE: i32 = 4;

/// Line color of the overlay figure
fn line_color(var: Variable) -> RGBColor {
    match var {
        Variable::Temp => RED,
        Variable::UmidadeAr => BLUE,
        Variable::USolo => RGBColor(0, 128, 0),
    }
}

/// Writes the overlay figure to `path`
pub fn render(data: &ChartData, path: &Path) -> Result<PathBuf> {
    let variables = [Variable::Temp, Variable::UmidadeAr, Variable::USolo];
    let mut series = vec![];
    for var in variables {
        series.push((var, data.segments(var)?));
    }
    {
        let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption("Evolução das Variáveis ao Longo do Tempo", (FONT, 24))
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 60)
            .margin(10)
            .build_cartesian_2d(
                data.time_range(),
                padded_range(
                    series
                        .iter()
                        .flat_map(|(_, segments)| segments.iter().flatten().map(|(_, y)| *y)),
                ),
            )?;
        chart
            .configure_mesh()
            .x_label_formatter(&time_label)
            .x_desc("Data e Hora")
            .y_desc("Valor")
            .draw()?;

        for (var, segments) in &series {
            let color = line_color(*var);
            for segment in segments {
                chart.draw_series(LineSeries::new(segment.iter().cloned(), color.stroke_width(2)))?;
            }
            let points = segments.iter().flatten().cloned();
            let style = color.filled();
            let anno = match var {
                Variable::Temp => {
                    chart.draw_series(points.map(|p| Circle::new(p, MARKER_SIZE, style)))?
                }
                Variable::UmidadeAr => chart.draw_series(points.map(|p| {
                    EmptyElement::at(p)
                        + Rectangle::new(
                            [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)],
                            style,
                        )
                }))?,
                Variable::USolo => chart.draw_series(
                    points.map(|p| TriangleMarker::new(p, MARKER_SIZE + 1, style)),
                )?,
            };
            anno.label(var.label()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        }
        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
        root.present()?;
    }
    Ok(path.to_path_buf())
}

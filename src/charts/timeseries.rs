//! Time series of each variable, individually and stacked in one figure

use super::{padded_range, rgb, time_label, ChartData, Result, FONT};
use crate::Variable;
use plotters::{coord::Shift, prelude::*};
use std::path::{Path, PathBuf};

/// Draws the time series of one variable into a drawing area
fn draw<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    data: &ChartData,
    var: Variable,
    x_desc: bool,
) -> Result<()> {
    let segments = data.segments(var)?;
    let mut chart = ChartBuilder::on(area)
        .caption(format!("Variação Temporal da {}", var.name()), (FONT, 24))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .margin(10)
        .build_cartesian_2d(
            data.time_range(),
            padded_range(segments.iter().flatten().map(|(_, y)| *y)),
        )?;
    let mut mesh = chart.configure_mesh();
    mesh.x_label_formatter(&time_label).y_desc(var.label());
    if x_desc {
        mesh.x_desc("Horário");
    }
    mesh.draw()?;

    let color = rgb(var.color());
    for segment in segments {
        chart.draw_series(LineSeries::new(segment, color.stroke_width(2)))?;
    }
    Ok(())
}

/// Writes `temporal_<variable>.png` for each variable and `temporal_combinado.png`
pub fn render(data: &ChartData, output: &Path) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    for var in Variable::FIGURE_ORDER {
        let path = output.join(format!("temporal_{}.png", var.column().to_lowercase()));
        {
            let root = BitMapBackend::new(&path, (1200, 400)).into_drawing_area();
            root.fill(&WHITE)?;
            draw(&root, data, var, true)?;
            root.present()?;
        }
        files.push(path);
    }

    let path = output.join("temporal_combinado.png");
    {
        let root = BitMapBackend::new(&path, (1200, 1500)).into_drawing_area();
        root.fill(&WHITE)?;
        let areas = root.split_evenly((Variable::FIGURE_ORDER.len(), 1));
        let last = areas.len() - 1;
        for (k, (area, var)) in areas.iter().zip(Variable::FIGURE_ORDER).enumerate() {
            draw(area, data, var, k == last)?;
        }
        root.present()?;
    }
    files.push(path);
    Ok(files)
}

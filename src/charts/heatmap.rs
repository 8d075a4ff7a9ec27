use super::{ChartData, Result, FONT};
use crate::{statistics::CorrelationMatrix, Variable};
use plotters::{
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use std::path::{Path, PathBuf};

/// Diverging color of a correlation coefficient, blue for -1 and red for +1
pub(crate) fn coolwarm(r: f64) -> RGBColor {
    let c = colorous::RED_BLUE.eval_continuous((1. - r.clamp(-1., 1.)) / 2.);
    RGBColor(c.r, c.g, c.b)
}

/// Writes `matriz_correlacao.png`, the annotated correlation heatmap
pub fn render(data: &ChartData, output: &Path) -> Result<Vec<PathBuf>> {
    let variables = Variable::FIGURE_ORDER;
    let corr = CorrelationMatrix::compute(&data.table, &variables)?;
    let n = variables.len();
    let centered = |x: &f64| (x.fract() - 0.5).abs() < 1e-6;
    let x_label = |x: &f64| {
        if !centered(x) {
            return String::new();
        }
        variables
            .get(x.floor() as usize)
            .map(|v| v.column().to_string())
            .unwrap_or_default()
    };
    // first row on top
    let y_label = |y: &f64| {
        if !centered(y) {
            return String::new();
        }
        (n - 1)
            .checked_sub(y.floor() as usize)
            .and_then(|i| variables.get(i))
            .map(|v| v.column().to_string())
            .unwrap_or_default()
    };

    let path = output.join("matriz_correlacao.png");
    {
        let root = BitMapBackend::new(&path, (800, 600)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption("Matriz de Correlação", (FONT, 24))
            .set_label_area_size(LabelAreaPosition::Left, 100)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .margin(20)
            .build_cartesian_2d(
                0f64..n as f64,
                0f64..n as f64,
            )?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(2 * n + 1)
            .y_labels(2 * n + 1)
            .x_label_formatter(&x_label)
            .y_label_formatter(&y_label)
            .draw()?;

        let style = TextStyle::from((FONT, 28).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
        for (i, row) in corr.values.iter().enumerate() {
            let y = (n - 1 - i) as f64;
            for (j, r) in row.iter().enumerate() {
                let x = j as f64;
                let fill = r.map_or(RGBColor(220, 220, 220), coolwarm);
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(x, y), (x + 1., y + 1.)],
                    fill.filled(),
                )))?;
                let text = r.map_or("NaN".to_string(), |r| format!("{:.2}", r));
                chart.draw_series(std::iter::once(Text::new(
                    text,
                    (x + 0.5, y + 0.5),
                    style.clone(),
                )))?;
            }
        }
        root.present()?;
    }
    Ok(vec![path])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diverging_palette() {
        let red = coolwarm(1.);
        let blue = coolwarm(-1.);
        assert!(red.0 > red.2);
        assert!(blue.2 > blue.0);
        assert_eq!(coolwarm(2.), red);
    }
}

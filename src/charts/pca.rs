use super::{padded_range, rgb, ChartData, Result, FONT};
use crate::{
    pca::{complete_rows, Pca},
    Variable,
};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const HEAD_WIDTH: f64 = 0.05;
const HEAD_LENGTH: f64 = 1.5 * HEAD_WIDTH;
/// Label position along a loading vector
const LABEL_SCALE: f64 = 1.2;

/// Arrow head triangle at the tip of the vector from the origin to `tip`
fn arrow_head(tip: (f64, f64)) -> Vec<(f64, f64)> {
    let norm = tip.0.hypot(tip.1);
    if norm == 0. {
        return vec![tip; 3];
    }
    let (ux, uy) = (tip.0 / norm, tip.1 / norm);
    let base = (tip.0 - HEAD_LENGTH * ux, tip.1 - HEAD_LENGTH * uy);
    let half = HEAD_WIDTH / 2.;
    vec![
        tip,
        (base.0 - half * uy, base.1 + half * ux),
        (base.0 + half * uy, base.1 - half * ux),
    ]
}

/// Writes `pca_ambiental.png`, the standardized 2-component projection with loading vectors
pub fn render(data: &ChartData, output: &Path) -> Result<Vec<PathBuf>> {
    let variables = Variable::FIGURE_ORDER;
    let columns = variables
        .iter()
        .map(|&var| data.column(var))
        .collect::<Result<Vec<_>>>()?;
    let rows = complete_rows(&columns);
    let dropped = data.table.len() - rows.len();
    if dropped > 0 {
        log::warn!("PCA: {} linhas com valores ausentes descartadas", dropped);
    }
    let (pca, scores) = Pca::fit_transform(&rows, 2)?;
    let ratio = &pca.explained_variance_ratio;
    log::info!(
        "PCA: variância explicada PC1={:.1}% PC2={:.1}%",
        ratio[0] * 1e2,
        ratio[1] * 1e2
    );
    let loadings: Vec<(Variable, (f64, f64))> = variables
        .iter()
        .enumerate()
        .map(|(j, &var)| {
            let l = pca.loadings(j);
            (var, (l[0], l[1]))
        })
        .collect();

    let path = output.join("pca_ambiental.png");
    {
        let root = BitMapBackend::new(&path, (1000, 600)).into_drawing_area();
        root.fill(&WHITE)?;
        let label_points = || loadings.iter().map(|(_, (x, y))| (x * LABEL_SCALE, y * LABEL_SCALE));
        let x_range = padded_range(
            scores
                .iter()
                .map(|s| s[0])
                .chain(label_points().map(|p| p.0)),
        );
        let y_range = padded_range(
            scores
                .iter()
                .map(|s| s[1])
                .chain(label_points().map(|p| p.1)),
        );
        let mut chart = ChartBuilder::on(&root)
            .caption("Análise de Componentes Principais (PCA)", (FONT, 24))
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .margin(10)
            .build_cartesian_2d(x_range, y_range)?;
        chart
            .configure_mesh()
            .x_desc(format!("PC1 (Variancia: {:.1}%)", ratio[0] * 1e2))
            .y_desc(format!("PC2 (Variancia: {:.1}%)", ratio[1] * 1e2))
            .draw()?;

        let color = rgb(colorous::CATEGORY10[0]);
        chart.draw_series(
            scores
                .iter()
                .map(|s| Circle::new((s[0], s[1]), 4, color.mix(0.5).filled())),
        )?;
        for (var, tip) in &loadings {
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(0., 0.), *tip],
                RED.stroke_width(2),
            )))?;
            chart.draw_series(std::iter::once(Polygon::new(arrow_head(*tip), RED.filled())))?;
            chart.draw_series(std::iter::once(Text::new(
                var.short_label(),
                (tip.0 * LABEL_SCALE, tip.1 * LABEL_SCALE),
                (FONT, 18).into_font().color(&RED),
            )))?;
        }
        root.present()?;
    }
    Ok(vec![path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn head_points_back_to_origin() {
        let head = arrow_head((0.6, 0.8));
        assert_eq!(head[0], (0.6, 0.8));
        let mid = ((head[1].0 + head[2].0) / 2., (head[1].1 + head[2].1) / 2.);
        assert_relative_eq!(mid.0, 0.6 - HEAD_LENGTH * 0.6, epsilon = 1e-12);
        assert_relative_eq!(mid.1, 0.8 - HEAD_LENGTH * 0.8, epsilon = 1e-12);
        let width = (head[1].0 - head[2].0).hypot(head[1].1 - head[2].1);
        assert_relative_eq!(width, HEAD_WIDTH, epsilon = 1e-12);
        assert_eq!(arrow_head((0., 0.)), vec![(0., 0.); 3]);
    }
}

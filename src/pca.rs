//! Principal component analysis of standardized variables

use nalgebra as na;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PcaError {
    #[error("são necessárias ao menos 2 observações completas, {0} encontradas")]
    NotEnoughSamples(usize),
    #[error("{components} componentes pedidas para {features} variáveis")]
    TooManyComponents { components: usize, features: usize },
    #[error("linha {row} com {len} valores, {expected} esperados")]
    Ragged { row: usize, len: usize, expected: usize },
    #[error("valor não finito na linha {row}, coluna {column}")]
    NonFinite { row: usize, column: usize },
}
type Result<T> = std::result::Result<T, PcaError>;

/// Rows where every column has a value
pub fn complete_rows(columns: &[&[Option<f64>]]) -> Vec<Vec<f64>> {
    let n = columns.iter().map(|c| c.len()).min().unwrap_or_default();
    (0..n)
        .filter_map(|i| columns.iter().map(|c| c[i]).collect::<Option<Vec<f64>>>())
        .collect()
}

fn to_matrix(rows: &[Vec<f64>]) -> Result<na::DMatrix<f64>> {
    let p = rows.first().map_or(0, |r| r.len());
    if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != p) {
        return Err(PcaError::Ragged {
            row,
            len: r.len(),
            expected: p,
        });
    }
    for (row, r) in rows.iter().enumerate() {
        if let Some(column) = r.iter().position(|x| !x.is_finite()) {
            return Err(PcaError::NonFinite { row, column });
        }
    }
    Ok(na::DMatrix::from_fn(rows.len(), p, |i, j| rows[i][j]))
}

/// Column means and population standard deviations
///
/// A constant column gets a unit scale so it is only centered.
fn moments(x: &na::DMatrix<f64>) -> (Vec<f64>, Vec<f64>) {
    let n = x.nrows() as f64;
    x.column_iter()
        .map(|c| {
            let m = c.sum() / n;
            let s = (c.iter().map(|v| (v - m).powi(2)).sum::<f64>() / n).sqrt();
            (m, if s > 0. { s } else { 1. })
        })
        .unzip()
}

fn scale(x: &na::DMatrix<f64>, mean: &[f64], std: &[f64]) -> na::DMatrix<f64> {
    na::DMatrix::from_fn(x.nrows(), x.ncols(), |i, j| (x[(i, j)] - mean[j]) / std[j])
}

/// Standardizes each column to zero mean and unit variance
pub fn standardize(rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let x = to_matrix(rows)?;
    let (mean, std) = moments(&x);
    let z = scale(&x, &mean, &std);
    Ok(z.row_iter().map(|r| r.iter().cloned().collect()).collect())
}

/// Principal components of standardized data
#[derive(Debug, Clone)]
pub struct Pca {
    mean: Vec<f64>,
    std: Vec<f64>,
    /// Component loadings, one row per component
    pub components: na::DMatrix<f64>,
    pub explained_variance: Vec<f64>,
    pub explained_variance_ratio: Vec<f64>,
}
impl Pca {
    pub fn fit(rows: &[Vec<f64>], n_components: usize) -> Result<Self> {
        if rows.len() < 2 {
            return Err(PcaError::NotEnoughSamples(rows.len()));
        }
        let x = to_matrix(rows)?;
        let p = x.ncols();
        if n_components > p {
            return Err(PcaError::TooManyComponents {
                components: n_components,
                features: p,
            });
        }
        let (mean, std) = moments(&x);
        let z = scale(&x, &mean, &std);
        let cov = z.transpose() * &z / (x.nrows() - 1) as f64;
        let eigen = na::SymmetricEigen::new(cov);

        let mut order: Vec<usize> = (0..p).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));
        let total: f64 = eigen.eigenvalues.iter().map(|l| l.max(0.)).sum();

        let mut components = na::DMatrix::zeros(n_components, p);
        for (k, &idx) in order.iter().take(n_components).enumerate() {
            let v = eigen.eigenvectors.column(idx);
            // largest loading positive
            let pivot = v.iter().cloned().fold(0f64, |a, x| if x.abs() > a.abs() { x } else { a });
            let sign = if pivot < 0. { -1. } else { 1. };
            for j in 0..p {
                components[(k, j)] = sign * v[j];
            }
        }
        let explained_variance: Vec<f64> = order
            .iter()
            .take(n_components)
            .map(|&idx| eigen.eigenvalues[idx].max(0.))
            .collect();
        let explained_variance_ratio = explained_variance
            .iter()
            .map(|l| if total > 0. { l / total } else { 0. })
            .collect();
        Ok(Self {
            mean,
            std,
            components,
            explained_variance,
            explained_variance_ratio,
        })
    }
    /// Loadings of the feature `j` on every component
    pub fn loadings(&self, j: usize) -> Vec<f64> {
        self.components.column(j).iter().cloned().collect()
    }
    /// Projects the rows onto the principal components
    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        let x = to_matrix(rows)?;
        if x.ncols() != self.mean.len() {
            return Err(PcaError::Ragged {
                row: 0,
                len: x.ncols(),
                expected: self.mean.len(),
            });
        }
        let scores = scale(&x, &self.mean, &self.std) * self.components.transpose();
        Ok(scores.row_iter().map(|r| r.iter().cloned().collect()).collect())
    }
    pub fn fit_transform(rows: &[Vec<f64>], n_components: usize) -> Result<(Self, Vec<Vec<f64>>)> {
        let pca = Self::fit(rows, n_components)?;
        let scores = pca.transform(rows)?;
        Ok((pca, scores))
    }
}

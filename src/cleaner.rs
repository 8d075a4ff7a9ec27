//! Numeric coercion
//!
//! Every cell that does not parse as a number becomes a missing value,
//! whatever the semantic type of its column.

use std::collections::BTreeMap;

/// Conversion of a table cell into a number, `None` for a missing value
pub trait ToNumeric {
    fn to_numeric(&self) -> Option<f64>;
}
impl ToNumeric for str {
    fn to_numeric(&self) -> Option<f64> {
        self.trim().parse::<f64>().ok().and_then(|x| x.to_numeric())
    }
}
impl ToNumeric for String {
    fn to_numeric(&self) -> Option<f64> {
        self.as_str().to_numeric()
    }
}
impl ToNumeric for &str {
    fn to_numeric(&self) -> Option<f64> {
        (*self).to_numeric()
    }
}
impl ToNumeric for f64 {
    fn to_numeric(&self) -> Option<f64> {
        if self.is_nan() {
            None
        } else {
            Some(*self)
        }
    }
}
impl ToNumeric for Option<f64> {
    fn to_numeric(&self) -> Option<f64> {
        self.and_then(|x| x.to_numeric())
    }
}

/// Coerces a column to numbers
pub fn coerce<T: ToNumeric>(cells: &[T]) -> Vec<Option<f64>> {
    cells.iter().map(|cell| cell.to_numeric()).collect()
}

/// Numeric view of a table
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NumericTable {
    headers: Vec<String>,
    columns: BTreeMap<String, Vec<Option<f64>>>,
}
impl NumericTable {
    /// Coerces each `(header, cells)` column
    pub fn from_columns<'a, I, T>(columns: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [T])>,
        T: ToNumeric + 'a,
    {
        let mut this = Self::default();
        for (header, cells) in columns {
            this.headers.push(header.to_string());
            this.columns.insert(header.to_string(), coerce(cells));
        }
        this
    }
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
    /// Number of rows
    pub fn len(&self) -> usize {
        self.columns.values().next().map_or(0, |c| c.len())
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Column with its missing values
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(|c| c.as_slice())
    }
    /// Non-missing values of a column
    pub fn values(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)
            .map(|c| c.iter().filter_map(|x| *x).collect())
    }
    /// Number of missing values in a column
    pub fn count_missing(&self, name: &str) -> Option<usize> {
        self.column(name)
            .map(|c| c.iter().filter(|x| x.is_none()).count())
    }
    /// Logs the number of missing values per column
    pub fn log_missing(&self) {
        for header in &self.headers {
            if let Some(n) = self.count_missing(header) {
                if n > 0 {
                    log::debug!("{:>16}: {}/{} valores ausentes", header, n, self.len());
                }
            }
        }
    }
}

use crate::{cleaner::NumericTable, Variable};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
    time::Instant,
};

#[derive(thiserror::Error, Debug)]
pub enum LoaderError {
    #[error("Erro ao carregar dados: não foi possível abrir {0:?}")]
    Open(PathBuf, #[source] std::io::Error),
    #[error("Erro ao carregar dados: CSV inválido")]
    Csv(#[from] csv::Error),
    #[error("Erro: Coluna '{0}' não encontrada no arquivo CSV.")]
    MissingColumn(String),
    #[error("Erro ao carregar dados: data/hora inválida na linha {row}: {value:?}")]
    Timestamp { row: usize, value: String },
}
type Result<T> = std::result::Result<T, LoaderError>;

const DATE_FORMATS: [&str; 4] = ["%m/%d/%Y", "%d/%m/%Y", "%Y-%m-%d", "%Y/%m/%d"];
const TIME_FORMATS: [&str; 3] = ["%H:%M:%S", "%H:%M", "%H:%M:%S%.f"];

/// Parses the date and time cells into a timestamp
///
/// Dates are read month first, falling back to day first when that fails.
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date.trim(), fmt).ok())?;
    let time = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time.trim(), fmt).ok())?;
    Some(date.and_time(time))
}

/// Renames repeated headers `name`, `name.1`, `name.2`, ...
fn dedup_headers<'a, I: IntoIterator<Item = &'a str>>(headers: I) -> Vec<String> {
    let mut unique: Vec<String> = vec![];
    for header in headers {
        let mut name = header.to_string();
        let mut k = 0;
        while unique.contains(&name) {
            k += 1;
            name = format!("{}.{}", header, k);
        }
        if k > 0 {
            log::warn!("coluna '{}' repetida, renomeada para '{}'", header, name);
        }
        unique.push(name);
    }
    unique
}

/// Sensor readings loader
pub struct ReadingsLoader {
    path: PathBuf,
    date_column: String,
    time_column: String,
    required_columns: Vec<String>,
    with_timestamps: bool,
}
impl Default for ReadingsLoader {
    fn default() -> Self {
        Self {
            path: PathBuf::from(crate::DATA_FILE),
            date_column: String::from("Data"),
            time_column: String::from("Hora"),
            required_columns: Variable::FIGURE_ORDER
                .iter()
                .map(|v| v.column().to_string())
                .collect(),
            with_timestamps: true,
        }
    }
}
impl ReadingsLoader {
    pub fn data_path<P: AsRef<Path>>(self, path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..self
        }
    }
    pub fn date_column<S: Into<String>>(self, date_column: S) -> Self {
        Self {
            date_column: date_column.into(),
            ..self
        }
    }
    pub fn time_column<S: Into<String>>(self, time_column: S) -> Self {
        Self {
            time_column: time_column.into(),
            ..self
        }
    }
    pub fn required_columns<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_columns: columns.into_iter().map(|c| c.into()).collect(),
            ..self
        }
    }
    /// Skips the date and time columns, the readings have no timestamps
    pub fn skip_timestamps(self) -> Self {
        Self {
            with_timestamps: false,
            ..self
        }
    }
    /// Loads the CSV file
    pub fn load(self) -> Result<Readings> {
        let file = File::open(&self.path).map_err(|e| LoaderError::Open(self.path.clone(), e))?;
        log::info!("Carregando {:?}...", self.path);
        let now = Instant::now();
        let readings = self.from_reader(BufReader::new(file))?;
        log::info!(
            "... {} leituras carregadas em {}ms",
            readings.len(),
            now.elapsed().as_millis()
        );
        Ok(readings)
    }
    /// Reads the readings from any CSV source
    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Readings> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = dedup_headers(rdr.headers()?.iter());

        for column in &self.required_columns {
            if !headers.contains(column) {
                return Err(LoaderError::MissingColumn(column.clone()));
            }
        }
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LoaderError::MissingColumn(name.to_string()))
        };
        let timestamp_idx = if self.with_timestamps {
            Some((position(&self.date_column)?, position(&self.time_column)?))
        } else {
            None
        };

        let mut readings = Readings {
            columns: headers.iter().map(|h| (h.clone(), Vec::new())).collect(),
            headers,
            ..Default::default()
        };
        for (row, result) in rdr.records().enumerate() {
            let record = result?;
            if let Some((date_idx, time_idx)) = timestamp_idx {
                let date = record.get(date_idx).unwrap_or_default();
                let time = record.get(time_idx).unwrap_or_default();
                let timestamp =
                    parse_timestamp(date, time).ok_or_else(|| LoaderError::Timestamp {
                        row: row + 1,
                        value: format!("{} {}", date, time),
                    })?;
                readings.timestamps.push(timestamp);
            }
            readings.rows += 1;
            if record.len() != readings.headers.len() {
                log::warn!(
                    "linha {}: {} valores, {} esperados",
                    row + 1,
                    record.len(),
                    readings.headers.len()
                );
            }
            for (k, header) in readings.headers.iter().enumerate() {
                if let Some(column) = readings.columns.get_mut(header) {
                    column.push(record.get(k).unwrap_or_default().to_string());
                }
            }
        }
        Ok(readings)
    }
}

/// Timestamped sensor readings, raw text cells per header column
#[derive(Debug, Default, Clone)]
pub struct Readings {
    /// Empty when the loader skips the timestamps
    pub timestamps: Vec<NaiveDateTime>,
    rows: usize,
    headers: Vec<String>,
    columns: BTreeMap<String, Vec<String>>,
}
impl Readings {
    pub fn len(&self) -> usize {
        self.rows
    }
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns.get(name).map(|c| c.as_slice())
    }
    /// Numeric view of all the columns
    pub fn numeric(&self) -> NumericTable {
        let table = NumericTable::from_columns(self.headers.iter().filter_map(|h| {
            self.columns
                .get(h)
                .map(|c| (h.as_str(), c.as_slice()))
        }));
        table.log_missing();
        table
    }
    /// Timestamps as seconds since the Unix epoch
    pub fn seconds(&self) -> Vec<f64> {
        self.timestamps
            .iter()
            .map(|t| t.and_utc().timestamp() as f64)
            .collect()
    }
}

//! Where trip tables come from.
//!
//! The loader never touches paths directly: it asks a [`TripSource`] for a
//! city's [`SourceTable`] and reads cells by column name.

use csv::{ReaderBuilder, StringRecord};
use flate2::read::GzDecoder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::city::City;
use crate::error::{BikeshareError, Result};

/// Cell values that mean "no value", matched exactly. Same set as the
/// defaults of common dataframe CSV readers.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Provides the raw trip table for a city.
pub trait TripSource {
    fn read_table(&self, city: City) -> Result<SourceTable>;
}

/// One data row and the line it started on.
#[derive(Debug, Clone)]
pub struct SourceRow {
    pub line: u64,
    pub record: StringRecord,
}

/// Raw, untyped rows with column lookup by header name.
#[derive(Debug, Clone)]
pub struct SourceTable {
    location: String,
    headers: Vec<String>,
    rows: Vec<SourceRow>,
}

impl SourceTable {
    /// Parses a CSV stream with a header row. Rows may be shorter than the
    /// header; missing trailing cells read as empty.
    pub fn from_reader<R: Read>(location: impl Into<String>, reader: R) -> Result<Self> {
        let location = location.into();
        let unavailable = |e: csv::Error| BikeshareError::SourceUnavailable {
            location: location.clone(),
            reason: e.to_string(),
        };

        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers: Vec<String> = rdr
            .headers()
            .map_err(unavailable)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(unavailable)?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            rows.push(SourceRow { line, record });
        }

        debug!(location = %location, rows = rows.len(), "Source table read");
        Ok(SourceTable {
            location,
            headers,
            rows,
        })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[SourceRow] {
        &self.rows
    }

    /// Index of the column with this header, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Trimmed cell text, `None` for empty cells, cells past the end of the
    /// row, and the usual missing-value markers (`NaN`, `NA`, `null`, ...).
    pub fn cell<'a>(row: &'a SourceRow, column: usize) -> Option<&'a str> {
        row.record
            .get(column)
            .map(str::trim)
            .filter(|s| !s.is_empty() && !MISSING_MARKERS.contains(s))
    }
}

/// Reads one CSV file per city from a data directory.
///
/// A city resolves to its explicit override if one is set, otherwise to
/// `<data_dir>/<City::file_name>`, falling back to the same name with a
/// `.gz` suffix. Gzip files are decompressed on the fly.
#[derive(Debug, Clone)]
pub struct CsvDirSource {
    data_dir: PathBuf,
    overrides: HashMap<City, PathBuf>,
}

impl CsvDirSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            overrides: HashMap::new(),
        }
    }

    pub fn with_file(mut self, city: City, path: impl Into<PathBuf>) -> Self {
        self.overrides.insert(city, path.into());
        self
    }

    /// The file that will be read for `city`.
    pub fn path_for(&self, city: City) -> PathBuf {
        if let Some(path) = self.overrides.get(&city) {
            return path.clone();
        }
        let plain = self.data_dir.join(city.file_name());
        if plain.exists() {
            return plain;
        }
        let gz = self.data_dir.join(format!("{}.gz", city.file_name()));
        if gz.exists() { gz } else { plain }
    }
}

impl TripSource for CsvDirSource {
    fn read_table(&self, city: City) -> Result<SourceTable> {
        let path = self.path_for(city);
        let location = path.display().to_string();
        let file = File::open(&path).map_err(|e| BikeshareError::SourceUnavailable {
            location: location.clone(),
            reason: e.to_string(),
        })?;

        if is_gzip(&path) {
            SourceTable::from_reader(location, GzDecoder::new(file))
        } else {
            SourceTable::from_reader(location, file)
        }
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("gz")
}

/// CSV text held in memory, keyed by city.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: HashMap<City, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_csv(mut self, city: City, csv: impl Into<String>) -> Self {
        self.tables.insert(city, csv.into());
        self
    }
}

impl TripSource for MemorySource {
    fn read_table(&self, city: City) -> Result<SourceTable> {
        let location = format!("memory:{}", city.key());
        let csv = self
            .tables
            .get(&city)
            .ok_or_else(|| BikeshareError::SourceUnavailable {
                location: location.clone(),
                reason: "no table registered".to_string(),
            })?;
        SourceTable::from_reader(location, csv.as_bytes())
    }
}

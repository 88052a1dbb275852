//! Where each city's trip file lives.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::city::City;
use crate::source::CsvDirSource;

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Deserialize)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    #[serde(default)]
    files: HashMap<String, PathBuf>,
}

/// Data directory plus optional per-city file overrides.
///
/// Stored as JSON on disk:
/// ```json
/// {
///   "data_dir": "/srv/bikeshare",
///   "files": { "new york": "/srv/bikeshare/nyc-2017.csv.gz" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    pub data_dir: PathBuf,
    pub files: HashMap<City, PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            files: HashMap::new(),
        }
    }
}

impl SourceConfig {
    /// Loads the config from a JSON file at `path`. Relative paths inside
    /// the file are kept as written.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(content)?;
        let mut config = SourceConfig::default();
        if let Some(dir) = file.data_dir {
            config.data_dir = dir;
        }
        for (key, path) in file.files {
            let city: City = key.parse()?;
            config.files.insert(city, path);
        }
        Ok(config)
    }

    /// Applies `BIKESHARE_DATA_DIR` and `BIKESHARE_<CITY>_FILE` from
    /// `vars`. Empty values are ignored.
    pub fn apply_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref());
            if value.is_empty() {
                continue;
            }
            if key == "BIKESHARE_DATA_DIR" {
                self.data_dir = PathBuf::from(value);
                continue;
            }
            if let Some(city) = City::ALL
                .into_iter()
                .find(|c| key == format!("BIKESHARE_{}_FILE", c.env_name()))
            {
                self.files.insert(city, PathBuf::from(value));
            }
        }
        self
    }

    /// Applies the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_vars(std::env::vars())
    }

    pub fn with_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.data_dir = dir;
        }
        self
    }

    pub fn source(&self) -> CsvDirSource {
        self.files
            .iter()
            .fold(CsvDirSource::new(&self.data_dir), |source, (city, path)| {
                source.with_file(*city, path)
            })
    }
}

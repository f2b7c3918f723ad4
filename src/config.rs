//! Configuration file support
//!
//! Settings are read from TOML:
//!
//! ```toml
//! [parser]
//! odds_columns = 15
//! min_odds = 3
//! persist_min_odds = 3
//! extra_denylist = ["BETBOO"]
//!
//! [sink]
//! store_path = "/var/lib/oddsboard/store.json"
//! has_header = true
//! write_header = true
//! skip_persisted = false
//! ```
//!
//! Precedence: command line, then config file, then built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::classify::ClassifierOptions;
use crate::dedup::{ColumnLayout, DedupOptions};
use crate::pipeline::{PipelineOptions, DEFAULT_PERSIST_MIN_ODDS};
use crate::record::{AssemblerOptions, DEFAULT_MIN_ODDS, DEFAULT_ODDS_COLUMNS};

/// Directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "oddsboard";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Store file name used when none is configured
pub const DEFAULT_STORE_FILE: &str = "store.json";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// `[parser]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub odds_columns: usize,
    pub min_odds: usize,
    pub persist_min_odds: usize,
    pub extra_denylist: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            odds_columns: DEFAULT_ODDS_COLUMNS,
            min_odds: DEFAULT_MIN_ODDS,
            persist_min_odds: DEFAULT_PERSIST_MIN_ODDS,
            extra_denylist: Vec::new(),
        }
    }
}

/// `[sink]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    pub store_path: Option<PathBuf>,
    pub has_header: bool,
    pub write_header: bool,
    pub skip_persisted: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            has_header: true,
            write_header: true,
            skip_persisted: false,
        }
    }
}

/// Full configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,
    pub sink: SinkConfig,
}

/// Values given on the command line; `None` leaves the file value alone
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub store_path: Option<PathBuf>,
    pub odds_columns: Option<usize>,
    pub persist_min_odds: Option<usize>,
    pub skip_persisted: Option<bool>,
    pub write_header: Option<bool>,
    pub has_header: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Config {
    /// Default location: `<config_dir>/oddsboard/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from the default location; a missing file gives defaults
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply command-line overrides
    #[must_use]
    pub fn merge_with_cli(mut self, overrides: &CliOverrides) -> Self {
        if let Some(path) = &overrides.store_path {
            self.sink.store_path = Some(path.clone());
        }
        if let Some(columns) = overrides.odds_columns {
            self.parser.odds_columns = columns;
        }
        if let Some(min) = overrides.persist_min_odds {
            self.parser.persist_min_odds = min;
        }
        if let Some(skip) = overrides.skip_persisted {
            self.sink.skip_persisted = skip;
        }
        if let Some(write) = overrides.write_header {
            self.sink.write_header = write;
        }
        if let Some(has_header) = overrides.has_header {
            self.sink.has_header = has_header;
        }
        self
    }

    /// Store path, falling back to `<data_dir>/oddsboard/store.json`
    pub fn store_path(&self) -> PathBuf {
        match &self.sink.store_path {
            Some(path) => path.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(CONFIG_DIR_NAME)
                .join(DEFAULT_STORE_FILE),
        }
    }

    /// Assembler options from `[parser]`
    pub fn assembler_options(&self) -> AssemblerOptions {
        let mut classifier = ClassifierOptions::builder();
        for term in &self.parser.extra_denylist {
            classifier = classifier.deny(term);
        }
        AssemblerOptions::builder()
            .odds_columns(self.parser.odds_columns)
            .min_odds(self.parser.min_odds)
            .classifier(classifier.build())
            .build()
    }

    /// Pipeline options
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            assembler: self.assembler_options(),
            persist_min_odds: self.parser.persist_min_odds,
            write_header: self.sink.write_header,
            has_header: self.sink.has_header,
            skip_persisted: self.sink.skip_persisted,
            layout: ColumnLayout::record_rows(),
        }
    }

    /// At-rest dedup options for a given layout
    pub fn dedup_options(&self, layout: ColumnLayout) -> DedupOptions {
        DedupOptions {
            layout,
            has_header: self.sink.has_header,
        }
    }
}

use std::env;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ADDR_RAILGUN_RELAY: &str = "0xfa7093cdd9ee6932b4eb2c9e1cde7ce00b1fa4b9";
pub const ADDR_WETH_HELPER: &str = "0x4025ee6512dbbda97049bcf5aa5d38c54af6be8a";

pub const NAME_RAILGUN_RELAY: &str = "Railgun:Relay";
pub const NAME_WETH_HELPER: &str = "WETH Helper";

const DEFAULT_DATA_DIR: &str = "data";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported mode {0:?} (expected \"test\" or \"v2\")")]
    UnsupportedMode(String),
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
}

/// Dataset selector. Each mode maps to one fixed input file in the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Test,
    V2,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Test => "test",
            Mode::V2 => "v2",
        }
    }

    fn input_file_name(self) -> &'static str {
        match self {
            Mode::Test => "_raw_test.ndjson",
            Mode::V2 => "_raw_v2.ndjson",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(Mode::Test),
            "v2" => Ok(Mode::V2),
            other => Err(ConfigError::UnsupportedMode(other.to_string())),
        }
    }
}

/// A destination address that gets its own bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownAddress {
    pub address: String,
    pub name: String,
}

impl KnownAddress {
    pub fn new(address: &str, name: &str) -> Self {
        Self {
            address: address.to_lowercase(),
            name: name.to_string(),
        }
    }
}

/// The fixed table of known destinations consulted by the classifier and
/// echoed into the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBook {
    pub relay: KnownAddress,
    pub weth_helper: KnownAddress,
}

impl Default for AddressBook {
    fn default() -> Self {
        Self {
            relay: KnownAddress::new(ADDR_RAILGUN_RELAY, NAME_RAILGUN_RELAY),
            weth_helper: KnownAddress::new(ADDR_WETH_HELPER, NAME_WETH_HELPER),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub address_book: AddressBook,
}

impl Config {
    pub fn from_env() -> Self {
        let data_dir = env::var("RAILGUN_DATA_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        Self::with_data_dir(data_dir)
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            address_book: AddressBook::default(),
        }
    }

    /// Anchors a relative data directory at the current working directory,
    /// so the report carries an absolute input path.
    pub fn into_absolute(self) -> io::Result<Self> {
        let data_dir = std::path::absolute(&self.data_dir)?;
        Ok(Self { data_dir, ..self })
    }

    pub fn input_path(&self, mode: Mode) -> PathBuf {
        self.data_dir.join(mode.input_file_name())
    }

    pub fn output_path(&self, mode: Mode) -> PathBuf {
        self.data_dir.join(format!("external_{}.json", mode))
    }
}

/// Fails with [`ConfigError::InputNotFound`] unless `path` exists.
pub fn ensure_input_exists(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ConfigError::InputNotFound(path.to_path_buf()))
    }
}

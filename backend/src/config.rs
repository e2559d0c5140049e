//! # Configuration
//!
//! Runtime settings come from `DAIRY_*` environment variables; milk prices can
//! additionally be loaded from a YAML file.
//!
//! | Variable | Default |
//! |---|---|
//! | `DAIRY_BIND_ADDR` | `127.0.0.1:3000` |
//! | `DAIRY_STORAGE` | `sqlite` (`memory`, `csv`, `sqlite`) |
//! | `DAIRY_DATA_DIR` | `./data` |
//! | `DAIRY_DATABASE_URL` | `<data dir>/milk_ledger.db` |
//! | `DAIRY_CORS_ORIGINS` | `*` |
//! | `DAIRY_PRICING_FILE` | built-in prices |

use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::models::milk_entry::EntryType;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DATA_DIR: &str = "./data";
const SQLITE_FILE_NAME: &str = "milk_ledger.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("failed to read pricing file {path}: {source}")]
    PricingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse pricing file {path}: {source}")]
    PricingFormat {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    Memory,
    Csv { data_dir: PathBuf },
    Sqlite { database_url: Option<String>, data_dir: PathBuf },
}

/// Which origins may call the API from a browser.
///
/// Any origin is allowed unless `DAIRY_CORS_ORIGINS` holds a comma separated
/// list.
#[derive(Debug, Clone, PartialEq)]
pub enum CorsConfig {
    AnyOrigin,
    Origins(Vec<String>),
}

/// Per-kg prices of fat and SNF used to suggest a rate per litre
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PricingConfig {
    #[serde(with = "rust_decimal::serde::float")]
    pub purchase_fat_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub purchase_snf_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sale_fat_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sale_snf_rate: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            purchase_fat_rate: Decimal::from(620),
            purchase_snf_rate: Decimal::from(310),
            sale_fat_rate: Decimal::from(750),
            sale_snf_rate: Decimal::from(380),
        }
    }
}

impl PricingConfig {
    /// `(fat price, snf price)` per kg for the given direction
    pub fn prices_for(&self, entry_type: EntryType) -> (Decimal, Decimal) {
        match entry_type {
            EntryType::Purchase => (self.purchase_fat_rate, self.purchase_snf_rate),
            EntryType::Sale => (self.sale_fat_rate, self.sale_snf_rate),
        }
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::PricingFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::PricingFormat {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|value| value.trim().to_string()).filter(|v| !v.is_empty());

        let bind_value = get("DAIRY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "DAIRY_BIND_ADDR",
                value: bind_value.clone(),
                reason: e.to_string(),
            })?;

        let data_dir = PathBuf::from(get("DAIRY_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()));
        let storage_kind = get("DAIRY_STORAGE").unwrap_or_else(|| "sqlite".to_string());
        let storage = match storage_kind.to_ascii_lowercase().as_str() {
            "memory" => StorageConfig::Memory,
            "csv" => StorageConfig::Csv { data_dir },
            "sqlite" => StorageConfig::Sqlite {
                database_url: get("DAIRY_DATABASE_URL"),
                data_dir,
            },
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: "DAIRY_STORAGE",
                    value: storage_kind,
                    reason: "expected memory, csv or sqlite".to_string(),
                })
            }
        };

        let cors = match get("DAIRY_CORS_ORIGINS") {
            None => CorsConfig::AnyOrigin,
            Some(value) if value == "*" => CorsConfig::AnyOrigin,
            Some(value) => CorsConfig::Origins(
                value
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect(),
            ),
        };

        let pricing = match get("DAIRY_PRICING_FILE") {
            Some(path) => PricingConfig::from_yaml_file(Path::new(&path))?,
            None => PricingConfig::default(),
        };

        Ok(Self {
            bind_addr,
            storage,
            cors,
            pricing,
        })
    }
}

impl StorageConfig {
    pub fn sqlite_file(data_dir: &Path) -> PathBuf {
        data_dir.join(SQLITE_FILE_NAME)
    }
}

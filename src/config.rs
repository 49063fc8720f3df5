//! Server configuration.
//!
//! Configuration is read from a JSON file. Every field has a default, so an
//! empty object is a valid configuration.
//!
//! ```
//! use slashgate::config::ServerConfig;
//!
//! let config = ServerConfig::from_json_str(r#"{ "pagination": { "default_count": 25 } }"#)
//!     .expect("valid configuration");
//! assert_eq!(config.pagination.effective_default_count(), 25);
//! assert_eq!(config.listen_addr, "127.0.0.1:3000");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

const FALLBACK_DEFAULT_COUNT: usize = 50;
const FALLBACK_UPPER_COUNT_LIMIT: usize = 100;

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address, e.g. `127.0.0.1:3000`.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// List pagination limits.
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Static room table used by the built-in access gate, keyed by room id.
    #[serde(default)]
    pub rooms: BTreeMap<String, RoomConfig>,
}

impl ServerConfig {
    /// Reads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            source: Arc::new(err),
        })?;
        Self::from_json_str(&raw)
    }

    /// Parses configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not a valid
    /// configuration object.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|err| ConfigError::Parse(Arc::new(err)))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            pagination: PaginationConfig::default(),
            rooms: BTreeMap::new(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_owned()
}

/// Pagination limits for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when the caller does not request one.
    pub default_count: usize,
    /// Largest page size a caller may request.
    pub upper_count_limit: usize,
    /// Whether `count=0` returns every record.
    pub allow_infinite_count: bool,
}

impl PaginationConfig {
    /// Returns the default page size, falling back to 50 when unset.
    #[must_use]
    pub const fn effective_default_count(&self) -> usize {
        if self.default_count == 0 {
            FALLBACK_DEFAULT_COUNT
        } else {
            self.default_count
        }
    }

    /// Returns the page size ceiling, falling back to 100 when unset.
    #[must_use]
    pub const fn effective_upper_count_limit(&self) -> usize {
        if self.upper_count_limit == 0 {
            FALLBACK_UPPER_COUNT_LIMIT
        } else {
            self.upper_count_limit
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_count: FALLBACK_DEFAULT_COUNT,
            upper_count_limit: FALLBACK_UPPER_COUNT_LIMIT,
            allow_infinite_count: true,
        }
    }
}

/// Access policy for one room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Any authenticated user may access a public room.
    pub public: bool,
    /// User ids allowed into a private room.
    pub members: Vec<String>,
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The configuration text is not valid.
    #[error("failed to parse config: {0}")]
    Parse(#[source] Arc<serde_json::Error>),
}

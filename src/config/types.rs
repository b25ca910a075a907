// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Port the demo server listens on
pub const DEFAULT_PORT: u16 = 8765;
/// Bind on all interfaces
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Page advertised in the startup banner
pub const DEFAULT_DEMO_PATH: &str = "/tool/wasm_demo.html";
/// Served root, relative to the working directory
pub const DEFAULT_ROOT: &str = ".";
pub const DEFAULT_SERVER_NAME: &str = concat!("WasmDemoServer/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub mime: MimeConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub demo_path: String,
    pub root: String,
    pub workers: Option<usize>,
    /// Serve each connection on its own task instead of one at a time
    pub concurrent: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            demo_path: DEFAULT_DEMO_PATH.to_string(),
            root: DEFAULT_ROOT.to_string(),
            workers: None,
            concurrent: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stderr if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "common".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
            access_log_format: default_access_log_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PerformanceConfig {
    /// Upper bound for a whole connection in seconds; unset means no limit
    #[serde(default)]
    pub connection_timeout: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    /// Content type for unknown extensions
    pub default_content_type: String,
    #[serde(default = "default_index_files")]
    pub index_files: Vec<String>,
    pub directory_listing: bool,
}

#[allow(clippy::missing_const_for_fn)]
fn default_index_files() -> Vec<String> {
    vec!["index.html".to_string(), "index.htm".to_string()]
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
            default_content_type: DEFAULT_CONTENT_TYPE.to_string(),
            index_files: default_index_files(),
            directory_listing: true,
        }
    }
}

/// Extra extension to content-type mappings
///
/// Applied on top of the standard table. The `.wasm` mapping is applied
/// after these and cannot be replaced.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct MimeConfig {
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

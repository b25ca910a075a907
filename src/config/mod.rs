// Configuration module entry point
// Loads layered configuration and builds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, MimeConfig, PerformanceConfig, ServerConfig,
    DEFAULT_CONTENT_TYPE, DEFAULT_DEMO_PATH, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_ROOT,
    DEFAULT_SERVER_NAME,
};

/// Names a config file (any format `config` understands). Unset means no file is read.
pub const CONFIG_PATH_ENV: &str = "WASM_DEMO_CONFIG";
/// Environment prefix, e.g. `WASM_DEMO__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "WASM_DEMO";

impl Config {
    /// Load configuration from the file named by `WASM_DEMO_CONFIG`, if any
    ///
    /// The served directory is never searched for a config file.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(std::env::var(CONFIG_PATH_ENV).ok().as_deref())
    }

    /// Load configuration from an explicit file path, which must exist
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with(Some(config_path))
    }

    /// Layer defaults, the optional file, then environment overrides
    ///
    /// Without a file the built-in defaults reproduce the fixed port, bind
    /// address and demo page.
    pub fn load_with(config_path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.demo_path", DEFAULT_DEMO_PATH)?
            .set_default("server.root", DEFAULT_ROOT)?
            .set_default("server.concurrent", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("http.server_name", DEFAULT_SERVER_NAME)?
            .set_default("http.default_content_type", DEFAULT_CONTENT_TYPE)?
            .set_default("http.directory_listing", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|_| ServerError::InvalidAddress(addr))
    }

    /// The single line written to stdout once the listener is bound
    pub fn serving_banner(&self) -> String {
        format!(
            "Serving at: http://localhost:{}{}",
            self.server.port, self.server.demo_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_banner() {
        let cfg = Config::default();
        assert_eq!(
            cfg.serving_banner(),
            "Serving at: http://localhost:8765/tool/wasm_demo.html"
        );
    }

    #[test]
    fn test_default_socket_addr() {
        let cfg = Config::default();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 8765);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn test_invalid_host() {
        let mut cfg = Config::default();
        cfg.server.host = "not a host".to_string();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(ServerError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let cfg = Config::load_with(None).unwrap();
        assert_eq!(cfg.server.port, DEFAULT_PORT);
        assert_eq!(cfg.server.host, DEFAULT_HOST);
        assert_eq!(cfg.server.demo_path, DEFAULT_DEMO_PATH);
        assert!(!cfg.server.concurrent);
        assert_eq!(cfg.http.index_files, vec!["index.html", "index.htm"]);
        assert_eq!(cfg.logging.access_log_format, "common");
        assert!(cfg.mime.overrides.is_empty());
        assert!(cfg.performance.connection_timeout.is_none());
    }

    #[test]
    fn test_served_tree_config_is_ignored() {
        // A stray wasm_server.* next to the served files must not be picked up
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("wasm_server.json"), "{ not json").unwrap();
        std::fs::write(dir.path().join("wasm_server.toml"), "[server]\nport = 9000\n").unwrap();

        let cfg = Config::load_with(None).unwrap();
        assert_eq!(cfg.server.port, DEFAULT_PORT);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        assert!(Config::load_from(missing.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9000\nconcurrent = true\n\n[mime.overrides]\nwgsl = \"text/wgsl\"\n",
        )
        .unwrap();
        let base = dir.path().join("custom");
        let cfg = Config::load_from(base.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert!(cfg.server.concurrent);
        assert_eq!(cfg.server.host, DEFAULT_HOST);
        assert_eq!(cfg.mime.overrides.get("wgsl").map(String::as_str), Some("text/wgsl"));
        assert_eq!(
            cfg.serving_banner(),
            "Serving at: http://localhost:9000/tool/wasm_demo.html"
        );
    }
}

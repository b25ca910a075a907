//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging with a level threshold
//! - File-based logging support
//!
//! Nothing here writes to stdout.

mod format;
pub mod writer;

pub use format::{version_label, AccessLogEntry};

use crate::config::{AppState, LoggingConfig};
use std::net::SocketAddr;
use std::str::FromStr;

/// Severity threshold for diagnostic messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "off" | "none" => Ok(Self::Off),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup. An unknown level falls
/// back to `info` with a warning.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    let parsed = config.level.parse::<LogLevel>();
    writer::init(
        parsed.clone().unwrap_or(LogLevel::Info),
        config.access_log,
        &config.access_log_format,
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
    )?;
    if let Err(e) = parsed {
        log_warning(&format!("{e}, using info"));
    }
    Ok(())
}

fn enabled(level: LogLevel) -> bool {
    writer::get().map_or(level >= LogLevel::Info, |w| level >= w.level())
}

/// Write to info log
fn write_info(message: &str) {
    if !enabled(LogLevel::Info) {
        return;
    }
    write_error_target(message);
}

/// Write to error log
fn write_error_target(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => eprintln!("{message}"),
    }
}

/// Whether per-request access logging is on
pub fn access_log_enabled() -> bool {
    writer::get().is_some_and(writer::LogWriter::access_enabled)
}

pub fn log_server_start(addr: &SocketAddr, state: &AppState) {
    let config = &state.config;
    write_info("======================================");
    write_info("Static file server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Serving root: {}", state.root.display()));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if config.server.concurrent {
        write_info("Connections: concurrent (one task per connection)");
    } else {
        write_info("Connections: sequential (one at a time)");
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    if enabled(LogLevel::Debug) {
        write_error_target(&format!("[DEBUG] Accepted connection from: {peer_addr}"));
    }
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    if enabled(LogLevel::Error) {
        write_error_target(&format!("[ERROR] Failed to serve connection: {err:?}"));
    }
}

pub fn log_error(message: &str) {
    if enabled(LogLevel::Error) {
        write_error_target(&format!("[ERROR] {message}"));
    }
}

pub fn log_warning(message: &str) {
    if enabled(LogLevel::Warn) {
        write_error_target(&format!("[WARN] {message}"));
    }
}

/// Log formatted access log entry using the configured format
pub fn log_access(entry: &AccessLogEntry) {
    let format = writer::get().map_or("common", writer::LogWriter::access_format);
    write_access(&entry.format(format));
}

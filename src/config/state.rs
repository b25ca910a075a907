// Application state module
// Read-only state shared by every connection

use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::ServerError;
use crate::http::mime::MimeTable;

/// Application state
///
/// Built once before the first accept and never mutated afterwards.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub mime: MimeTable,
    /// Canonical served root
    pub root: PathBuf,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ServerError> {
        let root = Path::new(&config.server.root)
            .canonicalize()
            .map_err(|source| ServerError::Root {
                path: PathBuf::from(&config.server.root),
                source,
            })?;
        let mime = MimeTable::for_server(&config.mime, &config.http.default_content_type);

        Ok(Self { config, mime, root })
    }
}

//! MIME type detection module
//!
//! Maps file extensions to `Content-Type` values. The table is seeded with
//! common web types, then `.wasm` is pinned to `application/wasm` so browsers
//! accept streamed WebAssembly compilation.

use std::collections::HashMap;
use std::path::Path;

use crate::config::{MimeConfig, DEFAULT_CONTENT_TYPE};

pub const WASM_EXTENSION: &str = "wasm";
pub const WASM_CONTENT_TYPE: &str = "application/wasm";

/// Standard extension table, without the `.wasm` entry
const STANDARD_TYPES: &[(&str, &str)] = &[
    // Text
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("txt", "text/plain"),
    ("md", "text/plain"),
    ("c", "text/plain"),
    ("h", "text/plain"),
    ("cpp", "text/plain"),
    ("hpp", "text/plain"),
    ("py", "text/plain"),
    ("csv", "text/csv"),
    ("xml", "application/xml"),
    // Scripts and data
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
    ("json", "application/json"),
    ("map", "application/json"),
    // Images
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    // Video
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("ogv", "video/ogg"),
    // Audio
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("flac", "audio/flac"),
    // Fonts
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
    // Documents and archives
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("tar", "application/x-tar"),
];

/// Immutable extension to content-type mapping
#[derive(Debug, Clone)]
pub struct MimeTable {
    types: HashMap<String, String>,
    fallback: String,
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::standard().with_override(WASM_EXTENSION, WASM_CONTENT_TYPE)
    }
}

impl MimeTable {
    /// Standard table with an `application/octet-stream` fallback
    pub fn standard() -> Self {
        Self {
            types: STANDARD_TYPES
                .iter()
                .map(|(ext, ct)| ((*ext).to_string(), (*ct).to_string()))
                .collect(),
            fallback: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    /// Build the table used by the server
    ///
    /// Order: standard types, configured overrides, then `.wasm`.
    pub fn for_server(overrides: &MimeConfig, fallback: &str) -> Self {
        let table = overrides
            .overrides
            .iter()
            .fold(Self::standard(), |table, (ext, ct)| {
                table.with_override(ext, ct)
            });
        table
            .with_override(WASM_EXTENSION, WASM_CONTENT_TYPE)
            .with_fallback(fallback)
    }

    /// Set or replace one entry. Accepts `wasm` or `.wasm`, any case.
    #[must_use]
    pub fn with_override(mut self, extension: &str, content_type: &str) -> Self {
        self.types
            .insert(normalize_extension(extension), content_type.to_string());
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, content_type: &str) -> Self {
        self.fallback = content_type.to_string();
        self
    }

    /// Content type for an extension, falling back for unknown or missing ones
    ///
    /// # Examples
    /// ```
    /// use wasm_demo_server::http::mime::MimeTable;
    /// let table = MimeTable::default();
    /// assert_eq!(table.lookup(Some("wasm")), "application/wasm");
    /// assert_eq!(table.lookup(Some("html")), "text/html");
    /// assert_eq!(table.lookup(None), "application/octet-stream");
    /// ```
    pub fn lookup(&self, extension: Option<&str>) -> &str {
        extension
            .and_then(|ext| {
                self.types
                    .get(ext)
                    .or_else(|| self.types.get(&ext.to_ascii_lowercase()))
            })
            .map_or(self.fallback.as_str(), String::as_str)
    }

    /// Content type for a file path, derived from its extension
    pub fn content_type_for(&self, path: &Path) -> &str {
        self.lookup(path.extension().and_then(|e| e.to_str()))
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

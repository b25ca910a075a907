//! HTTP protocol layer module
//!
//! Content types, URL path translation and response builders, kept apart
//! from the request handling that uses them.

pub mod mime;
pub mod path;
pub mod response;

// Re-export commonly used types
pub use mime::MimeTable;
pub use path::{resolve, ResolvedPath};
pub use response::{
    build_404_response, build_405_response, build_file_response, build_html_response,
    build_listing_denied_response, build_redirect_response,
};

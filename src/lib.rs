//! Local static file server for WebAssembly demos.
//!
//! Serves the working directory over HTTP with `.wasm` files typed as
//! `application/wasm`, so browsers can stream-compile them.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use config::{AppState, Config};
pub use error::ServerError;

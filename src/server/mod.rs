// Server module entry point
// Binds the listener, prints the banner and runs the accept loop

pub mod connection;
pub mod listener;

// `loop` is a keyword, so the module is exposed as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

use std::sync::Arc;

use crate::config::{AppState, Config};
use crate::error::ServerError;
use crate::logger;

// Re-export commonly used items
pub use listener::create_listener;
pub use server_loop::serve_forever;

/// Start serving with `config`. Only returns on a startup failure.
pub async fn run(config: Config) -> Result<(), ServerError> {
    let addr = config.get_socket_addr()?;
    let state = Arc::new(AppState::new(config)?);
    let listener = create_listener(addr).map_err(|source| ServerError::Bind { addr, source })?;

    // The only line this program writes to stdout
    println!("{}", state.config.serving_banner());
    logger::log_server_start(&addr, &state);

    serve_forever(listener, state).await;
    Ok(())
}

// Server loop module
// Accepts connections forever and hands each one to the connection handler

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::serve_connection;
use crate::config::AppState;
use crate::logger;

/// Accept connections until the process is terminated.
///
/// Sequential mode awaits each connection before the next accept; concurrent
/// mode spawns a task per connection. Accept errors are logged and skipped.
pub async fn serve_forever(listener: TcpListener, state: Arc<AppState>) {
    let concurrent = state.config.server.concurrent;

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                logger::log_connection_accepted(&peer_addr);
                let state = Arc::clone(&state);
                if concurrent {
                    tokio::spawn(serve_connection(stream, peer_addr, state));
                } else {
                    serve_connection(stream, peer_addr, state).await;
                }
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}

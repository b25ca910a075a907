// Connection handling module
// Serves HTTP/1 on a single accepted TCP stream

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve one connection to completion.
///
/// Keep-alive follows the scheduling mode: in sequential mode every response
/// closes its connection, otherwise one idle client would stall the accept
/// loop. The optional timeout bounds the whole connection.
pub async fn serve_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    let io = TokioIo::new(stream);
    let keep_alive = state.config.server.concurrent;
    let timeout = state
        .config
        .performance
        .connection_timeout
        .map(Duration::from_secs);

    let mut builder = http1::Builder::new();
    builder.keep_alive(keep_alive);

    let conn = builder.serve_connection(
        io,
        service_fn(move |req| handler::handle_request(req, Arc::clone(&state), peer_addr)),
    );

    let result = match timeout {
        Some(duration) => match tokio::time::timeout(duration, conn).await {
            Ok(result) => result,
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    duration.as_secs()
                ));
                return;
            }
        },
        None => conn.await,
    };

    if let Err(err) = result {
        // Clients dropping mid-response are routine for a dev server
        if !err.is_incomplete_message() {
            logger::log_connection_error(&err);
        }
    }
}

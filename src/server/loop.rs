// Server loop module
// Accepts connections until a shutdown is requested, then drains

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

use super::connection::accept_connection;
use super::drain::wait_for_connections;
use super::signal::SignalHandler;
use crate::config;
use crate::logger;

/// Accept loop for the QR server
///
/// Must run inside a `LocalSet`: connections are served with `spawn_local`.
/// Returns once shutdown was requested and in-flight connections have finished
/// (or `performance.shutdown_timeout` elapsed).
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    active_connections: Arc<AtomicUsize>,
    signals: Arc<SignalHandler>,
) -> Result<(), Box<dyn std::error::Error>> {
    let local_addr = listener.local_addr()?;
    let (draining_tx, draining) = watch::channel(false);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections, &draining);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                break;
            }
        }
    }

    // Close the listener first so no new connections arrive while draining
    drop(listener);
    draining_tx.send_replace(true);
    logger::log_shutdown_started(&local_addr, active_connections.load(Ordering::SeqCst));

    let timeout = Duration::from_secs(state.config.performance.shutdown_timeout);
    let remaining = wait_for_connections(&active_connections, timeout).await;
    logger::log_shutdown_complete(remaining);

    Ok(())
}

// Shutdown drain module
// Waits for in-flight connections after the listener has been closed

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Poll interval while waiting for connections to finish
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Wait until `conn_counter` reaches zero or `timeout` elapses.
///
/// Returns the number of connections still open when the wait ended.
pub async fn wait_for_connections(conn_counter: &AtomicUsize, timeout: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        let active = conn_counter.load(Ordering::SeqCst);
        if active == 0 {
            return 0;
        }

        tokio::select! {
            () = tokio::time::sleep(DRAIN_POLL_INTERVAL) => {}
            () = tokio::time::sleep_until(deadline) => {
                return conn_counter.load(Ordering::SeqCst);
            }
        }
    }
}

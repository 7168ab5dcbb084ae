// Server loop module
// Accepts connections until a shutdown signal arrives

use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config;
use crate::logger;

/// Run the accept loop until shutdown is requested.
///
/// Accept errors are logged and the loop continues; only a shutdown signal
/// ends it. The `shutdown_requested` flag is checked at the top of every
/// iteration so a signal delivered while the loop was busy accepting (or
/// before its first poll) is picked up even if the notification itself was
/// consumed elsewhere. Returning `Ok(())` drops the listener and unwinds
/// to `main`, which exits with status 0.
#[allow(clippy::ignored_unit_patterns)]
pub async fn run_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    signals: Arc<SignalHandler>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if signals.shutdown_requested.load(Ordering::SeqCst) {
            logger::log_shutdown();
            return Ok(());
        }

        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = signals.shutdown.notified() => {
                logger::log_shutdown();
                // Listener drops here; in-flight connections are abandoned
                // with the LocalSet when main returns.
                return Ok(());
            }
        }
    }
}

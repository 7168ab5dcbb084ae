// Signal handling module
//
// Supported signals:
// - SIGINT:  Graceful shutdown (Ctrl+C)
// - SIGTERM: Graceful shutdown

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Signal handler state
pub struct SignalHandler {
    /// Shutdown signal (SIGINT, SIGTERM)
    pub shutdown: Arc<Notify>,
    /// Whether shutdown has been requested
    pub shutdown_requested: Arc<AtomicBool>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Start signal handlers (Unix)
///
/// Spawns a background task that waits for SIGINT or SIGTERM and notifies
/// the accept loop. Either signal results in the same clean shutdown path
/// and a zero exit status.
///
/// The flag is set before notifying, and `notify_one` stores a permit, so
/// a signal that fires while the accept loop is mid-iteration (not parked
/// on `notified()`) is still observed.
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
        let mut sigint =
            signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

        tokio::select! {
            _ = sigint.recv() => {
                crate::logger::log_signal_received("SIGINT (Ctrl+C)");
            }
            _ = sigterm.recv() => {
                crate::logger::log_signal_received("SIGTERM");
            }
        }

        handler.shutdown_requested.store(true, Ordering::SeqCst);
        handler.shutdown.notify_one();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            crate::logger::log_signal_received("Ctrl+C");
            handler.shutdown_requested.store(true, Ordering::SeqCst);
            handler.shutdown.notify_one();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_flag_starts_clear() {
        let handler = SignalHandler::new();
        assert!(!handler.shutdown_requested.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_notify_wakes_pending_waiter() {
        let handler = Arc::new(SignalHandler::new());
        let waiter = Arc::clone(&handler);

        let task = tokio::spawn(async move {
            waiter.shutdown.notified().await;
        });

        // Give the task a chance to register before notifying
        tokio::task::yield_now().await;
        handler.shutdown.notify_one();

        tokio::time::timeout(std::time::Duration::from_secs(1), task)
            .await
            .expect("waiter should be woken")
            .unwrap();
    }

    #[tokio::test]
    async fn test_notify_before_waiter_stores_permit() {
        let handler = SignalHandler::new();

        // Nobody is waiting yet; the permit must survive until someone does.
        handler.shutdown.notify_one();

        tokio::time::timeout(
            std::time::Duration::from_secs(1),
            handler.shutdown.notified(),
        )
        .await
        .expect("stored permit should complete a later notified()");
    }
}

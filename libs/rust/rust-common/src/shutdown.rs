//! Shutdown signal handling for the service binaries.

use std::future::Future;
use std::time::Duration;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

/// Wait for SIGTERM or SIGINT.
///
/// If a handler cannot be installed the error is logged and that branch
/// never resolves, so the other signal still works.
pub async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating shutdown");
        }
    }
}

/// Drive `server` until a shutdown signal, then fire `trigger` and give the
/// server `grace` to drain.
///
/// `server` must stop accepting connections once `trigger`'s receiver
/// resolves (tonic `serve_with_shutdown`, axum `with_graceful_shutdown`).
/// If the drain outlasts `grace` the server future is dropped and open
/// connections are cut.
///
/// # Errors
///
/// Returns the server's own error if it fails before or during the drain.
pub async fn run_with_grace<F, E>(
    server: F,
    trigger: oneshot::Sender<()>,
    grace: Duration,
) -> Result<(), E>
where
    F: Future<Output = Result<(), E>>,
{
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result,
        () = wait_for_signal() => {}
    }

    // The receiver is gone only if the server already stopped.
    let _ = trigger.send(());

    if let Ok(result) = tokio::time::timeout(grace, server).await {
        info!("Server drained");
        result
    } else {
        warn!(grace_secs = grace.as_secs(), "Drain timed out, dropping open connections");
        Ok(())
    }
}

/// Receiver side of [`run_with_grace`]'s trigger as a plain future.
pub async fn triggered(receiver: oneshot::Receiver<()>) {
    let _ = receiver.await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_error_is_returned_before_signal() {
        let (trigger, _receiver) = oneshot::channel();
        let result: Result<(), &str> =
            run_with_grace(async { Err("bind failed") }, trigger, Duration::from_secs(1)).await;
        assert_eq!(result, Err("bind failed"));
    }

    #[tokio::test]
    async fn test_server_finishing_early_is_ok() {
        let (trigger, _receiver) = oneshot::channel();
        let result: Result<(), &str> =
            run_with_grace(async { Ok(()) }, trigger, Duration::from_secs(1)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_triggered_resolves_on_send_and_drop() {
        let (trigger, receiver) = oneshot::channel();
        trigger.send(()).unwrap();
        triggered(receiver).await;

        let (trigger, receiver) = oneshot::channel::<()>();
        drop(trigger);
        triggered(receiver).await;
    }
}

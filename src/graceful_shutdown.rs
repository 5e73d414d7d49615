//! Graceful shutdown

use tokio::signal;

/// Handler for graceful shutdown
///
/// Resolves on Ctrl+C or, on Unix, SIGTERM. In-flight requests are allowed to finish.
pub async fn handler() {
    let signal_name = tokio::select! {
        () = ctrl_c() => "Ctrl+C",
        () = terminate() => "SIGTERM",
    };

    tracing::info!("{signal_name} received, starting graceful shutdown");
}

async fn ctrl_c() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!("Could not listen for Ctrl+C: {err}");

        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut terminate) => {
            terminate.recv().await;
        }
        Err(err) => {
            tracing::error!("Could not listen for SIGTERM: {err}");

            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

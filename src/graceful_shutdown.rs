use tokio::signal;
use tracing::info;

/// Resolves once SIGINT or SIGTERM arrives so the server can drain
/// in-flight requests before exiting.
pub async fn shutdown_signal() {
    let interrupt = async {
        signal::ctrl_c()
            .await
            .expect("ctrl-c handler registration failed");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut stream = signal(SignalKind::terminate())
            .expect("SIGTERM handler registration failed");
        stream.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("Interrupt received, draining connections"),
        _ = terminate => info!("SIGTERM received, draining connections"),
    }
}

use crate::*;

use axum_server::Handle;
use std::time::Duration;

const GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Server handle that starts a graceful shutdown on ctrl-c or SIGTERM
pub fn server_handle() -> Handle {
    let handle = Handle::new();
    let server = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        warn!("Initiating shutdown process");
        server.graceful_shutdown(Some(GRACE_PERIOD));
    });
    handle
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("ctrl-c handler failed: {e}");
            std::future::pending::<()>().await
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("SIGTERM handler failed: {e}");
                std::future::pending::<()>().await
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;

use crate::services::RecorderHandle;

/// Serves `app` until `shutdown` resolves, then drains the interaction recorder
///
/// The recorder is drained whether the server stopped cleanly or with an error.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    recorder_handle: RecorderHandle,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Server stopped with an error");
    }

    recorder_handle.shutdown().await;
    result
}

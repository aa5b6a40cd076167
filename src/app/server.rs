use crate::adapters::http::build_router;
use crate::core::validator::CardValidator;
use crate::core::{Clock, ConfigProvider};
use crate::utils::error::{CardError, Result};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builds the router for `clock` using the timeout from `config`.
pub fn router_for<C: Clock + 'static, P: ConfigProvider + ?Sized>(clock: C, config: &P) -> Router {
    build_router(Arc::new(CardValidator::new(clock)), config.request_timeout())
}

pub async fn bind<P: ConfigProvider + ?Sized>(config: &P) -> Result<TcpListener> {
    let addr = format!("{}:{}", config.host(), config.port());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Serves until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    serve_with_shutdown(listener, router, shutdown_signal()).await
}

pub async fn serve_with_shutdown<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| CardError::Internal {
            message: format!("server error: {}", e),
        })?;
    tracing::info!("Server stopped");
    Ok(())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

//! Axum server setup and router construction.

use std::future::Future;
use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use condense_logging::condense_info;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::api::{self, AppState};

/// Build the router: `/`, `/health` and `/summarize`.
pub fn build_router(state: AppState, cors: bool) -> Router {
    let mut router = Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        .route("/summarize", post(api::summarize))
        .with_state(state);

    if cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

/// Serve until `shutdown` resolves.
pub async fn serve(
    router: Router,
    bind_addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    condense_info!("HTTP API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    condense_info!("HTTP API stopped");
    Ok(())
}

/// Bind and serve in the background, returning the bound address.
///
/// Binding to port 0 picks a free port, which is what tests rely on.
pub async fn spawn(router: Router, bind_addr: SocketAddr) -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            condense_logging::condense_error!("HTTP API failed: {}", err);
        }
    });
    Ok(addr)
}

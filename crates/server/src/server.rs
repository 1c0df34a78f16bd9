use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use engine::Engine;

use crate::{bills, update};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// Fixed number of bills per page, applied uniformly to every listing.
    pub page_size: u64,
}

/// Builds the application router. Exposed so tests can drive it directly.
pub fn app(engine: Engine, page_size: u64) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
        page_size,
    };

    Router::new()
        .route("/bills", get(bills::list))
        .route("/update", post(update::trigger))
        .with_state(state)
}

pub async fn run(engine: Engine, page_size: u64) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, page_size, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    page_size: u64,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, page_size)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    page_size: u64,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, page_size, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

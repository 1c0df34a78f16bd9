use axum::http::StatusCode;
use axum::response::IntoResponse;
use engine::EngineError;

pub use server::{ServerState, app, run, run_with_listener, spawn_with_listener};

mod bills;
mod server;
mod update;

pub mod types {
    pub mod bill {
        pub use api_types::bill::{BillListResponse, BillView, FinancialEntryView};
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    InvalidParameter(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            // Rejected input is a 404 carrying the reason as plain text.
            // That status is the established contract of this API, kept in
            // preference to 400.
            ServerError::InvalidParameter(reason) => {
                (StatusCode::NOT_FOUND, reason).into_response()
            }
            ServerError::Engine(EngineError::InvalidParameter(reason)) => {
                (StatusCode::NOT_FOUND, reason).into_response()
            }
            // A failing store (or lock file) is fatal for the request: a
            // server error with an empty body.
            ServerError::Engine(EngineError::Database(err)) => {
                tracing::error!("database error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "").into_response()
            }
            ServerError::Engine(EngineError::Lock(err)) => {
                tracing::error!("lock file error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "").into_response()
            }
        }
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

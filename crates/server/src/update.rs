//! POST /update: the refresh trigger.
//!
//! Every outcome is a success from the caller's point of view; whether the
//! job actually ran is only visible in the logs.

use axum::{extract::State, http::StatusCode};

use engine::RefreshOutcome;

use crate::{ServerError, server::ServerState};

pub async fn trigger(State(state): State<ServerState>) -> Result<StatusCode, ServerError> {
    match state.engine.refresh_if_stale().await? {
        RefreshOutcome::Ran => tracing::info!("refresh job ran"),
        RefreshOutcome::Fresh => tracing::debug!("refresh skipped, data is fresh"),
        RefreshOutcome::Busy => tracing::debug!("refresh skipped, lock is busy"),
    }

    Ok(StatusCode::OK)
}

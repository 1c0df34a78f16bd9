//! The rate-limited refresh job: staleness check, host-wide lock, external
//! command invocation.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, EntityTrait};
use tokio::process::Command;

use crate::{EngineError, ResultEngine, UpdateLock, attributes};

use super::Engine;

/// Attributes key holding the unix timestamp of the last refresh.
const LAST_UPDATED: &str = "last_updated";

/// Configuration for the refresh job.
#[derive(Clone, Debug)]
pub struct RefreshSettings {
    /// Minimum elapsed time between refresh runs.
    pub interval: Duration,
    /// Shell command line run as the refresh job.
    pub command: String,
    /// Marker path for the host-wide lock.
    pub lock_file: PathBuf,
}

/// What a refresh trigger ended up doing. All three are successes to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The last run is within the interval; no lock was attempted.
    Fresh,
    /// Another holder owns the lock; nothing was persisted.
    Busy,
    /// The job ran, whether or not the command itself succeeded.
    Ran,
}

impl Engine {
    /// Unix timestamp of the last refresh, if one has ever run.
    pub async fn last_refresh(&self) -> ResultEngine<Option<i64>> {
        let row = attributes::Entity::find_by_id(LAST_UPDATED)
            .one(&self.database)
            .await?;

        Ok(row.and_then(|model| match model.value.parse() {
            Ok(timestamp) => Some(timestamp),
            Err(_) => {
                tracing::warn!("unparseable {LAST_UPDATED} attribute: {}", model.value);
                None
            }
        }))
    }

    async fn set_last_refresh(&self, timestamp: i64) -> ResultEngine<()> {
        attributes::Entity::insert(attributes::ActiveModel {
            attr: ActiveValue::Set(LAST_UPDATED.to_string()),
            value: ActiveValue::Set(timestamp.to_string()),
        })
        .on_conflict(
            OnConflict::column(attributes::Column::Attr)
                .update_column(attributes::Column::Value)
                .to_owned(),
        )
        .exec(&self.database)
        .await?;

        Ok(())
    }

    /// Runs the refresh job unless it ran recently or another holder owns the
    /// lock.
    ///
    /// The timestamp is advanced *before* the command runs, so rapid-fire
    /// triggers observe [`RefreshOutcome::Fresh`] instead of re-scheduling a
    /// job that is still executing. The flip side is that a failing command
    /// still counts as a run until the interval lapses; the failure is only
    /// logged.
    pub async fn refresh_if_stale(&self) -> ResultEngine<RefreshOutcome> {
        let Some(settings) = self.refresh.as_ref() else {
            return Err(EngineError::InvalidParameter(
                "refresh is not configured".to_string(),
            ));
        };

        let now = Utc::now().timestamp();
        if let Some(last) = self.last_refresh().await? {
            if now - last < settings.interval.as_secs() as i64 {
                tracing::debug!("refresh not required, timestamp is fresh");
                return Ok(RefreshOutcome::Fresh);
            }
        }

        let Some(lock) = UpdateLock::acquire(&settings.lock_file)? else {
            tracing::debug!("refresh lock held elsewhere, skipping");
            return Ok(RefreshOutcome::Busy);
        };

        // Persisting before the run keeps a long job from being scheduled
        // twice by triggers that arrive while it is still executing.
        if let Err(err) = self.set_last_refresh(now).await {
            lock.release()?;
            return Err(err);
        }

        tracing::info!("running refresh command");
        match Command::new("sh")
            .arg("-c")
            .arg(&settings.command)
            .status()
            .await
        {
            Ok(status) if status.success() => {}
            Ok(status) => tracing::error!("refresh command exited with {status}"),
            Err(err) => tracing::error!("refresh command failed to start: {err}"),
        }

        lock.release()?;
        Ok(RefreshOutcome::Ran)
    }
}

//! Event-status sweep: retires elapsed active events.
//!
//! Keeps the `status` column consistent with wall-clock time so the read path
//! never has to compare schedules itself.

use std::time::Duration;

use chrono::Utc;
use tokio::time::interval;
use tracing::{error, info};

use crate::db::DbPool;
use crate::error::AppResult;

/// Fixed sweep cadence. One minute matches the finest schedule granularity
/// (events carry minute-level times at most).
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Start the event-status sweep background task.
///
/// Spawns a tokio task that runs one sweep immediately (catch-up after a
/// restart) and then once per minute. Ticks never overlap: the next tick
/// is not awaited until the previous sweep finished. A failed sweep is
/// logged and retried on the next tick.
pub fn start_event_status_task(pool: DbPool) {
    tokio::spawn(async move {
        info!(
            "Starting event-status sweep (interval: {} seconds)",
            SWEEP_INTERVAL.as_secs()
        );

        let mut ticker = interval(SWEEP_INTERVAL);

        loop {
            ticker.tick().await;

            match run_sweep(&pool).await {
                Ok(0) => {}
                Ok(updated) => {
                    info!("Event-status sweep: {} event(s) moved to past", updated);
                }
                Err(e) => {
                    error!("Event-status sweep error: {}", e);
                }
            }
        }
    });
}

/// Run a single sweep cycle.
///
/// One bulk UPDATE; nothing else. Idempotent: a tick that finds no elapsed
/// active events changes nothing, and re-running after a successful sweep
/// is a no-op because the affected rows are no longer active.
pub async fn run_sweep(pool: &DbPool) -> AppResult<u64> {
    pool.mark_elapsed_past(Utc::now().naive_utc()).await
}

//! Background token expiry sweep.
//!
//! Periodically evicts expired tokens from the store. Correctness never
//! depends on this task running: `consume` re-checks the deadline itself.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::{debug, info};

use crate::store::ExchangeTokenStore;

/// Default sweep interval in seconds.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Spawn a background task that periodically sweeps expired tokens.
///
/// Returns a `JoinHandle` that can be used to abort the task.
pub fn spawn_sweep_task(
    store: Arc<ExchangeTokenStore>,
    sweep_interval_secs: u64,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(sweep_interval_secs));

        // Skip the first immediate tick
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let evicted = store.sweep().await;
            if evicted > 0 {
                info!(evicted, "Token sweep completed");
            } else {
                debug!("Token sweep: no expired tokens");
            }
        }
    })
}

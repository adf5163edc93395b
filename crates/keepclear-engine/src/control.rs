//! The fixed-period control loop.

use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::tick::{Placer, TickReport};

impl Placer {
    /// Run placement passes every configured interval until `cancel` fires.
    ///
    /// The first pass runs one interval after the call. Passes run on the
    /// calling task and never overlap; a pass that overruns the interval
    /// delays the next firing instead of queuing extra ones.
    pub async fn run(&self, cancel: CancellationToken) {
        let period = self.interval;
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_ms = period.as_millis() as u64, "placement loop started");
        let mut passes: u64 = 0;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    passes += 1;
                    log_report(passes, &self.tick());
                }
            }
        }
        info!(passes, "placement loop stopped");
    }
}

/// Emit one tick's counters at debug level.
fn log_report(pass: u64, r: &TickReport) {
    debug!(
        pass,
        displays = r.displays,
        target = ?r.target,
        windows = r.windows,
        corrected = r.corrected,
        skipped_no_handle = r.skipped_no_handle,
        failed = r.failed,
        released = r.released,
        "tick"
    );
}

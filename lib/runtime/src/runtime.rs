use std::future::Future;

use anyhow::Result;
use tracing::{info, warn};

use podstart_ports::LifecyclePort;

use crate::tracker::LifecycleTracker;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub events: u64,
    pub records: u64,
    pub rejected: u64,
}

/// Feed events from `port` into `tracker` until the feed ends or `shutdown` resolves.
///
/// A malformed snapshot only abandons its own event. Errors from the feed
/// itself end the loop and are returned.
pub async fn run_until<F>(
    port: &mut dyn LifecyclePort,
    tracker: &LifecycleTracker,
    shutdown: F,
) -> Result<RunSummary>
where
    F: Future<Output = ()>,
{
    let mut summary = RunSummary::default();
    tokio::pin!(shutdown);

    loop {
        let event = tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!(pending = tracker.pending_len(), "shutdown requested, stopping pod tracker");
                break;
            }
            event = port.next_event() => event?,
        };

        let Some(event) = event else {
            info!("lifecycle feed ended");
            break;
        };

        summary.events = summary.events.saturating_add(1);
        match tracker.handle(&event) {
            Ok(Some(_)) => summary.records = summary.records.saturating_add(1),
            Ok(None) => {}
            Err(err) => {
                summary.rejected = summary.rejected.saturating_add(1);
                warn!(pod = %err.pod(), event = event.kind(), "skipping event: {err}");
            }
        }
    }

    Ok(summary)
}

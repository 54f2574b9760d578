use anyhow::Result;
use tracing::{info, warn};

use podstart_adapter_kube::{ClientOptions, KubeLifecycleFeed, WatchScope, connect};
use podstart_adapter_output::sink_for;
use podstart_application::{LifecycleTracker, RunSummary, run_until};
use podstart_domain::PodstartConfig;

/// Watch pods until Ctrl-C / SIGTERM, reporting startup durations.
pub async fn run(config: PodstartConfig) -> Result<RunSummary> {
    let tracker = LifecycleTracker::starting_now(sink_for(config.output));
    info!(start_time = %tracker.start_time(), "only pods created after start are tracked");

    let client = connect(&ClientOptions {
        kubeconfig: config.kubeconfig.clone(),
        context: config.context.clone(),
    })
    .await?;
    let scope = WatchScope {
        namespace: config.namespace.clone(),
        selector: config.selector.clone(),
    };
    let mut feed = KubeLifecycleFeed::new(client, &scope);

    let summary = run_until(&mut feed, &tracker, shutdown_signal()).await?;
    info!(
        events = summary.events,
        records = summary.records,
        rejected = summary.rejected,
        "pod tracker stopped"
    );
    Ok(summary)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use kube::Client;
use kube::config::{KubeConfigOptions, Kubeconfig};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
}

/// Build a client from an explicit kubeconfig, a named context of the default
/// kubeconfig, or whatever the environment provides (`KUBECONFIG`,
/// `~/.kube/config`, in-cluster service account).
pub async fn connect(options: &ClientOptions) -> Result<Client> {
    let kube_options = KubeConfigOptions {
        context: options.context.clone(),
        ..Default::default()
    };

    let config = match (&options.kubeconfig, &options.context) {
        (Some(path), _) => {
            info!(path = %path.display(), "loading kubeconfig");
            let kubeconfig = Kubeconfig::read_from(path)
                .with_context(|| format!("failed to read kubeconfig at {}", path.display()))?;
            kube::Config::from_custom_kubeconfig(kubeconfig, &kube_options)
                .await
                .with_context(|| format!("invalid kubeconfig at {}", path.display()))?
        }
        (None, Some(context)) => kube::Config::from_kubeconfig(&kube_options)
            .await
            .with_context(|| format!("failed to load kubeconfig context {context}"))?,
        (None, None) => kube::Config::infer()
            .await
            .context("failed to infer Kubernetes client configuration")?,
    };

    info!(cluster = %config.cluster_url, "connecting to cluster");
    Client::try_from(config).context("failed to create Kubernetes client")
}

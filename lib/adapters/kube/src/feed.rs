use std::collections::VecDeque;
use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use k8s_openapi::api::core::v1::Pod;
use kube::runtime::{WatchStreamExt, watcher};
use kube::{Api, Client};
use tracing::{info, warn};

use podstart_domain::LifecycleEvent;
use podstart_ports::LifecyclePort;

use crate::demux::PodEventDemux;

/// Which pods to watch.
#[derive(Debug, Clone, Default)]
pub struct WatchScope {
    pub namespace: Option<String>,
    pub selector: Option<String>,
}

impl fmt::Display for WatchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "namespace {namespace}")?,
            None => f.write_str("all namespaces")?,
        }
        if let Some(selector) = &self.selector {
            write!(f, " matching {selector}")?;
        }
        Ok(())
    }
}

/// Pod lifecycle events from a kube-runtime watcher.
///
/// Watch errors are logged and the watcher resumes after backoff; the feed
/// only ends if the underlying stream does.
pub struct KubeLifecycleFeed {
    stream: BoxStream<'static, Result<watcher::Event<Pod>, watcher::Error>>,
    demux: PodEventDemux,
    ready: VecDeque<LifecycleEvent>,
}

impl KubeLifecycleFeed {
    pub fn new(client: Client, scope: &WatchScope) -> Self {
        let api: Api<Pod> = match &scope.namespace {
            Some(namespace) => Api::namespaced(client, namespace),
            None => Api::all(client),
        };
        let mut config = watcher::Config::default();
        if let Some(selector) = &scope.selector {
            config = config.labels(selector);
        }
        info!(scope = %scope, "watching pods");

        Self {
            stream: watcher(api, config).default_backoff().boxed(),
            demux: PodEventDemux::new(),
            ready: VecDeque::new(),
        }
    }
}

#[async_trait]
impl LifecyclePort for KubeLifecycleFeed {
    async fn next_event(&mut self) -> Result<Option<LifecycleEvent>> {
        loop {
            if let Some(event) = self.ready.pop_front() {
                return Ok(Some(event));
            }
            match self.stream.next().await {
                Some(Ok(event)) => self.ready.extend(self.demux.ingest(event)),
                Some(Err(err)) => warn!(error = %err, "pod watch failed, retrying"),
                None => return Ok(None),
            }
        }
    }
}

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};

use podstart_domain::{LogFormat, OutputFormat, PodstartConfig};

/// Report how long each new pod takes from creation to Ready.
#[derive(Debug, Parser)]
#[command(name = "podstart", version)]
pub struct Cli {
    /// YAML config file; defaults to ~/.podstart/config.yaml when present.
    #[arg(long, env = "PODSTART_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Absolute path to the kubeconfig file.
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use.
    #[arg(long)]
    pub context: Option<String>,

    /// Only watch pods in this namespace.
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Label selector for watched pods, e.g. `app=api`.
    #[arg(short = 'l', long)]
    pub selector: Option<String>,

    #[arg(long, value_enum)]
    pub output: Option<OutputArg>,

    /// Log filter directives; `RUST_LOG` takes precedence.
    #[arg(long)]
    pub log_level: Option<String>,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormatArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Log,
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(value: OutputArg) -> Self {
        match value {
            OutputArg::Log => OutputFormat::Log,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Plain,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Plain => LogFormat::Plain,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

impl Cli {
    /// Load the config file (if any) and apply flags on top of it.
    pub fn resolve_config(&self) -> Result<PodstartConfig> {
        let config = match &self.config {
            Some(path) => PodstartConfig::load_from_path(path)?,
            None => match default_config_path() {
                Some(path) => PodstartConfig::load_or_default(&path)?,
                None => PodstartConfig::default(),
            },
        };
        Ok(self.apply(config))
    }

    pub fn apply(&self, mut config: PodstartConfig) -> PodstartConfig {
        if let Some(path) = &self.kubeconfig {
            config.kubeconfig = Some(path.clone());
        }
        if let Some(context) = &self.context {
            config.context = Some(context.clone());
        }
        if let Some(namespace) = &self.namespace {
            config.namespace = Some(namespace.clone());
        }
        if let Some(selector) = &self.selector {
            config.selector = Some(selector.clone());
        }
        if let Some(output) = self.output {
            config.output = output.into();
        }
        if let Some(filter) = &self.log_level {
            config.log.filter = filter.clone();
        }
        if let Some(format) = self.log_format {
            config.log.format = format.into();
        }
        config
    }
}

fn default_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| Path::new(&home).join(".podstart").join("config.yaml"))
}

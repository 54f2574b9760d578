use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use podstart_domain::{LogConfig, LogFormat};

const QUIET_TARGETS: [&str; 4] = ["hyper", "hyper_util", "tower", "kube_client"];

/// Install the global subscriber. Logs go to stderr so JSON records on stdout stay clean.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Plain => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

fn build_filter(config: &LogConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let mut filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter {:?}", config.filter))?;
    for target in QUIET_TARGETS {
        if !mentions_target(&config.filter, target) {
            filter = filter.add_directive(format!("{target}=warn").parse::<Directive>()?);
        }
    }
    Ok(filter)
}

/// Whether any directive in `filter` names exactly `target`. Bare levels such as
/// `info` name no target.
fn mentions_target(filter: &str, target: &str) -> bool {
    filter.split(',').map(str::trim).any(|directive| {
        let name = directive
            .split(['=', '['])
            .next()
            .unwrap_or_default()
            .trim();
        name == target
    })
}

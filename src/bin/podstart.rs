use clap::Parser;

use podstart::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    podstart::logging::init(&config.log)?;
    podstart::runtime::run(config).await?;
    Ok(())
}

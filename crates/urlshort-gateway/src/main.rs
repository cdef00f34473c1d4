use clap::Parser;
use urlshort_gateway::cli::CLI;
use urlshort_gateway::{server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    telemetry::init()?;

    server::run(config).await
}

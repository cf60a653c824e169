use anyhow::Result;
use clap::Parser;
use ecj_cms::cli::{bootstrap, run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap();

    let cli = Cli::parse();
    tracing::info!("CLI arguments parsed, invoking run");
    let result = run(cli).await;
    match &result {
        Ok(_) => tracing::info!("CLI completed successfully"),
        Err(e) => tracing::error!(error = %e, "CLI exited with error"),
    }
    result
}

//! Inserts the built-in demo content. Same as `ecj-cms seed`.
use anyhow::Result;
use ecj_cms::cli::{bootstrap, run, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap();
    run(Cli {
        command: Commands::Seed { seed: None },
    })
    .await
}

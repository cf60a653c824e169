//! Provisions the built-in schema. Same as `ecj-cms setup`.
use anyhow::Result;
use ecj_cms::cli::{bootstrap, run, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap();
    run(Cli {
        command: Commands::Setup { schema: None },
    })
    .await
}

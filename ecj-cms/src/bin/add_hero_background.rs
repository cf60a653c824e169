//! Adds the hero_background field. Same as `ecj-cms add-hero-background`.
use anyhow::Result;
use ecj_cms::cli::{bootstrap, run, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap();
    run(Cli {
        command: Commands::AddHeroBackground,
    })
    .await
}

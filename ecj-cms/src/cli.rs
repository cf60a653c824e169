/// # ecj-cms CLI Interface (Module)
///
/// Command parsing and orchestration for the operator tooling around the ECJ Tire Supply
/// Directus instance. Provisioning, seeding and content reads all live in
/// [`ecj-cms-core`]; this module wires them to the environment and prints summaries.
///
/// Operator-facing output goes to stdout with `println!`; structured logs go to stderr
/// through `tracing`.
///
/// [`ecj-cms-core`]: ../../ecj-cms-core/
use crate::load_config::{load_schema, load_seed};
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use ecj_cms_core::client::DirectusClient;
use ecj_cms_core::config::CmsConfig;
use ecj_cms_core::content::ContentReader;
use ecj_cms_core::format::format_price;
use ecj_cms_core::presentation::HomePage;
use ecj_cms_core::provision::{
    add_field, provision_schema, verify_connection, CollectionStatus, FieldOutcome,
    PermissionOutcome,
};
use ecj_cms_core::schema::SchemaCatalog;
use ecj_cms_core::seed::{seed, SeedCatalog};
use std::path::PathBuf;

/// CLI for ecj-cms: provision, seed and inspect the ECJ Tire Supply CMS.
#[derive(Parser)]
#[clap(
    name = "ecj-cms",
    version,
    about = "Provision the ECJ Tire Supply Directus schema, seed demo content and preview what the site will render"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create every collection, field and public read permission
    Setup {
        /// YAML schema catalog to use instead of the built-in one
        #[clap(long)]
        schema: Option<PathBuf>,
    },
    /// Insert demo branches, services, testimonials and site settings (not idempotent)
    Seed {
        /// YAML seed catalog to use instead of the built-in one
        #[clap(long)]
        seed: Option<PathBuf>,
    },
    /// Add the hero_background image field to site_settings
    AddHeroBackground,
    /// Read the published homepage content through the public API
    Preview,
}

/// Loads `.env` and installs the stderr log subscriber. Called once by every binary.
pub fn bootstrap() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("CLI application startup: tracing initialised, environment loaded");
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    let result = match cli.command {
        Commands::Setup { schema } => {
            let catalog = match schema {
                Some(path) => load_schema(path)?,
                None => SchemaCatalog::builtin()?,
            };
            setup(&catalog).await
        }
        Commands::Seed { seed } => {
            let catalog = match seed {
                Some(path) => load_seed(path)?,
                None => SeedCatalog::builtin()?,
            };
            seed_data(&catalog).await
        }
        Commands::AddHeroBackground => add_hero_background().await,
        Commands::Preview => preview().await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed");
    }
    result
}

/// Admin config, client and a successful `/users/me` round-trip, or a fatal error.
async fn connect_admin() -> Result<(CmsConfig, DirectusClient)> {
    let config = match CmsConfig::admin_from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            return Err(e.into());
        }
    };
    println!("📡 Connecting to: {}\n", config.base_url);

    let client = DirectusClient::new(&config)?;
    if let Err(e) = verify_connection(&client).await {
        eprintln!("❌ Failed to connect to Directus: {e}");
        return Err(anyhow!("Failed to connect to Directus: {e}"));
    }
    println!("✅ Connected to Directus!\n");
    Ok((config, client))
}

async fn setup(catalog: &SchemaCatalog) -> Result<()> {
    println!("\n🚀 ECJ Tires - Directus Setup\n");
    let (config, client) = connect_admin().await?;
    tracing::info!(command = "setup", "Starting schema provisioning");

    let report = provision_schema(&client, catalog).await;

    for collection in &report.collections {
        match &collection.status {
            CollectionStatus::Created => {
                println!(
                    "  ✅ Collection \"{}\" created ({} fields)",
                    collection.collection,
                    collection.fields.len()
                );
                for field in &collection.fields {
                    match &field.outcome {
                        FieldOutcome::Created => {}
                        FieldOutcome::AlreadyExists => {
                            println!("     ⚠️ Field \"{}\" already exists", field.field)
                        }
                        FieldOutcome::Failed(reason) => {
                            println!("     ⚠️ Field \"{}\" may already exist: {reason}", field.field)
                        }
                    }
                }
            }
            CollectionStatus::AlreadyExists => {
                println!(
                    "  ⏭️  Collection \"{}\" already exists, skipping...",
                    collection.collection
                );
            }
            CollectionStatus::Failed(reason) => {
                println!(
                    "  ❌ Collection \"{}\" could not be created: {reason}",
                    collection.collection
                );
            }
        }
        if let Some(PermissionOutcome::Failed(_)) = &collection.permission {
            println!("     ⚠️ Permission may already exist");
        }
    }

    let failed = report
        .collections
        .iter()
        .filter(|c| matches!(c.status, CollectionStatus::Failed(_)))
        .count();
    if failed == 0 {
        println!("\n\n✅ All collections created successfully!\n");
    } else {
        println!("\n\n⚠️ Setup finished with {failed} collection(s) not created.\n");
    }
    println!("📝 Next steps:");
    println!("   1. Go to Directus Admin: {}", config.admin_url());
    println!("   2. Add your branch locations (ECJ Tires & ECJL Tires)");
    println!("   3. Add your services");
    println!("   4. Add tires and mags inventory");
    println!("   5. Upload gallery photos\n");

    tracing::info!(
        command = "setup",
        created = report.created().count(),
        skipped = report.skipped().count(),
        failed,
        "Setup complete"
    );
    Ok(())
}

async fn seed_data(catalog: &SeedCatalog) -> Result<()> {
    println!("\n🌱 Seeding ECJ Tires Data...\n");
    let (config, client) = connect_admin().await?;
    tracing::info!(command = "seed", records = catalog.records.len(), "Starting seed");

    let report = seed(&client, catalog).await;

    for (collection, label) in &report.inserted {
        println!("   ✅ {label} added ({collection})");
    }
    for failure in &report.failed {
        println!(
            "   ❌ {} ({}) failed: {}",
            failure.label, failure.collection, failure.reason
        );
    }

    if report.failed.is_empty() {
        println!("\n\n✅ Seed data added successfully!\n");
    } else {
        println!(
            "\n\n⚠️ Seeded {} record(s), {} failed.\n",
            report.inserted.len(),
            report.failed.len()
        );
    }
    println!("🌐 Your website should now show real data from Directus.");
    println!("📝 Go to Directus to add more content: {}\n", config.admin_url());

    tracing::info!(
        command = "seed",
        inserted = report.inserted.len(),
        failed = report.failed.len(),
        "Seed complete"
    );
    Ok(())
}

async fn add_hero_background() -> Result<()> {
    println!("\n🚀 Adding hero_background field to site_settings\n");
    let catalog = SchemaCatalog::builtin()?;
    let addition = catalog
        .addition("site_settings", "hero_background")
        .ok_or_else(|| anyhow!("hero_background is missing from the built-in schema additions"))?;

    let (config, client) = connect_admin().await?;

    println!("📦 Adding hero_background field...");
    match add_field(&client, &addition.collection, &addition.definition).await {
        FieldOutcome::Created => println!("✅ hero_background field created!"),
        FieldOutcome::AlreadyExists => println!("⏭️  Field already exists, nothing to do."),
        FieldOutcome::Failed(reason) => eprintln!("❌ Error: {reason}"),
    }

    println!("\n✅ Done!\n");
    println!("📝 Next steps:");
    println!("   1. Go to Directus Admin: {}", config.admin_url());
    println!("   2. Navigate to Site Settings");
    println!("   3. Upload a hero background image");
    println!("   4. The homepage will display the image\n");
    Ok(())
}

async fn preview() -> Result<()> {
    let config = CmsConfig::public_from_env();
    let reader = ContentReader::connect(&config)?;
    tracing::info!(command = "preview", base_url = %config.base_url, "Loading homepage content");

    let home = HomePage::load(&reader).await;

    match &home.settings {
        Some(settings) => {
            println!("🏠 {}", settings.site_name);
            if let Some(tagline) = &settings.tagline {
                println!("   {tagline}");
            }
        }
        None => println!("🏠 (site settings unavailable)"),
    }
    println!("   Hero: {}\n", home.hero_background_url(&reader));

    println!("📍 Branches: {}", home.branches.len());
    for branch in &home.branches {
        let main = if branch.is_main_branch { " (main)" } else { "" };
        println!("   - {}{main}", branch.name);
    }

    println!("\n🔧 Featured services: {}", home.featured_services.len());
    for service in &home.featured_services {
        println!("   - {}", service.name);
    }

    println!("\n🛞 Featured tires: {}", home.featured_tires.len());
    for tire in &home.featured_tires {
        let badge = tire.stock_badge();
        println!(
            "   - {} | {} | {} [{}]",
            tire.name,
            format_price(tire.price),
            badge.label,
            badge.class
        );
    }

    let brands: Vec<&str> = home.tire_brands.iter().map(|b| b.name.as_str()).collect();
    println!("\n🏷️  Tire brands: {}", brands.join(", "));

    println!("\n💬 Testimonials: {}", home.testimonials.len());
    for testimonial in &home.testimonials {
        println!("   - {}: {}", testimonial.customer_name, testimonial.content);
    }
    println!();
    Ok(())
}

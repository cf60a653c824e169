/// `load_config` module: loads operator-supplied YAML catalogs that replace the built-in
/// schema or seed tables.
///
/// Paths come from the CLI (`setup --schema`, `seed --seed`). Failures are fatal for the
/// command and carry the path in the message.
use anyhow::{anyhow, Result};
use ecj_cms_core::schema::SchemaCatalog;
use ecj_cms_core::seed::SeedCatalog;
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Loads a schema catalog (collections plus field additions) from a YAML file.
pub fn load_schema<P: AsRef<Path>>(path: P) -> Result<SchemaCatalog> {
    let path_ref = path.as_ref();
    let content = read_catalog(path_ref)?;

    match SchemaCatalog::from_yaml(&content) {
        Ok(catalog) => {
            info!(
                config_path = ?path_ref,
                collections = catalog.collections.len(),
                "Parsed schema YAML successfully"
            );
            Ok(catalog)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse schema YAML");
            Err(anyhow!("Failed to parse schema YAML: {e}"))
        }
    }
}

/// Loads a seed catalog from a YAML file.
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<SeedCatalog> {
    let path_ref = path.as_ref();
    let content = read_catalog(path_ref)?;

    match SeedCatalog::from_yaml(&content) {
        Ok(catalog) => {
            info!(
                config_path = ?path_ref,
                records = catalog.records.len(),
                "Parsed seed YAML successfully"
            );
            Ok(catalog)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse seed YAML");
            Err(anyhow!("Failed to parse seed YAML: {e}"))
        }
    }
}

fn read_catalog(path_ref: &Path) -> Result<String> {
    info!(config_path = ?path_ref, "Loading catalog from file");
    match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Catalog file read successfully");
            Ok(content)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read catalog file");
            Err(anyhow!("Failed to read catalog file {:?}: {}", path_ref, e))
        }
    }
}

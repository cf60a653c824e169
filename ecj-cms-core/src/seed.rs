//! Demo content: a declarative table of records and the routine that inserts them.
//!
//! Seeding is deliberately naive: one `POST /items/{collection}` per record, in
//! table order, with no existence check. Rerunning it duplicates every
//! non-singleton record. Per-record failures are logged and reported, never fatal.

use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::contract::AdminApi;
use crate::error::CmsError;

const BUILTIN_SEED: &str = include_str!("../catalog/seed.yaml");

/// One record to insert.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedRecord {
    pub collection: String,
    /// Operator-facing name printed in the summary.
    pub label: String,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedCatalog {
    pub records: Vec<SeedRecord>,
}

impl SeedCatalog {
    pub fn builtin() -> Result<Self, CmsError> {
        Self::from_yaml(BUILTIN_SEED)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, CmsError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn for_collection<'a>(&'a self, collection: &'a str) -> impl Iterator<Item = &'a SeedRecord> {
        self.records.iter().filter(move |r| r.collection == collection)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeedFailure {
    pub collection: String,
    pub label: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedReport {
    /// `(collection, label)` of every record the API accepted.
    pub inserted: Vec<(String, String)>,
    pub failed: Vec<SeedFailure>,
}

/// Inserts every record of the catalog, in order.
pub async fn seed<A: AdminApi>(api: &A, catalog: &SeedCatalog) -> SeedReport {
    info!(records = catalog.records.len(), "[SEED] Seeding initial data");
    let mut report = SeedReport::default();

    for record in &catalog.records {
        match api.create_item(&record.collection, &record.data).await {
            Ok(_) => {
                info!(collection = %record.collection, label = %record.label, "[SEED] Record added");
                report
                    .inserted
                    .push((record.collection.clone(), record.label.clone()));
            }
            Err(e) => {
                error!(
                    collection = %record.collection,
                    label = %record.label,
                    error = ?e,
                    "[SEED][ERROR] create_item failed"
                );
                report.failed.push(SeedFailure {
                    collection: record.collection.clone(),
                    label: record.label.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        inserted = report.inserted.len(),
        failed = report.failed.len(),
        "[SEED] Seeding finished"
    );
    report
}

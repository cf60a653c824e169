//! Schema provisioning: turns a [`SchemaCatalog`] into Directus collections, fields and permissions.
//!
//! The workflow, per collection and in catalog order:
//!   - Check existence by reading the collection; any failure counts as "absent"
//!   - Absent: create the collection, then each field in turn
//!   - Present: skip it entirely (fields are not compared or touched)
//!   - Grant the public role read access unless the catalog marks it private
//!
//! # Error Handling
//! Only [`verify_connection`] is meant to be fatal; callers run it first and stop
//! on failure. Everything after that is log-and-continue: field, permission and
//! collection failures are logged and recorded in the [`ProvisionReport`], and
//! provisioning moves on. Nothing is rolled back, and a field that failed on a
//! first run stays missing on reruns because the collection is then skipped.

use tracing::{error, info, warn};

use crate::contract::AdminApi;
use crate::error::CmsError;
use crate::schema::{CollectionSpec, FieldDefinition, FieldSpec, PermissionPayload, SchemaCatalog};

#[derive(Debug, Clone, PartialEq)]
pub enum CollectionStatus {
    Created,
    AlreadyExists,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    Created,
    AlreadyExists,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PermissionOutcome {
    Granted,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldReport {
    pub field: String,
    pub outcome: FieldOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionReport {
    pub collection: String,
    pub status: CollectionStatus,
    pub fields: Vec<FieldReport>,
    /// `None` when no permission call was made.
    pub permission: Option<PermissionOutcome>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvisionReport {
    pub collections: Vec<CollectionReport>,
}

impl ProvisionReport {
    pub fn created(&self) -> impl Iterator<Item = &CollectionReport> {
        self.collections
            .iter()
            .filter(|c| c.status == CollectionStatus::Created)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &CollectionReport> {
        self.collections
            .iter()
            .filter(|c| c.status == CollectionStatus::AlreadyExists)
    }

    /// `(collection, field, reason)` for every field that was not created.
    pub fn field_problems(&self) -> Vec<(&str, &str, String)> {
        self.collections
            .iter()
            .flat_map(|c| {
                c.fields.iter().filter_map(move |f| match &f.outcome {
                    FieldOutcome::Created => None,
                    FieldOutcome::AlreadyExists => {
                        Some((c.collection.as_str(), f.field.as_str(), "already exists".to_string()))
                    }
                    FieldOutcome::Failed(reason) => {
                        Some((c.collection.as_str(), f.field.as_str(), reason.clone()))
                    }
                })
            })
            .collect()
    }
}

/// Authentication check. The only step whose failure should stop a command.
pub async fn verify_connection<A: AdminApi>(api: &A) -> Result<(), CmsError> {
    match api.current_user().await {
        Ok(_) => {
            info!("[SETUP] Connected to Directus");
            Ok(())
        }
        Err(e) => {
            error!(error = ?e, "[SETUP][ERROR] Failed to connect to Directus");
            Err(e)
        }
    }
}

/// Any error, whatever the status, means "does not exist".
pub async fn collection_exists<A: AdminApi>(api: &A, collection: &str) -> bool {
    api.read_collection(collection).await.is_ok()
}

/// Creates the collection and its fields unless the collection is already there.
pub async fn ensure_collection<A: AdminApi>(api: &A, spec: &CollectionSpec) -> CollectionReport {
    let mut report = CollectionReport {
        collection: spec.name.clone(),
        status: CollectionStatus::AlreadyExists,
        fields: Vec::new(),
        permission: None,
    };

    if collection_exists(api, &spec.name).await {
        info!(collection = %spec.name, "[SETUP] Collection already exists, skipping");
        return report;
    }

    info!(collection = %spec.name, singleton = spec.singleton, "[SETUP] Creating collection");
    if let Err(e) = api.create_collection(&spec.payload()).await {
        error!(collection = %spec.name, error = ?e, "[SETUP][ERROR] create_collection failed");
        report.status = CollectionStatus::Failed(e.to_string());
        return report;
    }
    report.status = CollectionStatus::Created;

    for definition in spec.definitions() {
        let outcome = create_field(api, &spec.name, &definition).await;
        report.fields.push(FieldReport {
            field: definition.field,
            outcome,
        });
    }

    info!(
        collection = %spec.name,
        fields = report.fields.len(),
        "[SETUP] Collection created"
    );
    report
}

/// One field-creation call; failures are logged and returned, never raised.
pub async fn create_field<A: AdminApi>(
    api: &A,
    collection: &str,
    definition: &FieldDefinition,
) -> FieldOutcome {
    info!(collection, field = %definition.field, "[SETUP] Adding field");
    match api.create_field(collection, definition).await {
        Ok(()) => FieldOutcome::Created,
        Err(e) if e.is_already_exists() => {
            warn!(collection, field = %definition.field, error = %e, "[SETUP] Field already exists");
            FieldOutcome::AlreadyExists
        }
        Err(e) => {
            warn!(collection, field = %definition.field, error = %e, "[SETUP] Field may already exist");
            FieldOutcome::Failed(e.to_string())
        }
    }
}

/// Grants the public role read access to every field. No prior check for an existing rule.
pub async fn grant_public_read<A: AdminApi>(api: &A, collection: &str) -> PermissionOutcome {
    info!(collection, "[SETUP] Setting public read permission");
    match api
        .create_permission(&PermissionPayload::public_read(collection))
        .await
    {
        Ok(()) => PermissionOutcome::Granted,
        Err(e) => {
            warn!(collection, error = %e, "[SETUP] Permission may already exist");
            PermissionOutcome::Failed(e.to_string())
        }
    }
}

/// Provisions every collection of the catalog, in order.
///
/// Call [`verify_connection`] first; this function never fails as a whole.
pub async fn provision_schema<A: AdminApi>(api: &A, catalog: &SchemaCatalog) -> ProvisionReport {
    info!(
        collections = catalog.collections.len(),
        "[SETUP] Starting schema provisioning"
    );
    let mut report = ProvisionReport::default();

    for spec in &catalog.collections {
        let mut collection_report = ensure_collection(api, spec).await;

        let failed = matches!(collection_report.status, CollectionStatus::Failed(_));
        if spec.public_read && !failed {
            collection_report.permission = Some(grant_public_read(api, &spec.name).await);
        }

        report.collections.push(collection_report);
    }

    info!(
        created = report.created().count(),
        skipped = report.skipped().count(),
        "[SETUP] Schema provisioning finished"
    );
    report
}

/// Adds one field to an existing collection.
pub async fn add_field<A: AdminApi>(api: &A, collection: &str, spec: &FieldSpec) -> FieldOutcome {
    create_field(api, collection, &spec.definition()).await
}

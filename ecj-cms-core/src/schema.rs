//! # schema: collection and field definitions
//!
//! Two layers live here:
//!
//! - **Wire payloads** ([`FieldDefinition`], [`CollectionPayload`], [`PermissionPayload`]):
//!   the exact JSON bodies Directus expects on `POST /fields/{collection}`,
//!   `POST /collections` and `POST /permissions`.
//! - **Catalog** ([`SchemaCatalog`], [`CollectionSpec`], [`FieldSpec`]): a compact,
//!   declarative description of the site's collections, loaded from YAML. The
//!   built-in catalog is embedded from `catalog/schema.yaml`; operators can
//!   supply their own file through the CLI.
//!
//! Changing the site schema means editing the YAML table, not provisioning code.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CmsError;

const BUILTIN_SCHEMA: &str = include_str!("../catalog/schema.yaml");

/// Directus storage type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Text,
    Uuid,
    Boolean,
    Integer,
    Decimal,
}

impl FieldType {
    /// Admin-UI interface used when the catalog does not name one.
    fn default_interface(self) -> &'static str {
        match self {
            FieldType::String | FieldType::Integer | FieldType::Decimal => "input",
            FieldType::Text => "input-multiline",
            FieldType::Uuid => "file-image",
            FieldType::Boolean => "boolean",
        }
    }
}

/// Body of `POST /fields/{collection}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub field: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub meta: FieldMeta,
    pub schema: FieldSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMeta {
    pub interface: String,
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
    pub width: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Body of `POST /collections`. Fields are added afterwards, one call each.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionPayload {
    pub collection: String,
    pub meta: CollectionMeta,
    pub schema: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionMeta {
    pub icon: String,
    pub note: Option<String>,
    pub singleton: bool,
}

/// Body of `POST /permissions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermissionPayload {
    /// `None` is the public (unauthenticated) role.
    pub role: Option<String>,
    pub collection: String,
    pub action: String,
    pub fields: Vec<String>,
}

impl PermissionPayload {
    /// Public read of every field.
    pub fn public_read(collection: &str) -> Self {
        Self {
            role: None,
            collection: collection.to_string(),
            action: "read".to_string(),
            fields: vec!["*".to_string()],
        }
    }
}

/// One dropdown option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    pub value: String,
}

/// Catalog form of a field. Omitted keys fall back to the usual admin-UI defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldSpec {
    pub field: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub interface: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_width")]
    pub width: String,
    #[serde(default)]
    pub note: Option<String>,
    /// Turns the field into a `select-dropdown` unless `interface` says otherwise.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Extra interface options, merged with `choices`.
    #[serde(default)]
    pub options: Option<Map<String, Value>>,
    #[serde(default)]
    pub default: Option<Value>,
}

fn default_width() -> String {
    "half".to_string()
}

impl FieldSpec {
    /// Expands the catalog entry into the payload Directus accepts.
    pub fn definition(&self) -> FieldDefinition {
        let interface = match (&self.interface, self.choices.is_empty()) {
            (Some(interface), _) => interface.clone(),
            (None, false) => "select-dropdown".to_string(),
            (None, true) => self.field_type.default_interface().to_string(),
        };

        let mut options = self.options.clone().unwrap_or_default();
        if !self.choices.is_empty() {
            let choices = self
                .choices
                .iter()
                .map(|c| serde_json::json!({ "text": c.text, "value": c.value }))
                .collect();
            options.insert("choices".to_string(), Value::Array(choices));
        }

        FieldDefinition {
            field: self.field.clone(),
            field_type: self.field_type,
            meta: FieldMeta {
                interface,
                required: self.required,
                width: self.width.clone(),
                note: self.note.clone(),
                options: (!options.is_empty()).then_some(Value::Object(options)),
            },
            schema: FieldSchema {
                default_value: self.default.clone(),
            },
        }
    }
}

/// Catalog form of a collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionSpec {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub singleton: bool,
    /// Grant the public role read access after provisioning.
    #[serde(default = "default_public_read")]
    pub public_read: bool,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

fn default_public_read() -> bool {
    true
}

impl CollectionSpec {
    pub fn payload(&self) -> CollectionPayload {
        CollectionPayload {
            collection: self.name.clone(),
            meta: CollectionMeta {
                icon: self.icon.clone().unwrap_or_else(|| "box".to_string()),
                note: self.note.clone(),
                singleton: self.singleton,
            },
            schema: Map::new(),
        }
    }

    pub fn definitions(&self) -> Vec<FieldDefinition> {
        self.fields.iter().map(FieldSpec::definition).collect()
    }
}

/// A field added to an already-provisioned collection after the fact.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldAddition {
    pub collection: String,
    pub definition: FieldSpec,
}

/// The full site schema, in provisioning order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchemaCatalog {
    pub collections: Vec<CollectionSpec>,
    #[serde(default)]
    pub additions: Vec<FieldAddition>,
}

impl SchemaCatalog {
    /// The schema shipped with the crate.
    pub fn builtin() -> Result<Self, CmsError> {
        Self::from_yaml(BUILTIN_SCHEMA)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, CmsError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn collection(&self, name: &str) -> Option<&CollectionSpec> {
        self.collections.iter().find(|c| c.name == name)
    }

    pub fn addition(&self, collection: &str, field: &str) -> Option<&FieldAddition> {
        self.additions
            .iter()
            .find(|a| a.collection == collection && a.definition.field == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(yaml: &str) -> FieldSpec {
        serde_yaml::from_str(yaml).expect("valid field spec")
    }

    #[test]
    fn required_string_field_matches_directus_payload() {
        let def = spec("{ field: site_name, type: string, required: true, default: ECJ Tire Supply }")
            .definition();
        assert_eq!(
            serde_json::to_value(&def).unwrap(),
            json!({
                "field": "site_name",
                "type": "string",
                "meta": { "interface": "input", "required": true, "width": "half" },
                "schema": { "default_value": "ECJ Tire Supply" }
            })
        );
    }

    #[test]
    fn choices_become_a_dropdown() {
        let def = spec(
            r#"
field: status
type: string
choices:
  - { text: Published, value: published }
  - { text: Draft, value: draft }
default: published
"#,
        )
        .definition();
        assert_eq!(def.meta.interface, "select-dropdown");
        assert_eq!(
            def.meta.options,
            Some(json!({ "choices": [
                { "text": "Published", "value": "published" },
                { "text": "Draft", "value": "draft" }
            ]}))
        );
    }

    #[test]
    fn optional_meta_is_omitted_from_the_payload() {
        let def = spec("{ field: logo, type: uuid }").definition();
        assert_eq!(
            serde_json::to_value(&def).unwrap(),
            json!({
                "field": "logo",
                "type": "uuid",
                "meta": { "interface": "file-image", "width": "half" },
                "schema": {}
            })
        );
    }

    #[test]
    fn collection_payload_defaults_icon_and_empty_schema() {
        let collection: CollectionSpec = serde_yaml::from_str("{ name: things }").unwrap();
        assert!(collection.public_read);
        assert_eq!(
            serde_json::to_value(collection.payload()).unwrap(),
            json!({
                "collection": "things",
                "meta": { "icon": "box", "note": null, "singleton": false },
                "schema": {}
            })
        );
    }

    #[test]
    fn public_read_permission_targets_the_public_role() {
        assert_eq!(
            serde_json::to_value(PermissionPayload::public_read("tires")).unwrap(),
            json!({ "role": null, "collection": "tires", "action": "read", "fields": ["*"] })
        );
    }
}

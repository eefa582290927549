use crate::record::RecordType;
use indexmap::IndexMap;
use prism_domain::schema::{FieldSchema, LogicalType, ModelSchema};
use prism_kernel::ShapeError;
use serde::{Deserialize, Serialize};
use std::io::Read;
use strum::IntoEnumIterator;

/// Field entry of a catalog table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogField {
    #[serde(rename = "type")]
    pub ty: LogicalType,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_model: Option<String>,
}

/// Serializable schema tables: record type name to field name to field entry.
///
/// ```json
/// { "Contract": { "key": { "type": "str" }, "recipient": { "type": "RecipientProfile", "isOptional": true } } }
/// ```
///
/// Table order is preserved and defines field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    types: IndexMap<String, IndexMap<String, CatalogField>>,
}

impl Catalog {
    /// The built-in record types.
    pub fn builtin() -> Self {
        RecordType::iter().map(RecordType::schema).collect()
    }

    pub fn from_json(raw: &str) -> Result<Self, ShapeError> {
        serde_json::from_str(raw).map_err(|e| ShapeError::validation(format!("Invalid catalog: {e}")))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, ShapeError> {
        serde_json::from_reader(reader)
            .map_err(|e| ShapeError::validation(format!("Invalid catalog: {e}")))
    }

    pub fn to_json_pretty(&self) -> Result<String, ShapeError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ShapeError::validation(format!("Catalog serialization failed: {e}")))
    }

    pub fn insert(&mut self, schema: &ModelSchema) {
        let fields = schema
            .fields()
            .iter()
            .map(|f| {
                let entry = CatalogField {
                    ty: f.ty.clone(),
                    is_optional: f.is_optional,
                    is_list: f.is_list,
                    nested_model: f.nested_model.clone(),
                };
                (f.name.clone(), entry)
            })
            .collect();
        self.types.insert(schema.name().to_owned(), fields);
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Materializes every table into a [`ModelSchema`], in catalog order.
    pub fn schemas(&self) -> impl Iterator<Item = ModelSchema> + '_ {
        self.types.iter().map(|(type_name, fields)| {
            let fields = fields.iter().map(|(name, entry)| {
                let field = FieldSchema::new(name.as_str(), entry.ty.clone())
                    .optional(entry.is_optional)
                    .list(entry.is_list);
                match &entry.nested_model {
                    Some(model) => field.nested_model(model.as_str()),
                    None => field,
                }
            });
            ModelSchema::new(type_name.as_str(), fields)
        })
    }
}

impl FromIterator<ModelSchema> for Catalog {
    fn from_iter<I: IntoIterator<Item = ModelSchema>>(iter: I) -> Self {
        let mut catalog = Self::default();
        for schema in iter {
            catalog.insert(&schema);
        }
        catalog
    }
}

use prism_domain::schema::FieldSchema;
use prism_domain::shape::FieldSpec;
use serde::Serialize;

/// A shape resolved against one record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedModel {
    pub model_name: String,
    /// Output fields in projection order, unique by alias.
    pub fields: Vec<GeneratedField>,
    pub is_flat: bool,
    pub is_flat_lists: bool,
}

/// One output field: what was requested, what the schema declares, and where it lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedField {
    pub field: FieldSchema,
    pub spec: FieldSpec,
    /// Output key: the explicit alias, else the canonical field name.
    pub alias: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested_model: Option<Box<GeneratedModel>>,
}

impl GeneratedModel {
    pub fn field(&self, alias: &str) -> Option<&GeneratedField> {
        self.fields.iter().find(|f| f.alias == alias)
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.alias.as_str())
    }
}

impl GeneratedField {
    /// Source key in the raw payload.
    pub fn source_key(&self) -> &str {
        &self.field.name
    }

    pub fn nested(&self) -> Option<&GeneratedModel> {
        self.nested_model.as_deref()
    }
}

use crate::FIELD_LISTING_LIMIT;
use crate::catalog::Catalog;
use crate::record::RecordType;
use fxhash::FxHashMap;
use prism_domain::schema::{FieldSchema, ModelSchema};
use prism_kernel::ShapeError;
use strum::IntoEnumIterator;
use tracing::debug;

/// Immutable lookup of record-type schemas.
///
/// Built once, either from the built-in [`RecordType`] tables or from a validated [`Catalog`],
/// and then shared read-only (typically behind an `Arc`).
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: FxHashMap<String, ModelSchema>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SchemaRegistry {
    /// Registry over the built-in record types.
    pub fn builtin() -> Self {
        let schemas = RecordType::iter()
            .map(|ty| (ty.name().to_owned(), ty.schema()))
            .collect::<FxHashMap<_, _>>();
        debug!(types = schemas.len(), "Built-in schema registry ready");
        Self { schemas }
    }

    /// Registry over an external catalog.
    ///
    /// Every nested reference, whether an explicit `nestedModel` or a non-primitive `type`,
    /// must name a type declared in the same catalog.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, ShapeError> {
        let schemas = catalog
            .schemas()
            .map(|schema| (schema.name().to_owned(), schema))
            .collect::<FxHashMap<_, _>>();
        let registry = Self { schemas };
        registry.check_references()?;
        debug!(types = registry.schemas.len(), "Catalog schema registry ready");
        Ok(registry)
    }

    fn check_references(&self) -> Result<(), ShapeError> {
        let mut names: Vec<&String> = self.schemas.keys().collect();
        names.sort_unstable();

        for name in names {
            let schema = &self.schemas[name];
            for field in schema.fields() {
                let Some(target) = field.nested_model_name() else {
                    continue;
                };
                if !self.schemas.contains_key(target) {
                    return Err(ShapeError::validation(format!(
                        "Field \"{}\" on model \"{}\" references unknown model \"{target}\"",
                        field.name, name
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn get_schema(&self, model_name: &str) -> Result<&ModelSchema, ShapeError> {
        self.schemas
            .get(model_name)
            .ok_or_else(|| ShapeError::validation(format!("Unknown model: {model_name}")))
    }

    /// Looks up one field; the error for an unknown field lists what the type does declare.
    pub fn get_field(&self, model_name: &str, field_name: &str) -> Result<&FieldSchema, ShapeError> {
        let schema = self.get_schema(model_name)?;
        schema.field(field_name).ok_or_else(|| unknown_field(schema, field_name))
    }

    /// Field names of a type, sorted alphabetically.
    pub fn list_field_names(&self, model_name: &str) -> Result<Vec<&str>, ShapeError> {
        Ok(self.get_schema(model_name)?.sorted_field_names())
    }

    pub fn contains(&self, model_name: &str) -> bool {
        self.schemas.contains_key(model_name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

fn unknown_field(schema: &ModelSchema, field_name: &str) -> ShapeError {
    let mut message =
        format!("Field \"{field_name}\" does not exist on model \"{}\".", schema.name());

    let available = schema.sorted_field_names();
    if !available.is_empty() {
        let shown = &available[..available.len().min(FIELD_LISTING_LIMIT)];
        message.push_str(" Available fields: ");
        message.push_str(&shown.join(", "));
        if available.len() > shown.len() {
            message.push_str(&format!(", ... ({} more)", available.len() - shown.len()));
        }
    }

    ShapeError::validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_model() {
        let err = SchemaRegistry::builtin().get_schema("Widget").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.message(), "Unknown model: Widget");
    }

    #[test]
    fn unknown_field_lists_bounded_names() {
        let registry = SchemaRegistry::builtin();
        let err = registry.get_field("Contract", "not_a_field").unwrap_err();
        let message = err.message();

        assert!(message.starts_with(r#"Field "not_a_field" does not exist on model "Contract". Available fields: "#));
        assert!(message.contains("award_date, awarding_agency"));

        let total = registry.get_schema("Contract").unwrap().len();
        assert!(total > FIELD_LISTING_LIMIT);
        assert!(message.ends_with(&format!(", ... ({} more)", total - FIELD_LISTING_LIMIT)));
    }

    #[test]
    fn short_listing_has_no_remainder() {
        let err = SchemaRegistry::builtin().get_field("ParentAward", "uei").unwrap_err();
        assert_eq!(
            err.message(),
            r#"Field "uei" does not exist on model "ParentAward". Available fields: key, piid"#
        );
    }

    #[test]
    fn field_names_are_sorted() {
        let registry = SchemaRegistry::builtin();
        assert_eq!(
            registry.list_field_names("Agency").unwrap(),
            ["abbreviation", "code", "department", "name"]
        );
    }

    #[test]
    fn builtin_references_resolve() {
        let registry = SchemaRegistry::builtin();
        registry.check_references().unwrap();
        assert_eq!(registry.len(), RecordType::iter().count());
        assert!(registry.type_names().contains(&"IDV"));
    }

    #[test]
    fn catalog_with_dangling_reference_is_rejected() {
        let catalog = Catalog::from_json(
            r#"{ "Widget": { "id": { "type": "int" }, "owner": { "type": "Person" } } }"#,
        )
        .unwrap();

        let err = SchemaRegistry::from_catalog(&catalog).unwrap_err();
        assert_eq!(
            err.message(),
            r#"Field "owner" on model "Widget" references unknown model "Person""#
        );
    }

    #[test]
    fn catalog_with_blank_override_falls_back_to_type() {
        let catalog = Catalog::from_json(
            r#"{
                "Widget": { "meta": { "type": "dict", "nestedModel": " " } },
                "Empty": {}
            }"#,
        )
        .unwrap();

        let registry = SchemaRegistry::from_catalog(&catalog).unwrap();
        assert_eq!(registry.get_field("Widget", "meta").unwrap().nested_model_name(), None);
        assert!(registry.get_schema("Empty").unwrap().is_empty());
    }
}

//! # Model factory
//!
//! Walks raw JSON payloads against a [`GeneratedModel`] and builds [`ShapedObject`]s: only the
//! requested fields, renamed to their aliases, with dates and decimal-like values coerced.
//!
//! Projection is forgiving about partial payloads (absent keys are skipped, a non-array under a
//! list field becomes `[]`) and strict about structure (a non-object where a record is expected
//! is an instantiation error).

mod shaped;

pub use shaped::{Shaped, ShapedObject};

use prism_domain::config::{DEFAULT_JOINER, FlattenConfig};
use prism_domain::schema::LogicalType;
use prism_domain::shape::ShapeSpec;
use prism_generator::{DescriptorGenerator, GeneratedField, GeneratedModel};
use prism_kernel::coerce::{parse_date, parse_datetime, parse_decimal};
use prism_kernel::{ShapeError, unflatten};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;

/// Builds shaped records from raw payloads.
#[derive(Debug)]
pub struct ModelFactory {
    generator: Arc<DescriptorGenerator>,
    joiner: String,
}

impl ModelFactory {
    pub fn new(generator: Arc<DescriptorGenerator>) -> Self {
        Self { generator, joiner: DEFAULT_JOINER.to_owned() }
    }

    pub fn from_config(generator: Arc<DescriptorGenerator>, config: &FlattenConfig) -> Self {
        Self { generator, joiner: config.joiner.clone() }
    }

    /// Key joiner used to unflatten payloads of flat shapes.
    #[must_use]
    pub fn with_joiner(mut self, joiner: impl Into<String>) -> Self {
        self.joiner = joiner.into();
        self
    }

    pub fn generator(&self) -> &Arc<DescriptorGenerator> {
        &self.generator
    }

    /// Projects a single record (context `root`).
    pub fn create_one(&self, model_name: &str, spec: &ShapeSpec, raw: &Value) -> Result<ShapedObject, ShapeError> {
        let descriptor = self.generator.generate(model_name, spec)?;
        self.project_top(&descriptor, raw, "root")
    }

    /// Projects a page of records against one descriptor (context `index N`).
    ///
    /// The first malformed item aborts the whole call; no partial result is returned.
    pub fn create_list(
        &self,
        model_name: &str,
        spec: &ShapeSpec,
        raw_items: &[Value],
    ) -> Result<Vec<ShapedObject>, ShapeError> {
        let descriptor = self.generator.generate(model_name, spec)?;
        let items = raw_items
            .iter()
            .enumerate()
            .map(|(index, raw)| self.project_top(&descriptor, raw, &format!("index {index}")))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(model = model_name, items = items.len(), "Projected list");
        Ok(items)
    }

    /// Projects against an already resolved descriptor, unflattening first when it is flat.
    pub fn create_from_descriptor(
        &self,
        descriptor: &GeneratedModel,
        raw: &Value,
        context: &str,
    ) -> Result<ShapedObject, ShapeError> {
        self.project_top(descriptor, raw, context)
    }

    fn project_top(&self, descriptor: &GeneratedModel, raw: &Value, context: &str) -> Result<ShapedObject, ShapeError> {
        let raw = if descriptor.is_flat {
            Cow::Owned(unflatten(raw, &self.joiner))
        } else {
            Cow::Borrowed(raw)
        };
        project(descriptor, &raw, context)
    }
}

fn project(model: &GeneratedModel, raw: &Value, context: &str) -> Result<ShapedObject, ShapeError> {
    let Value::Object(source) = raw else {
        return Err(ShapeError::instantiation(
            format!(
                "Expected object for model \"{}\" at {context}, got {}",
                model.model_name,
                kind_of(raw)
            ),
            model.model_name.as_str(),
            context,
        )
        .with_mismatch("object", kind_of(raw)));
    };

    let mut shaped = ShapedObject::with_capacity(model.fields.len());
    for field in &model.fields {
        let key = field.source_key();
        // Absent keys are skipped; present nulls are kept.
        let Some(value) = source.get(key) else {
            continue;
        };
        let value = project_field(model, field, value, &format!("{context}.{key}"))?;
        shaped.insert(field.alias.as_str(), value);
    }
    Ok(shaped)
}

fn project_field(
    model: &GeneratedModel,
    field: &GeneratedField,
    raw: &Value,
    context: &str,
) -> Result<Shaped, ShapeError> {
    let schema = &field.field;

    match (field.nested(), schema.is_list) {
        (Some(nested), true) => {
            let Value::Array(items) = raw else {
                return Ok(Shaped::List(Vec::new()));
            };
            items
                .iter()
                .enumerate()
                .map(|(i, item)| project(nested, item, &format!("{context}[{i}]")).map(Shaped::Object))
                .collect::<Result<Vec<_>, _>>()
                .map(Shaped::List)
        }
        (Some(nested), false) => match raw {
            Value::Null => Ok(Shaped::Null),
            Value::Object(_) => project(nested, raw, context).map(Shaped::Object),
            other => Err(ShapeError::instantiation(
                format!("Expected object for nested field \"{}\" at {context}", schema.name),
                model.model_name.as_str(),
                context,
            )
            .with_field(schema.name.as_str())
            .with_mismatch(nested.model_name.as_str(), kind_of(other))),
        },
        (None, true) => match raw {
            Value::Array(items) => Ok(Shaped::List(items.iter().map(|item| coerce(&schema.ty, item)).collect())),
            _ => Ok(Shaped::List(Vec::new())),
        },
        (None, false) => Ok(coerce(&schema.ty, raw)),
    }
}

/// Scalar coercion by logical type. Never fails; unparseable temporal or decimal input is null.
fn coerce(ty: &LogicalType, raw: &Value) -> Shaped {
    if raw.is_null() {
        return Shaped::Null;
    }
    match ty {
        LogicalType::Date => parse_date(raw).map_or(Shaped::Null, Shaped::Timestamp),
        LogicalType::DateTime => parse_datetime(raw).map_or(Shaped::Null, Shaped::Timestamp),
        LogicalType::Decimal => parse_decimal(raw).map_or(Shaped::Null, Shaped::Decimal),
        _ => Shaped::Raw(raw.clone()),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

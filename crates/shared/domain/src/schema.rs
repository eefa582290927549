//! Static record-type schemas.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Logical type of a schema field.
///
/// Primitive identifiers are fixed; anything else names another record type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Str,
    Int,
    Float,
    Bool,
    /// Decimal-like numeric kept as text to preserve precision.
    Decimal,
    Date,
    DateTime,
    /// Untyped map.
    Dict,
    /// Fully dynamic value.
    Any,
    /// Another record type, by name.
    Record(String),
}

impl LogicalType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Decimal => "Decimal",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Dict => "dict",
            Self::Any => "Any",
            Self::Record(name) => name,
        }
    }

    pub const fn is_primitive(&self) -> bool {
        !matches!(self, Self::Record(_))
    }

    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }

    pub fn record_name(&self) -> Option<&str> {
        match self {
            Self::Record(name) => Some(name),
            _ => None,
        }
    }
}

impl FromStr for LogicalType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "str" => Self::Str,
            "int" => Self::Int,
            "float" => Self::Float,
            "bool" => Self::Bool,
            "Decimal" => Self::Decimal,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "dict" => Self::Dict,
            "Any" => Self::Any,
            other => Self::Record(other.to_owned()),
        })
    }
}

impl From<&str> for LogicalType {
    fn from(s: &str) -> Self {
        let Ok(ty) = s.parse::<Self>();
        ty
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LogicalType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogicalType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// Static declaration of one field on a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    /// Field name as it appears in payloads and shape strings.
    pub name: String,
    #[serde(rename = "type")]
    pub ty: LogicalType,
    pub is_optional: bool,
    pub is_list: bool,
    /// Explicit nested record type, overriding inference from `ty`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested_model: Option<String>,
}

impl FieldSchema {
    /// A required, scalar field.
    pub fn new(name: impl Into<String>, ty: impl Into<LogicalType>) -> Self {
        Self { name: name.into(), ty: ty.into(), is_optional: false, is_list: false, nested_model: None }
    }

    #[must_use]
    pub const fn optional(mut self, is_optional: bool) -> Self {
        self.is_optional = is_optional;
        self
    }

    #[must_use]
    pub const fn list(mut self, is_list: bool) -> Self {
        self.is_list = is_list;
        self
    }

    #[must_use]
    pub fn nested_model(mut self, model: impl Into<String>) -> Self {
        self.nested_model = Some(model.into());
        self
    }

    /// Record type a nested selection on this field resolves against.
    ///
    /// A non-blank explicit `nested_model` wins; otherwise a non-primitive `ty` names the type.
    pub fn nested_model_name(&self) -> Option<&str> {
        self.nested_model
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .or_else(|| self.ty.record_name())
    }
}

/// A record type with its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    name: String,
    fields: Vec<FieldSchema>,
    index: HashMap<String, usize>,
}

impl ModelSchema {
    /// Builds a schema; a repeated field name replaces the earlier declaration in place.
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = FieldSchema>) -> Self {
        let mut schema = Self { name: name.into(), fields: Vec::new(), index: HashMap::new() };
        for field in fields {
            if let Some(&slot) = schema.index.get(&field.name) {
                schema.fields[slot] = field;
            } else {
                schema.index.insert(field.name.clone(), schema.fields.len());
                schema.fields.push(field);
            }
        }
        schema
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.index.get(name).map(|&slot| &self.fields[slot])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names sorted alphabetically.
    pub fn sorted_field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.iter().map(|f| f.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

//! Parsed shape selections.
//!
//! A shape string such as `key,recipient::vendor(display_name,uei),*` parses into a
//! [`ShapeSpec`]: an ordered tree of [`FieldSpec`] nodes plus [`ShapeFlags`] describing how the
//! source payload is laid out. Flags are attached after parsing and are not part of the grammar.

use bitflags::bitflags;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// The wildcard selector: "all fields declared at this schema level".
pub const WILDCARD: &str = "*";

/// One requested field in a shape string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Field identifier, or [`WILDCARD`].
    pub name: String,
    /// Output rename (`field::alias`). Never set on a wildcard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Child selection from a parenthesized sub-list, in source order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_fields: Option<Vec<Self>>,
    #[serde(default)]
    pub is_wildcard: bool,
}

impl FieldSpec {
    /// A plain field selection without alias or nesting.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), alias: None, nested_fields: None, is_wildcard: false }
    }

    /// A bare `*` selection.
    pub fn wildcard() -> Self {
        Self { name: WILDCARD.to_owned(), alias: None, nested_fields: None, is_wildcard: true }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn with_nested(mut self, nested: Vec<Self>) -> Self {
        self.nested_fields = Some(nested);
        self
    }

    /// `true` for `*`, whether flagged explicitly or only named so.
    pub fn matches_wildcard(&self) -> bool {
        self.is_wildcard || self.name == WILDCARD
    }

    /// Non-empty nested selection, if any. `field()` counts as no nesting.
    pub fn nested(&self) -> Option<&[Self]> {
        self.nested_fields.as_deref().filter(|nested| !nested.is_empty())
    }
}

/// Renders canonical shape syntax: `name[::alias][(nested)]`.
impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(alias) = &self.alias {
            write!(f, "::{alias}")?;
        }
        if let Some(nested) = &self.nested_fields {
            f.write_str("(")?;
            write_list(f, nested)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, fields: &[FieldSpec]) -> fmt::Result {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{field}")?;
    }
    Ok(())
}

bitflags! {
    /// Source payload layout hints carried alongside a parsed shape.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ShapeFlags: u8 {
        /// Nested objects arrive as joined keys (`recipient.display_name`).
        const FLAT = 1 << 0;
        /// List-valued fields are flattened as well.
        const FLAT_LISTS = 1 << 1;
    }
}

impl ShapeFlags {
    #[must_use]
    pub fn from_bools(is_flat: bool, is_flat_lists: bool) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::FLAT, is_flat);
        flags.set(Self::FLAT_LISTS, is_flat_lists);
        flags
    }
}

impl Serialize for ShapeFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for ShapeFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

/// Parsed representation of a shape string plus layout flags.
///
/// The field tree is reference-counted: attaching different flags to a cached parse shares the
/// same tree instead of cloning it.
///
/// Serializes to the canonical `{fields, isFlat, isFlatLists}` payload, which is what descriptor
/// caching keys on. Two specs are equal iff that payload is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeSpec {
    fields: Arc<[FieldSpec]>,
    flags: ShapeFlags,
}

impl ShapeSpec {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields: fields.into(), flags: ShapeFlags::empty() }
    }

    /// Returns a spec sharing this field tree with `flags` attached.
    #[must_use]
    pub fn with_flags(&self, flags: ShapeFlags) -> Self {
        Self { fields: Arc::clone(&self.fields), flags }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub const fn flags(&self) -> ShapeFlags {
        self.flags
    }

    pub const fn is_flat(&self) -> bool {
        self.flags.contains(ShapeFlags::FLAT)
    }

    pub const fn is_flat_lists(&self) -> bool {
        self.flags.contains(ShapeFlags::FLAT_LISTS)
    }

    /// `true` when both specs point at the very same field tree allocation.
    pub fn shares_fields_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }
}

/// Canonical shape string without whitespace. Flags are not part of the syntax.
impl fmt::Display for ShapeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.fields)
    }
}

impl Serialize for ShapeSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ShapeSpec", 3)?;
        state.serialize_field("fields", &*self.fields)?;
        state.serialize_field("isFlat", &self.is_flat())?;
        state.serialize_field("isFlatLists", &self.is_flat_lists())?;
        state.end()
    }
}

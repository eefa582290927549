//! # Schema registry
//!
//! Static knowledge about record types: which fields each type declares, their logical types,
//! and which nested type a field resolves to.
//!
//! * [`RecordType`] is the closed set of built-in record types with their ordered field tables.
//! * [`Catalog`] is the serializable table form, used to load external catalogs from JSON.
//! * [`SchemaRegistry`] is the validated, immutable lookup the descriptor generator resolves
//!   against.
//! * [`presets`] holds named default shapes bound to a base record type.
//!
//! ```rust
//! use prism_schema::SchemaRegistry;
//!
//! let registry = SchemaRegistry::builtin();
//! let field = registry.get_field("Contract", "recipient").unwrap();
//! assert_eq!(field.nested_model_name(), Some("RecipientProfile"));
//! ```

mod catalog;
pub mod presets;
mod record;
mod registry;

pub use catalog::{Catalog, CatalogField};
pub use presets::Preset;
pub use record::RecordType;
pub use registry::SchemaRegistry;

/// Number of field names listed in an unknown-field error before the remainder is summarized.
pub const FIELD_LISTING_LIMIT: usize = 20;

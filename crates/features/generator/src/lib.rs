//! # Descriptor generator
//!
//! Binds a parsed [`ShapeSpec`] to a record type from the [`SchemaRegistry`], producing a
//! [`GeneratedModel`]: the resolved, ordered list of output fields that drives projection.
//!
//! Descriptors are cached per `(record type, shape, flags)` in a bounded FIFO cache, and a
//! cached descriptor is handed back as the very same [`Arc`].

mod cache;
mod model;

pub use cache::FifoCache;
pub use model::{GeneratedField, GeneratedModel};

use indexmap::IndexMap;
use prism_domain::config::{DEFAULT_CACHE_SIZE, DEFAULT_MAX_DEPTH, GeneratorConfig};
use prism_domain::schema::FieldSchema;
use prism_domain::shape::{FieldSpec, ShapeFlags, ShapeSpec};
use prism_kernel::ShapeError;
use prism_schema::SchemaRegistry;
use std::sync::Arc;
use tracing::{debug, trace};

/// Cache identity of a descriptor: the base record type plus the full spec, flags included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DescriptorKey {
    model: String,
    shape: ShapeSpec,
}

/// Resolves shapes against a schema registry.
#[derive(Debug)]
pub struct DescriptorGenerator {
    registry: Arc<SchemaRegistry>,
    cache: Option<FifoCache<DescriptorKey, GeneratedModel>>,
    max_depth: usize,
}

impl DescriptorGenerator {
    /// Generator with the default cache size and depth limit.
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            registry,
            cache: Some(FifoCache::new(DEFAULT_CACHE_SIZE)),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn from_config(registry: Arc<SchemaRegistry>, config: &GeneratorConfig) -> Self {
        Self {
            registry,
            cache: config.cache_enabled.then(|| FifoCache::new(config.cache_size)),
            max_depth: config.max_depth,
        }
    }

    /// Disables caching: every call rebuilds from scratch.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    pub fn cache_len(&self) -> usize {
        self.cache.as_ref().map_or(0, FifoCache::len)
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Resolves `spec` against `model_name`, reusing a cached descriptor when one exists.
    pub fn generate(&self, model_name: &str, spec: &ShapeSpec) -> Result<Arc<GeneratedModel>, ShapeError> {
        let Some(cache) = &self.cache else {
            return self.build(model_name, spec.fields(), spec.flags(), 0).map(Arc::new);
        };

        let key = DescriptorKey { model: model_name.to_owned(), shape: spec.clone() };
        if let Some(model) = cache.get(&key) {
            trace!(model = model_name, "Descriptor cache hit");
            return Ok(model);
        }

        let model = Arc::new(self.build(model_name, spec.fields(), spec.flags(), 0)?);
        debug!(model = model_name, fields = model.fields.len(), "Descriptor cache miss; built");
        Ok(cache.insert(key, model))
    }

    fn build(
        &self,
        model_name: &str,
        fields: &[FieldSpec],
        flags: ShapeFlags,
        depth: usize,
    ) -> Result<GeneratedModel, ShapeError> {
        let schema = self.registry.get_schema(model_name)?;
        let mut by_alias: IndexMap<String, GeneratedField> = IndexMap::with_capacity(fields.len());

        for requested in fields {
            if requested.matches_wildcard() {
                if requested.nested().is_some() {
                    return Err(ShapeError::validation(format!(
                        "Wildcard on model \"{model_name}\" cannot have nested fields"
                    )));
                }
                for field in schema.fields() {
                    let generated = self.build_field(model_name, requested, field, depth)?;
                    by_alias.insert(generated.alias.clone(), generated);
                }
            } else {
                let field = self.registry.get_field(model_name, &requested.name)?;
                let generated = self.build_field(model_name, requested, field, depth)?;
                // Existing alias keeps its position and takes the later value.
                by_alias.insert(generated.alias.clone(), generated);
            }
        }

        Ok(GeneratedModel {
            model_name: model_name.to_owned(),
            fields: by_alias.into_values().collect(),
            is_flat: flags.contains(ShapeFlags::FLAT),
            is_flat_lists: flags.contains(ShapeFlags::FLAT_LISTS),
        })
    }

    fn build_field(
        &self,
        model_name: &str,
        requested: &FieldSpec,
        field: &FieldSchema,
        depth: usize,
    ) -> Result<GeneratedField, ShapeError> {
        let alias = requested.alias.clone().unwrap_or_else(|| field.name.clone());

        let nested_model = match requested.nested() {
            Some(nested) => Some(Box::new(self.build_nested(model_name, field, nested, depth + 1)?)),
            None => None,
        };

        Ok(GeneratedField { field: field.clone(), spec: requested.clone(), alias, nested_model })
    }

    fn build_nested(
        &self,
        model_name: &str,
        field: &FieldSchema,
        nested: &[FieldSpec],
        depth: usize,
    ) -> Result<GeneratedModel, ShapeError> {
        if depth > self.max_depth {
            return Err(ShapeError::validation(format!(
                "Shape nesting exceeds maximum depth of {} at field \"{}\" on model \"{model_name}\"",
                self.max_depth, field.name
            )));
        }

        let Some(nested_name) = field.nested_model_name() else {
            return Err(ShapeError::validation(format!(
                "Field \"{}\" on model \"{model_name}\" does not support nested fields.",
                field.name
            )));
        };

        let wildcard_only;
        let nested = match nested {
            [only] if only.matches_wildcard() && only.nested().is_none() => {
                wildcard_only = [FieldSpec::wildcard()];
                &wildcard_only[..]
            }
            _ => nested,
        };

        // Nested levels never carry layout flags.
        self.build(nested_name, nested, ShapeFlags::empty(), depth)
    }
}

//! Facade crate for the Prism projection engine.
//! Re-exports the component crates and wires them together in [`ShapeEngine`].
//! Keep this crate thin: it should compose other crates, not implement projection logic.
//!
//! ## Usage
//! ```rust
//! use prism::ShapeEngine;
//! use serde_json::json;
//!
//! let engine = ShapeEngine::new();
//! let out = engine
//!     .project_one("Contract", "key,recipient::vendor(display_name)", &json!({
//!         "key": "C-1",
//!         "recipient": { "display_name": "Acme", "uei": "U1" }
//!     }))
//!     .unwrap();
//! assert_eq!(out.to_json(), json!({ "key": "C-1", "vendor": { "display_name": "Acme" } }));
//! ```

pub use prism_domain as domain;
pub use prism_factory as factory;
pub use prism_generator as generator;
pub use prism_kernel as kernel;
pub use prism_parser as parser;
pub use prism_schema as schema;

pub use prism_domain::config::EngineConfig;
pub use prism_domain::shape::{FieldSpec, ShapeFlags, ShapeSpec};
pub use prism_factory::{ModelFactory, Shaped, ShapedObject};
pub use prism_generator::{DescriptorGenerator, GeneratedField, GeneratedModel};
pub use prism_kernel::{ShapeError, ShapeErrorExt};
pub use prism_parser::ShapeParser;
pub use prism_schema::{Catalog, Preset, RecordType, SchemaRegistry, presets};

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Parser, registry, generator and factory built from one [`EngineConfig`].
///
/// All methods take `&self`; the engine can be shared across threads behind an [`Arc`].
#[derive(Debug)]
pub struct ShapeEngine {
    config: EngineConfig,
    parser: ShapeParser,
    factory: ModelFactory,
}

impl Default for ShapeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeEngine {
    /// Engine over the built-in catalog with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn from_config(config: EngineConfig) -> Self {
        Self::builder().config(config).build()
    }

    pub fn builder() -> ShapeEngineBuilder {
        ShapeEngineBuilder::default()
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub const fn parser(&self) -> &ShapeParser {
        &self.parser
    }

    pub const fn factory(&self) -> &ModelFactory {
        &self.factory
    }

    pub fn generator(&self) -> &DescriptorGenerator {
        self.factory.generator()
    }

    pub fn registry(&self) -> &SchemaRegistry {
        self.generator().registry()
    }

    pub fn parse(&self, shape: &str) -> Result<Arc<ShapeSpec>, ShapeError> {
        self.parser.parse(shape)
    }

    pub fn parse_with_flags(&self, shape: &str, is_flat: bool, is_flat_lists: bool) -> Result<ShapeSpec, ShapeError> {
        self.parser.parse_with_flags(shape, is_flat, is_flat_lists)
    }

    /// Resolves a shape string against a record type without projecting anything.
    pub fn describe(&self, model_name: &str, shape: &str) -> Result<Arc<GeneratedModel>, ShapeError> {
        let spec = self.parser.parse(shape)?;
        self.generator().generate(model_name, &spec)
    }

    pub fn project_one(&self, model_name: &str, shape: &str, raw: &Value) -> Result<ShapedObject, ShapeError> {
        let spec = self.parser.parse(shape)?;
        self.factory.create_one(model_name, &spec, raw)
    }

    pub fn project_list(
        &self,
        model_name: &str,
        shape: &str,
        raw_items: &[Value],
    ) -> Result<Vec<ShapedObject>, ShapeError> {
        let spec = self.parser.parse(shape)?;
        self.factory.create_list(model_name, &spec, raw_items)
    }

    /// Projects a page of records with a named preset's model and shape.
    pub fn project_preset(&self, preset: &Preset, raw_items: &[Value]) -> Result<Vec<ShapedObject>, ShapeError> {
        self.project_list(preset.model.name(), preset.shape, raw_items)
    }
}

/// Assembles a [`ShapeEngine`]. Unset parts fall back to defaults and the built-in catalog.
#[derive(Debug, Default)]
#[must_use = "call .build() to create the engine"]
pub struct ShapeEngineBuilder {
    config: Option<EngineConfig>,
    registry: Option<Arc<SchemaRegistry>>,
}

impl ShapeEngineBuilder {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Resolves shapes against `registry` instead of the built-in catalog.
    pub fn registry(mut self, registry: Arc<SchemaRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> ShapeEngine {
        let config = self.config.unwrap_or_default();
        let registry = self.registry.unwrap_or_else(|| Arc::new(SchemaRegistry::builtin()));

        let parser = ShapeParser::from_config(&config.parser);
        let generator = Arc::new(DescriptorGenerator::from_config(registry, &config.generator));
        let factory = ModelFactory::from_config(generator, &config.flatten);

        debug!(
            types = factory.generator().registry().len(),
            parser_cache = config.parser.cache_enabled,
            descriptor_cache = config.generator.cache_enabled,
            "Shape engine ready"
        );
        ShapeEngine { config, parser, factory }
    }
}

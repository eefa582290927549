use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Default bound of the descriptor cache.
pub const DEFAULT_CACHE_SIZE: usize = 128;
/// Default limit on nested selection depth during descriptor generation.
pub const DEFAULT_MAX_DEPTH: usize = 32;
/// Default joiner for flat payload keys.
pub const DEFAULT_JOINER: &str = ".";

/// Top-level engine configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfigInner {
    pub parser: ParserConfig,
    pub generator: GeneratorConfig,
    pub flatten: FlattenConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into components.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(from = "EngineConfigInner")]
pub struct EngineConfig {
    inner: Arc<EngineConfigInner>,
}

impl From<EngineConfigInner> for EngineConfig {
    fn from(inner: EngineConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for EngineConfig {
    type Target = EngineConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for EngineConfig {
    fn deref_mut(&mut self) -> &mut EngineConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Shape parser settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Memoize parses by raw shape string (unbounded).
    pub cache_enabled: bool,
}

/// Descriptor generator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub cache_enabled: bool,
    /// Maximum number of cached descriptors; the oldest insertion is evicted first.
    pub cache_size: usize,
    pub max_depth: usize,
}

/// Flat payload handling.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlattenConfig {
    pub joiner: String,
}

/// Logging knobs consumed by applications.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub path: Option<PathBuf>,
}

// --- Default ---

impl Default for ParserConfig {
    fn default() -> Self {
        Self { cache_enabled: true }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { cache_enabled: true, cache_size: DEFAULT_CACHE_SIZE, max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self { joiner: DEFAULT_JOINER.to_owned() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), json: false, path: None }
    }
}

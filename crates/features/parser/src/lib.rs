//! # Shape parser
//!
//! Turns a shape string into a [`ShapeSpec`]:
//!
//! ```text
//! shape      := field_list
//! field_list := field ("," field)*
//! field      := field_name [alias] [nested]
//! field_name := identifier | "*"
//! alias      := "::" identifier
//! nested     := "(" field_list ")"
//! identifier := [A-Za-z_][A-Za-z0-9_]*
//! ```
//!
//! Whitespace is allowed between any two tokens. Successful parses are memoized by the trimmed
//! input, so repeated parses of the same string hand back the same [`Arc`].
//!
//! ```rust
//! use prism_parser::ShapeParser;
//!
//! let parser = ShapeParser::new();
//! let spec = parser.parse("key, recipient::vendor(display_name), *").unwrap();
//! assert_eq!(spec.to_string(), "key,recipient::vendor(display_name),*");
//! ```

mod cursor;

use crate::cursor::Cursor;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use prism_domain::config::ParserConfig;
use prism_domain::shape::{ShapeFlags, ShapeSpec};
use prism_kernel::ShapeError;
use std::sync::Arc;
use tracing::trace;

/// Recursive-descent shape parser with an unbounded raw-string cache.
///
/// The cache is keyed by the trimmed input only; layout flags never take part in it.
#[derive(Debug)]
pub struct ShapeParser {
    cache_enabled: bool,
    cache: RwLock<FxHashMap<String, Arc<ShapeSpec>>>,
}

impl Default for ShapeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeParser {
    /// Parser with caching enabled.
    pub fn new() -> Self {
        Self::with_cache(true)
    }

    pub fn with_cache(cache_enabled: bool) -> Self {
        Self { cache_enabled, cache: RwLock::new(FxHashMap::default()) }
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        Self::with_cache(config.cache_enabled)
    }

    pub const fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Parses a shape string.
    ///
    /// Surrounding whitespace is ignored. A previously parsed string returns the cached
    /// instance without re-parsing.
    pub fn parse(&self, shape: &str) -> Result<Arc<ShapeSpec>, ShapeError> {
        let input = shape.trim();
        if input.is_empty() {
            return Err(ShapeError::parse("Shape string cannot be empty", None));
        }

        if self.cache_enabled
            && let Some(spec) = self.cache.read().get(input)
        {
            trace!(shape = input, "Shape cache hit");
            return Ok(Arc::clone(spec));
        }

        let spec = Arc::new(parse_shape(input)?);

        if !self.cache_enabled {
            return Ok(spec);
        }
        let mut cache = self.cache.write();
        Ok(Arc::clone(cache.entry(input.to_owned()).or_insert(spec)))
    }

    /// Parses (or reuses the cached parse) and attaches layout flags.
    ///
    /// The result shares the cached field tree.
    pub fn parse_with_flags(
        &self,
        shape: &str,
        is_flat: bool,
        is_flat_lists: bool,
    ) -> Result<ShapeSpec, ShapeError> {
        let spec = self.parse(shape)?;
        Ok(spec.with_flags(ShapeFlags::from_bools(is_flat, is_flat_lists)))
    }

    /// Checks syntax only; the parse result is discarded (but still cached).
    pub fn validate_syntax(&self, shape: &str) -> Result<(), ShapeError> {
        self.parse(shape).map(drop)
    }

    pub fn cache_len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn clear_cache(&self) {
        self.cache.write().clear();
    }
}

fn parse_shape(input: &str) -> Result<ShapeSpec, ShapeError> {
    let mut cursor = Cursor::new(input);
    let fields = cursor.field_list()?;

    cursor.skip_whitespace();
    if let Some(ch) = cursor.peek() {
        return Err(cursor.unexpected(ch));
    }

    Ok(ShapeSpec::new(fields))
}

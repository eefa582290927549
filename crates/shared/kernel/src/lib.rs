//! Kernel utilities shared across the engine crates.
//! Keep this crate lightweight; it owns the engine error type, config loading and the pure
//! payload helpers (scalar coercion, unflattening) the factory consumes.
//!
//! ## Errors
//! Every fallible engine operation returns [`ShapeError`]:
//! ```rust
//! use prism_kernel::ShapeError;
//!
//! let err = ShapeError::validation("Unknown model: Widget");
//! assert_eq!(err.kind(), "Validation");
//! assert_eq!(err.message(), "Unknown model: Widget");
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use prism_kernel::config::load_config;
//! use prism_kernel::domain::config::EngineConfigInner;
//!
//! let cfg: EngineConfigInner = load_config(Some("prism.toml")).unwrap();
//! ```
pub mod coerce;
pub mod config;
pub mod error;
pub mod unflatten;

pub use error::{ShapeError, ShapeErrorExt};
pub use prism_domain as domain;
pub use unflatten::unflatten;

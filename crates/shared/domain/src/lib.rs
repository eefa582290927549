//! # Domain Models
//!
//! Pure data types shared by every engine component: parsed shapes, record-type schemas and
//! engine configuration. Dependencies are limited to `serde` and `bitflags`.
//! Keep it lean: no I/O, no caching, no resolution logic.

pub mod config;
pub mod schema;
pub mod shape;

//! The engine-wide error type.
//!
//! Every failure the engine reports falls into one of three categories: the shape string could
//! not be parsed, the shape does not fit the schema, or a raw payload could not be projected.

use prism_derive::prism_error;
use std::borrow::Cow;

#[prism_error]
#[derive(Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Malformed shape string.
    #[error("Shape parse error{}: {message}", format_context(.context))]
    Parse {
        message: Cow<'static, str>,
        /// Character offset into the trimmed shape string, when known.
        position: Option<usize>,
        context: Option<Cow<'static, str>>,
    },

    /// Unknown record type or field, or a nesting the schema cannot satisfy.
    #[error("Schema validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Raw payload did not match the resolved descriptor.
    #[error("Model instantiation error{}: {message}", format_context(.context))]
    Instantiation {
        message: Cow<'static, str>,
        /// Record type being projected.
        model: String,
        /// Context path such as `root`, `index 3` or `root.recipient[0]`.
        path: String,
        field: Option<String>,
        expected: Option<String>,
        actual: Option<String>,
        context: Option<Cow<'static, str>>,
    },
}

impl ShapeError {
    pub fn parse(message: impl Into<Cow<'static, str>>, position: Option<usize>) -> Self {
        Self::Parse { message: message.into(), position, context: None }
    }

    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    pub fn instantiation(
        message: impl Into<Cow<'static, str>>,
        model: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self::Instantiation {
            message: message.into(),
            model: model.into(),
            path: path.into(),
            field: None,
            expected: None,
            actual: None,
            context: None,
        }
    }

    /// Names the offending field. No-op outside `Instantiation`.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        if let Self::Instantiation { field, .. } = &mut self {
            *field = Some(name.into());
        }
        self
    }

    /// Records the expected vs. actual value kinds. No-op outside `Instantiation`.
    #[must_use]
    pub fn with_mismatch(mut self, want: impl Into<String>, got: impl Into<String>) -> Self {
        if let Self::Instantiation { expected, actual, .. } = &mut self {
            *expected = Some(want.into());
            *actual = Some(got.into());
        }
        self
    }

    /// The bare message, without category prefix or context.
    pub fn message(&self) -> &str {
        match self {
            Self::Parse { message, .. }
            | Self::Validation { message, .. }
            | Self::Instantiation { message, .. } => message,
        }
    }

    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::Parse { position, .. } => *position,
            _ => None,
        }
    }

    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub const fn is_instantiation(&self) -> bool {
        matches!(self, Self::Instantiation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_category_and_context() {
        let err: Result<(), _> = Err(ShapeError::parse("Shape string cannot be empty", None));
        let err = err.context("Parsing preset").unwrap_err();

        assert_eq!(err.kind(), "Parse");
        assert_eq!(err.to_string(), "Shape parse error (Parsing preset): Shape string cannot be empty");
        assert_eq!(err.message(), "Shape string cannot be empty");
    }

    #[test]
    fn instantiation_details_are_attached() {
        let err = ShapeError::instantiation("Expected object", "Contract", "root.recipient")
            .with_field("recipient")
            .with_mismatch("object", "string");

        let ShapeError::Instantiation { model, path, field, expected, actual, .. } = &err else {
            panic!("expected instantiation error, got {err:?}");
        };
        assert_eq!(model, "Contract");
        assert_eq!(path, "root.recipient");
        assert_eq!(field.as_deref(), Some("recipient"));
        assert_eq!(expected.as_deref(), Some("object"));
        assert_eq!(actual.as_deref(), Some("string"));
        assert!(err.is_instantiation());
        assert_eq!(err.to_string(), "Model instantiation error: Expected object");
    }

    #[test]
    fn detail_builders_ignore_other_categories() {
        let err = ShapeError::validation("Unknown model: Widget").with_field("x");
        assert_eq!(err, ShapeError::validation("Unknown model: Widget"));
        assert_eq!(err.position(), None);
    }
}

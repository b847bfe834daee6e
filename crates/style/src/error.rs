//! Style declaration error types

use cssom_css::CssError;
use thiserror::Error;

/// Style operation result type
pub type StyleResult<T> = Result<T, StyleError>;

/// Style errors
///
/// A value that does not match a shorthand's grammar is reported here only at
/// the declaration level; setters signal it with `Outcome::Invalid`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error(transparent)]
    Css(#[from] CssError),

    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Invalid value '{value}' for property '{property}'")]
    InvalidValue { property: String, value: String },

    #[error("Recursion limit of {limit} exceeded")]
    ResourceLimitExceeded { limit: usize },

    #[error("Unresolved reference in '{property}'")]
    UnresolvedSubstitution { property: String },
}

impl StyleError {
    pub fn invalid_value(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue { property: property.into(), value: value.into() }
    }
}

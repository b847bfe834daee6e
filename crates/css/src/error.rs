//! CSS value parsing error types

use std::fmt;
use thiserror::Error;

/// CSS parsing result type
pub type CssResult<T> = Result<T, CssError>;

/// Source location in CSS
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from start
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// CSS parsing errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CssError {
    #[error("Unexpected character '{character}' at {location}")]
    UnexpectedChar {
        character: char,
        location: SourceLocation,
    },

    #[error("Unexpected token '{token}' in property value at {location}")]
    UnexpectedToken {
        token: String,
        location: SourceLocation,
    },

    #[error("Unexpected end of input at {location}")]
    UnexpectedEof {
        location: SourceLocation,
    },

    #[error("Unbalanced '{delimiter}' at {location}")]
    Unbalanced {
        delimiter: char,
        location: SourceLocation,
    },

    #[error("Unterminated string at {location}")]
    UnterminatedString {
        location: SourceLocation,
    },

    #[error("Invalid number '{number}' at {location}")]
    InvalidNumber {
        number: String,
        location: SourceLocation,
    },

    #[error("Nesting deeper than {limit} levels at {location}")]
    NestingTooDeep {
        limit: usize,
        location: SourceLocation,
    },

    #[error("Parse error: {message} at {location}")]
    ParseError {
        message: String,
        location: SourceLocation,
    },
}

impl CssError {
    /// Get the source location of this error
    pub fn location(&self) -> SourceLocation {
        match self {
            Self::UnexpectedChar { location, .. } => *location,
            Self::UnexpectedToken { location, .. } => *location,
            Self::UnexpectedEof { location } => *location,
            Self::Unbalanced { location, .. } => *location,
            Self::UnterminatedString { location } => *location,
            Self::InvalidNumber { location, .. } => *location,
            Self::NestingTooDeep { location, .. } => *location,
            Self::ParseError { location, .. } => *location,
        }
    }

    pub fn unexpected_char(c: char, location: SourceLocation) -> Self {
        Self::UnexpectedChar { character: c, location }
    }

    pub fn unexpected_token(token: impl Into<String>, location: SourceLocation) -> Self {
        Self::UnexpectedToken { token: token.into(), location }
    }

    pub fn unexpected_eof(location: SourceLocation) -> Self {
        Self::UnexpectedEof { location }
    }

    pub fn parse_error(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::ParseError { message: message.into(), location }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location_display() {
        let loc = SourceLocation::new(10, 5, 100);
        assert_eq!(format!("{}", loc), "10:5");
    }

    #[test]
    fn test_error_display() {
        let loc = SourceLocation::new(1, 10, 9);
        let err = CssError::unexpected_char('@', loc);
        assert_eq!(format!("{}", err), "Unexpected character '@' at 1:10");
    }

    #[test]
    fn test_unbalanced_display() {
        let err = CssError::Unbalanced { delimiter: ')', location: SourceLocation::new(1, 4, 3) };
        assert_eq!(err.to_string(), "Unbalanced ')' at 1:4");
        assert_eq!(err.location().offset, 3);
    }
}

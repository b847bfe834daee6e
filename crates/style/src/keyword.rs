//! CSS-wide keywords

use std::fmt;

use cssom_css::LexicalUnit;

/// A keyword legal as the sole value of any property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CssWideKeyword {
    Inherit,
    Initial,
    Unset,
    Revert,
    RevertLayer,
}

impl CssWideKeyword {
    pub fn from_ident(ident: &str) -> Option<Self> {
        match ident.to_ascii_lowercase().as_str() {
            "inherit" => Some(CssWideKeyword::Inherit),
            "initial" => Some(CssWideKeyword::Initial),
            "unset" => Some(CssWideKeyword::Unset),
            "revert" => Some(CssWideKeyword::Revert),
            "revert-layer" => Some(CssWideKeyword::RevertLayer),
            _ => None,
        }
    }

    pub fn from_unit(unit: &LexicalUnit) -> Option<Self> {
        unit.as_ident().and_then(Self::from_ident)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CssWideKeyword::Inherit => "inherit",
            CssWideKeyword::Initial => "initial",
            CssWideKeyword::Unset => "unset",
            CssWideKeyword::Revert => "revert",
            CssWideKeyword::RevertLayer => "revert-layer",
        }
    }

    pub fn state(&self) -> KeywordState {
        match self {
            CssWideKeyword::Inherit => KeywordState::Inherit,
            CssWideKeyword::Initial => KeywordState::Initial,
            CssWideKeyword::Unset => KeywordState::Unset,
            CssWideKeyword::RevertLayer => KeywordState::RevertLayer,
            CssWideKeyword::Revert => KeywordState::Revert,
        }
    }
}

impl fmt::Display for CssWideKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword classification of a single longhand value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeywordState {
    Other = 0,
    Inherit = 1,
    Initial = 2,
    Unset = 3,
    RevertLayer = 4,
    Revert = 5,
}

/// Result of scanning a whole value for CSS-wide keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordScan {
    /// No CSS-wide keyword present
    None,
    /// The value is exactly one CSS-wide keyword
    Sole(CssWideKeyword),
    /// A CSS-wide keyword appears next to other units
    InvalidMix,
}

/// Classify a value chain
pub fn scan_keywords(units: &[LexicalUnit]) -> KeywordScan {
    match units {
        [unit] => match CssWideKeyword::from_unit(unit) {
            Some(keyword) => KeywordScan::Sole(keyword),
            None => KeywordScan::None,
        },
        _ if units.iter().any(|u| CssWideKeyword::from_unit(u).is_some()) => KeywordScan::InvalidMix,
        _ => KeywordScan::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cssom_css::LexicalChain;

    fn scan(text: &str) -> KeywordScan {
        scan_keywords(LexicalChain::parse(text).unwrap().units())
    }

    #[test]
    fn test_sole_keyword() {
        assert_eq!(scan("inherit"), KeywordScan::Sole(CssWideKeyword::Inherit));
        assert_eq!(scan("REVERT-LAYER"), KeywordScan::Sole(CssWideKeyword::RevertLayer));
    }

    #[test]
    fn test_mixed_keyword() {
        assert_eq!(scan("inherit 1px"), KeywordScan::InvalidMix);
        assert_eq!(scan("1px initial"), KeywordScan::InvalidMix);
    }

    #[test]
    fn test_no_keyword() {
        assert_eq!(scan("1px solid red"), KeywordScan::None);
        assert_eq!(scan("\"inherit\""), KeywordScan::None);
    }

    #[test]
    fn test_keyword_state_codes() {
        assert_eq!(CssWideKeyword::Inherit.state() as u8, 1);
        assert_eq!(CssWideKeyword::Revert.state() as u8, 5);
        assert_eq!(KeywordState::Other as u8, 0);
    }
}

//! Declared values

use std::slice;

use cssom_css::LexicalUnit;

use crate::keyword::{CssWideKeyword, KeywordState};
use crate::proxy::ProxyValue;

/// A value held by a longhand (or a custom property)
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// A CSS-wide keyword
    Keyword(CssWideKeyword),
    /// A single unit
    Primitive(LexicalUnit),
    /// Several space-separated units, e.g. a grid track list
    List(Vec<LexicalUnit>),
    /// Pending `var()` substitution
    Proxy(ProxyValue),
    /// Custom property text, kept verbatim
    Raw(String),
}

impl StyleValue {
    /// Wrap parsed units, collapsing a single unit to `Primitive`
    pub fn from_units(mut units: Vec<LexicalUnit>) -> Self {
        if units.len() == 1 {
            if let Some(unit) = units.pop() {
                return StyleValue::Primitive(unit);
            }
        }
        StyleValue::List(units)
    }

    pub fn ident(name: &str) -> Self {
        StyleValue::Primitive(LexicalUnit::ident(name))
    }

    pub fn keyword(&self) -> Option<CssWideKeyword> {
        match self {
            StyleValue::Keyword(keyword) => Some(*keyword),
            _ => None,
        }
    }

    pub fn keyword_state(&self) -> KeywordState {
        self.keyword().map_or(KeywordState::Other, |k| k.state())
    }

    pub fn as_primitive(&self) -> Option<&LexicalUnit> {
        match self {
            StyleValue::Primitive(unit) => Some(unit),
            _ => None,
        }
    }

    pub fn as_proxy(&self) -> Option<&ProxyValue> {
        match self {
            StyleValue::Proxy(proxy) => Some(proxy),
            _ => None,
        }
    }

    /// Units of a primitive or list value; empty otherwise
    pub fn units(&self) -> &[LexicalUnit] {
        match self {
            StyleValue::Primitive(unit) => slice::from_ref(unit),
            StyleValue::List(units) => units,
            _ => &[],
        }
    }

    pub fn css_text(&self) -> String {
        self.to_text(false)
    }

    pub fn minified_css_text(&self) -> String {
        self.to_text(true)
    }

    fn to_text(&self, minified: bool) -> String {
        match self {
            StyleValue::Keyword(keyword) => keyword.as_str().to_string(),
            StyleValue::Primitive(unit) if minified => unit.to_minified_css(),
            StyleValue::Primitive(unit) => unit.to_css(),
            StyleValue::List(units) => {
                let mut out = String::new();
                cssom_css::lexical::write_units(units, &mut out, minified);
                out
            }
            StyleValue::Proxy(proxy) => proxy.css_text(),
            StyleValue::Raw(text) => text.clone(),
        }
    }
}

/// One stored declaration
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry {
    pub value: StyleValue,
    pub important: bool,
    /// Written by a shorthand rather than authored directly
    pub subproperty: bool,
}

impl PropertyEntry {
    pub fn new(value: StyleValue, important: bool) -> Self {
        Self { value, important, subproperty: false }
    }

    pub fn from_shorthand(value: StyleValue, important: bool) -> Self {
        Self { value, important, subproperty: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cssom_css::LexicalChain;

    #[test]
    fn test_from_units_collapses_single() {
        let units = LexicalChain::parse("1px").unwrap().into_units();
        assert!(matches!(StyleValue::from_units(units), StyleValue::Primitive(_)));
        let units = LexicalChain::parse("[a] 1fr").unwrap().into_units();
        assert!(matches!(StyleValue::from_units(units), StyleValue::List(ref u) if u.len() == 2));
    }

    #[test]
    fn test_keyword_state() {
        assert_eq!(StyleValue::Keyword(CssWideKeyword::Inherit).keyword_state(), KeywordState::Inherit);
        assert_eq!(StyleValue::ident("auto").keyword_state(), KeywordState::Other);
    }

    #[test]
    fn test_proxy_text_is_empty() {
        let proxy = ProxyValue::new("margin", LexicalChain::parse("var(--m)").unwrap());
        assert_eq!(StyleValue::Proxy(proxy).css_text(), "");
    }

    #[test]
    fn test_list_text() {
        let units = LexicalChain::parse("0.5fr [b]").unwrap().into_units();
        let value = StyleValue::from_units(units);
        assert_eq!(value.css_text(), "0.5fr [b]");
        assert_eq!(value.minified_css_text(), ".5fr [b]");
    }
}

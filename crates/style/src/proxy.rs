//! Proxy values
//!
//! A shorthand whose value holds a `var()` reference cannot be expanded until
//! the reference is known. Each of its longhands then holds the same proxy,
//! which records the shorthand and its unexpanded value.

use std::hash::{Hash, Hasher};

use cssom_css::LexicalChain;

/// Deferred shorthand value
#[derive(Debug, Clone)]
pub struct ProxyValue {
    property: String,
    chain: LexicalChain,
}

impl ProxyValue {
    pub fn new(property: impl Into<String>, chain: LexicalChain) -> Self {
        Self { property: property.into(), chain }
    }

    /// The property the value was written for
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn chain(&self) -> &LexicalChain {
        &self.chain
    }

    /// Always empty; the unexpanded text is only reachable via
    /// [`ProxyValue::original_text`]
    pub fn css_text(&self) -> String {
        String::new()
    }

    pub fn original_text(&self, minified: bool) -> String {
        if minified {
            self.chain.to_minified_css()
        } else {
            self.chain.to_css()
        }
    }
}

impl PartialEq for ProxyValue {
    fn eq(&self, other: &Self) -> bool {
        self.property == other.property && self.chain.to_css() == other.chain.to_css()
    }
}

impl Eq for ProxyValue {}

impl Hash for ProxyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.property.hash(state);
        self.chain.to_css().hash(state);
    }
}

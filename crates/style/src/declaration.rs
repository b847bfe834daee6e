//! Style declaration
//!
//! Longhand storage with shorthand expansion on the way in and shorthand
//! reconstruction on the way out.

use cssom_css::{parse_declaration_list, LexicalChain};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::builder;
use crate::error::{StyleError, StyleResult};
use crate::guard::RecursionGuard;
use crate::keyword::{scan_keywords, KeywordScan};
use crate::proxy::ProxyValue;
use crate::schema::{self, Longhand, ShorthandSchema};
use crate::setter::{self, Outcome};
use crate::value::{PropertyEntry, StyleValue};

pub(crate) fn is_custom_property(name: &str) -> bool {
    name.starts_with("--")
}

/// Lowercase a property name and follow aliases; custom properties are kept
/// as written
fn normalize(name: &str) -> StyleResult<String> {
    let name = name.trim();
    if is_custom_property(name) {
        return Ok(name.to_string());
    }
    let lower = name.to_ascii_lowercase();
    let mut guard = RecursionGuard::new();
    Ok(schema::resolve_alias(&lower, &mut guard)?.to_string())
}

/// A block of declarations, in insertion order
#[derive(Debug, Clone, Default)]
pub struct StyleDeclaration {
    entries: FxHashMap<String, PropertyEntry>,
    order: Vec<String>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole declaration block, dropping invalid declarations
    pub fn parse(css: &str) -> Self {
        let mut decl = Self::new();
        decl.set_css_text(css);
        decl
    }

    /// Number of stored longhands and custom properties
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Property name at `index`, in insertion order
    pub fn item(&self, index: usize) -> Option<&str> {
        self.order.get(index).map(|s| s.as_str())
    }

    pub fn entry(&self, name: &str) -> Option<&PropertyEntry> {
        self.entries.get(name)
    }

    pub fn get_value(&self, name: &str) -> Option<&StyleValue> {
        self.entry(name).map(|e| &e.value)
    }

    /// Store a value without validating it
    pub fn set_value(&mut self, name: &str, value: StyleValue) {
        let important = self.entry(name).map_or(false, |e| e.important);
        self.store(name, PropertyEntry::new(value, important));
    }

    /// Insert or replace an entry; a replaced entry keeps its position
    pub(crate) fn store(&mut self, name: &str, entry: PropertyEntry) {
        if self.entries.insert(name.to_string(), entry).is_none() {
            self.order.push(name.to_string());
        }
    }

    /// Put the same proxy into every longhand of a shorthand
    pub(crate) fn store_proxy(&mut self, schema: &ShorthandSchema, chain: LexicalChain, important: bool) {
        let proxy = ProxyValue::new(schema.name, chain);
        for name in schema.longhands {
            let value = StyleValue::Proxy(proxy.clone());
            self.store(name, PropertyEntry::from_shorthand(value, important));
        }
    }

    /// Set a property from its text; an empty value removes it
    pub fn set_property(&mut self, name: &str, value: &str, important: bool) -> StyleResult<()> {
        let name = normalize(name)?;
        let value = value.trim();

        if value.is_empty() {
            self.remove_property(&name);
            return Ok(());
        }
        if is_custom_property(&name) {
            self.store(&name, PropertyEntry::new(StyleValue::Raw(value.to_string()), important));
            return Ok(());
        }

        let chain = LexicalChain::parse(value)?;
        self.set_property_chain(&name, chain, important)
    }

    /// Set a property from an already parsed value
    pub fn set_property_chain(&mut self, name: &str, chain: LexicalChain, important: bool) -> StyleResult<()> {
        if is_custom_property(name) {
            self.store(name, PropertyEntry::new(StyleValue::Raw(chain.to_css()), important));
            return Ok(());
        }
        if let Some(schema) = schema::shorthand(name) {
            return self.set_shorthand(schema, chain, important);
        }
        match schema::longhand(name) {
            Some(longhand) => self.set_longhand(longhand, chain, important),
            None => Err(StyleError::UnknownProperty(name.to_string())),
        }
    }

    fn set_longhand(&mut self, longhand: &'static Longhand, chain: LexicalChain, important: bool) -> StyleResult<()> {
        let value = if chain.contains_function("var") {
            StyleValue::Proxy(ProxyValue::new(longhand.name, chain))
        } else {
            match scan_keywords(chain.units()) {
                KeywordScan::Sole(keyword) => StyleValue::Keyword(keyword),
                KeywordScan::None if longhand.accepts_value(chain.units()) => {
                    StyleValue::from_units(chain.into_units())
                }
                _ => return Err(StyleError::invalid_value(longhand.name, chain.to_css())),
            }
        };
        self.store(longhand.name, PropertyEntry::new(value, important));
        Ok(())
    }

    fn set_shorthand(&mut self, schema: &'static ShorthandSchema, chain: LexicalChain, important: bool) -> StyleResult<()> {
        let tainted = chain.contains_function("attr");
        let text = chain.to_css();

        let outcome = {
            let mut setter = setter::for_schema(schema, self);
            setter.init(chain.clone(), important);
            setter.set_attr_tainted(tainted);
            let outcome = setter.assign_subproperties()?;
            if outcome == Outcome::Continue {
                setter.commit();
            }
            outcome
        };

        match outcome {
            Outcome::Continue => {
                log::debug!("Expanded {}: {}", schema.name, text);
                Ok(())
            }
            Outcome::Terminal => {
                log::debug!("Stored {} as proxy: {}", schema.name, text);
                Ok(())
            }
            Outcome::Invalid if tainted => {
                log::debug!("Deferring attr()-tainted {}: {}", schema.name, text);
                self.store_proxy(schema, chain, important);
                Ok(())
            }
            Outcome::Invalid => Err(StyleError::invalid_value(schema.name, text)),
        }
    }

    /// Replace the block with parsed declarations, dropping invalid ones
    pub fn set_css_text(&mut self, css: &str) {
        self.entries.clear();
        self.order.clear();

        for declaration in parse_declaration_list(css) {
            if let Err(err) = self.set_property(&declaration.property, &declaration.value, declaration.important) {
                log::warn!("Dropping declaration '{}': {}", declaration.property, err);
            }
        }
    }

    /// Value text of a longhand or custom property, or the shorthand built
    /// from its longhands; empty when there is none
    pub fn get_property_value(&self, name: &str) -> String {
        let Ok(name) = normalize(name) else {
            return String::new();
        };
        if let Some(schema) = schema::shorthand(&name) {
            return builder::for_schema(schema, self).build(false).unwrap_or_default();
        }
        self.entry(&name).map(|e| entry_text(&name, e, false)).unwrap_or_default()
    }

    /// `"important"` or empty
    pub fn get_property_priority(&self, name: &str) -> &'static str {
        let Ok(name) = normalize(name) else {
            return "";
        };
        let important = match schema::shorthand(&name) {
            Some(schema) => schema
                .longhands
                .iter()
                .all(|l| self.entry(l).map_or(false, |e| e.important)),
            None => self.entry(&name).map_or(false, |e| e.important),
        };
        if important {
            "important"
        } else {
            ""
        }
    }

    /// Remove a property, and for a shorthand all of its longhands. Returns
    /// the old value text.
    pub fn remove_property(&mut self, name: &str) -> String {
        let Ok(name) = normalize(name) else {
            return String::new();
        };
        let old = self.get_property_value(&name);
        let names: Vec<&str> = match schema::shorthand(&name) {
            Some(schema) => schema.longhands.to_vec(),
            None => vec![name.as_str()],
        };
        for longhand in names {
            if self.entries.remove(longhand).is_some() {
                self.order.retain(|n| n != longhand);
            }
        }
        old
    }

    pub fn css_text(&self) -> String {
        self.serialize(false)
    }

    pub fn minified_css_text(&self) -> String {
        self.serialize(true)
    }

    /// Walk properties in order; each longhand first tries the shorthands
    /// that contain it, largest first
    fn serialize(&self, minified: bool) -> String {
        let mut out: Vec<String> = Vec::new();
        let mut done: FxHashSet<&str> = FxHashSet::default();

        for name in &self.order {
            if done.contains(name.as_str()) {
                continue;
            }
            let Some(entry) = self.entries.get(name) else {
                continue;
            };

            if !is_custom_property(name) {
                // A shorthand's deferred value goes out ahead of any longhand
                // that overwrote part of it, so the text reads back the same
                for schema in schema::shorthands_containing(name) {
                    let Some((proxy, important)) = self.pending_proxy(schema) else {
                        continue;
                    };
                    if schema.longhands.iter().any(|l| done.contains(l)) {
                        continue;
                    }
                    out.push(format_declaration(schema.name, &proxy.original_text(minified), important, minified));
                    for longhand in schema.longhands {
                        if self.get_value(longhand).and_then(|v| v.as_proxy()) == Some(proxy) {
                            done.insert(longhand);
                        }
                    }
                }
                if done.contains(name.as_str()) {
                    continue;
                }

                let built = schema::shorthands_containing(name).iter().find_map(|schema| {
                    if schema.longhands.iter().any(|l| done.contains(l)) {
                        return None;
                    }
                    let text = builder::for_schema(*schema, self).build(minified)?;
                    Some((*schema, text))
                });
                if let Some((schema, text)) = built {
                    out.push(format_declaration(schema.name, &text, entry.important, minified));
                    done.extend(schema.longhands.iter().copied());
                    continue;
                }
            }

            let text = entry_text(name, entry, minified);
            if text.is_empty() {
                continue;
            }
            out.push(format_declaration(name, &text, entry.important, minified));
            done.insert(name.as_str());
        }

        if minified {
            out.join(";")
        } else {
            out.join(" ")
        }
    }

    /// The proxy a shorthand stored in its longhands, if any still hold it
    fn pending_proxy(&self, schema: &ShorthandSchema) -> Option<(&ProxyValue, bool)> {
        schema.longhands.iter().find_map(|longhand| {
            let entry = self.entries.get(*longhand)?;
            let proxy = entry.value.as_proxy()?;
            (proxy.property() == schema.name).then_some((proxy, entry.important))
        })
    }
}

/// Text of one stored entry; a proxy prints its original text only under
/// the property it was written for
fn entry_text(name: &str, entry: &PropertyEntry, minified: bool) -> String {
    match entry.value.as_proxy() {
        Some(proxy) if proxy.property() == name => proxy.original_text(minified),
        _ => builder::value_text(&entry.value, minified),
    }
}

fn format_declaration(name: &str, value: &str, important: bool, minified: bool) -> String {
    match (minified, important) {
        (true, true) => format!("{}:{}!important", name, value),
        (true, false) => format!("{}:{}", name, value),
        (false, true) => format!("{}: {} !important;", name, value),
        (false, false) => format!("{}: {};", name, value),
    }
}

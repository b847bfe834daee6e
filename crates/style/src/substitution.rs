//! `var()` substitution
//!
//! Proxy values are resolved against the declaration's own custom
//! properties, then the originating property is set again from the
//! substituted value.

use cssom_css::{LexicalChain, LexicalUnit, MAX_NESTING};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::declaration::{is_custom_property, StyleDeclaration};
use crate::error::{StyleError, StyleResult};
use crate::guard::RecursionGuard;
use crate::keyword::CssWideKeyword;
use crate::proxy::ProxyValue;
use crate::schema;
use crate::value::{PropertyEntry, StyleValue};

fn unresolved(property: &str) -> StyleError {
    StyleError::UnresolvedSubstitution { property: property.to_string() }
}

/// `--name` and the optional fallback of a `var()`
fn var_arguments(args: &[LexicalUnit]) -> Option<(&str, Option<&[LexicalUnit]>)> {
    match args {
        [LexicalUnit::Ident(name)] if is_custom_property(name) => Some((name.as_str(), None)),
        [LexicalUnit::Ident(name), LexicalUnit::Comma, fallback @ ..] if is_custom_property(name) => {
            Some((name.as_str(), Some(fallback)))
        }
        _ => None,
    }
}

/// Function nesting of a unit; bounded by the nesting a parsed chain allows
fn nesting(unit: &LexicalUnit) -> usize {
    match unit {
        LexicalUnit::Function { args, .. } => 1 + args.iter().map(nesting).max().unwrap_or(0),
        _ => 0,
    }
}

/// Replace every `var()` in `units`, following references through custom
/// properties. `depth` is the function nesting the units will end up at.
fn substitute(
    units: &[LexicalUnit],
    customs: &FxHashMap<String, String>,
    guard: &mut RecursionGuard,
    property: &str,
    depth: usize,
) -> StyleResult<Vec<LexicalUnit>> {
    let mut out = Vec::with_capacity(units.len());

    for unit in units {
        match unit {
            LexicalUnit::Function { name, args } if name == "var" => {
                let (reference, fallback) = var_arguments(args).ok_or_else(|| unresolved(property))?;

                guard.enter()?;
                let resolved = match (customs.get(reference), fallback) {
                    (Some(text), _) => LexicalChain::parse(text)
                        .map_err(|_| unresolved(property))
                        .and_then(|chain| substitute(chain.units(), customs, guard, property, depth)),
                    (None, Some(fallback)) => substitute(fallback, customs, guard, property, depth),
                    (None, None) => Err(unresolved(property)),
                };
                guard.decrement();

                out.extend(resolved?);
            }
            LexicalUnit::Function { name, args } if unit.contains_function("var") => {
                if depth + 1 > MAX_NESTING {
                    return Err(unresolved(property));
                }
                out.push(LexicalUnit::Function {
                    name: name.clone(),
                    args: substitute(args, customs, guard, property, depth + 1)?,
                });
            }
            // Spliced-in values must stay within the nesting a parsed chain allows
            LexicalUnit::Function { .. } if depth + nesting(unit) > MAX_NESTING => {
                return Err(unresolved(property));
            }
            _ => out.push(unit.clone()),
        }
    }

    Ok(out)
}

impl StyleDeclaration {
    /// Resolve every proxy value against the custom properties. A property
    /// whose references cannot be resolved becomes `unset`; a reference cycle
    /// is reported as `ResourceLimitExceeded`.
    pub fn resolve_substitutions(&mut self) -> StyleResult<()> {
        let mut customs: FxHashMap<String, String> = FxHashMap::default();
        let mut seen: FxHashSet<ProxyValue> = FxHashSet::default();
        let mut pending: Vec<(ProxyValue, bool)> = Vec::new();

        for index in 0..self.len() {
            let Some(name) = self.item(index) else {
                continue;
            };
            let Some(entry) = self.entry(name) else {
                continue;
            };
            match &entry.value {
                StyleValue::Raw(text) if is_custom_property(name) => {
                    customs.insert(name.to_string(), text.clone());
                }
                StyleValue::Proxy(proxy) if seen.insert(proxy.clone()) => {
                    pending.push((proxy.clone(), entry.important));
                }
                _ => {}
            }
        }

        for (proxy, important) in pending {
            let mut guard = RecursionGuard::new();
            match substitute(proxy.chain().units(), &customs, &mut guard, proxy.property(), 0) {
                Ok(units) => self.reapply(&proxy, LexicalChain::from_units(units), important)?,
                Err(StyleError::UnresolvedSubstitution { property }) => {
                    log::debug!("Unresolved reference in {}, using unset", property);
                    self.invalidate(&proxy, important);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    /// Longhands of the proxy's property
    fn proxy_longhands(proxy: &ProxyValue) -> Vec<String> {
        match schema::shorthand(proxy.property()) {
            Some(schema) => schema.longhands.iter().map(|l| l.to_string()).collect(),
            None => vec![proxy.property().to_string()],
        }
    }

    /// Set the property from the substituted value, leaving alone any
    /// longhand that was overwritten after the proxy was stored
    fn reapply(&mut self, proxy: &ProxyValue, chain: LexicalChain, important: bool) -> StyleResult<()> {
        let overwritten: Vec<(String, PropertyEntry)> = Self::proxy_longhands(proxy)
            .into_iter()
            .filter_map(|name| {
                let entry = self.entry(&name)?;
                (entry.value.as_proxy() != Some(proxy)).then(|| (name, entry.clone()))
            })
            .collect();

        match self.set_property_chain(proxy.property(), chain, important) {
            Ok(()) => {}
            Err(err @ StyleError::ResourceLimitExceeded { .. }) => return Err(err),
            Err(err) => {
                log::debug!("Substituted value is invalid: {}", err);
                self.invalidate(proxy, important);
            }
        }

        for (name, entry) in overwritten {
            self.store(&name, entry);
        }
        Ok(())
    }

    /// Invalid at computed-value time: every longhand still holding the
    /// proxy becomes `unset`
    fn invalidate(&mut self, proxy: &ProxyValue, important: bool) {
        for name in Self::proxy_longhands(proxy) {
            if self.get_value(&name).and_then(|v| v.as_proxy()) == Some(proxy) {
                let value = StyleValue::Keyword(CssWideKeyword::Unset);
                self.store(&name, PropertyEntry::from_shorthand(value, important));
            }
        }
    }
}

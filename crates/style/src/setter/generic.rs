//! Free-order setter
//!
//! Values are routed by type to the first open longhand that accepts them.
//! Shared identifiers are held back and then given to every open longhand
//! that accepts them.

use cssom_css::LexicalUnit;
use smallvec::SmallVec;

use super::{Outcome, SetterBase, SubpropertySetter};
use crate::error::StyleResult;
use crate::value::StyleValue;

/// list-style, flex-flow, columns, column-rule
pub struct FreeOrderSetter<'a> {
    base: SetterBase<'a>,
    shared: &'static [&'static str],
}

impl<'a> FreeOrderSetter<'a> {
    pub fn new(base: SetterBase<'a>, shared: &'static [&'static str]) -> Self {
        Self { base, shared }
    }

    fn shared_ident(&self, unit: &LexicalUnit) -> Option<&'static str> {
        self.shared.iter().copied().find(|ident| unit.is_ident(ident))
    }
}

impl<'a> SubpropertySetter<'a> for FreeOrderSetter<'a> {
    fn base(&self) -> &SetterBase<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SetterBase<'a> {
        &mut self.base
    }

    fn assign(&mut self) -> StyleResult<Outcome> {
        let name = self.base.schema().name;
        let mut deferred: SmallVec<[(&'static str, usize); 2]> = SmallVec::new();

        while let Some(unit) = self.base.next_unit() {
            if let Some(ident) = self.shared_ident(&unit) {
                match deferred.iter_mut().find(|(i, _)| *i == ident) {
                    Some(entry) => entry.1 += 1,
                    None => deferred.push((ident, 1)),
                }
                continue;
            }

            match self.base.acceptor(&unit) {
                Some(longhand) => self.base.assign(longhand.name, StyleValue::Primitive(unit)),
                None => {
                    log::trace!("{}: '{}' matches no open longhand", name, unit);
                    return Ok(Outcome::Invalid);
                }
            }
        }

        for (ident, count) in deferred {
            let unit = LexicalUnit::ident(ident);
            let acceptors: SmallVec<[&'static str; 4]> = self
                .base
                .remaining()
                .iter()
                .filter(|l| l.accepts(&unit))
                .map(|l| l.name)
                .collect();

            if acceptors.len() < count {
                log::trace!("{}: too many '{}'", name, ident);
                return Ok(Outcome::Invalid);
            }
            for longhand in acceptors {
                self.base.assign(longhand, StyleValue::Primitive(unit.clone()));
            }
        }

        self.base.assign_defaults()?;
        Ok(Outcome::Continue)
    }
}

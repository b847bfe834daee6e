//! Two-value setter

use super::{Outcome, SetterBase, SubpropertySetter};
use crate::error::StyleResult;
use crate::value::StyleValue;

/// gap, overflow, pause and cue: one value for both longhands, or one each
pub struct SequenceSetter<'a> {
    base: SetterBase<'a>,
    taint_sensitive: bool,
}

impl<'a> SequenceSetter<'a> {
    pub fn new(base: SetterBase<'a>, taint_sensitive: bool) -> Self {
        Self { base, taint_sensitive }
    }
}

impl<'a> SubpropertySetter<'a> for SequenceSetter<'a> {
    fn base(&self) -> &SetterBase<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SetterBase<'a> {
        &mut self.base
    }

    fn set_attr_tainted(&mut self, tainted: bool) {
        if self.taint_sensitive {
            self.base.set_tainted(tainted);
        }
    }

    fn assign_subproperties(&mut self) -> StyleResult<Outcome> {
        if self.base.is_tainted() {
            log::trace!("{}: refusing attr()-tainted value", self.base.schema().name);
            self.base.outcome = Some(Outcome::Invalid);
            return Ok(Outcome::Invalid);
        }
        let outcome = match self.base.prepare() {
            Some(outcome) => outcome,
            None => self.assign()?,
        };
        self.base.outcome = Some(outcome);
        Ok(outcome)
    }

    fn assign(&mut self) -> StyleResult<Outcome> {
        let units = self.base.remaining_units().to_vec();
        let [first, second] = match self.base.remaining() {
            [first, second] => [*first, *second],
            _ => return Ok(Outcome::Invalid),
        };

        let (a, b) = match units.as_slice() {
            [only] => (only, only),
            [a, b] => (a, b),
            _ => {
                log::trace!("{}: {} values", self.base.schema().name, units.len());
                return Ok(Outcome::Invalid);
            }
        };

        if !first.accepts(a) || !second.accepts(b) {
            return Ok(Outcome::Invalid);
        }

        // Each longhand gets its own copy
        self.base.assign(first.name, StyleValue::Primitive(a.clone()));
        self.base.assign(second.name, StyleValue::Primitive(b.clone()));
        self.base.consume_all();
        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use cssom_css::LexicalChain;

    use crate::declaration::StyleDeclaration;
    use crate::schema::shorthand;
    use crate::setter::tests::{expand, text};
    use crate::setter::{for_schema, Outcome};

    #[test]
    fn test_single_value_fills_both() {
        let mut decl = StyleDeclaration::new();
        let (outcome, _) = expand(&mut decl, "gap", "10px");
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(text(&decl, "row-gap"), "10px");
        assert_eq!(text(&decl, "column-gap"), "10px");
    }

    #[test]
    fn test_two_values_in_order() {
        let mut decl = StyleDeclaration::new();
        expand(&mut decl, "overflow", "hidden scroll");
        assert_eq!(text(&decl, "overflow-x"), "hidden");
        assert_eq!(text(&decl, "overflow-y"), "scroll");
    }

    #[test]
    fn test_wrong_count_or_type() {
        let mut decl = StyleDeclaration::new();
        assert_eq!(expand(&mut decl, "pause", "1s 2s 3s").0, Outcome::Invalid);
        assert_eq!(expand(&mut decl, "pause", "1px").0, Outcome::Invalid);
        assert_eq!(expand(&mut decl, "pause", "weak 250ms").0, Outcome::Continue);
    }

    #[test]
    fn test_taint_sensitive_variant_refuses() {
        let mut decl = StyleDeclaration::new();
        let mut setter = for_schema(shorthand("cue").unwrap(), &mut decl);
        setter.init(LexicalChain::parse("url(a.wav)").unwrap(), false);
        setter.set_attr_tainted(true);
        assert_eq!(setter.assign_subproperties().unwrap(), Outcome::Invalid);
        assert_eq!(setter.css_text(), "");
    }

    #[test]
    fn test_taint_ignored_elsewhere() {
        let mut decl = StyleDeclaration::new();
        let mut setter = for_schema(shorthand("gap").unwrap(), &mut decl);
        setter.init(LexicalChain::parse("1px").unwrap(), false);
        setter.set_attr_tainted(true);
        assert_eq!(setter.assign_subproperties().unwrap(), Outcome::Continue);
        assert_eq!(setter.css_text(), "1px");
    }
}

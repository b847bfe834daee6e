//! Outline setter
//!
//! `auto` is valid for both outline-style and outline-color, so it is held
//! back until every other value has found its longhand.

use cssom_css::LexicalUnit;

use super::{Outcome, SetterBase, SubpropertySetter};
use crate::error::StyleResult;
use crate::types::is_vendor_extension;
use crate::value::StyleValue;

const STYLE: &str = "outline-style";
const COLOR: &str = "outline-color";

pub struct OutlineSetter<'a> {
    base: SetterBase<'a>,
}

impl<'a> OutlineSetter<'a> {
    pub fn new(base: SetterBase<'a>) -> Self {
        Self { base }
    }
}

impl<'a> SubpropertySetter<'a> for OutlineSetter<'a> {
    fn base(&self) -> &SetterBase<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SetterBase<'a> {
        &mut self.base
    }

    fn assign(&mut self) -> StyleResult<Outcome> {
        let mut saw_auto = false;

        while let Some(unit) = self.base.next_unit() {
            if unit.is_ident("auto") {
                saw_auto = true;
                continue;
            }

            if let Some(longhand) = self.base.acceptor(&unit) {
                self.base.assign(longhand.name, StyleValue::Primitive(unit));
                continue;
            }

            if is_vendor_extension(&unit) {
                log::debug!("outline: deferring vendor value '{}'", unit);
                self.base.store_proxy();
                return Ok(Outcome::Terminal);
            }

            // A second `none` stays in the text only
            if unit.is_ident("none") {
                continue;
            }

            log::trace!("outline: '{}' matches no open longhand", unit);
            return Ok(Outcome::Invalid);
        }

        if saw_auto {
            if self.base.is_remaining(STYLE) {
                self.base.assign(STYLE, StyleValue::Primitive(LexicalUnit::ident("auto")));
            }
            if self.base.is_remaining(COLOR) {
                self.base.assign(COLOR, StyleValue::Primitive(LexicalUnit::ident("auto")));
            }
        }

        self.base.assign_defaults()?;
        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use crate::declaration::StyleDeclaration;
    use crate::setter::tests::{expand, text};
    use crate::setter::Outcome;

    #[test]
    fn test_auto_alone() {
        let mut decl = StyleDeclaration::new();
        let (outcome, css) = expand(&mut decl, "outline", "auto");
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(css, "auto");
        assert_eq!(text(&decl, "outline-style"), "auto");
        assert_eq!(text(&decl, "outline-color"), "auto");
        assert_eq!(text(&decl, "outline-width"), "medium");
        assert!(decl.entry("outline-color").unwrap().subproperty);
        assert!(decl.entry("outline-style").unwrap().subproperty);
    }

    #[test]
    fn test_auto_fills_what_is_left() {
        let mut decl = StyleDeclaration::new();
        expand(&mut decl, "outline", "auto dotted");
        assert_eq!(text(&decl, "outline-style"), "dotted");
        assert_eq!(text(&decl, "outline-color"), "auto");

        expand(&mut decl, "outline", "green auto 3px");
        assert_eq!(text(&decl, "outline-style"), "auto");
        assert_eq!(text(&decl, "outline-color"), "green");
        assert_eq!(text(&decl, "outline-width"), "3px");
    }

    #[test]
    fn test_order_free() {
        let mut decl = StyleDeclaration::new();
        assert_eq!(expand(&mut decl, "outline", "thick double #abc").0, Outcome::Continue);
        assert_eq!(text(&decl, "outline-color"), "#abc");
        assert_eq!(text(&decl, "outline-width"), "thick");
    }

    #[test]
    fn test_extra_none_kept_in_text() {
        let mut decl = StyleDeclaration::new();
        let (outcome, css) = expand(&mut decl, "outline", "solid none");
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(css, "solid none");
        assert_eq!(text(&decl, "outline-style"), "solid");
    }

    #[test]
    fn test_vendor_value_defers() {
        let mut decl = StyleDeclaration::new();
        let (outcome, css) = expand(&mut decl, "outline", "1px solid -moz-mac-focusring");
        assert_eq!(outcome, Outcome::Terminal);
        assert_eq!(css, "");
        let value = decl.get_value("outline-color").unwrap();
        assert_eq!(value.as_proxy().unwrap().original_text(false), "1px solid -moz-mac-focusring");
    }

    #[test]
    fn test_unknown_value_is_invalid() {
        let mut decl = StyleDeclaration::new();
        assert_eq!(expand(&mut decl, "outline", "1px 2px").0, Outcome::Invalid);
        assert_eq!(expand(&mut decl, "outline", "bogus").0, Outcome::Invalid);
        assert!(decl.is_empty());
    }
}

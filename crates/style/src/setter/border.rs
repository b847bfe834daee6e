//! Border setters
//!
//! Width, style and color may come in any order, but color has to be last.

use cssom_css::LexicalUnit;

use super::{Outcome, SetterBase, SubpropertySetter};
use crate::error::StyleResult;
use crate::schema::{longhand, Longhand};
use crate::value::StyleValue;

/// Parsed components of one side: width, style, color
type SideValues = [Option<LexicalUnit>; 3];

/// Match units against `[width, style, color]`. `None` when a unit fits no
/// component still open or anything follows the color.
fn parse_side(units: &[LexicalUnit], components: [&Longhand; 3], shorthand: &str) -> Option<SideValues> {
    let mut values: SideValues = [None, None, None];
    let mut iter = units.iter();

    while let Some(unit) = iter.next() {
        let slot = (0..3).find(|&i| values[i].is_none() && components[i].accepts(unit));
        match slot {
            Some(i) => {
                values[i] = Some(unit.clone());
                if i == 2 {
                    if iter.next().is_some() {
                        log::trace!("{}: value after color", shorthand);
                        return None;
                    }
                    break;
                }
            }
            None => {
                log::trace!("{}: '{}' matches no open component", shorthand, unit);
                return None;
            }
        }
    }

    Some(values)
}

fn components(names: [&str; 3]) -> Option<[&'static Longhand; 3]> {
    Some([longhand(names[0])?, longhand(names[1])?, longhand(names[2])?])
}

/// border-top, border-right, border-bottom, border-left
pub struct BorderSideSetter<'a> {
    base: SetterBase<'a>,
}

impl<'a> BorderSideSetter<'a> {
    pub fn new(base: SetterBase<'a>) -> Self {
        Self { base }
    }
}

impl<'a> SubpropertySetter<'a> for BorderSideSetter<'a> {
    fn base(&self) -> &SetterBase<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SetterBase<'a> {
        &mut self.base
    }

    fn assign(&mut self) -> StyleResult<Outcome> {
        let schema = self.base.schema();
        let names = [schema.longhands[0], schema.longhands[1], schema.longhands[2]];
        let Some(parts) = components(names) else {
            return Ok(Outcome::Invalid);
        };

        let Some(values) = parse_side(self.base.remaining_units(), parts, schema.name) else {
            return Ok(Outcome::Invalid);
        };

        for (name, value) in names.into_iter().zip(values) {
            if let Some(unit) = value {
                self.base.assign(name, StyleValue::Primitive(unit));
            }
        }
        self.base.consume_all();
        self.base.assign_defaults()?;
        Ok(Outcome::Continue)
    }
}

/// `border`: one side's syntax, applied to all four sides
pub struct BorderSetter<'a> {
    base: SetterBase<'a>,
}

impl<'a> BorderSetter<'a> {
    pub fn new(base: SetterBase<'a>) -> Self {
        Self { base }
    }
}

impl<'a> SubpropertySetter<'a> for BorderSetter<'a> {
    fn base(&self) -> &SetterBase<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SetterBase<'a> {
        &mut self.base
    }

    fn assign(&mut self) -> StyleResult<Outcome> {
        let schema = self.base.schema();
        // Longhands are grouped by component: four widths, four styles, four colors
        let Some(parts) = components([schema.longhands[0], schema.longhands[4], schema.longhands[8]]) else {
            return Ok(Outcome::Invalid);
        };

        let Some(values) = parse_side(self.base.remaining_units(), parts, schema.name) else {
            return Ok(Outcome::Invalid);
        };

        for (component, value) in values.into_iter().enumerate() {
            if let Some(unit) = value {
                for side in 0..4 {
                    let name = schema.longhands[component * 4 + side];
                    self.base.assign(name, StyleValue::Primitive(unit.clone()));
                }
            }
        }
        self.base.consume_all();
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
    fn test_any_order_before_color() {
        let mut decl = StyleDeclaration::new();
        let (outcome, css) = expand(&mut decl, "border-top", "solid 1px red");
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(css, "solid 1px red");
        assert_eq!(text(&decl, "border-top-width"), "1px");
        assert_eq!(text(&decl, "border-top-style"), "solid");
        assert_eq!(text(&decl, "border-top-color"), "red");
    }

    #[test]
    fn test_color_must_be_last() {
        let mut decl = StyleDeclaration::new();
        assert_eq!(expand(&mut decl, "border-left", "1px solid red").0, Outcome::Continue);
        assert_eq!(expand(&mut decl, "border-left", "red solid 1px").0, Outcome::Invalid);
        assert_eq!(text(&decl, "border-left-color"), "red");
        assert_eq!(text(&decl, "border-left-width"), "1px");
    }

    #[test]
    fn test_missing_components_default() {
        let mut decl = StyleDeclaration::new();
        expand(&mut decl, "border-bottom", "dashed");
        assert_eq!(text(&decl, "border-bottom-width"), "medium");
        assert_eq!(text(&decl, "border-bottom-color"), "currentcolor");
    }

    #[test]
    fn test_repeated_component_is_invalid() {
        let mut decl = StyleDeclaration::new();
        assert_eq!(expand(&mut decl, "border-right", "1px 2px").0, Outcome::Invalid);
        assert_eq!(expand(&mut decl, "border-right", "solid bogus").0, Outcome::Invalid);
    }

    #[test]
    fn test_border_applies_to_all_sides() {
        let mut decl = StyleDeclaration::new();
        let (outcome, _) = expand(&mut decl, "border", "2px dotted #00f");
        assert_eq!(outcome, Outcome::Continue);
        for side in ["top", "right", "bottom", "left"] {
            assert_eq!(text(&decl, &format!("border-{}-width", side)), "2px");
            assert_eq!(text(&decl, &format!("border-{}-style", side)), "dotted");
            assert_eq!(text(&decl, &format!("border-{}-color", side)), "#00f");
        }
        assert_eq!(decl.len(), 12);
    }
}

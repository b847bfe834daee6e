//! `grid-template` setter
//!
//! Three syntaxes, tried in a fixed order. Once one is chosen there is no
//! fallback to the next.

use cssom_css::LexicalUnit;

use super::{Outcome, SetterBase, SubpropertySetter};
use crate::error::StyleResult;
use crate::grid::{is_areas_shape, parse_areas_form, parse_track_list, split_at_slash};
use crate::value::StyleValue;

const ROWS: &str = "grid-template-rows";
const COLUMNS: &str = "grid-template-columns";
const AREAS: &str = "grid-template-areas";

/// One side of `rows / columns`
fn track_side(units: &[LexicalUnit]) -> Option<StyleValue> {
    match units {
        [unit] if unit.is_ident("none") => Some(StyleValue::ident("none")),
        _ => {
            parse_track_list(units, true)?;
            Some(StyleValue::from_units(units.to_vec()))
        }
    }
}

pub struct GridTemplateSetter<'a> {
    base: SetterBase<'a>,
}

impl<'a> GridTemplateSetter<'a> {
    pub fn new(base: SetterBase<'a>) -> Self {
        Self { base }
    }

    fn assign_areas(&mut self, units: &[LexicalUnit]) -> Outcome {
        let Some(form) = parse_areas_form(units) else {
            log::trace!("grid-template: malformed areas syntax");
            return Outcome::Invalid;
        };

        self.base.assign(ROWS, StyleValue::from_units(form.rows));
        let columns = match form.columns {
            Some(columns) => StyleValue::from_units(columns),
            None => StyleValue::ident("none"),
        };
        self.base.assign(COLUMNS, columns);
        self.base.assign(AREAS, StyleValue::from_units(form.areas));
        Outcome::Continue
    }

    fn assign_rows_columns(&mut self, units: &[LexicalUnit]) -> Outcome {
        let (rows, columns) = match split_at_slash(units) {
            Some((rows, Some(columns))) => (rows, columns),
            _ => {
                log::trace!("grid-template: expected '<rows> / <columns>'");
                return Outcome::Invalid;
            }
        };

        match (track_side(rows), track_side(columns)) {
            (Some(rows), Some(columns)) => {
                self.base.assign(ROWS, rows);
                self.base.assign(COLUMNS, columns);
                self.base.assign(AREAS, StyleValue::ident("none"));
                Outcome::Continue
            }
            _ => Outcome::Invalid,
        }
    }
}

impl<'a> SubpropertySetter<'a> for GridTemplateSetter<'a> {
    fn base(&self) -> &SetterBase<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SetterBase<'a> {
        &mut self.base
    }

    fn assign(&mut self) -> StyleResult<Outcome> {
        self.base.reset_to_defaults()?;
        let units = self.base.remaining_units().to_vec();

        let outcome = if is_areas_shape(&units) {
            self.assign_areas(&units)
        } else if matches!(units.as_slice(), [unit] if unit.is_ident("none")) {
            for name in [ROWS, COLUMNS, AREAS] {
                self.base.assign(name, StyleValue::ident("none"));
            }
            Outcome::Continue
        } else {
            self.assign_rows_columns(&units)
        };

        if outcome == Outcome::Continue {
            self.base.consume_all();
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use crate::declaration::StyleDeclaration;
    use crate::setter::tests::{expand, text};
    use crate::setter::Outcome;

    #[test]
    fn test_none() {
        let mut decl = StyleDeclaration::new();
        let (outcome, _) = expand(&mut decl, "grid-template", "none");
        assert_eq!(outcome, Outcome::Continue);
        for name in ["grid-template-rows", "grid-template-columns", "grid-template-areas"] {
            assert_eq!(text(&decl, name), "none");
        }
    }

    #[test]
    fn test_rows_columns() {
        let mut decl = StyleDeclaration::new();
        let (outcome, _) = expand(&mut decl, "grid-template", "[a] 100px 1fr / repeat(2, 50%)");
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(text(&decl, "grid-template-rows"), "[a] 100px 1fr");
        assert_eq!(text(&decl, "grid-template-columns"), "repeat(2, 50%)");
        assert_eq!(text(&decl, "grid-template-areas"), "none");
    }

    #[test]
    fn test_none_on_one_side() {
        let mut decl = StyleDeclaration::new();
        assert_eq!(expand(&mut decl, "grid-template", "none / 1fr").0, Outcome::Continue);
        assert_eq!(text(&decl, "grid-template-rows"), "none");
        assert_eq!(text(&decl, "grid-template-columns"), "1fr");
    }

    #[test]
    fn test_areas_form() {
        let mut decl = StyleDeclaration::new();
        let input = "\"head head\" 50px \"nav main\" / 120px 1fr";
        assert_eq!(expand(&mut decl, "grid-template", input).0, Outcome::Continue);
        assert_eq!(text(&decl, "grid-template-rows"), "50px auto");
        assert_eq!(text(&decl, "grid-template-columns"), "120px 1fr");
        assert_eq!(text(&decl, "grid-template-areas"), "\"head head\" \"nav main\"");
    }

    #[test]
    fn test_malformed_areas_do_not_fall_through() {
        let mut decl = StyleDeclaration::new();
        let (outcome, _) = expand(&mut decl, "grid-template", "\"a\" \"b b\" / 1fr");
        assert_eq!(outcome, Outcome::Invalid);
        let (outcome, _) = expand(&mut decl, "grid-template", "1fr \"a\" / 1fr");
        assert_eq!(outcome, Outcome::Invalid);
        assert!(decl.is_empty());
    }

    #[test]
    fn test_rows_columns_rejections() {
        let mut decl = StyleDeclaration::new();
        assert_eq!(expand(&mut decl, "grid-template", "1fr").0, Outcome::Invalid);
        assert_eq!(expand(&mut decl, "grid-template", "1fr / 1fr / 1fr").0, Outcome::Invalid);
        assert_eq!(expand(&mut decl, "grid-template", "none none").0, Outcome::Invalid);
        assert_eq!(expand(&mut decl, "grid-template", "red / 1fr").0, Outcome::Invalid);
    }
}

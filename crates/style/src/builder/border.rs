//! Border builders

use super::{build_with, value_text, BuilderBase, ShorthandBuilder};
use crate::schema::{initial_value_of, longhand};
use crate::value::StyleValue;

/// `width style color`, leaving out initial values
fn side_text(values: [&StyleValue; 3], names: [&str; 3], minified: bool) -> Option<String> {
    let mut parts = Vec::with_capacity(3);
    for (value, name) in values.iter().zip(names) {
        let unit = value.as_primitive()?;
        if !longhand(name)?.accepts(unit) {
            return None;
        }
        if initial_value_of(name).ok().as_ref() != Some(*value) {
            parts.push(value_text(value, minified));
        }
    }

    if parts.is_empty() {
        parts.push(value_text(values[0], minified));
    }
    Some(parts.join(" "))
}

/// border-top, border-right, border-bottom, border-left
pub struct BorderSideBuilder<'a> {
    base: BuilderBase<'a>,
}

impl<'a> BorderSideBuilder<'a> {
    pub fn new(base: BuilderBase<'a>) -> Self {
        Self { base }
    }
}

impl ShorthandBuilder for BorderSideBuilder<'_> {
    fn build(&self, minified: bool) -> Option<String> {
        let names = self.base.schema().longhands;
        build_with(&self.base, minified, |values| match (values.as_slice(), names) {
            ([w, s, c], [wn, sn, cn]) => side_text([*w, *s, *c], [*wn, *sn, *cn], minified),
            _ => None,
        })
    }
}

/// `border`, only when all four sides agree
pub struct BorderBuilder<'a> {
    base: BuilderBase<'a>,
}

impl<'a> BorderBuilder<'a> {
    pub fn new(base: BuilderBase<'a>) -> Self {
        Self { base }
    }
}

impl ShorthandBuilder for BorderBuilder<'_> {
    fn build(&self, minified: bool) -> Option<String> {
        let names = self.base.schema().longhands;
        build_with(&self.base, minified, |values| {
            if values.len() != 12 || names.len() != 12 {
                return None;
            }
            // Four widths, four styles, four colors
            let uniform = values.chunks(4).all(|group| group.iter().all(|v| *v == group[0]));
            if !uniform {
                return None;
            }
            side_text([values[0], values[4], values[8]], [names[0], names[4], names[8]], minified)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::tests::{assert_round_trip, build};
    use crate::declaration::StyleDeclaration;

    #[test]
    fn test_defaults_omitted() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("border-top", "medium solid currentcolor", false).unwrap();
        assert_eq!(build(&decl, "border-top").as_deref(), Some("solid"));

        decl.set_property("border-top", "none", false).unwrap();
        assert_eq!(build(&decl, "border-top").as_deref(), Some("medium"));
    }

    #[test]
    fn test_side_order() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("border-right", "blue dashed", false).unwrap_err();
        decl.set_property("border-right", "dashed 3px blue", false).unwrap();
        assert_eq!(build(&decl, "border-right").as_deref(), Some("3px dashed blue"));
    }

    #[test]
    fn test_border_needs_uniform_sides() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("border", "1px solid red", false).unwrap();
        assert_eq!(build(&decl, "border").as_deref(), Some("1px solid red"));

        decl.set_property("border-left-color", "blue", false).unwrap();
        assert_eq!(build(&decl, "border"), None);
        assert_eq!(build(&decl, "border-top").as_deref(), Some("1px solid red"));
        assert_eq!(build(&decl, "border-color").as_deref(), Some("red red red blue"));
    }

    #[test]
    fn test_invalid_raw_value_abstains() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("border-bottom", "1px", false).unwrap();
        decl.set_value("border-bottom-style", crate::value::StyleValue::ident("wavy"));
        assert_eq!(build(&decl, "border-bottom"), None);
    }

    #[test]
    fn test_round_trip() {
        for input in ["1px solid red", "thick", "dotted", "#fff", "0 double"] {
            assert_round_trip("border-left", input);
            assert_round_trip("border", input);
        }
    }
}

//! Outline builder
//!
//! `auto` on its own goes to both style and color, so when only one of them
//! is `auto` the other has to be written out even if it is initial.

use super::{build_with, value_text, BuilderBase, ShorthandBuilder, Values};
use crate::schema::{initial_value_of, longhand};
use crate::value::StyleValue;

fn is_auto(value: &StyleValue) -> bool {
    value.as_primitive().map_or(false, |unit| unit.is_ident("auto"))
}

fn outline_text(values: &Values<'_>, names: &[&str], minified: bool) -> Option<String> {
    // Schema order is color, style, width
    let ([color, style, width], [color_name, style_name, width_name]) = (values.as_slice(), names) else {
        return None;
    };
    for (value, name) in [(color, color_name), (style, style_name), (width, width_name)] {
        let unit = value.as_primitive()?;
        if !longhand(name)?.accepts(unit) {
            return None;
        }
    }

    let is_initial = |value: &StyleValue, name: &str| initial_value_of(name).ok().as_ref() == Some(value);
    let width_part = (!is_initial(width, width_name)).then(|| value_text(width, minified));

    let mut parts = Vec::with_capacity(3);
    match (is_auto(color), is_auto(style)) {
        (true, true) => parts.push("auto".to_string()),
        (true, false) | (false, true) => {
            parts.push(value_text(color, minified));
            parts.push(value_text(style, minified));
        }
        (false, false) => {
            if !is_initial(color, color_name) {
                parts.push(value_text(color, minified));
            }
            if !is_initial(style, style_name) {
                parts.push(value_text(style, minified));
            }
        }
    }
    parts.extend(width_part);

    if parts.is_empty() {
        parts.push(value_text(style, minified));
    }
    Some(parts.join(" "))
}

pub struct OutlineBuilder<'a> {
    base: BuilderBase<'a>,
}

impl<'a> OutlineBuilder<'a> {
    pub fn new(base: BuilderBase<'a>) -> Self {
        Self { base }
    }
}

impl ShorthandBuilder for OutlineBuilder<'_> {
    fn build(&self, minified: bool) -> Option<String> {
        let names = self.base.schema().longhands;
        build_with(&self.base, minified, |values| outline_text(values, names, minified))
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::tests::{assert_round_trip, build};
    use crate::declaration::StyleDeclaration;

    #[test]
    fn test_auto() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("outline", "auto", false).unwrap();
        assert_eq!(build(&decl, "outline").as_deref(), Some("auto"));
        decl.set_property("outline-width", "2px", false).unwrap();
        assert_eq!(build(&decl, "outline").as_deref(), Some("auto 2px"));
    }

    #[test]
    fn test_single_auto_keeps_partner() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("outline", "auto", false).unwrap();
        decl.set_property("outline-style", "none", false).unwrap();
        assert_eq!(build(&decl, "outline").as_deref(), Some("auto none"));
    }

    #[test]
    fn test_defaults() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("outline", "none", false).unwrap();
        assert_eq!(build(&decl, "outline").as_deref(), Some("none"));
        decl.set_property("outline", "red thin", false).unwrap();
        assert_eq!(build(&decl, "outline").as_deref(), Some("red thin"));
    }

    #[test]
    fn test_round_trip() {
        for input in ["auto", "auto 1px", "auto dashed", "blue auto", "dotted 3px green", "none", "currentcolor"] {
            assert_round_trip("outline", input);
        }
    }
}

//! Free-order builder
//!
//! Initial values are left out. That is only safe when the remaining text
//! would be routed back to the same longhands, so two clashes make the
//! builder abstain:
//!
//! - a value that is not of the longhand's own type (an identifier in
//!   `list-style-image`, for instance)
//! - a value an earlier, omitted longhand would also accept, which would
//!   capture it on the way back

use smallvec::SmallVec;

use super::{build_with, value_text, BuilderBase, ShorthandBuilder, Values};
use crate::schema::{initial_value_of, Longhand};
use crate::value::StyleValue;

fn is_excluded_type(longhand: &Longhand, value: &StyleValue) -> bool {
    !value.as_primitive().map_or(false, |unit| longhand.accepts(unit))
}

fn invalid_primitive_value_clash(value: &StyleValue, omitted: &[&Longhand]) -> bool {
    value
        .as_primitive()
        .map_or(false, |unit| omitted.iter().any(|l| l.accepts(unit)))
}

fn free_text(
    values: &Values<'_>,
    longhands: &[&'static Longhand],
    shared: &[&str],
    minified: bool,
) -> Option<String> {
    if values.len() != longhands.len() {
        return None;
    }

    let is_initial: SmallVec<[bool; 4]> = longhands
        .iter()
        .zip(values.iter())
        .map(|(l, v)| initial_value_of(l.name).ok().as_ref() == Some(*v))
        .collect();

    let shared_ident = |value: &StyleValue| {
        let unit = value.as_primitive()?;
        shared.iter().copied().find(|ident| unit.is_ident(ident))
    };

    let mut parts: Vec<String> = Vec::new();
    let mut emitted_shared: SmallVec<[&str; 2]> = SmallVec::new();
    let mut omitted: SmallVec<[&Longhand; 4]> = SmallVec::new();

    for (i, (&longhand, &value)) in longhands.iter().zip(values.iter()).enumerate() {
        if is_excluded_type(longhand, value) {
            log::trace!("{}: '{}' is not a valid value", longhand.name, value.css_text());
            return None;
        }
        if is_initial[i] {
            omitted.push(longhand);
            continue;
        }

        match shared_ident(value) {
            // Comes back for every open longhand that accepts it
            Some(ident) => {
                for (j, (other, &other_value)) in longhands.iter().zip(values.iter()).enumerate() {
                    if j != i && is_initial[j] && other_value != value && other.accepts(value.as_primitive()?) {
                        return None;
                    }
                }
                if !emitted_shared.contains(&ident) {
                    emitted_shared.push(ident);
                    parts.push(value_text(value, minified));
                }
            }
            None => {
                if invalid_primitive_value_clash(value, &omitted) {
                    log::trace!("{}: '{}' would be read as an earlier longhand", longhand.name, value.css_text());
                    return None;
                }
                parts.push(value_text(value, minified));
            }
        }
    }

    if parts.is_empty() {
        parts.push(value_text(values.first()?, minified));
    }
    Some(parts.join(" "))
}

/// list-style, flex-flow, columns, column-rule
pub struct FreeOrderBuilder<'a> {
    base: BuilderBase<'a>,
    shared: &'static [&'static str],
}

impl<'a> FreeOrderBuilder<'a> {
    pub fn new(base: BuilderBase<'a>, shared: &'static [&'static str]) -> Self {
        Self { base, shared }
    }
}

impl ShorthandBuilder for FreeOrderBuilder<'_> {
    fn build(&self, minified: bool) -> Option<String> {
        let longhands: SmallVec<[&'static Longhand; 4]> = self.base.schema().subproperties().collect();
        build_with(&self.base, minified, |values| free_text(values, &longhands, self.shared, minified))
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::tests::{assert_round_trip, build};
    use crate::declaration::StyleDeclaration;
    use crate::value::StyleValue;

    #[test]
    fn test_identifier_in_image_slot_abstains() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("list-style", "square", false).unwrap();
        decl.set_value("list-style-image", StyleValue::ident("disc"));
        assert_eq!(build(&decl, "list-style"), None);
    }

    #[test]
    fn test_initial_values_omitted() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("list-style", "inside url(x.png)", false).unwrap();
        assert_eq!(build(&decl, "list-style").as_deref(), Some("inside url(\"x.png\")"));

        decl.set_property("list-style", "outside", false).unwrap();
        assert_eq!(build(&decl, "list-style").as_deref(), Some("outside"));
    }

    #[test]
    fn test_shared_none_written_once() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("list-style", "none", false).unwrap();
        assert_eq!(build(&decl, "list-style").as_deref(), Some("none"));
    }

    #[test]
    fn test_shared_ident_would_overwrite_omitted() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("columns", "auto", false).unwrap();
        decl.set_property("column-count", "auto", false).unwrap();
        assert_eq!(build(&decl, "columns").as_deref(), Some("auto"));

        decl.set_property("column-count", "4", false).unwrap();
        assert_eq!(build(&decl, "columns").as_deref(), Some("4"));
    }

    #[test]
    fn test_earlier_omitted_longhand_clash() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("list-style", "square", false).unwrap();
        decl.set_property("list-style-type", "inside", false).unwrap();
        assert_eq!(build(&decl, "list-style"), None);
    }

    #[test]
    fn test_round_trip() {
        for input in ["none", "square", "inside none", "url(a.png) lower-roman", "\"-\" inside"] {
            assert_round_trip("list-style", input);
        }
        for input in ["3", "10em", "auto", "auto 2", "10em 2"] {
            assert_round_trip("columns", input);
        }
        assert_round_trip("flex-flow", "column wrap");
        assert_round_trip("column-rule", "2px dashed red");
    }
}

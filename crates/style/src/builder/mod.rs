//! Shorthand builders
//!
//! A builder reads a shorthand's longhands from a declaration and returns
//! the shortest text that expands back to the same values, or `None` when
//! no such text exists. Builders never write to the declaration.

mod border;
mod box_model;
mod generic;
mod grid_template;
mod outline;
mod sequence;

use smallvec::SmallVec;

use crate::declaration::StyleDeclaration;
use crate::schema::{ShorthandKind, ShorthandSchema};
use crate::value::StyleValue;

pub use border::{BorderBuilder, BorderSideBuilder};
pub use box_model::BoxBuilder;
pub use generic::FreeOrderBuilder;
pub use grid_template::GridTemplateBuilder;
pub use outline::OutlineBuilder;
pub use sequence::SequenceBuilder;

pub trait ShorthandBuilder {
    /// Shorthand text, or `None` to serialize the longhands one by one
    fn build(&self, minified: bool) -> Option<String>;
}

/// Longhand values that passed the checks every builder shares
pub type Values<'a> = SmallVec<[&'a StyleValue; 4]>;

/// What the shared checks decided
pub enum Prelude<'a> {
    /// The text is settled, or the shorthand cannot be used
    Done(Option<String>),
    /// Plain values, one per longhand in schema order
    Values(Values<'a>),
}

/// Read access shared by every builder
#[derive(Clone, Copy)]
pub struct BuilderBase<'a> {
    schema: &'static ShorthandSchema,
    declaration: &'a StyleDeclaration,
}

impl<'a> BuilderBase<'a> {
    pub fn new(schema: &'static ShorthandSchema, declaration: &'a StyleDeclaration) -> Self {
        Self { schema, declaration }
    }

    pub fn schema(&self) -> &'static ShorthandSchema {
        self.schema
    }

    /// All longhands present with one importance; a proxy written by this
    /// shorthand prints its original text; CSS-wide keywords collapse when
    /// all longhands agree.
    pub fn prelude(&self, minified: bool) -> Prelude<'a> {
        let mut entries = SmallVec::<[_; 4]>::new();
        for name in self.schema.longhands {
            match self.declaration.entry(name) {
                Some(entry) => entries.push(entry),
                None => return Prelude::Done(None),
            }
        }

        let Some(first) = entries.first() else {
            return Prelude::Done(None);
        };
        if entries.iter().any(|e| e.important != first.important) {
            return Prelude::Done(None);
        }

        let proxies = entries.iter().filter(|e| e.value.as_proxy().is_some()).count();
        if proxies > 0 {
            if proxies != entries.len() {
                return Prelude::Done(None);
            }
            let text = match first.value.as_proxy() {
                Some(proxy)
                    if proxy.property() == self.schema.name
                        && entries.iter().all(|e| e.value.as_proxy() == Some(proxy)) =>
                {
                    Some(proxy.original_text(minified))
                }
                _ => None,
            };
            return Prelude::Done(text);
        }

        let keywords = entries.iter().filter(|e| e.value.keyword().is_some()).count();
        if keywords > 0 {
            let state = first.value.keyword_state();
            if keywords == entries.len() && entries.iter().all(|e| e.value.keyword_state() == state) {
                return Prelude::Done(first.value.keyword().map(|k| k.as_str().to_string()));
            }
            return Prelude::Done(None);
        }

        if entries.iter().any(|e| matches!(e.value, StyleValue::Raw(_))) {
            return Prelude::Done(None);
        }

        Prelude::Values(entries.iter().map(|e| &e.value).collect())
    }
}

/// Text of one value
pub fn value_text(value: &StyleValue, minified: bool) -> String {
    if minified {
        value.minified_css_text()
    } else {
        value.css_text()
    }
}

/// Run the shared checks, then the shape's own reconstruction
pub(crate) fn build_with<'a>(
    base: &BuilderBase<'a>,
    minified: bool,
    shape: impl FnOnce(&Values<'a>) -> Option<String>,
) -> Option<String> {
    match base.prelude(minified) {
        Prelude::Done(text) => text,
        Prelude::Values(values) => shape(&values),
    }
}

/// Builder for a shorthand over a declaration
pub fn for_schema<'a>(
    schema: &'static ShorthandSchema,
    declaration: &'a StyleDeclaration,
) -> Box<dyn ShorthandBuilder + 'a> {
    let base = BuilderBase::new(schema, declaration);
    match schema.kind {
        ShorthandKind::Box => Box::new(BoxBuilder::new(base)),
        ShorthandKind::BorderSide => Box::new(BorderSideBuilder::new(base)),
        ShorthandKind::Border => Box::new(BorderBuilder::new(base)),
        ShorthandKind::Sequence { .. } => Box::new(SequenceBuilder::new(base)),
        ShorthandKind::Outline => Box::new(OutlineBuilder::new(base)),
        ShorthandKind::GridTemplate => Box::new(GridTemplateBuilder::new(base)),
        ShorthandKind::Free { shared } => Box::new(FreeOrderBuilder::new(base, shared)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::keyword::CssWideKeyword;
    use crate::schema::shorthand;

    pub(crate) fn build(decl: &StyleDeclaration, property: &str) -> Option<String> {
        for_schema(shorthand(property).unwrap(), decl).build(false)
    }

    pub(crate) fn build_minified(decl: &StyleDeclaration, property: &str) -> Option<String> {
        for_schema(shorthand(property).unwrap(), decl).build(true)
    }

    /// Expand, build, expand the built text again and compare the longhands
    pub(crate) fn assert_round_trip(property: &str, input: &str) -> String {
        let mut decl = StyleDeclaration::new();
        decl.set_property(property, input, false).unwrap();
        let text = build(&decl, property).unwrap_or_else(|| panic!("{}: '{}' did not build", property, input));

        let mut again = StyleDeclaration::new();
        again.set_property(property, &text, false).unwrap();
        for name in shorthand(property).unwrap().longhands {
            assert_eq!(decl.get_value(name), again.get_value(name), "{}: '{}' -> '{}'", name, input, text);
        }
        text
    }

    #[test]
    fn test_missing_longhand_abstains() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("margin-top", "1px", false).unwrap();
        assert_eq!(build(&decl, "margin"), None);
    }

    #[test]
    fn test_mixed_importance_abstains() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("gap", "1px", false).unwrap();
        decl.set_property("row-gap", "2px", true).unwrap();
        assert_eq!(build(&decl, "gap"), None);
    }

    #[test]
    fn test_keyword_unification() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("outline", "unset", false).unwrap();
        assert_eq!(build(&decl, "outline").as_deref(), Some("unset"));

        decl.set_value("outline-width", StyleValue::Keyword(CssWideKeyword::Inherit));
        assert_eq!(build(&decl, "outline"), None);

        decl.set_property("outline-width", "2px", false).unwrap();
        assert_eq!(build(&decl, "outline"), None);
    }

    #[test]
    fn test_proxy_prints_original_text() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("padding", "var(--a)  0.5em", false).unwrap();
        assert_eq!(build(&decl, "padding").as_deref(), Some("var(--a) 0.5em"));
        assert_eq!(build_minified(&decl, "padding").as_deref(), Some("var(--a) .5em"));

        decl.set_property("padding-top", "1px", false).unwrap();
        assert_eq!(build(&decl, "padding"), None);
    }

    #[test]
    fn test_proxy_from_other_shorthand_abstains() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("border", "var(--b)", false).unwrap();
        assert_eq!(build(&decl, "border-top"), None);
        assert_eq!(build(&decl, "border-width"), None);
        assert_eq!(build(&decl, "border").as_deref(), Some("var(--b)"));
    }
}

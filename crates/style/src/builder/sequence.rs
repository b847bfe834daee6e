//! Two-value builder

use super::{build_with, value_text, BuilderBase, ShorthandBuilder};

pub struct SequenceBuilder<'a> {
    base: BuilderBase<'a>,
}

impl<'a> SequenceBuilder<'a> {
    pub fn new(base: BuilderBase<'a>) -> Self {
        Self { base }
    }
}

impl ShorthandBuilder for SequenceBuilder<'_> {
    fn build(&self, minified: bool) -> Option<String> {
        build_with(&self.base, minified, |values| match values.as_slice() {
            [first, second] if first.as_primitive().is_some() && second.as_primitive().is_some() => {
                if first == second {
                    Some(value_text(first, minified))
                } else {
                    Some(format!("{} {}", value_text(first, minified), value_text(second, minified)))
                }
            }
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::tests::{assert_round_trip, build, build_minified};
    use crate::declaration::StyleDeclaration;

    #[test]
    fn test_collapses_equal_values() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("row-gap", "4px", false).unwrap();
        decl.set_property("column-gap", "4px", false).unwrap();
        assert_eq!(build(&decl, "gap").as_deref(), Some("4px"));

        decl.set_property("column-gap", "0.25em", false).unwrap();
        assert_eq!(build(&decl, "gap").as_deref(), Some("4px 0.25em"));
        assert_eq!(build_minified(&decl, "gap").as_deref(), Some("4px .25em"));
    }

    #[test]
    fn test_round_trip() {
        assert_round_trip("overflow", "hidden");
        assert_round_trip("overflow", "clip auto");
        assert_round_trip("pause", "strong 20ms");
        assert_eq!(assert_round_trip("cue", "url(a.wav) url(a.wav)"), "url(\"a.wav\")");
    }
}

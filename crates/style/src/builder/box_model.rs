//! Top/right/bottom/left builder

use super::{build_with, value_text, BuilderBase, ShorthandBuilder, Values};

/// Shortest TRBL form that expands back to the four values
fn minimal_trbl(values: &Values<'_>, minified: bool) -> Option<String> {
    let [top, right, bottom, left] = values.as_slice() else {
        return None;
    };
    if [top, right, bottom, left].iter().any(|v| v.as_primitive().is_none()) {
        return None;
    }

    let count = if left != right {
        4
    } else if bottom != top {
        3
    } else if right != top {
        2
    } else {
        1
    };

    let sides = [top, right, bottom, left];
    Some(sides[..count].iter().map(|v| value_text(v, minified)).collect::<Vec<_>>().join(" "))
}

pub struct BoxBuilder<'a> {
    base: BuilderBase<'a>,
}

impl<'a> BoxBuilder<'a> {
    pub fn new(base: BuilderBase<'a>) -> Self {
        Self { base }
    }
}

impl ShorthandBuilder for BoxBuilder<'_> {
    fn build(&self, minified: bool) -> Option<String> {
        build_with(&self.base, minified, |values| minimal_trbl(values, minified))
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::tests::{assert_round_trip, build, build_minified};
    use crate::declaration::StyleDeclaration;

    #[test]
    fn test_minimal_forms() {
        let cases = [
            ("1px 1px 1px 1px", "1px"),
            ("1px 2px 1px 2px", "1px 2px"),
            ("1px 2px 3px 2px", "1px 2px 3px"),
            ("1px 2px 3px 4px", "1px 2px 3px 4px"),
            ("1px 2px 1px 4px", "1px 2px 1px 4px"),
        ];
        for (input, expected) in cases {
            let mut decl = StyleDeclaration::new();
            decl.set_property("margin", input, false).unwrap();
            assert_eq!(build(&decl, "margin").as_deref(), Some(expected), "{}", input);
        }
    }

    #[test]
    fn test_built_from_longhands() {
        let mut decl = StyleDeclaration::new();
        for side in ["top", "right", "bottom", "left"] {
            decl.set_property(&format!("padding-{}", side), "0.5em", false).unwrap();
        }
        assert_eq!(build(&decl, "padding").as_deref(), Some("0.5em"));
        assert_eq!(build_minified(&decl, "padding").as_deref(), Some(".5em"));
    }

    #[test]
    fn test_round_trip() {
        for input in ["1px", "1px 2px", "1px 2px 3px", "1px 2px 3px 4px", "auto 0"] {
            assert_round_trip("margin", input);
        }
        assert_round_trip("border-style", "solid none dotted");
        assert_round_trip("border-color", "red #0f0");
        assert_round_trip("inset", "auto 10% 0 calc(1px + 2em)");
    }
}

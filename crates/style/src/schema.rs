//! Shorthand schema
//!
//! Static metadata: every longhand with its accepted value types, keywords
//! and initial value, every shorthand with its shape and ordered longhands,
//! and the legacy alias table.

use std::sync::LazyLock;

use cssom_css::{LexicalChain, LexicalUnit};
use rustc_hash::FxHashMap;

use crate::error::{StyleError, StyleResult};
use crate::grid;
use crate::guard::RecursionGuard;
use crate::types::ValueType;
use crate::value::StyleValue;

/// Initial value of a longhand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialValue {
    /// Literal value text
    Text(&'static str),
    /// Same initial value as another longhand
    SameAs(&'static str),
}

/// How a longhand's value is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LonghandSyntax {
    /// Exactly one unit
    Single,
    /// A grid track list
    TrackList,
    /// Grid template area strings
    TemplateAreas,
}

/// A longhand property
#[derive(Debug)]
pub struct Longhand {
    pub name: &'static str,
    pub types: &'static [ValueType],
    pub keywords: &'static [&'static str],
    pub initial: InitialValue,
    pub syntax: LonghandSyntax,
}

impl Longhand {
    const fn new(
        name: &'static str,
        types: &'static [ValueType],
        keywords: &'static [&'static str],
        initial: &'static str,
    ) -> Self {
        Self { name, types, keywords, initial: InitialValue::Text(initial), syntax: LonghandSyntax::Single }
    }

    const fn same_as(mut self, other: &'static str) -> Self {
        self.initial = InitialValue::SameAs(other);
        self
    }

    const fn with_syntax(mut self, syntax: LonghandSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Whether `ident` is one of this longhand's keywords
    pub fn has_keyword(&self, ident: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(ident))
    }

    /// Whether a single unit is a valid value
    pub fn accepts(&self, unit: &LexicalUnit) -> bool {
        if let Some(ident) = unit.as_ident() {
            if self.has_keyword(ident) {
                return true;
            }
        }
        self.types.iter().any(|ty| ty.matches(unit))
    }

    /// Whether a whole value is valid for this longhand
    pub fn accepts_value(&self, units: &[LexicalUnit]) -> bool {
        match (self.syntax, units) {
            (LonghandSyntax::Single, [unit]) => self.accepts(unit),
            (LonghandSyntax::Single, _) => false,
            (_, [unit]) if unit.is_ident("none") => true,
            (LonghandSyntax::TrackList, _) => grid::parse_track_list(units, true).is_some(),
            (LonghandSyntax::TemplateAreas, _) => grid::parse_template_areas(units).is_some(),
        }
    }
}

/// Shorthand shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShorthandKind {
    /// Four positional top/right/bottom/left longhands
    Box,
    /// Width, style and color of one border side
    BorderSide,
    /// Width, style and color of all four sides
    Border,
    /// Two positional longhands
    Sequence { taint_sensitive: bool },
    /// Outline with `auto` shared by style and color
    Outline,
    /// Rows, columns and areas
    GridTemplate,
    /// Free-order, type-discriminated longhands; `shared` identifiers go to
    /// every remaining longhand that accepts them
    Free { shared: &'static [&'static str] },
}

/// A shorthand property
#[derive(Debug)]
pub struct ShorthandSchema {
    pub name: &'static str,
    pub kind: ShorthandKind,
    /// Longhands in canonical order
    pub longhands: &'static [&'static str],
}

impl ShorthandSchema {
    const fn new(name: &'static str, kind: ShorthandKind, longhands: &'static [&'static str]) -> Self {
        Self { name, kind, longhands }
    }

    /// Schema entries of the longhands, in order
    pub fn subproperties(&self) -> impl Iterator<Item = &'static Longhand> + '_ {
        self.longhands.iter().filter_map(|name| longhand(name))
    }

    pub fn contains(&self, longhand: &str) -> bool {
        self.longhands.contains(&longhand)
    }
}

const LINE_WIDTHS: &[&str] = &["thin", "medium", "thick"];
const BORDER_STYLES: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];
const OUTLINE_STYLES: &[&str] = &[
    "auto", "none", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];
const OVERFLOW: &[&str] = &["visible", "hidden", "clip", "scroll", "auto"];
const PAUSE_STRENGTHS: &[&str] = &["none", "x-weak", "weak", "medium", "strong", "x-strong"];
const SIZES: &[&str] = &["auto", "min-content", "max-content", "fit-content"];

use ValueType::{
    Color, CounterStyle, Image, Length, LengthPercentage, NonNegativeLength,
    NonNegativeLengthPercentage, Number, PositiveInteger, Time, Url,
};

static LONGHANDS: &[Longhand] = &[
    // Box model
    Longhand::new("margin-top", &[LengthPercentage], &["auto"], "0"),
    Longhand::new("margin-right", &[LengthPercentage], &["auto"], "0"),
    Longhand::new("margin-bottom", &[LengthPercentage], &["auto"], "0"),
    Longhand::new("margin-left", &[LengthPercentage], &["auto"], "0"),
    Longhand::new("padding-top", &[NonNegativeLengthPercentage], &[], "0"),
    Longhand::new("padding-right", &[NonNegativeLengthPercentage], &[], "0"),
    Longhand::new("padding-bottom", &[NonNegativeLengthPercentage], &[], "0"),
    Longhand::new("padding-left", &[NonNegativeLengthPercentage], &[], "0"),
    Longhand::new("top", &[LengthPercentage], &["auto"], "auto"),
    Longhand::new("right", &[LengthPercentage], &["auto"], "auto"),
    Longhand::new("bottom", &[LengthPercentage], &["auto"], "auto"),
    Longhand::new("left", &[LengthPercentage], &["auto"], "auto"),
    Longhand::new("scroll-margin-top", &[Length], &[], "0"),
    Longhand::new("scroll-margin-right", &[Length], &[], "0"),
    Longhand::new("scroll-margin-bottom", &[Length], &[], "0"),
    Longhand::new("scroll-margin-left", &[Length], &[], "0"),
    Longhand::new("scroll-padding-top", &[NonNegativeLengthPercentage], &["auto"], "auto"),
    Longhand::new("scroll-padding-right", &[NonNegativeLengthPercentage], &["auto"], "auto"),
    Longhand::new("scroll-padding-bottom", &[NonNegativeLengthPercentage], &["auto"], "auto"),
    Longhand::new("scroll-padding-left", &[NonNegativeLengthPercentage], &["auto"], "auto"),
    // Borders
    Longhand::new("border-top-width", &[NonNegativeLength], LINE_WIDTHS, "medium"),
    Longhand::new("border-right-width", &[NonNegativeLength], LINE_WIDTHS, "medium"),
    Longhand::new("border-bottom-width", &[NonNegativeLength], LINE_WIDTHS, "medium"),
    Longhand::new("border-left-width", &[NonNegativeLength], LINE_WIDTHS, "medium"),
    Longhand::new("border-top-style", &[], BORDER_STYLES, "none"),
    Longhand::new("border-right-style", &[], BORDER_STYLES, "none"),
    Longhand::new("border-bottom-style", &[], BORDER_STYLES, "none"),
    Longhand::new("border-left-style", &[], BORDER_STYLES, "none"),
    Longhand::new("border-top-color", &[Color], &[], "currentcolor"),
    Longhand::new("border-right-color", &[Color], &[], "currentcolor"),
    Longhand::new("border-bottom-color", &[Color], &[], "currentcolor"),
    Longhand::new("border-left-color", &[Color], &[], "currentcolor"),
    // Outline
    Longhand::new("outline-color", &[Color], &["auto"], "currentcolor"),
    Longhand::new("outline-style", &[], OUTLINE_STYLES, "none"),
    Longhand::new("outline-width", &[NonNegativeLength], LINE_WIDTHS, "").same_as("border-top-width"),
    // Gaps and overflow
    Longhand::new("row-gap", &[NonNegativeLengthPercentage], &["normal"], "normal"),
    Longhand::new("column-gap", &[NonNegativeLengthPercentage], &["normal"], "normal"),
    Longhand::new("overflow-x", &[], OVERFLOW, "visible"),
    Longhand::new("overflow-y", &[], OVERFLOW, "visible"),
    // Speech
    Longhand::new("pause-before", &[Time], PAUSE_STRENGTHS, "none"),
    Longhand::new("pause-after", &[Time], PAUSE_STRENGTHS, "none"),
    Longhand::new("cue-before", &[Url], &["none"], "none"),
    Longhand::new("cue-after", &[Url], &["none"], "none"),
    // Grid
    Longhand::new("grid-template-rows", &[], &["none"], "none").with_syntax(LonghandSyntax::TrackList),
    Longhand::new("grid-template-columns", &[], &["none"], "none").with_syntax(LonghandSyntax::TrackList),
    Longhand::new("grid-template-areas", &[], &["none"], "none").with_syntax(LonghandSyntax::TemplateAreas),
    // Lists
    Longhand::new("list-style-position", &[], &["inside", "outside"], "outside"),
    Longhand::new("list-style-image", &[Image], &["none"], "none"),
    Longhand::new("list-style-type", &[CounterStyle, ValueType::String], &["none"], "disc"),
    // Flex
    Longhand::new("flex-direction", &[], &["row", "row-reverse", "column", "column-reverse"], "row"),
    Longhand::new("flex-wrap", &[], &["nowrap", "wrap", "wrap-reverse"], "nowrap"),
    // Multi-column
    Longhand::new("column-width", &[NonNegativeLength], &["auto"], "auto"),
    Longhand::new("column-count", &[PositiveInteger], &["auto"], "auto"),
    Longhand::new("column-rule-width", &[NonNegativeLength], LINE_WIDTHS, "").same_as("border-top-width"),
    Longhand::new("column-rule-style", &[], BORDER_STYLES, "").same_as("border-top-style"),
    Longhand::new("column-rule-color", &[Color], &[], "").same_as("border-top-color"),
    // Standalone
    Longhand::new("color", &[Color], &[], "canvastext"),
    Longhand::new("background-color", &[Color], &[], "transparent"),
    Longhand::new("width", &[NonNegativeLengthPercentage], SIZES, "auto"),
    Longhand::new("height", &[NonNegativeLengthPercentage], SIZES, "auto"),
    Longhand::new("opacity", &[Number], &[], "1"),
    Longhand::new(
        "display",
        &[],
        &[
            "block", "inline", "inline-block", "flex", "inline-flex", "grid", "inline-grid",
            "flow-root", "list-item", "table", "contents", "none",
        ],
        "inline",
    ),
];

static SHORTHANDS: &[ShorthandSchema] = &[
    ShorthandSchema::new("margin", ShorthandKind::Box, &["margin-top", "margin-right", "margin-bottom", "margin-left"]),
    ShorthandSchema::new("padding", ShorthandKind::Box, &["padding-top", "padding-right", "padding-bottom", "padding-left"]),
    ShorthandSchema::new("inset", ShorthandKind::Box, &["top", "right", "bottom", "left"]),
    ShorthandSchema::new(
        "border-width",
        ShorthandKind::Box,
        &["border-top-width", "border-right-width", "border-bottom-width", "border-left-width"],
    ),
    ShorthandSchema::new(
        "border-style",
        ShorthandKind::Box,
        &["border-top-style", "border-right-style", "border-bottom-style", "border-left-style"],
    ),
    ShorthandSchema::new(
        "border-color",
        ShorthandKind::Box,
        &["border-top-color", "border-right-color", "border-bottom-color", "border-left-color"],
    ),
    ShorthandSchema::new(
        "scroll-margin",
        ShorthandKind::Box,
        &["scroll-margin-top", "scroll-margin-right", "scroll-margin-bottom", "scroll-margin-left"],
    ),
    ShorthandSchema::new(
        "scroll-padding",
        ShorthandKind::Box,
        &["scroll-padding-top", "scroll-padding-right", "scroll-padding-bottom", "scroll-padding-left"],
    ),
    ShorthandSchema::new("border-top", ShorthandKind::BorderSide, &["border-top-width", "border-top-style", "border-top-color"]),
    ShorthandSchema::new(
        "border-right",
        ShorthandKind::BorderSide,
        &["border-right-width", "border-right-style", "border-right-color"],
    ),
    ShorthandSchema::new(
        "border-bottom",
        ShorthandKind::BorderSide,
        &["border-bottom-width", "border-bottom-style", "border-bottom-color"],
    ),
    ShorthandSchema::new("border-left", ShorthandKind::BorderSide, &["border-left-width", "border-left-style", "border-left-color"]),
    ShorthandSchema::new(
        "border",
        ShorthandKind::Border,
        &[
            "border-top-width", "border-right-width", "border-bottom-width", "border-left-width",
            "border-top-style", "border-right-style", "border-bottom-style", "border-left-style",
            "border-top-color", "border-right-color", "border-bottom-color", "border-left-color",
        ],
    ),
    ShorthandSchema::new("gap", ShorthandKind::Sequence { taint_sensitive: false }, &["row-gap", "column-gap"]),
    ShorthandSchema::new("overflow", ShorthandKind::Sequence { taint_sensitive: false }, &["overflow-x", "overflow-y"]),
    ShorthandSchema::new("pause", ShorthandKind::Sequence { taint_sensitive: false }, &["pause-before", "pause-after"]),
    ShorthandSchema::new("cue", ShorthandKind::Sequence { taint_sensitive: true }, &["cue-before", "cue-after"]),
    ShorthandSchema::new("outline", ShorthandKind::Outline, &["outline-color", "outline-style", "outline-width"]),
    ShorthandSchema::new(
        "grid-template",
        ShorthandKind::GridTemplate,
        &["grid-template-rows", "grid-template-columns", "grid-template-areas"],
    ),
    ShorthandSchema::new(
        "list-style",
        ShorthandKind::Free { shared: &["none"] },
        &["list-style-position", "list-style-image", "list-style-type"],
    ),
    ShorthandSchema::new("flex-flow", ShorthandKind::Free { shared: &[] }, &["flex-direction", "flex-wrap"]),
    ShorthandSchema::new("columns", ShorthandKind::Free { shared: &["auto"] }, &["column-width", "column-count"]),
    ShorthandSchema::new(
        "column-rule",
        ShorthandKind::Free { shared: &[] },
        &["column-rule-width", "column-rule-style", "column-rule-color"],
    ),
];

/// Legacy names and the property they stand for
static ALIASES: &[(&str, &str)] = &[
    ("grid-gap", "gap"),
    ("grid-row-gap", "row-gap"),
    ("grid-column-gap", "column-gap"),
];

static LONGHAND_INDEX: LazyLock<FxHashMap<&'static str, &'static Longhand>> =
    LazyLock::new(|| LONGHANDS.iter().map(|l| (l.name, l)).collect());

static SHORTHAND_INDEX: LazyLock<FxHashMap<&'static str, &'static ShorthandSchema>> =
    LazyLock::new(|| SHORTHANDS.iter().map(|s| (s.name, s)).collect());

static ALIAS_INDEX: LazyLock<FxHashMap<&'static str, &'static str>> =
    LazyLock::new(|| ALIASES.iter().copied().collect());

/// Shorthands that contain each longhand, largest first
static CONTAINING: LazyLock<FxHashMap<&'static str, Vec<&'static ShorthandSchema>>> = LazyLock::new(|| {
    let mut m: FxHashMap<&'static str, Vec<&'static ShorthandSchema>> = FxHashMap::default();
    for schema in SHORTHANDS {
        for name in schema.longhands {
            m.entry(*name).or_default().push(schema);
        }
    }
    for list in m.values_mut() {
        // Stable sort keeps table order among equal sizes
        list.sort_by(|a, b| b.longhands.len().cmp(&a.longhands.len()));
    }
    m
});

pub fn longhand(name: &str) -> Option<&'static Longhand> {
    LONGHAND_INDEX.get(name).copied()
}

pub fn shorthand(name: &str) -> Option<&'static ShorthandSchema> {
    SHORTHAND_INDEX.get(name).copied()
}

/// Shorthands that contain `longhand`, largest first
pub fn shorthands_containing(longhand: &str) -> &'static [&'static ShorthandSchema] {
    CONTAINING.get(longhand).map(|v| v.as_slice()).unwrap_or(&[])
}

/// Follow the alias table to the property a name stands for
pub fn resolve_alias<'a>(name: &'a str, guard: &mut RecursionGuard) -> StyleResult<&'a str> {
    let mut current = name;
    while let Some(target) = ALIAS_INDEX.get(current) {
        guard.enter()?;
        current = *target;
    }
    Ok(current)
}

/// Initial value of a longhand, following `SameAs` links
pub fn initial_value(name: &str, guard: &mut RecursionGuard) -> StyleResult<StyleValue> {
    let entry = longhand(name).ok_or_else(|| StyleError::UnknownProperty(name.to_string()))?;
    match entry.initial {
        InitialValue::Text(text) => {
            let chain = LexicalChain::parse(text)?;
            Ok(StyleValue::from_units(chain.into_units()))
        }
        InitialValue::SameAs(other) => {
            guard.enter()?;
            let value = initial_value(other, guard);
            guard.decrement();
            value
        }
    }
}

/// Initial value with a fresh guard
pub fn initial_value_of(name: &str) -> StyleResult<StyleValue> {
    initial_value(name, &mut RecursionGuard::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shorthand_longhand_has_schema() {
        for schema in SHORTHANDS {
            for name in schema.longhands {
                assert!(longhand(name).is_some(), "{} lacks a schema entry", name);
            }
        }
    }

    #[test]
    fn test_every_longhand_has_initial_value() {
        for entry in LONGHANDS {
            assert!(initial_value_of(entry.name).is_ok(), "{} has no initial value", entry.name);
        }
    }

    #[test]
    fn test_same_as_initial_value() {
        assert_eq!(initial_value_of("outline-width").unwrap(), StyleValue::ident("medium"));
        assert_eq!(initial_value_of("column-rule-color").unwrap(), StyleValue::ident("currentcolor"));
    }

    #[test]
    fn test_resolve_alias() {
        let mut guard = RecursionGuard::new();
        assert_eq!(resolve_alias("grid-gap", &mut guard).unwrap(), "gap");
        assert_eq!(resolve_alias("margin", &mut guard).unwrap(), "margin");
    }

    #[test]
    fn test_alias_walk_respects_guard() {
        let mut guard = RecursionGuard::new();
        for _ in 0..RecursionGuard::MAX_DEPTH - 1 {
            guard.increment();
        }
        assert!(matches!(
            resolve_alias("grid-row-gap", &mut guard),
            Err(StyleError::ResourceLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_shorthands_containing_largest_first() {
        let names: Vec<_> = shorthands_containing("border-top-color").iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["border", "border-color", "border-top"]);
    }

    #[test]
    fn test_accepts_value() {
        let units = LexicalChain::parse("thick").unwrap().into_units();
        assert!(longhand("border-top-width").unwrap().accepts_value(&units));
        let units = LexicalChain::parse("1px 2px").unwrap().into_units();
        assert!(!longhand("margin-top").unwrap().accepts_value(&units));
        let units = LexicalChain::parse("[a] 1fr [b] auto").unwrap().into_units();
        assert!(longhand("grid-template-rows").unwrap().accepts_value(&units));
    }
}

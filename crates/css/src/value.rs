//! CSS value classification
//!
//! Dimension units are sorted into kinds and colors are recognised by
//! syntax. Nothing is decoded or converted.

use std::sync::LazyLock;

use rustc_hash::FxHashSet;

use crate::lexical::LexicalUnit;

/// Dimension categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Length,
    Angle,
    Time,
    Frequency,
    Resolution,
    /// Grid `fr`
    Flex,
}

impl UnitKind {
    /// Classify a (lowercased) dimension unit
    pub fn of(unit: &str) -> Option<Self> {
        match unit {
            "px" | "em" | "rem" | "ex" | "rex" | "ch" | "rch" | "cap" | "rcap" | "ic" | "ric"
            | "lh" | "rlh" | "cm" | "mm" | "q" | "in" | "pt" | "pc" => Some(UnitKind::Length),
            "vw" | "vh" | "vi" | "vb" | "vmin" | "vmax" | "svw" | "svh" | "lvw" | "lvh" | "dvw"
            | "dvh" | "cqw" | "cqh" | "cqi" | "cqb" | "cqmin" | "cqmax" => Some(UnitKind::Length),
            "deg" | "grad" | "rad" | "turn" => Some(UnitKind::Angle),
            "s" | "ms" => Some(UnitKind::Time),
            "hz" | "khz" => Some(UnitKind::Frequency),
            "dpi" | "dpcm" | "dppx" | "x" => Some(UnitKind::Resolution),
            "fr" => Some(UnitKind::Flex),
            _ => None,
        }
    }
}

const NAMED_COLORS: &[&str] = &[
    "black", "white", "red", "green", "blue", "yellow", "cyan", "aqua", "magenta",
    "fuchsia", "gray", "grey", "silver", "darkgray", "darkgrey", "lightgray",
    "lightgrey", "dimgray", "dimgrey", "maroon", "darkred", "crimson", "indianred",
    "lightcoral", "salmon", "darksalmon", "lightsalmon", "tomato", "orangered",
    "coral", "orange", "darkorange", "gold", "lightyellow", "lemonchiffon", "khaki",
    "darkkhaki", "lime", "limegreen", "lightgreen", "palegreen", "darkgreen",
    "forestgreen", "seagreen", "olive", "olivedrab", "mediumseagreen",
    "springgreen", "mediumspringgreen", "darkseagreen", "mediumaquamarine",
    "yellowgreen", "lawngreen", "chartreuse", "greenyellow", "navy", "darkblue",
    "mediumblue", "royalblue", "steelblue", "dodgerblue", "deepskyblue",
    "cornflowerblue", "skyblue", "lightskyblue", "lightblue", "powderblue",
    "lightsteelblue", "cadetblue", "slateblue", "darkslateblue", "mediumslateblue",
    "teal", "darkcyan", "lightcyan", "aquamarine", "turquoise", "mediumturquoise",
    "darkturquoise", "paleturquoise", "purple", "darkmagenta", "darkviolet",
    "darkorchid", "mediumorchid", "orchid", "violet", "plum", "thistle", "lavender",
    "indigo", "mediumpurple", "blueviolet", "pink", "lightpink", "hotpink",
    "deeppink", "mediumvioletred", "palevioletred", "brown", "saddlebrown",
    "sienna", "chocolate", "peru", "sandybrown", "burlywood", "tan", "rosybrown",
    "snow", "honeydew", "mintcream", "azure", "aliceblue", "ghostwhite",
    "whitesmoke", "seashell", "beige", "oldlace", "floralwhite", "ivory",
    "antiquewhite", "linen", "lavenderblush", "mistyrose", "papayawhip",
    "blanchedalmond", "bisque", "moccasin", "navajowhite", "peachpuff", "wheat",
    "cornsilk", "slategray", "slategrey", "lightslategray", "lightslategrey",
    "darkslategray", "darkslategrey", "transparent", "rebeccapurple", "goldenrod",
    "darkgoldenrod", "palegoldenrod", "lightgoldenrodyellow", "firebrick",
    "darkolivegreen", "midnightblue", "lightseagreen",
];

const SYSTEM_COLORS: &[&str] = &[
    "accentcolor", "accentcolortext", "activetext", "buttonborder", "buttonface",
    "buttontext", "canvas", "canvastext", "field", "fieldtext", "graytext",
    "highlight", "highlighttext", "linktext", "mark", "marktext", "selecteditem",
    "selecteditemtext", "visitedtext",
];

/// Every identifier that is a color
static COLOR_KEYWORDS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    let mut set: FxHashSet<&'static str> = NAMED_COLORS.iter().copied().collect();
    set.extend(SYSTEM_COLORS.iter().copied());
    set.insert("currentcolor");
    set
});

/// Color functions whose arguments are not checked
const OPAQUE_COLOR_FUNCTIONS: &[&str] = &[
    "hwb", "lab", "lch", "oklab", "oklch", "color", "color-mix", "light-dark",
];

/// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`
fn is_hex_color(value: &str) -> bool {
    matches!(value.len(), 3 | 4 | 6 | 8) && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Argument values with comma and slash separators removed
fn color_arguments(args: &[LexicalUnit]) -> Vec<&LexicalUnit> {
    args.iter()
        .filter(|u| !matches!(u, LexicalUnit::Comma | LexicalUnit::Slash))
        .collect()
}

fn is_number_or_percentage(unit: &LexicalUnit) -> bool {
    matches!(unit, LexicalUnit::Integer(_) | LexicalUnit::Number(_) | LexicalUnit::Percentage(_))
        || unit.is_ident("none")
}

fn is_hue(unit: &LexicalUnit) -> bool {
    match unit {
        LexicalUnit::Integer(_) | LexicalUnit::Number(_) => true,
        LexicalUnit::Dimension { unit, .. } => UnitKind::of(unit) == Some(UnitKind::Angle),
        _ => unit.is_ident("none"),
    }
}

/// `rgb()`/`hsl()` take three channels and an optional alpha
fn has_channel_shape(args: &[LexicalUnit], first: fn(&LexicalUnit) -> bool) -> bool {
    match color_arguments(args).as_slice() {
        [a, b, c] => first(a) && is_number_or_percentage(b) && is_number_or_percentage(c),
        [a, b, c, alpha] => {
            first(a) && is_number_or_percentage(b) && is_number_or_percentage(c) && is_number_or_percentage(alpha)
        }
        _ => false,
    }
}

/// Color recognition over lexical units
pub struct ColorParser;

impl ColorParser {
    /// Whether the unit is valid `<color>` syntax
    pub fn is_color(unit: &LexicalUnit) -> bool {
        match unit {
            LexicalUnit::Ident(name) => COLOR_KEYWORDS.contains(name.to_ascii_lowercase().as_str()),
            LexicalUnit::Hash(value) => is_hex_color(value),
            LexicalUnit::Function { name, args } => match name.as_str() {
                "rgb" | "rgba" => has_channel_shape(args, is_number_or_percentage),
                "hsl" | "hsla" => has_channel_shape(args, is_hue),
                other => OPAQUE_COLOR_FUNCTIONS.contains(&other),
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::LexicalChain;

    fn unit(text: &str) -> LexicalUnit {
        LexicalChain::parse(text).unwrap().into_units().remove(0)
    }

    #[test]
    fn test_keywords() {
        assert!(ColorParser::is_color(&unit("red")));
        assert!(ColorParser::is_color(&unit("RebeccaPurple")));
        assert!(ColorParser::is_color(&unit("transparent")));
        assert!(ColorParser::is_color(&unit("currentColor")));
        assert!(ColorParser::is_color(&unit("CanvasText")));
        assert!(!ColorParser::is_color(&unit("solid")));
    }

    #[test]
    fn test_hex() {
        assert!(ColorParser::is_color(&unit("#abc")));
        assert!(ColorParser::is_color(&unit("#ff000080")));
        assert!(!ColorParser::is_color(&unit("#abcde")));
        assert!(!ColorParser::is_color(&unit("#ggg")));
    }

    #[test]
    fn test_channel_functions() {
        assert!(ColorParser::is_color(&unit("rgb(255, 128, 0)")));
        assert!(ColorParser::is_color(&unit("rgb(0 0 0 / 50%)")));
        assert!(ColorParser::is_color(&unit("hsl(120, 100%, 50%)")));
        assert!(ColorParser::is_color(&unit("hsl(0.5turn 10% 20% / 0.3)")));
        assert!(!ColorParser::is_color(&unit("rgb(1, 2)")));
        assert!(!ColorParser::is_color(&unit("rgb(1px, 2, 3)")));
        assert!(!ColorParser::is_color(&unit("hsl(1s 2% 3%)")));
    }

    #[test]
    fn test_other_values() {
        assert!(ColorParser::is_color(&unit("oklch(70% 0.1 200)")));
        assert!(!ColorParser::is_color(&unit("1px")));
        assert!(!ColorParser::is_color(&unit("calc(1px)")));
    }

    #[test]
    fn test_unit_kind() {
        assert_eq!(UnitKind::of("em"), Some(UnitKind::Length));
        assert_eq!(UnitKind::of("dvh"), Some(UnitKind::Length));
        assert_eq!(UnitKind::of("ms"), Some(UnitKind::Time));
        assert_eq!(UnitKind::of("fr"), Some(UnitKind::Flex));
        assert_eq!(UnitKind::of("turn"), Some(UnitKind::Angle));
        assert_eq!(UnitKind::of("db"), None);
    }
}

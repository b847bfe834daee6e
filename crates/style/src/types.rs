//! Value type predicates
//!
//! Each longhand declares which value types it accepts; a predicate only
//! answers whether one unit has the right shape.

use cssom_css::{ColorParser, LexicalUnit, UnitKind};

use crate::keyword::CssWideKeyword;

/// Value types a longhand can accept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Length,
    NonNegativeLength,
    LengthPercentage,
    NonNegativeLengthPercentage,
    Color,
    Time,
    Image,
    Url,
    PositiveInteger,
    Number,
    String,
    CustomIdent,
    CounterStyle,
}

const MATH_FUNCTIONS: &[&str] = &[
    "calc", "min", "max", "clamp", "round", "mod", "rem", "abs", "sign",
    "sin", "cos", "tan", "asin", "acos", "atan", "atan2", "pow", "sqrt",
    "hypot", "log", "exp",
];

const IMAGE_FUNCTIONS: &[&str] = &[
    "image", "image-set", "cross-fade", "element", "paint",
    "linear-gradient", "radial-gradient", "conic-gradient",
    "repeating-linear-gradient", "repeating-radial-gradient", "repeating-conic-gradient",
    "-webkit-gradient", "-webkit-linear-gradient", "-webkit-radial-gradient",
];

/// Whether the unit is a math function such as `calc()`
pub fn is_math_function(unit: &LexicalUnit) -> bool {
    unit.function_name().map_or(false, |name| MATH_FUNCTIONS.contains(&name))
}

impl ValueType {
    /// Whether `unit` is a value of this type
    pub fn matches(self, unit: &LexicalUnit) -> bool {
        match self {
            ValueType::Length => is_length(unit, false),
            ValueType::NonNegativeLength => is_length(unit, true),
            ValueType::LengthPercentage => is_length_percentage(unit, false),
            ValueType::NonNegativeLengthPercentage => is_length_percentage(unit, true),
            ValueType::Color => ColorParser::is_color(unit),
            ValueType::Time => is_time(unit),
            ValueType::Image => is_image(unit),
            ValueType::Url => matches!(unit, LexicalUnit::Url(_)),
            ValueType::PositiveInteger => {
                matches!(unit, LexicalUnit::Integer(n) if *n > 0) || is_math_function(unit)
            }
            ValueType::Number => {
                matches!(unit, LexicalUnit::Integer(_) | LexicalUnit::Number(_)) || is_math_function(unit)
            }
            ValueType::String => matches!(unit, LexicalUnit::String(_)),
            ValueType::CustomIdent => is_custom_ident(unit),
            ValueType::CounterStyle => is_custom_ident(unit) || unit.is_function("symbols"),
        }
    }
}

fn is_length(unit: &LexicalUnit, non_negative: bool) -> bool {
    match unit {
        LexicalUnit::Dimension { value, unit } => {
            UnitKind::of(unit) == Some(UnitKind::Length) && (!non_negative || *value >= 0.0)
        }
        LexicalUnit::Integer(0) => true,
        LexicalUnit::Number(n) => *n == 0.0,
        _ => is_math_function(unit),
    }
}

fn is_length_percentage(unit: &LexicalUnit, non_negative: bool) -> bool {
    match unit {
        LexicalUnit::Percentage(p) => !non_negative || *p >= 0.0,
        _ => is_length(unit, non_negative),
    }
}

fn is_time(unit: &LexicalUnit) -> bool {
    match unit {
        LexicalUnit::Dimension { unit, .. } => UnitKind::of(unit) == Some(UnitKind::Time),
        _ => is_math_function(unit),
    }
}

fn is_image(unit: &LexicalUnit) -> bool {
    match unit {
        LexicalUnit::Url(_) => true,
        LexicalUnit::Function { name, .. } => IMAGE_FUNCTIONS.contains(&name.as_str()),
        _ => false,
    }
}

fn is_custom_ident(unit: &LexicalUnit) -> bool {
    match unit.as_ident() {
        Some(ident) => {
            CssWideKeyword::from_ident(ident).is_none() && !ident.eq_ignore_ascii_case("default")
        }
        None => false,
    }
}

/// Whether the unit is a vendor-prefixed identifier or function
pub fn is_vendor_extension(unit: &LexicalUnit) -> bool {
    let name = match unit {
        LexicalUnit::Ident(name) => name.as_str(),
        LexicalUnit::Function { name, .. } => name.as_str(),
        _ => return false,
    };
    name.starts_with('-') && !name.starts_with("--") && name[1..].contains('-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use cssom_css::LexicalChain;

    fn unit(text: &str) -> LexicalUnit {
        LexicalChain::parse(text).unwrap().into_units().remove(0)
    }

    #[test]
    fn test_length() {
        assert!(ValueType::Length.matches(&unit("1px")));
        assert!(ValueType::Length.matches(&unit("-2em")));
        assert!(ValueType::Length.matches(&unit("0")));
        assert!(ValueType::Length.matches(&unit("calc(1px + 2em)")));
        assert!(!ValueType::Length.matches(&unit("1")));
        assert!(!ValueType::Length.matches(&unit("10%")));
        assert!(!ValueType::Length.matches(&unit("1s")));
    }

    #[test]
    fn test_non_negative() {
        assert!(!ValueType::NonNegativeLength.matches(&unit("-1px")));
        assert!(ValueType::NonNegativeLengthPercentage.matches(&unit("5%")));
        assert!(!ValueType::NonNegativeLengthPercentage.matches(&unit("-5%")));
    }

    #[test]
    fn test_time() {
        assert!(ValueType::Time.matches(&unit("200ms")));
        assert!(ValueType::Time.matches(&unit("1s")));
        assert!(!ValueType::Time.matches(&unit("1px")));
    }

    #[test]
    fn test_image() {
        assert!(ValueType::Image.matches(&unit("url(dot.png)")));
        assert!(ValueType::Image.matches(&unit("linear-gradient(red, blue)")));
        assert!(!ValueType::Image.matches(&unit("disc")));
    }

    #[test]
    fn test_integers() {
        assert!(ValueType::PositiveInteger.matches(&unit("3")));
        assert!(!ValueType::PositiveInteger.matches(&unit("0")));
        assert!(!ValueType::PositiveInteger.matches(&unit("1.5")));
    }

    #[test]
    fn test_custom_ident() {
        assert!(ValueType::CustomIdent.matches(&unit("square")));
        assert!(!ValueType::CustomIdent.matches(&unit("inherit")));
        assert!(!ValueType::CustomIdent.matches(&unit("default")));
        assert!(ValueType::CounterStyle.matches(&unit("symbols(cyclic '*')")));
    }

    #[test]
    fn test_vendor_extension() {
        assert!(is_vendor_extension(&unit("-moz-use-text-color")));
        assert!(is_vendor_extension(&unit("-webkit-focus-ring-color")));
        assert!(!is_vendor_extension(&unit("--custom")));
        assert!(!is_vendor_extension(&unit("-x")));
        assert!(!is_vendor_extension(&unit("solid")));
    }
}

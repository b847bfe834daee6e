//! Lexical units
//!
//! A property value is held as an owned chain of typed units. Whitespace and
//! comments are dropped, function arguments are nested, `url("...")` is folded
//! into a single unit and `[a b]` groups become line-name units.

use std::fmt;

use crate::error::{CssError, CssResult, SourceLocation};
use crate::tokenizer::{Token, Tokenizer};

/// One typed value in a property's right-hand side
#[derive(Debug, Clone, PartialEq)]
pub enum LexicalUnit {
    /// Identifier, case preserved
    Ident(String),
    /// Number written without fraction or exponent
    Integer(i32),
    /// Any other unitless number
    Number(f32),
    /// Percentage
    Percentage(f32),
    /// Number with a unit; the unit is stored lowercased
    Dimension { value: f32, unit: String },
    /// Hash, without the leading `#`
    Hash(String),
    /// Quoted string, unescaped
    String(String),
    /// `url(...)` in either form
    Url(String),
    /// Function with its nested arguments; the name is lowercased and empty
    /// for a bare parenthesised group
    Function { name: String, args: Vec<LexicalUnit> },
    /// Bracketed line names, e.g. `[header-start]`
    LineNames(Vec<String>),
    /// `,`
    Comma,
    /// `/`
    Slash,
    /// Any other single character
    Delim(char),
}

impl LexicalUnit {
    pub fn ident(name: impl Into<String>) -> Self {
        LexicalUnit::Ident(name.into())
    }

    /// The identifier text, if this is an identifier
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            LexicalUnit::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// ASCII case-insensitive identifier comparison
    pub fn is_ident(&self, name: &str) -> bool {
        self.as_ident().map_or(false, |s| s.eq_ignore_ascii_case(name))
    }

    pub fn function_name(&self) -> Option<&str> {
        match self {
            LexicalUnit::Function { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_function(&self, name: &str) -> bool {
        self.function_name().map_or(false, |n| n.eq_ignore_ascii_case(name))
    }

    /// Whether this unit is, or nests, a call to `name`
    pub fn contains_function(&self, name: &str) -> bool {
        match self {
            LexicalUnit::Function { name: fname, args } => {
                fname.eq_ignore_ascii_case(name) || args.iter().any(|a| a.contains_function(name))
            }
            _ => false,
        }
    }

    pub fn to_css(&self) -> String {
        let mut out = String::new();
        self.write_css(&mut out, false);
        out
    }

    pub fn to_minified_css(&self) -> String {
        let mut out = String::new();
        self.write_css(&mut out, true);
        out
    }

    fn write_css(&self, out: &mut String, minified: bool) {
        match self {
            LexicalUnit::Ident(name) => out.push_str(name),
            LexicalUnit::Integer(n) => out.push_str(&n.to_string()),
            LexicalUnit::Number(n) => out.push_str(&format_number(*n, minified)),
            LexicalUnit::Percentage(n) => {
                out.push_str(&format_number(*n, minified));
                out.push('%');
            }
            LexicalUnit::Dimension { value, unit } => {
                out.push_str(&format_number(*value, minified));
                out.push_str(unit);
            }
            LexicalUnit::Hash(value) => {
                out.push('#');
                out.push_str(value);
            }
            LexicalUnit::String(value) => write_string(out, value),
            LexicalUnit::Url(url) => {
                out.push_str("url(");
                write_string(out, url);
                out.push(')');
            }
            LexicalUnit::Function { name, args } => {
                out.push_str(name);
                out.push('(');
                write_units(args, out, minified);
                out.push(')');
            }
            LexicalUnit::LineNames(names) => {
                out.push('[');
                out.push_str(&names.join(" "));
                out.push(']');
            }
            LexicalUnit::Comma => out.push(','),
            LexicalUnit::Slash => out.push('/'),
            LexicalUnit::Delim(c) => out.push(*c),
        }
    }
}

impl fmt::Display for LexicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Serialize a number; minified output drops the leading zero of a fraction
pub fn format_number(value: f32, minified: bool) -> String {
    let text = if value.fract() == 0.0 && value.abs() < 1e9 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    };

    if minified {
        if let Some(rest) = text.strip_prefix("0.") {
            return format!(".{}", rest);
        }
        if let Some(rest) = text.strip_prefix("-0.") {
            return format!("-.{}", rest);
        }
    }
    text
}

fn write_string(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out.push('"');
}

/// Serialize a unit sequence with canonical or minified separators
pub fn write_units(units: &[LexicalUnit], out: &mut String, minified: bool) {
    let mut prev: Option<&LexicalUnit> = None;
    for unit in units {
        match (prev, unit) {
            (None, _) | (_, LexicalUnit::Comma) => {}
            (Some(LexicalUnit::Comma), _)
            | (Some(LexicalUnit::Slash), _)
            | (_, LexicalUnit::Slash) => {
                if !minified {
                    out.push(' ');
                }
            }
            _ => out.push(' '),
        }
        unit.write_css(out, minified);
        prev = Some(unit);
    }
}

/// Deepest function or parenthesis nesting a chain may hold
pub const MAX_NESTING: usize = 128;

/// An owned property value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LexicalChain {
    units: Vec<LexicalUnit>,
}

impl LexicalChain {
    /// Parse a property value
    pub fn parse(input: &str) -> CssResult<Self> {
        let mut reader = ChainReader::new(input)?;
        let units = reader.read_units(None, 0)?;
        Ok(Self { units })
    }

    pub fn from_units(units: Vec<LexicalUnit>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[LexicalUnit] {
        &self.units
    }

    pub fn into_units(self) -> Vec<LexicalUnit> {
        self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn contains_function(&self, name: &str) -> bool {
        self.units.iter().any(|u| u.contains_function(name))
    }

    pub fn to_css(&self) -> String {
        let mut out = String::new();
        write_units(&self.units, &mut out, false);
        out
    }

    pub fn to_minified_css(&self) -> String {
        let mut out = String::new();
        write_units(&self.units, &mut out, true);
        out
    }
}

impl fmt::Display for LexicalChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Forward-only position over a chain
#[derive(Debug, Clone)]
pub struct Cursor {
    chain: LexicalChain,
    position: usize,
}

impl Cursor {
    pub fn new(chain: LexicalChain) -> Self {
        Self { chain, position: 0 }
    }

    /// Consume the current unit
    pub fn advance(&mut self) -> Option<&LexicalUnit> {
        let unit = self.chain.units.get(self.position)?;
        self.position += 1;
        Some(unit)
    }

    /// Units not yet consumed
    pub fn remaining(&self) -> &[LexicalUnit] {
        &self.chain.units[self.position.min(self.chain.units.len())..]
    }

    /// The whole chain, consumed or not
    pub fn chain(&self) -> &LexicalChain {
        &self.chain
    }
}

/// Builds units from the tokenizer, tracking where each token started
struct ChainReader<'a> {
    tokenizer: Tokenizer<'a>,
    current: Token,
    location: SourceLocation,
}

impl<'a> ChainReader<'a> {
    fn new(input: &'a str) -> CssResult<Self> {
        let mut tokenizer = Tokenizer::new(input);
        let location = tokenizer.location();
        let current = tokenizer.next_token()?;
        Ok(Self { tokenizer, current, location })
    }

    /// Consume the current token and return it with its start location
    fn bump(&mut self) -> CssResult<(Token, SourceLocation)> {
        let location = self.tokenizer.location();
        let next = self.tokenizer.next_token()?;
        let token = std::mem::replace(&mut self.current, next);
        let start = std::mem::replace(&mut self.location, location);
        Ok((token, start))
    }

    fn read_units(&mut self, close: Option<char>, depth: usize) -> CssResult<Vec<LexicalUnit>> {
        let mut units = Vec::new();

        loop {
            let (token, location) = self.bump()?;
            let unit = match token {
                Token::Eof => {
                    return match close {
                        Some(delimiter) => Err(CssError::Unbalanced { delimiter, location }),
                        None => Ok(units),
                    };
                }
                Token::RightParen => {
                    if close == Some(')') {
                        return Ok(units);
                    }
                    return Err(CssError::Unbalanced { delimiter: ')', location });
                }
                Token::Whitespace => continue,
                Token::Ident(name) => LexicalUnit::Ident(name),
                Token::Number { value, int_value } => match int_value {
                    Some(n) => LexicalUnit::Integer(n),
                    None => LexicalUnit::Number(value),
                },
                Token::Percentage(value) => LexicalUnit::Percentage(value),
                Token::Dimension(value, unit) => LexicalUnit::Dimension {
                    value,
                    unit: unit.to_ascii_lowercase(),
                },
                Token::Hash(value, _) => LexicalUnit::Hash(value),
                Token::String(value) => LexicalUnit::String(value),
                Token::Url(url) => LexicalUnit::Url(url),
                Token::Function(name) => {
                    let name = name.to_ascii_lowercase();
                    let args = self.read_nested(depth, location)?;
                    if name == "url" {
                        match args.as_slice() {
                            [LexicalUnit::String(url)] => LexicalUnit::Url(url.clone()),
                            _ => return Err(CssError::parse_error("Invalid URL", location)),
                        }
                    } else {
                        LexicalUnit::Function { name, args }
                    }
                }
                Token::LeftParen => LexicalUnit::Function {
                    name: String::new(),
                    args: self.read_nested(depth, location)?,
                },
                Token::LeftBracket => self.read_line_names()?,
                Token::Comma => LexicalUnit::Comma,
                Token::Delim('/') => LexicalUnit::Slash,
                Token::Delim(c) => LexicalUnit::Delim(c),
                other => return Err(CssError::unexpected_token(other.describe(), location)),
            };
            units.push(unit);
        }
    }

    /// Arguments of a function or group opened at `depth`
    fn read_nested(&mut self, depth: usize, location: SourceLocation) -> CssResult<Vec<LexicalUnit>> {
        if depth >= MAX_NESTING {
            return Err(CssError::NestingTooDeep { limit: MAX_NESTING, location });
        }
        self.read_units(Some(')'), depth + 1)
    }

    fn read_line_names(&mut self) -> CssResult<LexicalUnit> {
        let mut names = Vec::new();

        loop {
            let (token, location) = self.bump()?;
            match token {
                Token::Whitespace => {}
                Token::Ident(name) => names.push(name),
                Token::RightBracket => return Ok(LexicalUnit::LineNames(names)),
                Token::Eof => return Err(CssError::Unbalanced { delimiter: '[', location }),
                other => return Err(CssError::unexpected_token(other.describe(), location)),
            }
        }
    }
}

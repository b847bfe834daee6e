//! Declaration block parser
//!
//! Splits `name: value [!important]; ...` text into raw declarations. Values
//! are kept as source text so custom properties survive verbatim and each
//! property reads its own value.

use crate::error::{CssError, CssResult};
use crate::tokenizer::{Token, Tokenizer};

/// A CSS declaration (property: value)
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Property name; lowercased unless it is a custom property
    pub property: String,
    /// Value source text, trimmed, without `!important`
    pub value: String,
    /// Whether !important was specified
    pub important: bool,
}

/// Parse a declaration list, dropping malformed entries
pub fn parse_declaration_list(input: &str) -> Vec<Declaration> {
    DeclarationParser::new(input).parse_declaration_list()
}

/// Parse exactly one `name: value` declaration
pub fn parse_declaration(input: &str) -> CssResult<Declaration> {
    let mut parser = DeclarationParser::new(input);
    let declaration = parser.parse_declaration()?;
    parser.skip_whitespace();
    if matches!(parser.peek(), Some(Token::Semicolon)) {
        parser.advance();
        parser.skip_whitespace();
    }
    match parser.peek() {
        None | Some(Token::Eof) => Ok(declaration),
        Some(token) => Err(CssError::unexpected_token(token.describe(), parser.tokenizer.location())),
    }
}

/// Declaration parser
pub struct DeclarationParser<'a> {
    input: &'a str,
    tokenizer: Tokenizer<'a>,
    current: Option<Token>,
    /// Byte offset where `current` starts
    start: usize,
}

impl<'a> DeclarationParser<'a> {
    /// Create a new parser
    pub fn new(input: &'a str) -> Self {
        let mut tokenizer = Tokenizer::new(input);
        let current = tokenizer.next_token().ok();
        Self { input, tokenizer, current, start: 0 }
    }

    fn advance(&mut self) -> Option<Token> {
        let prev = self.current.take();
        self.start = self.tokenizer.offset();
        self.current = match self.tokenizer.next_token() {
            Ok(token) => Some(token),
            Err(err) => {
                log::debug!("Stopping at tokenizer error: {}", err);
                None
            }
        };
        prev
    }

    fn peek(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    fn skip_whitespace(&mut self) {
        while let Some(Token::Whitespace) = self.peek() {
            self.advance();
        }
    }

    /// Parse declarations until the input ends
    pub fn parse_declaration_list(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        loop {
            self.skip_whitespace();

            match self.peek() {
                None | Some(Token::Eof) => break,
                Some(Token::Semicolon) => {
                    self.advance();
                }
                _ => match self.parse_declaration() {
                    Ok(decl) => {
                        declarations.push(decl);
                        if matches!(self.peek(), Some(Token::Semicolon)) {
                            self.advance();
                        }
                    }
                    Err(err) => {
                        log::debug!("Skipping malformed declaration: {}", err);
                        self.skip_until_semicolon_or_block();
                    }
                },
            }
        }

        declarations
    }

    /// Parse a single declaration, leaving the terminating `;` unconsumed
    fn parse_declaration(&mut self) -> CssResult<Declaration> {
        self.skip_whitespace();

        // Get property name
        let property = match self.peek().cloned() {
            Some(Token::Ident(name)) => {
                self.advance();
                if name.starts_with("--") {
                    name
                } else {
                    name.to_ascii_lowercase()
                }
            }
            Some(token) => {
                return Err(CssError::unexpected_token(token.describe(), self.tokenizer.location()));
            }
            None => return Err(CssError::unexpected_eof(self.tokenizer.location())),
        };

        self.skip_whitespace();

        // Expect colon
        if !matches!(self.peek(), Some(Token::Colon)) {
            return Err(CssError::parse_error(
                format!("Expected ':' after '{}'", property),
                self.tokenizer.location(),
            ));
        }
        self.advance();

        self.skip_whitespace();

        let (value, important) = self.parse_declaration_value()?;

        Ok(Declaration { property, value, important })
    }

    /// Collect the value's source span and a trailing `!important`
    fn parse_declaration_value(&mut self) -> CssResult<(String, bool)> {
        let mut depth = 0usize;
        let mut span: Option<(usize, usize)> = None;
        let mut important = false;

        loop {
            let token = match self.peek() {
                None | Some(Token::Eof) => break,
                Some(Token::Semicolon) | Some(Token::RightBrace) if depth == 0 => break,
                Some(token) => token.clone(),
            };

            match token {
                Token::Whitespace => {
                    self.advance();
                }
                Token::Delim('!') if depth == 0 => {
                    let location = self.tokenizer.location();
                    self.advance();
                    self.skip_whitespace();
                    let is_important = matches!(
                        self.peek(),
                        Some(Token::Ident(s)) if s.eq_ignore_ascii_case("important")
                    );
                    if is_important {
                        self.advance();
                        self.skip_whitespace();
                        if matches!(self.peek(), None | Some(Token::Eof) | Some(Token::Semicolon) | Some(Token::RightBrace)) {
                            important = true;
                            break;
                        }
                    }
                    return Err(CssError::parse_error("Misplaced '!'", location));
                }
                other => {
                    match other {
                        Token::Function(_) | Token::LeftParen | Token::LeftBracket | Token::LeftBrace => depth += 1,
                        Token::RightParen | Token::RightBracket | Token::RightBrace => {
                            depth = depth.saturating_sub(1)
                        }
                        _ => {}
                    }
                    let begin = span.map_or(self.start, |(begin, _)| begin);
                    self.advance();
                    span = Some((begin, self.start));
                }
            }
        }

        let value = match span {
            Some((begin, end)) => self.input[begin..end].trim().to_string(),
            None => String::new(),
        };
        Ok((value, important))
    }

    /// Skip tokens until semicolon or end of block
    fn skip_until_semicolon_or_block(&mut self) {
        let mut depth = 0usize;

        loop {
            match self.peek() {
                None | Some(Token::Eof) => break,
                Some(Token::Semicolon) if depth == 0 => {
                    self.advance();
                    break;
                }
                Some(Token::LeftBrace) | Some(Token::LeftParen) | Some(Token::Function(_)) => {
                    depth += 1;
                    self.advance();
                }
                Some(Token::RightBrace) | Some(Token::RightParen) => {
                    depth = depth.saturating_sub(1);
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_declaration() {
        let decls = parse_declaration_list("margin: 1px 2px");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].property, "margin");
        assert_eq!(decls[0].value, "1px 2px");
        assert!(!decls[0].important);
    }

    #[test]
    fn test_multiple_declarations() {
        let decls = parse_declaration_list("color: red; border-top: 1px solid red;");
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[1].property, "border-top");
        assert_eq!(decls[1].value, "1px solid red");
    }

    #[test]
    fn test_important() {
        let decls = parse_declaration_list("outline: auto ! IMPORTANT ; gap: 1px");
        assert_eq!(decls[0].value, "auto");
        assert!(decls[0].important);
        assert!(!decls[1].important);
    }

    #[test]
    fn test_property_name_lowercased() {
        let decls = parse_declaration_list("MARGIN-TOP: 0; --Brand: Red");
        assert_eq!(decls[0].property, "margin-top");
        assert_eq!(decls[1].property, "--Brand");
        assert_eq!(decls[1].value, "Red");
    }

    #[test]
    fn test_value_keeps_function_text() {
        let decls = parse_declaration_list("grid-template: [a] \"x y\" calc(1px + 2px) / 1fr;");
        assert_eq!(decls[0].value, "[a] \"x y\" calc(1px + 2px) / 1fr");
    }

    #[test]
    fn test_semicolon_inside_function() {
        let decls = parse_declaration_list("--x: f(a;b); color: red");
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].value, "f(a;b)");
    }

    #[test]
    fn test_malformed_declarations_dropped() {
        let decls = parse_declaration_list("margin 1px; : red; padding: 2px; color: red !bogus; gap: 0");
        let names: Vec<_> = decls.iter().map(|d| d.property.as_str()).collect();
        assert_eq!(names, vec!["padding", "gap"]);
    }

    #[test]
    fn test_empty_value() {
        let decls = parse_declaration_list("margin: ;");
        assert_eq!(decls[0].value, "");
    }

    #[test]
    fn test_parse_single_declaration() {
        let decl = parse_declaration("outline: red solid;").unwrap();
        assert_eq!(decl.property, "outline");
        assert_eq!(decl.value, "red solid");
        assert!(parse_declaration("a: b; c: d").is_err());
        assert!(parse_declaration("a b").is_err());
    }
}

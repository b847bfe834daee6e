//! CSSOM CSS
//!
//! Tokenizer, lexical unit chains, declaration block parsing and value
//! classification used by the shorthand engine.

pub mod error;
pub mod lexical;
pub mod parser;
pub mod tokenizer;
pub mod value;

pub use error::{CssError, CssResult, SourceLocation};
pub use lexical::{Cursor, LexicalChain, LexicalUnit, MAX_NESTING};
pub use parser::{parse_declaration, parse_declaration_list, Declaration, DeclarationParser};
pub use tokenizer::{HashType, Token, Tokenizer};
pub use value::{ColorParser, UnitKind};

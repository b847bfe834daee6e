//! CSSOM Style
//!
//! Shorthand property translation: setters expand a shorthand value into its
//! longhands, builders turn a declaration's longhands back into the shortest
//! shorthand text.

pub mod builder;
pub mod declaration;
pub mod error;
pub mod grid;
pub mod guard;
pub mod keyword;
pub mod proxy;
pub mod schema;
pub mod setter;
mod substitution;
pub mod types;
pub mod value;

pub use builder::ShorthandBuilder;
pub use declaration::StyleDeclaration;
pub use error::{StyleError, StyleResult};
pub use guard::RecursionGuard;
pub use keyword::{scan_keywords, CssWideKeyword, KeywordScan, KeywordState};
pub use proxy::ProxyValue;
pub use schema::{longhand, shorthand, Longhand, ShorthandKind, ShorthandSchema};
pub use setter::{Outcome, SubpropertySetter};
pub use types::ValueType;
pub use value::{PropertyEntry, StyleValue};

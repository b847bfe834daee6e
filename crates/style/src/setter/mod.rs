//! Shorthand setters
//!
//! A setter expands one shorthand value into its longhands. Each shape has
//! its own algorithm; the bookkeeping they share lives in [`SetterBase`].
//!
//! Nothing reaches the declaration until [`SubpropertySetter::commit`], and
//! the caller only commits on [`Outcome::Continue`], so an invalid value never
//! leaves longhands half-written.

mod border;
mod box_model;
mod generic;
mod grid_template;
mod outline;
mod sequence;

use cssom_css::{Cursor, LexicalChain, LexicalUnit};
use smallvec::SmallVec;

use crate::declaration::StyleDeclaration;
use crate::error::StyleResult;
use crate::guard::RecursionGuard;
use crate::keyword::{scan_keywords, CssWideKeyword, KeywordScan};
use crate::schema::{initial_value, Longhand, ShorthandKind, ShorthandSchema};
use crate::value::{PropertyEntry, StyleValue};

pub use border::{BorderSetter, BorderSideSetter};
pub use box_model::BoxSetter;
pub use generic::FreeOrderSetter;
pub use grid_template::GridTemplateSetter;
pub use outline::OutlineSetter;
pub use sequence::SequenceSetter;

/// Result of assigning a shorthand's longhands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Outcome {
    /// Every longhand has a staged value; the caller commits them
    Continue = 0,
    /// The setter stored everything itself (a proxy value)
    Terminal = 1,
    /// The value does not match the shorthand's grammar
    Invalid = 2,
}

/// Longhand storage shared by every setter
pub struct SetterBase<'a> {
    schema: &'static ShorthandSchema,
    declaration: &'a mut StyleDeclaration,
    cursor: Cursor,
    remaining: SmallVec<[&'static Longhand; 4]>,
    staged: SmallVec<[(&'static str, StyleValue); 4]>,
    important: bool,
    tainted: bool,
    keyword: Option<CssWideKeyword>,
    outcome: Option<Outcome>,
    guard: RecursionGuard,
}

impl<'a> SetterBase<'a> {
    pub fn new(schema: &'static ShorthandSchema, declaration: &'a mut StyleDeclaration) -> Self {
        Self {
            schema,
            declaration,
            cursor: Cursor::new(LexicalChain::default()),
            remaining: SmallVec::new(),
            staged: SmallVec::new(),
            important: false,
            tainted: false,
            keyword: None,
            outcome: None,
            guard: RecursionGuard::new(),
        }
    }

    /// Bind a value and reset all state
    pub fn init(&mut self, chain: LexicalChain, important: bool) {
        self.cursor = Cursor::new(chain);
        self.remaining = self.schema.subproperties().collect();
        self.staged.clear();
        self.important = important;
        self.tainted = false;
        self.keyword = None;
        self.outcome = None;
        self.guard = RecursionGuard::new();
    }

    pub fn schema(&self) -> &'static ShorthandSchema {
        self.schema
    }

    pub fn is_tainted(&self) -> bool {
        self.tainted
    }

    pub fn set_tainted(&mut self, tainted: bool) {
        self.tainted = tainted;
    }

    /// Longhands without a staged value, in schema order
    pub fn remaining(&self) -> &[&'static Longhand] {
        &self.remaining
    }

    pub fn is_remaining(&self, name: &str) -> bool {
        self.remaining.iter().any(|l| l.name == name)
    }

    /// First remaining longhand that accepts `unit`
    pub fn acceptor(&self, unit: &LexicalUnit) -> Option<&'static Longhand> {
        self.remaining.iter().copied().find(|l| l.accepts(unit))
    }

    pub fn remaining_units(&self) -> &[LexicalUnit] {
        self.cursor.remaining()
    }

    pub fn next_unit(&mut self) -> Option<LexicalUnit> {
        self.cursor.advance().cloned()
    }

    pub fn consume_all(&mut self) {
        while self.cursor.advance().is_some() {}
    }

    /// Stage a value and take the longhand out of the remaining set
    pub fn assign(&mut self, name: &'static str, value: StyleValue) {
        self.remaining.retain(|l| l.name != name);
        match self.staged.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.staged.push((name, value)),
        }
    }

    /// Stage initial values for every longhand still remaining
    pub fn assign_defaults(&mut self) -> StyleResult<()> {
        let remaining = std::mem::take(&mut self.remaining);
        for longhand in remaining {
            let value = initial_value(longhand.name, &mut self.guard)?;
            self.assign(longhand.name, value);
        }
        Ok(())
    }

    /// Stage initial values for every longhand, keeping them all remaining
    pub fn reset_to_defaults(&mut self) -> StyleResult<()> {
        let remaining = self.remaining.clone();
        self.assign_defaults()?;
        self.remaining = remaining;
        Ok(())
    }

    /// Store the unexpanded value as a proxy in every longhand
    pub fn store_proxy(&mut self) {
        self.staged.clear();
        self.declaration
            .store_proxy(self.schema, self.cursor.chain().clone(), self.important);
    }

    /// Checks every shape runs first: `var()` references, then CSS-wide
    /// keywords. Returns the outcome when one of them decides it.
    pub(crate) fn prepare(&mut self) -> Option<Outcome> {
        if self.cursor.chain().contains_function("var") {
            log::debug!("{}: deferring value with var() reference", self.schema.name);
            self.store_proxy();
            return Some(Outcome::Terminal);
        }

        match scan_keywords(self.cursor.remaining()) {
            KeywordScan::None => None,
            KeywordScan::Sole(keyword) => {
                self.consume_all();
                for name in self.schema.longhands {
                    self.assign(name, StyleValue::Keyword(keyword));
                }
                self.keyword = Some(keyword);
                Some(Outcome::Continue)
            }
            KeywordScan::InvalidMix => {
                log::trace!("{}: CSS-wide keyword mixed with other values", self.schema.name);
                Some(Outcome::Invalid)
            }
        }
    }

    fn text(&self, minified: bool) -> String {
        if self.outcome != Some(Outcome::Continue) || self.tainted {
            return String::new();
        }
        match self.keyword {
            Some(keyword) => keyword.as_str().to_string(),
            None if minified => self.cursor.chain().to_minified_css(),
            None => self.cursor.chain().to_css(),
        }
    }

    fn commit(&mut self) {
        for (name, value) in self.staged.drain(..) {
            self.declaration
                .store(name, PropertyEntry::from_shorthand(value, self.important));
        }
    }
}

/// The contract every shorthand setter follows
pub trait SubpropertySetter<'a> {
    fn base(&self) -> &SetterBase<'a>;

    fn base_mut(&mut self) -> &mut SetterBase<'a>;

    /// Shape-specific assignment, run after the shared checks found nothing
    fn assign(&mut self) -> StyleResult<Outcome>;

    fn init(&mut self, chain: LexicalChain, important: bool) {
        self.base_mut().init(chain, important);
    }

    /// Mark the value as holding an `attr()` reference
    fn set_attr_tainted(&mut self, _tainted: bool) {}

    fn assign_subproperties(&mut self) -> StyleResult<Outcome> {
        let outcome = match self.base_mut().prepare() {
            Some(outcome) => outcome,
            None => self.assign()?,
        };
        self.base_mut().outcome = Some(outcome);
        Ok(outcome)
    }

    /// Text of the shorthand as assigned; empty unless the last assignment
    /// continued and the value is safe to print
    fn css_text(&self) -> String {
        self.base().text(false)
    }

    fn minified_css_text(&self) -> String {
        self.base().text(true)
    }

    /// Write the staged longhands to the declaration
    fn commit(&mut self) {
        self.base_mut().commit();
    }
}

/// Setter for a shorthand, bound to the declaration it writes to
pub fn for_schema<'a>(
    schema: &'static ShorthandSchema,
    declaration: &'a mut StyleDeclaration,
) -> Box<dyn SubpropertySetter<'a> + 'a> {
    let base = SetterBase::new(schema, declaration);
    match schema.kind {
        ShorthandKind::Box => Box::new(BoxSetter::new(base)),
        ShorthandKind::BorderSide => Box::new(BorderSideSetter::new(base)),
        ShorthandKind::Border => Box::new(BorderSetter::new(base)),
        ShorthandKind::Sequence { taint_sensitive } => Box::new(SequenceSetter::new(base, taint_sensitive)),
        ShorthandKind::Outline => Box::new(OutlineSetter::new(base)),
        ShorthandKind::GridTemplate => Box::new(GridTemplateSetter::new(base)),
        ShorthandKind::Free { shared } => Box::new(FreeOrderSetter::new(base, shared)),
    }
}

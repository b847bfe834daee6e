//! Top/right/bottom/left setter

use smallvec::SmallVec;

use super::{Outcome, SetterBase, SubpropertySetter};
use crate::error::StyleResult;
use crate::schema::Longhand;
use crate::value::StyleValue;

/// Index of the value each side takes, by value count
fn trbl_indices(count: usize) -> Option<[usize; 4]> {
    match count {
        1 => Some([0, 0, 0, 0]),
        2 => Some([0, 1, 0, 1]),
        3 => Some([0, 1, 2, 1]),
        4 => Some([0, 1, 2, 3]),
        _ => None,
    }
}

/// margin, padding, inset, border-width, border-style, border-color and the
/// scroll box shorthands
pub struct BoxSetter<'a> {
    base: SetterBase<'a>,
}

impl<'a> BoxSetter<'a> {
    pub fn new(base: SetterBase<'a>) -> Self {
        Self { base }
    }
}

impl<'a> SubpropertySetter<'a> for BoxSetter<'a> {
    fn base(&self) -> &SetterBase<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SetterBase<'a> {
        &mut self.base
    }

    fn assign(&mut self) -> StyleResult<Outcome> {
        let units = self.base.remaining_units().to_vec();
        let indices = match trbl_indices(units.len()) {
            Some(indices) => indices,
            None => {
                log::trace!("{}: {} values", self.base.schema().name, units.len());
                return Ok(Outcome::Invalid);
            }
        };

        let sides: SmallVec<[&'static Longhand; 4]> = self.base.remaining().iter().copied().collect();
        for (side, &i) in sides.iter().zip(indices.iter()) {
            if !side.accepts(&units[i]) {
                log::trace!("{}: '{}' is not a valid {}", self.base.schema().name, units[i], side.name);
                return Ok(Outcome::Invalid);
            }
        }

        for (side, &i) in sides.iter().zip(indices.iter()) {
            self.base.assign(side.name, StyleValue::Primitive(units[i].clone()));
        }
        self.base.consume_all();
        Ok(Outcome::Continue)
    }
}

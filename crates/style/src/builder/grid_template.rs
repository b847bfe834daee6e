//! `grid-template` builder

use cssom_css::LexicalUnit;

use super::{build_with, value_text, BuilderBase, ShorthandBuilder, Values};
use crate::grid::{parse_template_areas, parse_track_list};
use crate::schema::longhand;
use crate::value::StyleValue;

fn is_none(value: &StyleValue) -> bool {
    value.as_primitive().map_or(false, |unit| unit.is_ident("none"))
}

fn unit_text(unit: &LexicalUnit, minified: bool) -> String {
    if minified {
        unit.to_minified_css()
    } else {
        unit.to_css()
    }
}

/// Rows interleaved with the area strings: `[names] "row" size [names] ...`
fn areas_text(rows: &StyleValue, columns: &StyleValue, areas: &StyleValue, minified: bool) -> Option<String> {
    let strings = areas.units();
    parse_template_areas(strings)?;

    let tracks = parse_track_list(rows.units(), true)?;
    let sizes = tracks.sizes();
    if !tracks.is_explicit() || sizes.len() != strings.len() {
        return None;
    }

    let columns_text = if is_none(columns) {
        None
    } else {
        let list = parse_track_list(columns.units(), false)?;
        if !list.is_explicit() {
            return None;
        }
        Some(value_text(columns, minified))
    };

    let names = tracks.line_names();
    let mut parts = Vec::new();
    for (i, (string, size)) in strings.iter().zip(sizes).enumerate() {
        if let Some(group) = names.get(i).filter(|g| !g.is_empty()) {
            parts.push(unit_text(&LexicalUnit::LineNames(group.to_vec()), minified));
        }
        parts.push(unit_text(string, minified));
        if !size.is_ident("auto") {
            parts.push(unit_text(size, minified));
        }
    }
    if let Some(group) = names.last().filter(|g| !g.is_empty()) {
        parts.push(unit_text(&LexicalUnit::LineNames(group.to_vec()), minified));
    }

    let mut text = parts.join(" ");
    if let Some(columns) = columns_text {
        text.push_str(if minified { "/" } else { " / " });
        text.push_str(&columns);
    }
    Some(text)
}

fn grid_text(values: &Values<'_>, minified: bool) -> Option<String> {
    let [rows, columns, areas] = values.as_slice() else {
        return None;
    };
    for (value, name) in [(rows, "grid-template-rows"), (columns, "grid-template-columns"), (areas, "grid-template-areas")] {
        if !longhand(name)?.accepts_value(value.units()) {
            return None;
        }
    }

    if !is_none(areas) {
        return areas_text(rows, columns, areas, minified);
    }
    if is_none(rows) && is_none(columns) {
        return Some("none".to_string());
    }

    let separator = if minified { "/" } else { " / " };
    Some(format!("{}{}{}", value_text(rows, minified), separator, value_text(columns, minified)))
}

pub struct GridTemplateBuilder<'a> {
    base: BuilderBase<'a>,
}

impl<'a> GridTemplateBuilder<'a> {
    pub fn new(base: BuilderBase<'a>) -> Self {
        Self { base }
    }
}

impl ShorthandBuilder for GridTemplateBuilder<'_> {
    fn build(&self, minified: bool) -> Option<String> {
        build_with(&self.base, minified, |values| grid_text(values, minified))
    }
}

//! Grid template grammar
//!
//! Track lists, template area strings and the `grid-template` areas form.

use cssom_css::{LexicalUnit, UnitKind};

use crate::types::{is_math_function, ValueType};

/// One piece of a track list
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackEntry<'a> {
    Names(&'a [String]),
    Size(&'a LexicalUnit),
    Repeat(&'a LexicalUnit),
}

/// A validated track list borrowing its units
#[derive(Debug, Clone, PartialEq)]
pub struct TrackList<'a> {
    pub entries: Vec<TrackEntry<'a>>,
}

impl<'a> TrackList<'a> {
    /// Whether the list has no `repeat()`
    pub fn is_explicit(&self) -> bool {
        !self.entries.iter().any(|e| matches!(e, TrackEntry::Repeat(_)))
    }

    pub fn sizes(&self) -> Vec<&'a LexicalUnit> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                TrackEntry::Size(unit) => Some(*unit),
                _ => None,
            })
            .collect()
    }

    /// Line names at each line position; one more entry than there are sizes
    pub fn line_names(&self) -> Vec<&'a [String]> {
        let mut names: Vec<&'a [String]> = vec![&[]];
        for entry in &self.entries {
            match entry {
                TrackEntry::Names(n) => {
                    if let Some(last) = names.last_mut() {
                        *last = n;
                    }
                }
                _ => names.push(&[]),
            }
        }
        names
    }
}

/// Parse a track list. `allow_auto_repeat` permits `repeat(auto-fill, ...)`
/// and `repeat(auto-fit, ...)`.
pub fn parse_track_list(units: &[LexicalUnit], allow_auto_repeat: bool) -> Option<TrackList<'_>> {
    let mut entries = Vec::with_capacity(units.len());
    let mut previous_was_names = false;
    let mut has_size = false;

    for unit in units {
        match unit {
            LexicalUnit::LineNames(names) => {
                if previous_was_names {
                    return None;
                }
                previous_was_names = true;
                entries.push(TrackEntry::Names(names));
            }
            _ if unit.is_function("repeat") => {
                if !is_valid_repeat(unit, allow_auto_repeat) {
                    return None;
                }
                previous_was_names = false;
                has_size = true;
                entries.push(TrackEntry::Repeat(unit));
            }
            _ if is_track_size(unit) => {
                previous_was_names = false;
                has_size = true;
                entries.push(TrackEntry::Size(unit));
            }
            _ => return None,
        }
    }

    if has_size {
        Some(TrackList { entries })
    } else {
        None
    }
}

fn is_flex(unit: &LexicalUnit) -> bool {
    matches!(unit, LexicalUnit::Dimension { value, unit } if *value >= 0.0 && UnitKind::of(unit) == Some(UnitKind::Flex))
}

fn is_inflexible_breadth(unit: &LexicalUnit) -> bool {
    ["auto", "min-content", "max-content"].iter().any(|k| unit.is_ident(k))
        || ValueType::NonNegativeLengthPercentage.matches(unit)
}

/// `<track-size>`
pub fn is_track_size(unit: &LexicalUnit) -> bool {
    if is_inflexible_breadth(unit) || is_flex(unit) || is_math_function(unit) {
        return true;
    }
    match unit {
        LexicalUnit::Function { name, args } if name == "minmax" => match args.as_slice() {
            [min, LexicalUnit::Comma, max] => {
                is_inflexible_breadth(min) && (is_inflexible_breadth(max) || is_flex(max))
            }
            _ => false,
        },
        LexicalUnit::Function { name, args } if name == "fit-content" => match args.as_slice() {
            [limit] => ValueType::NonNegativeLengthPercentage.matches(limit),
            _ => false,
        },
        _ => false,
    }
}

fn is_valid_repeat(unit: &LexicalUnit, allow_auto_repeat: bool) -> bool {
    let args = match unit {
        LexicalUnit::Function { args, .. } => args,
        _ => return false,
    };
    let (count, tracks) = match args.as_slice() {
        [count, LexicalUnit::Comma, tracks @ ..] if !tracks.is_empty() => (count, tracks),
        _ => return false,
    };

    let count_ok = match count {
        LexicalUnit::Integer(n) => *n > 0,
        _ => allow_auto_repeat && (count.is_ident("auto-fill") || count.is_ident("auto-fit")),
    };

    // Nested repeat() is never valid
    count_ok
        && tracks.iter().all(|t| !t.is_function("repeat"))
        && parse_track_list(tracks, false).is_some()
}

/// Validated `grid-template-areas` strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateAreas {
    /// Cell names per row; `None` is a `.` cell
    pub cells: Vec<Vec<Option<String>>>,
}

impl TemplateAreas {
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn column_count(&self) -> usize {
        self.cells.first().map_or(0, |row| row.len())
    }
}

/// Parse area strings, requiring equal row lengths and rectangular areas
pub fn parse_template_areas(units: &[LexicalUnit]) -> Option<TemplateAreas> {
    if units.is_empty() {
        return None;
    }

    let mut cells = Vec::with_capacity(units.len());
    for unit in units {
        match unit {
            LexicalUnit::String(text) => cells.push(tokenize_area_row(text)?),
            _ => return None,
        }
    }

    let columns = cells[0].len();
    if columns == 0 || cells.iter().any(|row| row.len() != columns) {
        return None;
    }

    let areas = TemplateAreas { cells };
    if areas_are_rectangular(&areas) {
        Some(areas)
    } else {
        None
    }
}

fn is_area_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn tokenize_area_row(text: &str) -> Option<Vec<Option<String>>> {
    let mut row = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_ascii_whitespace() {
            chars.next();
        } else if c == '.' {
            while chars.peek() == Some(&'.') {
                chars.next();
            }
            row.push(None);
        } else if is_area_name_char(c) {
            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if !is_area_name_char(c) {
                    break;
                }
                name.push(c);
                chars.next();
            }
            row.push(Some(name));
        } else {
            return None;
        }
    }

    Some(row)
}

fn areas_are_rectangular(areas: &TemplateAreas) -> bool {
    let mut seen: Vec<&str> = Vec::new();

    for row in &areas.cells {
        for name in row.iter().flatten() {
            if seen.contains(&name.as_str()) {
                continue;
            }
            seen.push(name);

            let positions: Vec<(usize, usize)> = areas
                .cells
                .iter()
                .enumerate()
                .flat_map(|(r, cells)| {
                    cells
                        .iter()
                        .enumerate()
                        .filter(|(_, cell)| cell.as_deref() == Some(name.as_str()))
                        .map(move |(c, _)| (r, c))
                })
                .collect();

            let (min_r, max_r) = (positions.iter().map(|p| p.0).min(), positions.iter().map(|p| p.0).max());
            let (min_c, max_c) = (positions.iter().map(|p| p.1).min(), positions.iter().map(|p| p.1).max());
            if let (Some(min_r), Some(max_r), Some(min_c), Some(max_c)) = (min_r, max_r, min_c, max_c) {
                if positions.len() != (max_r - min_r + 1) * (max_c - min_c + 1) {
                    return false;
                }
            }
        }
    }

    true
}

/// Split at a single top-level `/`; more than one slash is an error
pub fn split_at_slash(units: &[LexicalUnit]) -> Option<(&[LexicalUnit], Option<&[LexicalUnit]>)> {
    let mut slashes = units.iter().enumerate().filter(|(_, u)| matches!(u, LexicalUnit::Slash));
    match (slashes.next(), slashes.next()) {
        (None, _) => Some((units, None)),
        (Some((i, _)), None) => Some((&units[..i], Some(&units[i + 1..]))),
        _ => None,
    }
}

/// The expanded `[names]? "row" size? [names]? ... [/ columns]?` form
#[derive(Debug, Clone, PartialEq)]
pub struct AreasForm {
    pub rows: Vec<LexicalUnit>,
    pub columns: Option<Vec<LexicalUnit>>,
    pub areas: Vec<LexicalUnit>,
}

/// Whether a `grid-template` value uses the area-string syntax
pub fn is_areas_shape(units: &[LexicalUnit]) -> bool {
    units.iter().any(|u| matches!(u, LexicalUnit::String(_)))
}

/// Parse the areas form of `grid-template`
pub fn parse_areas_form(units: &[LexicalUnit]) -> Option<AreasForm> {
    let (left, right) = split_at_slash(units)?;

    let columns = match right {
        Some(right) => {
            let list = parse_track_list(right, false)?;
            if !list.is_explicit() {
                return None;
            }
            Some(right.to_vec())
        }
        None => None,
    };

    let mut rows: Vec<LexicalUnit> = Vec::new();
    let mut areas = Vec::new();
    let mut pending_names: Vec<String> = Vec::new();
    let mut i = 0;

    while i < left.len() {
        // Leading names merge with the previous row's trailing names
        if let LexicalUnit::LineNames(names) = &left[i] {
            pending_names.extend(names.iter().cloned());
            i += 1;
        }

        match left.get(i) {
            Some(string @ LexicalUnit::String(_)) => areas.push(string.clone()),
            _ => return None,
        }
        i += 1;

        if !pending_names.is_empty() {
            rows.push(LexicalUnit::LineNames(std::mem::take(&mut pending_names)));
        }

        match left.get(i) {
            Some(size) if !matches!(size, LexicalUnit::LineNames(_) | LexicalUnit::String(_)) => {
                if !is_track_size(size) {
                    return None;
                }
                rows.push(size.clone());
                i += 1;
            }
            _ => rows.push(LexicalUnit::ident("auto")),
        }

        if let Some(LexicalUnit::LineNames(names)) = left.get(i) {
            pending_names.extend(names.iter().cloned());
            i += 1;
        }
    }

    if !pending_names.is_empty() {
        rows.push(LexicalUnit::LineNames(pending_names));
    }

    parse_template_areas(&areas)?;
    Some(AreasForm { rows, columns, areas })
}

//! String tuning labels for the left edge of every tab line.

use super::constants::NOTE_NAMES;
use super::text::ljust;
use crate::model::GuitarString;

/// Note names of the open strings, left-justified to a common width.
pub fn format_tuning(strings: &[GuitarString]) -> Vec<String> {
    let names: Vec<&str> = strings
        .iter()
        .map(|s| NOTE_NAMES[s.value.rem_euclid(12) as usize])
        .collect();
    let width = names.iter().map(|n| n.len()).max().unwrap_or(0);
    names.into_iter().map(|n| ljust(n, width)).collect()
}

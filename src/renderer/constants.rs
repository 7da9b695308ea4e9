//! Shared constants for the tablature renderer (all in characters).

// ── Columns ─────────────────────────────────────────────────────────
pub(super) const MIN_COLUMN_WIDTH: usize = 3;
pub(super) const EMPTY_FILL: char = '-';
pub(super) const CONT_FILL: char = '=';
pub(super) const LYRIC_FILL: char = ' ';

// ── Measure separators ──────────────────────────────────────────────
pub(super) const BARLINE: &str = "|";
pub(super) const LYRIC_BARLINE: &str = " ";

// ── Tuning ──────────────────────────────────────────────────────────
pub(super) const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

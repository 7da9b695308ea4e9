//! Lyric alignment: attaches lyric syllables to beat timestamps.
//!
//! Syllables are assigned one per sounding beat of the first voice,
//! starting at the lyric line's first measure. Surplus syllables or beats
//! are dropped.

use std::collections::BTreeMap;

use crate::model::{BeatStatus, LyricLine, Track};

/// Absolute beat tick → lyric fragment.
pub type LyricMap = BTreeMap<u32, String>;

fn is_separator(c: char) -> bool {
    matches!(c, '-' | ' ' | '\n')
}

/// Split lyric text into per-beat fragments.
///
/// Each fragment keeps the separator run that follows it (so `"Beau-"`
/// keeps its hyphen), then surrounding whitespace is trimmed. Trailing
/// separators produce one final empty fragment.
pub fn split_fragments(text: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut in_separator = false;

    for c in text.chars() {
        if is_separator(c) {
            current.push(c);
            in_separator = true;
        } else {
            if in_separator {
                fragments.push(std::mem::take(&mut current));
                in_separator = false;
            }
            current.push(c);
        }
    }
    fragments.push(current);
    if in_separator {
        fragments.push(String::new());
    }

    fragments.iter().map(|f| f.trim().to_string()).collect()
}

/// Absolute start ticks of the sounding beats of the first voice, from the
/// 1-based `starting_measure` onward.
fn sounding_beat_starts(track: &Track, starting_measure: usize) -> Vec<u32> {
    track
        .measures
        .iter()
        .skip(starting_measure.saturating_sub(1))
        .flat_map(|measure| {
            measure
                .voices
                .first()
                .into_iter()
                .flat_map(|voice| voice.beats.iter())
                .filter(|beat| beat.status == BeatStatus::Normal)
                .map(move |beat| measure.start + beat.start)
        })
        .collect()
}

/// Map lyric fragments onto the beats of `track`.
pub fn align_lyrics(line: &LyricLine, track: &Track) -> LyricMap {
    let timestamps = sounding_beat_starts(track, line.starting_measure);
    timestamps
        .into_iter()
        .zip(split_fragments(&line.lyrics))
        .collect()
}

//! Tablature renderer: converts a parsed Song into monospace ASCII tab.
//!
//! The pipeline for one track is:
//!
//! 1. [`align_lyrics`](crate::lyrics::align_lyrics) maps lyric syllables
//!    onto beat timestamps;
//! 2. [`build_timeline`](crate::timeline::build_timeline) turns notes into
//!    per-instant string states;
//! 3. [`render_measures`] lays every measure out as aligned text rows;
//! 4. [`render_lines`] wraps measures into lines with tuning labels,
//!    barlines, bar numbers and lyrics.

mod constants;
mod glyphs;
mod header;
mod layout;
mod measure;
mod text;
mod tuning;

use tracing::debug;

use crate::config::{LineConfig, RenderConfig};
use crate::error::TabError;
use crate::lyrics::{align_lyrics, LyricMap};
use crate::model::{LyricLine, Song, Track};
use crate::timeline::build_timeline;
use header::render_header;
use text::strip_trailing_whitespace;

pub use glyphs::{resolve_glyph, Glyph, PrevNote};
pub use layout::{pack_lines, render_lines};
pub use measure::{render_measures, AsciiMeasure};
pub use tuning::format_tuning;

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Render the tablature body of one track: bar numbers, tuning column,
/// measures and lyric rows.
pub fn render_track(
    track: &Track,
    lyrics: Option<&LyricLine>,
    config: &LineConfig,
) -> Result<String, TabError> {
    let lyric_map = lyrics.map_or_else(LyricMap::new, |line| align_lyrics(line, track));
    let timeline = build_timeline(track, &lyric_map)?;
    let measures = render_measures(&timeline)?;
    let tuning = format_tuning(&track.strings);
    debug!(
        track = %track.name,
        measures = measures.len(),
        lyric_fragments = lyric_map.len(),
        "rendered track"
    );
    Ok(render_lines(&measures, &tuning, config))
}

/// Render a complete song: header block followed by the tablature of the
/// configured track.
pub fn render_song(song: &Song, config: &RenderConfig) -> Result<String, TabError> {
    let track = song
        .tracks
        .get(config.track)
        .ok_or(TabError::TrackOutOfRange {
            track: config.track,
            tracks: song.tracks.len(),
        })?;
    if track.strings.is_empty() {
        return Err(TabError::NoStrings {
            track: config.track,
        });
    }

    let body = render_track(track, song.lyrics.as_ref(), &config.line)?;
    let mut header = render_header(song, config);
    while header.last().is_some_and(String::is_empty) {
        header.pop();
    }

    let text = if header.is_empty() {
        body
    } else {
        format!("{}\n\n{}", header.join("\n"), body)
    };
    Ok(strip_trailing_whitespace(&text))
}

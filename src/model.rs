//! Data model for a parsed guitar score.
//!
//! These structures mirror the Guitar Pro object model closely enough that
//! a score produced by any format reader can be handed to the renderer as
//! JSON. Only the information needed for tablature rendering is kept.

use serde::{Deserialize, Serialize};

/// A complete song.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Song {
    /// Title of the piece
    pub title: String,
    pub subtitle: String,
    pub artist: String,
    pub album: String,
    /// Lyricist
    pub words: String,
    /// Composer
    pub music: String,
    pub copyright: String,
    /// Author of the tablature arrangement
    pub tab: String,
    /// Instrument tracks
    pub tracks: Vec<Track>,
    /// Lyric line attached to the song, if any
    pub lyrics: Option<LyricLine>,
}

/// One instrument track.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    pub name: String,
    /// Strings, highest first (string 1 is the top row of the tab)
    pub strings: Vec<GuitarString>,
    /// Ordered list of measures
    pub measures: Vec<Measure>,
}

impl Track {
    /// Number of strings on the instrument.
    pub fn string_count(&self) -> usize {
        self.strings.len()
    }
}

/// A single instrument string and its open pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuitarString {
    /// 1-based string number
    pub number: usize,
    /// Open-string MIDI pitch (e.g. 64 for the high E of a guitar)
    pub value: i32,
}

/// A single measure (bar).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Measure {
    /// Absolute start of the measure in ticks (required)
    pub start: u32,
    /// Length of the measure in ticks
    #[serde(default)]
    pub length: u32,
    #[serde(default)]
    pub voices: Vec<Voice>,
}

impl Measure {
    /// Absolute end of the measure in ticks.
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.length)
    }
}

/// One voice of a measure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Voice {
    pub beats: Vec<Beat>,
}

/// A beat: a group of notes struck together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Beat {
    /// Offset in ticks from the start of the measure
    pub start: u32,
    /// Duration in ticks
    pub duration: u32,
    pub status: BeatStatus,
    pub notes: Vec<Note>,
}

/// Whether a beat carries notes or is a placeholder/rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeatStatus {
    #[default]
    Normal,
    Empty,
    Rest,
}

/// A single note on one string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// 1-based string number
    pub string: usize,
    /// Fret number
    pub value: i32,
    #[serde(rename = "type", default)]
    pub kind: NoteType,
    #[serde(default)]
    pub effect: NoteEffect,
}

impl Note {
    /// A plain note at `fret` on `string`.
    pub fn new(string: usize, fret: i32) -> Self {
        Self {
            string,
            value: fret,
            kind: NoteType::Normal,
            effect: NoteEffect::default(),
        }
    }

    /// The same note with a different type tag.
    pub fn with_kind(mut self, kind: NoteType) -> Self {
        self.kind = kind;
        self
    }

    /// The same note with the given effects.
    pub fn with_effect(mut self, effect: NoteEffect) -> Self {
        self.effect = effect;
        self
    }
}

/// Note type tag.
///
/// Anything the renderer has no rule for deserializes as `Unsupported`
/// and is rejected when rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    Rest,
    #[default]
    Normal,
    Tie,
    Dead,
    #[serde(other)]
    Unsupported,
}

/// Playing techniques attached to a note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteEffect {
    /// Hammer-on / pull-off into the next note
    pub hammer: bool,
    /// Slide into the next note
    pub slide: Option<SlideType>,
    pub harmonic: Option<HarmonicType>,
    pub bend: Option<Bend>,
    pub trill: Option<Trill>,
    pub vibrato: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideType {
    Shift,
    Legato,
    OutDownwards,
    OutUpwards,
    IntoFromBelow,
    IntoFromAbove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonicType {
    Natural,
    Artificial,
    Tapped,
    Pinch,
    Semi,
}

/// Bend curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bend {
    #[serde(rename = "type")]
    pub kind: BendType,
    /// Ordered bend points
    #[serde(default)]
    pub points: Vec<BendPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BendType {
    None,
    Bend,
    BendRelease,
    BendReleaseBend,
    Prebend,
    PrebendRelease,
    Dip,
    Dive,
    ReleaseUp,
    InvertedDip,
    Return,
    ReleaseDown,
}

/// One point of a bend curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BendPoint {
    /// Position along the note's duration
    #[serde(default)]
    pub position: u32,
    /// Bend magnitude; two units raise the pitch by one fret
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trill {
    /// Fret alternated with the main note
    pub fret: i32,
}

/// A line of lyrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LyricLine {
    /// 1-based index of the measure the lyrics start at
    #[serde(default = "default_starting_measure")]
    pub starting_measure: usize,
    /// Raw lyric text; syllables are separated by spaces, hyphens or newlines
    pub lyrics: String,
}

fn default_starting_measure() -> usize {
    1
}

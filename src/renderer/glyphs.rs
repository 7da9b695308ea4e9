//! Note glyphs: the short text token drawn for a note on its string.
//!
//! A glyph is split into a head (technique marker before the fret digits,
//! e.g. the `h` of `h7`) and a tail (the digits and anything after them),
//! so that the digits of every string line up in a column.

use crate::error::TabError;
use crate::model::{BendType, HarmonicType, Note, NoteType, SlideType};

/// Rendered text of one note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glyph {
    pub text: String,
    /// Number of leading characters forming the head
    pub head_len: usize,
}

impl Glyph {
    fn new(text: String, head_len: usize) -> Self {
        Self { text, head_len }
    }

    /// A glyph with no head.
    fn plain(text: String) -> Self {
        Self::new(text, 0)
    }

    pub fn head(&self) -> &str {
        &self.text[..self.head_len]
    }

    pub fn tail(&self) -> &str {
        &self.text[self.head_len..]
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// The note sounding on the string just before the one being drawn.
#[derive(Debug, Clone, Copy)]
pub struct PrevNote<'a> {
    pub note: &'a Note,
    /// Fret actually sounding, with ties resolved
    pub fret: i32,
}

/// Resolve the glyph for `note`, given what was sounding before it.
pub fn resolve_glyph(note: Option<&Note>, prev: Option<PrevNote<'_>>) -> Result<Glyph, TabError> {
    let Some(note) = note else {
        return Ok(Glyph::default());
    };

    match note.kind {
        NoteType::Normal => Ok(normal_glyph(note, prev)),
        NoteType::Tie => Ok(match prev {
            Some(prev) => Glyph::new(format!("({})", prev.fret), 1),
            None => Glyph::default(),
        }),
        NoteType::Rest => Ok(Glyph::default()),
        NoteType::Dead => Ok(Glyph::plain("x".to_string())),
        NoteType::Unsupported => Err(TabError::UnsupportedNote {
            string: note.string,
            fret: note.value,
        }),
    }
}

fn normal_glyph(note: &Note, prev: Option<PrevNote<'_>>) -> Glyph {
    let fret = note.value;
    let effect = &note.effect;

    // Hammers and slides are stored on the note they start from.
    if let Some(prev) = prev {
        if prev.note.effect.hammer {
            let marker = if prev.fret > fret { 'p' } else { 'h' };
            return Glyph::new(format!("{marker}{fret}"), 1);
        }
    }

    if effect.harmonic == Some(HarmonicType::Natural) {
        return Glyph::new(format!("<{fret}>"), 1);
    }

    if let Some(prev) = prev {
        match prev.note.effect.slide {
            Some(SlideType::Legato) => {
                let marker = if prev.fret > fret { '\\' } else { '/' };
                return Glyph::new(format!("{marker}{fret}"), 1);
            }
            Some(SlideType::Shift) => return Glyph::new(format!("s{fret}"), 1),
            _ => {}
        }
    }

    if let Some(bend) = &effect.bend {
        if matches!(bend.kind, BendType::Bend | BendType::BendRelease) {
            let mut text = fret.to_string();
            let mut from = 0;
            for point in &bend.points {
                let to = point.value;
                if from < to {
                    text.push_str(&format!("b{}", fret.saturating_add(to / 2)));
                } else if from > to {
                    text.push_str(&format!("r{}", fret.saturating_add(to / 2)));
                }
                from = to;
            }
            return Glyph::plain(text);
        }
    }

    if let Some(trill) = &effect.trill {
        return Glyph::plain(format!("{fret}tr{}", trill.fret));
    }

    if effect.vibrato {
        return Glyph::plain(format!("{fret}~"));
    }

    Glyph::plain(fret.to_string())
}

//! Measure layout: turns timeline rows into aligned text, one measure at
//! a time.
//!
//! Every instant becomes a column whose width is set by the widest glyph
//! head, the widest glyph tail and the lyric fragment sung there. Strings
//! that keep sounding are padded with `=`, silent ones with `-`.

use tracing::debug;

use super::constants::*;
use super::glyphs::{resolve_glyph, Glyph, PrevNote};
use super::text::{ljust, push_fill};
use crate::error::TabError;
use crate::timeline::{NoteRow, TabBeat, TabNoteId, TabNotes, Timeline};

/// Rendered text of one measure: a lyric row and one row per string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsciiMeasure {
    pub lyrics: String,
    /// String 1 first
    pub strings: Vec<String>,
}

impl AsciiMeasure {
    /// Width of the measure in characters. All rows share it.
    pub fn width(&self) -> usize {
        self.lyrics.chars().count()
    }
}

/// Resolved glyph of one occupied slot of an instant.
struct Slot {
    id: TabNoteId,
    glyph: Glyph,
    tail_len: usize,
}

/// Accumulates the rows of the measure being rendered.
struct MeasureBuilder {
    lyrics: String,
    strings: Vec<String>,
    /// Strings with nothing drawn yet in this measure
    untouched: Vec<bool>,
    first_instant: bool,
}

impl MeasureBuilder {
    fn new(strings: usize) -> Self {
        Self {
            lyrics: String::new(),
            strings: vec![String::new(); strings],
            untouched: vec![true; strings],
            first_instant: true,
        }
    }

    fn push_instant(
        &mut self,
        notes: &TabNotes<'_>,
        slots: &[Option<TabNoteId>],
        lyric: &str,
    ) -> Result<(), TabError> {
        let pad = |id: Option<TabNoteId>| match id {
            Some(id) if notes.get(id).is_continuing() => CONT_FILL,
            _ => EMPTY_FILL,
        };
        let slots: Vec<Option<Slot>> = slots
            .iter()
            .map(|slot| slot.map(|id| resolve_slot(notes, id)).transpose())
            .collect::<Result<_, _>>()?;

        let max_head = slots
            .iter()
            .flatten()
            .map(|s| s.glyph.head_len)
            .max()
            .unwrap_or(0);
        let max_tail = slots
            .iter()
            .flatten()
            .map(|s| s.tail_len)
            .max()
            .unwrap_or(0)
            .max(lyric.chars().count());

        let draw_width = MIN_COLUMN_WIDTH.max(max_head + max_tail + 1);
        let draw_tail = draw_width - max_head;
        let lead = usize::from(self.first_instant);

        push_fill(&mut self.lyrics, LYRIC_FILL, lead + max_head);
        self.lyrics.push_str(&ljust(lyric, draw_tail));

        for (i, slot) in slots.iter().enumerate() {
            let row = &mut self.strings[i];
            let Some(slot) = slot else {
                push_fill(row, EMPTY_FILL, lead + draw_width);
                continue;
            };

            let tab = notes.get(slot.id);
            let head_pad = pad(tab.prev);
            let tail_pad = pad(Some(slot.id));

            // A tie repeats its fret only when it opens the measure on
            // this string.
            let shown = tab.is_play() || (tab.is_tie() && self.untouched[i]);
            let (text, head, tail) = if shown {
                (slot.glyph.text.as_str(), slot.glyph.head_len, slot.tail_len)
            } else {
                ("", 0, 0)
            };

            push_fill(row, head_pad, lead + max_head - head);
            row.push_str(text);
            push_fill(row, tail_pad, draw_tail - tail);

            self.untouched[i] = false;
        }

        self.first_instant = false;
        Ok(())
    }

    fn finish(&mut self, notes: &TabNotes<'_>) -> Result<AsciiMeasure, TabError> {
        if self.first_instant {
            let empty = vec![None; self.strings.len()];
            self.push_instant(notes, &empty, "")?;
        }
        let strings = self.strings.len();
        let done = std::mem::replace(self, Self::new(strings));
        Ok(AsciiMeasure {
            lyrics: done.lyrics,
            strings: done.strings,
        })
    }
}

fn resolve_slot(notes: &TabNotes<'_>, id: TabNoteId) -> Result<Slot, TabError> {
    let tab = notes.get(id);
    let prev = tab.prev.map(|p| PrevNote {
        note: notes.get(p).note,
        fret: notes.effective_fret(p),
    });
    let glyph = resolve_glyph(Some(tab.note), prev)?;
    let tail_len = glyph.tail().chars().count();
    Ok(Slot { id, glyph, tail_len })
}

/// Render every measure of `timeline`.
pub fn render_measures(timeline: &Timeline<'_>) -> Result<Vec<AsciiMeasure>, TabError> {
    let mut builder = MeasureBuilder::new(timeline.strings);
    let mut measures = Vec::with_capacity(timeline.measure_count());

    for beat in &timeline.beats {
        match beat {
            TabBeat::Notes(NoteRow { notes, lyric, .. }) => {
                builder.push_instant(&timeline.notes, notes, lyric)?;
            }
            TabBeat::MeasureBreak { end } => {
                let measure = builder.finish(&timeline.notes)?;
                debug!(end, width = measure.width(), "rendered measure");
                measures.push(measure);
            }
        }
    }

    Ok(measures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::LyricMap;
    use crate::model::{
        Beat, Bend, BendPoint, BendType, GuitarString, Measure, Note, NoteEffect, NoteType, Track,
        Voice,
    };
    use crate::timeline::build_timeline;

    fn track(voices: Vec<Vec<Beat>>) -> Track {
        Track {
            name: "Guitar".into(),
            strings: (1..=6)
                .zip([64, 59, 55, 50, 45, 40])
                .map(|(number, value)| GuitarString { number, value })
                .collect(),
            measures: vec![Measure {
                start: 0,
                length: 3840,
                voices: voices.into_iter().map(|beats| Voice { beats }).collect(),
            }],
        }
    }

    fn beat(start: u32, duration: u32, notes: Vec<Note>) -> Beat {
        Beat {
            start,
            duration,
            notes,
            ..Beat::default()
        }
    }

    fn render(track: &Track, lyrics: &LyricMap) -> Vec<AsciiMeasure> {
        let timeline = build_timeline(track, lyrics).unwrap();
        render_measures(&timeline).unwrap()
    }

    #[test]
    fn single_whole_note() {
        let track = track(vec![vec![beat(0, 3840, vec![Note::new(1, 5)])]]);
        let measures = render(&track, &LyricMap::new());

        assert_eq!(measures.len(), 1);
        let m = &measures[0];
        assert_eq!(m.strings[0], "-5--");
        for row in &m.strings[1..] {
            assert_eq!(row, "----");
        }
        assert_eq!(m.lyrics, "    ");
        assert_eq!(m.width(), 4);
    }

    #[test]
    fn heads_align_digits() {
        let hammer = Note::new(1, 5).with_effect(NoteEffect {
            hammer: true,
            ..NoteEffect::default()
        });
        let track = track(vec![vec![
            beat(0, 960, vec![hammer, Note::new(2, 10)]),
            beat(960, 960, vec![Note::new(1, 7), Note::new(2, 12)]),
        ]]);
        let m = &render(&track, &LyricMap::new())[0];

        assert_eq!(m.strings[0], "-5--h7--");
        assert_eq!(m.strings[1], "-10--12-");
        assert_eq!(m.strings[2], "--------");
    }

    #[test]
    fn sustained_string_uses_continuation_fill() {
        let track = track(vec![
            vec![beat(0, 1920, vec![Note::new(6, 0)])],
            vec![
                beat(0, 960, vec![Note::new(1, 3)]),
                beat(960, 960, vec![Note::new(1, 5)]),
                beat(1920, 1920, vec![Note::new(1, 7)]),
            ],
        ]);
        let m = &render(&track, &LyricMap::new())[0];

        assert_eq!(m.strings[0], "-3--5--7--");
        assert_eq!(m.strings[5], "-0=====---");
        assert_eq!(m.strings[1], "----------");
    }

    #[test]
    fn tie_shown_once_per_measure() {
        let tie = || Note::new(1, 0).with_kind(NoteType::Tie);
        let track = track(vec![vec![
            beat(0, 960, vec![Note::new(1, 5)]),
            beat(960, 960, vec![tie(), Note::new(3, 2)]),
            beat(1920, 960, vec![tie(), Note::new(3, 4)]),
        ]]);
        let m = &render(&track, &LyricMap::new())[0];

        // The hidden "(5)" still reserves its head column.
        assert_eq!(m.strings[0], "-5==========");
        assert_eq!(m.strings[2], "-----2---4--");
    }

    #[test]
    fn lyrics_widen_columns() {
        let track = track(vec![vec![
            beat(0, 960, vec![Note::new(1, 5)]),
            beat(960, 960, vec![Note::new(1, 7)]),
        ]]);
        let lyrics: LyricMap = [(0, "Hello".to_string()), (960, "you".to_string())]
            .into_iter()
            .collect();
        let m = &render(&track, &lyrics)[0];

        assert_eq!(m.lyrics, " Hello you ");
        assert_eq!(m.strings[0], "-5-----7---");
        assert_eq!(m.strings[1], "-----------");
    }

    #[test]
    fn bend_glyph_in_column() {
        let bend = Note::new(3, 7).with_effect(NoteEffect {
            bend: Some(Bend {
                kind: BendType::Bend,
                points: vec![BendPoint { position: 6, value: 2 }],
            }),
            ..NoteEffect::default()
        });
        let track = track(vec![vec![beat(0, 3840, vec![bend])]]);
        let m = &render(&track, &LyricMap::new())[0];

        assert_eq!(m.strings[2], "-7b8-");
        assert_eq!(m.strings[0], "-----");
    }

    #[test]
    fn empty_measure_has_minimum_width() {
        let track = track(vec![]);
        let m = &render(&track, &LyricMap::new())[0];

        assert_eq!(m.strings, vec!["----"; 6]);
        assert_eq!(m.width(), 4);
    }

    #[test]
    fn rows_share_width() {
        let track = track(vec![vec![
            beat(0, 960, vec![Note::new(1, 12), Note::new(4, 2)]),
            beat(960, 960, vec![Note::new(2, 0).with_kind(NoteType::Dead)]),
        ]]);
        let m = &render(&track, &LyricMap::new())[0];
        for row in &m.strings {
            assert_eq!(row.chars().count(), m.width());
        }
    }
}

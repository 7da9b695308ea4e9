//! Tab timeline: turns a track's notes-with-durations into a sequence of
//! beat-synchronized snapshots of what every string is doing.
//!
//! The builder walks each measure's beats grouped by start tick, keeping
//! the currently sounding note per string. Every group yields a
//! [`TabBeat::Notes`] row whose slots say whether the string starts a new
//! note ([`TabNoteKind::Play`]), ties into the previous one
//! ([`TabNoteKind::Tie`]) or keeps sounding ([`TabNoteKind::Cont`]). Each
//! measure is closed with a [`TabBeat::MeasureBreak`].
//!
//! Tab notes live in an arena ([`TabNotes`]) and refer to each other by
//! [`TabNoteId`]; the links never own anything.

use tracing::{debug, warn};

use crate::error::TabError;
use crate::lyrics::LyricMap;
use crate::model::{Beat, Note, NoteType, Track};

/// Index of a [`TabNote`] in its [`TabNotes`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabNoteId(usize);

/// What a string is doing at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabNoteKind {
    /// A new note is struck.
    Play,
    /// The string keeps sounding the note started by `source`.
    Cont { source: TabNoteId },
    /// A tie-type note continuing the pitch of `source` (the note live on
    /// the string just before), if there was one.
    Tie { source: Option<TabNoteId> },
}

/// One entry of the arena.
#[derive(Debug, Clone)]
pub struct TabNote<'a> {
    pub kind: TabNoteKind,
    /// The score note behind this entry. For a `Cont` this is the note of
    /// the entry it continues.
    pub note: &'a Note,
    /// Absolute start tick of the underlying note
    pub start: u32,
    /// Absolute end tick of the underlying note
    pub end: u32,
    /// The entry live on the same string just before this one
    pub prev: Option<TabNoteId>,
    continuing: bool,
}

impl TabNote<'_> {
    /// Whether the note is known to keep sounding past its onset.
    pub fn is_continuing(&self) -> bool {
        self.continuing
    }

    pub fn is_play(&self) -> bool {
        matches!(self.kind, TabNoteKind::Play)
    }

    pub fn is_tie(&self) -> bool {
        matches!(self.kind, TabNoteKind::Tie { .. })
    }

    /// The tie source, for tie entries.
    fn tie_source(&self) -> Option<TabNoteId> {
        match self.kind {
            TabNoteKind::Tie { source } => source,
            _ => None,
        }
    }
}

/// Arena owning every [`TabNote`] of a track.
#[derive(Debug, Clone, Default)]
pub struct TabNotes<'a> {
    notes: Vec<TabNote<'a>>,
}

impl<'a> TabNotes<'a> {
    pub fn new() -> Self {
        Self { notes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: TabNoteId) -> &TabNote<'a> {
        &self.notes[id.0]
    }

    fn push(&mut self, note: TabNote<'a>) -> TabNoteId {
        self.notes.push(note);
        TabNoteId(self.notes.len() - 1)
    }

    /// Add a struck note.
    pub fn play(
        &mut self,
        note: &'a Note,
        start: u32,
        end: u32,
        prev: Option<TabNoteId>,
    ) -> TabNoteId {
        self.push(TabNote {
            kind: TabNoteKind::Play,
            note,
            start,
            end,
            prev,
            continuing: false,
        })
    }

    /// Add a tie note. It inherits the continuation state of its source.
    pub fn tie(
        &mut self,
        note: &'a Note,
        start: u32,
        end: u32,
        source: Option<TabNoteId>,
    ) -> TabNoteId {
        let continuing = source.is_some_and(|s| self.get(s).continuing);
        self.push(TabNote {
            kind: TabNoteKind::Tie { source },
            note,
            start,
            end,
            prev: source,
            continuing,
        })
    }

    /// Add a continuation of `source`. Continuations are continuing by
    /// construction.
    pub fn cont(&mut self, source: TabNoteId, prev: Option<TabNoteId>) -> TabNoteId {
        let src = self.get(source);
        let (note, start, end) = (src.note, src.start, src.end);
        self.push(TabNote {
            kind: TabNoteKind::Cont { source },
            note,
            start,
            end,
            prev,
            continuing: true,
        })
    }

    /// Mark `id` as continuing, along with every note up its tie chain.
    ///
    /// Stops at the first ancestor already marked: an entry only becomes
    /// continuing together with all of its ancestors.
    pub fn mark_continuing(&mut self, id: TabNoteId) {
        self.notes[id.0].continuing = true;
        let mut next = self.notes[id.0].tie_source();
        while let Some(source) = next {
            let note = &mut self.notes[source.0];
            if note.continuing {
                break;
            }
            note.continuing = true;
            next = note.tie_source();
        }
    }

    /// The fret actually sounding for `id`: ties and continuations resolve
    /// to the root note of their chain.
    pub fn effective_fret(&self, id: TabNoteId) -> i32 {
        let mut current = self.get(id);
        loop {
            let next = match current.kind {
                TabNoteKind::Tie { source: Some(source) } => source,
                TabNoteKind::Cont { source } => source,
                _ => return current.note.value,
            };
            current = self.get(next);
        }
    }
}

/// A row of per-string slots at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    /// Absolute tick of the instant
    pub start: u32,
    /// One slot per string, string 1 first
    pub notes: Vec<Option<TabNoteId>>,
    /// Lyric fragment sung at this instant (possibly empty)
    pub lyric: String,
}

/// One step of the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabBeat {
    Notes(NoteRow),
    /// Closes the measure ending at absolute tick `end`.
    MeasureBreak { end: u32 },
}

/// The full timeline of one track.
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    pub notes: TabNotes<'a>,
    pub beats: Vec<TabBeat>,
    /// Number of strings of the track
    pub strings: usize,
}

impl Timeline<'_> {
    /// Number of measures in the timeline.
    pub fn measure_count(&self) -> usize {
        self.beats
            .iter()
            .filter(|b| matches!(b, TabBeat::MeasureBreak { .. }))
            .count()
    }
}

fn string_slot(note: &Note, strings: usize) -> Result<usize, TabError> {
    if note.string == 0 || note.string > strings {
        return Err(TabError::StringOutOfRange {
            string: note.string,
            strings,
        });
    }
    Ok(note.string - 1)
}

/// Build the timeline of `track`, attaching lyric fragments from `lyrics`.
pub fn build_timeline<'a>(track: &'a Track, lyrics: &LyricMap) -> Result<Timeline<'a>, TabError> {
    let strings = track.string_count();
    let mut notes = TabNotes::new();
    let mut beats = Vec::new();
    let mut live: Vec<Option<TabNoteId>> = vec![None; strings];

    for (measure_idx, measure) in track.measures.iter().enumerate() {
        let overflow = || TabError::TickOverflow {
            measure: measure_idx + 1,
        };
        let mut measure_beats: Vec<(u32, u32, &Beat)> = measure
            .voices
            .iter()
            .flat_map(|voice| voice.beats.iter())
            .map(|beat| {
                let start = measure.start.checked_add(beat.start).ok_or_else(overflow)?;
                let end = start.checked_add(beat.duration).ok_or_else(overflow)?;
                Ok((start, end, beat))
            })
            .collect::<Result<_, TabError>>()?;
        measure_beats.sort_by_key(|&(start, _, _)| start);

        for group in measure_beats.chunk_by(|a, b| a.0 == b.0) {
            let timestamp = group[0].0;
            let snapshot = live.clone();

            for slot in live.iter_mut() {
                if slot.is_some_and(|id| notes.get(id).end <= timestamp) {
                    *slot = None;
                }
            }

            let mut row: Vec<Option<TabNoteId>> = vec![None; strings];
            let mut next_live = live.clone();
            let mut ties = Vec::new();
            let mut has_play = false;

            for &(start, end, beat) in group {
                for note in &beat.notes {
                    let slot = string_slot(note, strings)?;
                    let id = match note.kind {
                        NoteType::Tie => {
                            let id = notes.tie(note, start, end, snapshot[slot]);
                            ties.push(id);
                            id
                        }
                        NoteType::Normal | NoteType::Rest | NoteType::Dead => {
                            has_play = true;
                            notes.play(note, start, end, snapshot[slot])
                        }
                        NoteType::Unsupported => {
                            warn!(
                                measure = measure_idx + 1,
                                string = note.string,
                                "unsupported note encoding"
                            );
                            return Err(TabError::UnsupportedNote {
                                string: note.string,
                                fret: note.value,
                            });
                        }
                    };
                    next_live[slot] = Some(id);
                    row[slot] = Some(id);
                }
            }

            // Ties and continuations only count as sustained when
            // something is struck at the same instant.
            if has_play {
                for &id in &ties {
                    notes.mark_continuing(id);
                }
                for slot in 0..strings {
                    if row[slot].is_some() {
                        continue;
                    }
                    if let Some(source) = live[slot] {
                        row[slot] = Some(notes.cont(source, snapshot[slot]));
                        notes.mark_continuing(source);
                    }
                }
            }

            live = next_live;

            beats.push(TabBeat::Notes(NoteRow {
                start: timestamp,
                notes: row,
                lyric: lyrics.get(&timestamp).cloned().unwrap_or_default(),
            }));
        }

        beats.push(TabBeat::MeasureBreak { end: measure.end() });
    }

    debug!(
        measures = track.measures.len(),
        beats = beats.len(),
        tab_notes = notes.len(),
        "built tab timeline"
    );

    Ok(Timeline {
        notes,
        beats,
        strings,
    })
}

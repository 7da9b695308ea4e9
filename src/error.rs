//! Error types for tablature rendering.
//!
//! Every error is fatal for the invocation that raised it: the renderer is
//! a pure function of the score and configuration, so nothing is retried.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    /// A note carries a type tag the renderer has no rule for.
    #[error("Unsupported note encoding on string {string} (fret {fret})")]
    UnsupportedNote { string: usize, fret: i32 },

    /// A note addresses a string the track does not have.
    #[error("Note on string {string} but the track has {strings} strings")]
    StringOutOfRange { string: usize, strings: usize },

    /// A beat's absolute tick does not fit in 32 bits.
    #[error("Tick overflow in measure {measure}")]
    TickOverflow { measure: usize },

    /// The requested track does not exist.
    #[error("Track {track} requested but the song has {tracks} tracks")]
    TrackOutOfRange { track: usize, tracks: usize },

    /// The track has no strings to lay out.
    #[error("Track {track} has no strings")]
    NoStrings { track: usize },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

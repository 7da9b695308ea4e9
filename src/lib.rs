//! tablib: guitar score to ASCII tablature rendering library.
//!
//! Takes an in-memory score (tracks, measures, beats and notes with their
//! playing techniques) and renders one track as monospace tablature with
//! aligned lyrics, bar numbers and line wrapping. Scores are exchanged as
//! JSON so any format reader can feed the renderer.
//!
//! # Example
//! ```no_run
//! use tablib::{parse_file, render_song, RenderConfig};
//!
//! let song = parse_file("path/to/song.json").unwrap();
//! let tab = render_song(&song, &RenderConfig::default()).unwrap();
//! println!("{tab}");
//! ```

pub mod config;
pub mod error;
pub mod lyrics;
pub mod model;
pub mod renderer;
pub mod timeline;

#[cfg(target_os = "android")]
pub mod android;

use std::path::Path;

pub use config::*;
pub use error::TabError;
pub use lyrics::{align_lyrics, split_fragments, LyricMap};
pub use model::*;
pub use renderer::{
    format_tuning, pack_lines, render_lines, render_measures, render_song, render_track,
    resolve_glyph, AsciiMeasure, Glyph, PrevNote,
};
pub use timeline::{build_timeline, NoteRow, TabBeat, TabNote, TabNoteId, TabNoteKind, TabNotes, Timeline};

/// Parse a song from its JSON representation.
pub fn parse_song_json(json: &str) -> Result<Song, TabError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a JSON song file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Song, TabError> {
    let json = std::fs::read_to_string(path)?;
    parse_song_json(&json)
}

/// Parse a JSON song and render it.
pub fn render_json(json: &str, config: &RenderConfig) -> Result<String, TabError> {
    let song = parse_song_json(json)?;
    render_song(&song, config)
}

/// Read a JSON song file and render it.
pub fn render_file<P: AsRef<Path>>(path: P, config: &RenderConfig) -> Result<String, TabError> {
    let song = parse_file(path)?;
    render_song(&song, config)
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI: for native hosts (static library / cdylib)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Render a JSON song and return the tablature as a C string.
/// The caller must free the returned string with `tablib_free_string`.
///
/// `config_json` may be null to use the default configuration. Returns
/// null on any error.
///
/// # Safety
/// `song_json` must be a valid null-terminated UTF-8 C string, and
/// `config_json` must be null or one as well.
#[no_mangle]
pub unsafe extern "C" fn tablib_render_json(
    song_json: *const c_char,
    config_json: *const c_char,
) -> *mut c_char {
    if song_json.is_null() {
        return std::ptr::null_mut();
    }
    let Ok(song) = unsafe { CStr::from_ptr(song_json) }.to_str() else {
        return std::ptr::null_mut();
    };

    let config = if config_json.is_null() {
        RenderConfig::default()
    } else {
        let parsed = unsafe { CStr::from_ptr(config_json) }
            .to_str()
            .ok()
            .and_then(|json| RenderConfig::from_json(json).ok());
        match parsed {
            Some(config) => config,
            None => return std::ptr::null_mut(),
        }
    };

    match render_json(song, &config) {
        Ok(tab) => CString::new(tab).unwrap_or_default().into_raw(),
        Err(e) => {
            tracing::warn!(error = %e, "render failed");
            std::ptr::null_mut()
        }
    }
}

/// Free a string previously returned by tablib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a tablib function, or null.
#[no_mangle]
pub unsafe extern "C" fn tablib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}

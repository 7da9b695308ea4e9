//! Render configuration.
//!
//! Pure data consumed by the renderer. Every struct deserializes with
//! defaults, so a configuration file only needs the fields it changes.

use serde::{Deserialize, Serialize};

/// Default output width in characters.
pub const DEFAULT_LINE_LENGTH: usize = 60;

/// Where the lyric row sits relative to the string rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LyricsPosition {
    #[default]
    Top,
    Bottom,
}

/// Song header fields and how they are shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub show_title: bool,
    /// Center the title and subtitle on the line width
    pub center_title: bool,
    pub show_subtitle: bool,
    pub show_artist: bool,
    pub show_album: bool,
    pub show_music: bool,
    pub show_words: bool,
    pub show_tab: bool,
    pub show_copyright: bool,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            show_title: true,
            center_title: true,
            show_subtitle: true,
            show_artist: true,
            show_album: true,
            show_music: true,
            show_words: true,
            show_tab: true,
            show_copyright: true,
        }
    }
}

impl HeaderConfig {
    /// A configuration that hides every header field.
    pub fn hidden() -> Self {
        Self {
            show_title: false,
            center_title: false,
            show_subtitle: false,
            show_artist: false,
            show_album: false,
            show_music: false,
            show_words: false,
            show_tab: false,
            show_copyright: false,
        }
    }
}

/// Tablature body layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Maximum width of the measures packed on one line
    pub line_length: usize,
    pub show_lyrics: bool,
    pub show_bar_numbers: bool,
    pub lyrics_position: LyricsPosition,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            line_length: DEFAULT_LINE_LENGTH,
            show_lyrics: true,
            show_bar_numbers: true,
            lyrics_position: LyricsPosition::Top,
        }
    }
}

/// Complete render configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// 0-based index of the track to render
    pub track: usize,
    pub header: HeaderConfig,
    pub line: LineConfig,
}

impl RenderConfig {
    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, crate::TabError> {
        Ok(serde_json::from_str(json)?)
    }
}

//! Song header: title, subtitle and credits above the tablature.

use super::text::center;
use crate::config::RenderConfig;
use crate::model::Song;

/// Header lines for `song`. Empty when nothing is shown.
pub(super) fn render_header(song: &Song, config: &RenderConfig) -> Vec<String> {
    let header = &config.header;
    let width = config.line.line_length;
    let mut lines = Vec::new();

    let centered = |text: &str| {
        if header.center_title {
            center(text, width)
        } else {
            text.to_string()
        }
    };

    if header.show_title && !song.title.is_empty() {
        lines.push(centered(&song.title));
        lines.push(String::new());
    }
    if header.show_subtitle && !song.subtitle.is_empty() {
        lines.push(centered(&song.subtitle));
        lines.push(String::new());
    }

    let credits = [
        (header.show_album, "Album", &song.album),
        (header.show_artist, "Artist", &song.artist),
        (header.show_music, "Music", &song.music),
        (header.show_words, "Words", &song.words),
        (header.show_copyright, "Copyright", &song.copyright),
        (header.show_tab, "Arrangement", &song.tab),
    ];
    for (shown, label, value) in credits {
        if shown && !value.is_empty() {
            lines.push(format!("{label}: {value}"));
        }
    }

    lines
}

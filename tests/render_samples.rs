//! Rendering tests: load the JSON fixture and render it end to end.

use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tablib::{
    parse_file, parse_song_json, render_file, render_json, render_song, HeaderConfig,
    LyricsPosition, RenderConfig, TabError,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn no_header() -> RenderConfig {
    RenderConfig {
        header: HeaderConfig::hidden(),
        ..RenderConfig::default()
    }
}

#[test]
fn parse_riff_fixture() {
    let song = parse_file(fixture("riff.json")).expect("Failed to parse riff.json");

    assert_eq!(song.title, "Riff");
    assert_eq!(song.tracks.len(), 2);
    assert_eq!(song.tracks[0].string_count(), 6);
    assert_eq!(song.tracks[0].measures.len(), 2);
    assert_eq!(song.tracks[1].string_count(), 4);
    assert_eq!(song.lyrics.as_ref().map(|l| l.lyrics.as_str()), Some("la lo li"));
}

#[test]
fn render_riff_with_header() {
    let tab = render_file(fixture("riff.json"), &RenderConfig::default())
        .expect("Failed to render riff.json");

    let expected = [
        format!("{}Riff", " ".repeat(28)),
        String::new(),
        "Artist: Nobody".to_string(),
        String::new(),
        "1".to_string(),
        "   la lo   li".to_string(),
        "E|-5-----|----|".to_string(),
        "B|----7--|----|".to_string(),
        "G|-------|-x--|".to_string(),
        "D|-------|----|".to_string(),
        "A|-------|----|".to_string(),
        "E|-------|----|".to_string(),
    ]
    .join("\n");
    assert_eq!(tab, expected);
}

#[test]
fn render_riff_wrapped() {
    let mut config = no_header();
    config.line.line_length = 7;
    let tab = render_file(fixture("riff.json"), &config).unwrap();

    let expected = "\
1
   la lo
E|-5-----|
B|----7--|
G|-------|
D|-------|
A|-------|
E|-------|

2
   li
E|----|
B|----|
G|-x--|
D|----|
A|----|
E|----|";
    assert_eq!(tab, expected);
}

#[test]
fn every_line_respects_the_limit() {
    let song = parse_file(fixture("riff.json")).unwrap();
    for line_length in [1, 4, 7, 10, 60] {
        let mut config = no_header();
        config.line.line_length = line_length;
        config.line.show_bar_numbers = false;
        config.line.show_lyrics = false;
        let tab = render_song(&song, &config).unwrap();

        for line in tab.lines().filter(|l| !l.is_empty()) {
            // Tuning label plus barlines; an over-wide measure sits alone.
            let measures: Vec<&str> = line[2..].split('|').filter(|m| !m.is_empty()).collect();
            let width: usize = measures.iter().map(|m| m.len()).sum();
            assert!(
                measures.len() == 1 || width <= line_length,
                "line {line:?} exceeds {line_length}"
            );
        }
    }
}

#[test]
fn lyrics_at_bottom_without_bar_numbers() {
    let mut config = no_header();
    config.line.show_bar_numbers = false;
    config.line.lyrics_position = LyricsPosition::Bottom;
    let tab = render_file(fixture("riff.json"), &config).unwrap();

    let expected = "\
E|-5-----|----|
B|----7--|----|
G|-------|-x--|
D|-------|----|
A|-------|----|
E|-------|----|
   la lo   li";
    assert_eq!(tab, expected);
}

#[test]
fn render_second_track() {
    let config = RenderConfig {
        track: 1,
        ..no_header()
    };
    let tab = render_file(fixture("riff.json"), &config).unwrap();

    assert_eq!(tab, "1\n   la\nG|----|\nD|----|\nA|----|\nE|-0--|");
}

#[test]
fn rendering_is_deterministic() {
    let json = std::fs::read_to_string(fixture("riff.json")).unwrap();
    let config = RenderConfig::default();
    let first = render_json(&json, &config).unwrap();
    for _ in 0..3 {
        assert_eq!(render_json(&json, &config).unwrap(), first);
    }
}

#[test]
fn track_out_of_range() {
    let config = RenderConfig {
        track: 5,
        ..RenderConfig::default()
    };
    let err = render_file(fixture("riff.json"), &config).unwrap_err();
    assert!(matches!(err, TabError::TrackOutOfRange { track: 5, tracks: 2 }));
}

#[test]
fn unsupported_note_type_is_an_error() {
    let json = r#"{
        "tracks": [{
            "strings": [{ "number": 1, "value": 64 }],
            "measures": [{
                "start": 0,
                "length": 960,
                "voices": [{ "beats": [{
                    "start": 0,
                    "duration": 960,
                    "notes": [{ "string": 1, "value": 3, "type": "grace" }]
                }] }]
            }]
        }]
    }"#;
    let err = render_json(json, &RenderConfig::default()).unwrap_err();
    assert!(matches!(err, TabError::UnsupportedNote { string: 1, fret: 3 }));
}

fn two_measures(first_start: &str, second_start: &str) -> String {
    format!(
        r#"{{
        "tracks": [{{
            "strings": [{{ "number": 1, "value": 64 }}, {{ "number": 2, "value": 59 }}],
            "measures": [
                {{ {first_start} "length": 3840, "voices": [{{ "beats": [
                    {{ "start": 0, "duration": 3840, "notes": [{{ "string": 1, "value": 5 }}] }}
                ] }}] }},
                {{ {second_start} "length": 3840, "voices": [{{ "beats": [
                    {{ "start": 0, "duration": 3840, "notes": [{{ "string": 2, "value": 7 }}] }}
                ] }}] }}
            ]
        }}]
    }}"#
    )
}

#[test]
fn measure_starts_place_notes_on_the_timeline() {
    let json = two_measures(r#""start": 0,"#, r#""start": 3840,"#);
    let mut config = no_header();
    config.line.show_bar_numbers = false;
    assert_eq!(render_json(&json, &config).unwrap(), "E|-5--|----|\nB|----|-7--|");
}

#[test]
fn measure_without_start_is_an_error() {
    let json = two_measures("", "");
    let err = render_json(&json, &RenderConfig::default()).unwrap_err();
    assert!(matches!(err, TabError::Json(_)));
}

#[test]
fn track_without_strings_is_an_error() {
    let json = r#"{ "tracks": [{ "name": "Empty" }] }"#;
    let err = render_json(json, &RenderConfig::default()).unwrap_err();
    assert!(matches!(err, TabError::NoStrings { track: 0 }));
}

#[test]
fn malformed_json_is_an_error() {
    let err = parse_song_json("{ not json").unwrap_err();
    assert!(matches!(err, TabError::Json(_)));
}

#[test]
fn missing_file_is_an_error() {
    let err = parse_file(fixture("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, TabError::Io(_)));
}

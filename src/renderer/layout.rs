//! Line layout: packs rendered measures into output lines and merges
//! them with the tuning column, barlines, bar numbers and lyric rows.

use tracing::debug;

use super::constants::*;
use super::measure::AsciiMeasure;
use super::text::{concat_columns, ljust, strip_trailing_whitespace};
use crate::config::{LineConfig, LyricsPosition};

// ═══════════════════════════════════════════════════════════════════════
// Line packing
// ═══════════════════════════════════════════════════════════════════════

/// Greedily split `measures` into lines whose total measure width stays
/// within `line_length`. A measure wider than the limit gets a line of its
/// own.
pub fn pack_lines(measures: &[AsciiMeasure], line_length: usize) -> Vec<&[AsciiMeasure]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut width = 0;

    for (i, measure) in measures.iter().enumerate() {
        let w = measure.width();
        if i > start && width + w > line_length {
            lines.push(&measures[start..i]);
            start = i;
            width = 0;
        }
        width += w;
    }
    if start < measures.len() {
        lines.push(&measures[start..]);
    }

    lines
}

// ═══════════════════════════════════════════════════════════════════════
// Line assembly
// ═══════════════════════════════════════════════════════════════════════

/// Which rows a line block has, top to bottom.
#[derive(Clone, Copy)]
struct RowPlan {
    lyrics: Option<LyricsPosition>,
}

impl RowPlan {
    fn new(config: &LineConfig) -> Self {
        Self {
            lyrics: config.show_lyrics.then_some(config.lyrics_position),
        }
    }

    /// Stack a lyric cell around the string cells.
    fn column(&self, lyric: String, strings: impl IntoIterator<Item = String>) -> Vec<String> {
        let mut rows = Vec::new();
        if self.lyrics == Some(LyricsPosition::Top) {
            rows.push(lyric.clone());
        }
        rows.extend(strings);
        if self.lyrics == Some(LyricsPosition::Bottom) {
            rows.push(lyric);
        }
        rows
    }
}

/// Merge one line of measures into text rows.
fn render_line(line: &[AsciiMeasure], tuning: &[String], plan: RowPlan) -> Vec<String> {
    let tuning_width = tuning.iter().map(|t| t.chars().count()).max().unwrap_or(0);
    let separator = plan.column(
        LYRIC_BARLINE.to_string(),
        tuning.iter().map(|_| BARLINE.to_string()),
    );

    let mut blocks = Vec::with_capacity(line.len() * 2 + 2);
    blocks.push(plan.column(ljust("", tuning_width), tuning.iter().cloned()));
    for measure in line {
        blocks.push(separator.clone());
        blocks.push(plan.column(measure.lyrics.clone(), measure.strings.iter().cloned()));
    }
    blocks.push(separator);

    concat_columns(&blocks)
}

/// Lay out all `measures` as the tablature body.
pub fn render_lines(measures: &[AsciiMeasure], tuning: &[String], config: &LineConfig) -> String {
    let plan = RowPlan::new(config);
    let lines = pack_lines(measures, config.line_length);
    debug!(
        measures = measures.len(),
        lines = lines.len(),
        line_length = config.line_length,
        "packed measures into lines"
    );

    let mut out: Vec<String> = Vec::new();
    let mut bar = 1;
    for line in lines {
        if config.show_bar_numbers {
            out.push(bar.to_string());
            if plan.lyrics != Some(LyricsPosition::Top) {
                out.push(String::new());
            }
        }
        out.extend(render_line(line, tuning, plan));
        out.push(String::new());
        bar += line.len();
    }

    strip_trailing_whitespace(&out.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure(lyrics: &str, strings: &[&str]) -> AsciiMeasure {
        AsciiMeasure {
            lyrics: lyrics.to_string(),
            strings: strings.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn blank(width: usize) -> AsciiMeasure {
        measure(&" ".repeat(width), &[&"-".repeat(width), &"-".repeat(width)])
    }

    fn tuning() -> Vec<String> {
        vec!["E".to_string(), "A".to_string()]
    }

    #[test]
    fn packs_greedily() {
        let measures = vec![blank(10), blank(10), blank(10), blank(5)];
        let lines = pack_lines(&measures, 25);
        let sizes: Vec<usize> = lines.iter().map(|l| l.len()).collect();
        assert_eq!(sizes, vec![2, 2]);
    }

    #[test]
    fn exact_fit_stays_on_line() {
        let measures = vec![blank(10), blank(15), blank(1)];
        let sizes: Vec<usize> = pack_lines(&measures, 25).iter().map(|l| l.len()).collect();
        assert_eq!(sizes, vec![2, 1]);
    }

    #[test]
    fn wide_measure_gets_own_line() {
        let measures = vec![blank(5), blank(40), blank(5)];
        let sizes: Vec<usize> = pack_lines(&measures, 20).iter().map(|l| l.len()).collect();
        assert_eq!(sizes, vec![1, 1, 1]);
        assert!(pack_lines(&[], 20).is_empty());
    }

    #[test]
    fn lyrics_on_top() {
        let measures = vec![
            measure(" la  ", &["-5---", "-----"]),
            measure(" lo ", &["-7==", "----"]),
        ];
        let config = LineConfig::default();
        assert_eq!(
            render_lines(&measures, &tuning(), &config),
            "1\n   la    lo\nE|-5---|-7==|\nA|-----|----|"
        );
    }

    #[test]
    fn lyrics_at_bottom_and_wrapping() {
        let measures = vec![
            measure(" la  ", &["-5---", "-----"]),
            measure(" lo ", &["-7==", "----"]),
        ];
        let config = LineConfig {
            line_length: 6,
            lyrics_position: LyricsPosition::Bottom,
            ..LineConfig::default()
        };
        assert_eq!(
            render_lines(&measures, &tuning(), &config),
            "1\n\nE|-5---|\nA|-----|\n   la\n\n2\n\nE|-7==|\nA|----|\n   lo"
        );
    }

    #[test]
    fn without_lyrics_or_numbers() {
        let measures = vec![measure(" la  ", &["-5---", "-----"])];
        let config = LineConfig {
            show_lyrics: false,
            show_bar_numbers: false,
            ..LineConfig::default()
        };
        assert_eq!(render_lines(&measures, &tuning(), &config), "E|-5---|\nA|-----|");
    }

    #[test]
    fn wide_tuning_labels_keep_lyrics_aligned() {
        let measures = vec![measure(" la ", &["-5--", "----"])];
        let tuning = vec!["C#".to_string(), "D ".to_string()];
        let config = LineConfig {
            show_bar_numbers: false,
            ..LineConfig::default()
        };
        assert_eq!(
            render_lines(&measures, &tuning, &config),
            "    la\nC#|-5--|\nD |----|"
        );
    }
}

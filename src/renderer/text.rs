//! Plain-text helpers for building monospace blocks.

/// Strip trailing whitespace from every line of `text`.
pub(crate) fn strip_trailing_whitespace(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Append `count` copies of `fill` to `out`.
pub(super) fn push_fill(out: &mut String, fill: char, count: usize) {
    out.extend(std::iter::repeat(fill).take(count));
}

/// Left-justify `text` to `width` characters.
pub(super) fn ljust(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

/// Center `text` in `width` characters. When the margin is odd the extra
/// space goes on the right, unless `width` is odd too.
pub(super) fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    let mut out = String::with_capacity(width);
    push_fill(&mut out, ' ', left);
    out.push_str(text);
    push_fill(&mut out, ' ', margin - left);
    out
}

/// Join blocks side by side: line `i` of the result is the concatenation
/// of line `i` of every block. All blocks must have the same line count.
pub(super) fn concat_columns(blocks: &[Vec<String>]) -> Vec<String> {
    let rows = blocks.first().map_or(0, Vec::len);
    (0..rows)
        .map(|row| blocks.iter().map(|block| block[row].as_str()).collect())
        .collect()
}

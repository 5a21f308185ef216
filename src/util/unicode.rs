use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: char = '\u{2026}';

/// Terminal cells needed to print `s`. Wide CJK and emoji take 2, combining
/// marks take 0.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(UnicodeWidthStr::width).sum()
}

/// Fit `s` into `max_cells`, replacing the cut-off tail with `…`.
///
/// Cuts only on grapheme boundaries, so the result may be one cell short
/// when a wide character straddles the limit.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let Some(budget) = max_cells.checked_sub(1) else {
        return String::new();
    };

    let mut used = 0;
    let mut kept: String = s
        .graphemes(true)
        .take_while(|g| {
            used += UnicodeWidthStr::width(*g);
            used <= budget
        })
        .collect();
    kept.push(ELLIPSIS);
    kept
}

/// Right-pad with spaces to `cells` terminal cells; wider input is unchanged.
pub fn pad_to_width(s: &str, cells: usize) -> String {
    let missing = cells.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(missing))
}

//! Grapheme cluster cell width.
//!
//! `egc_width` is the single authority for how many terminal cells a grapheme
//! cluster (EGC) occupies. `cell_width` layers the position-dependent cases
//! on top: a tab expands to the next tab stop and a line terminator has no
//! width at all.
//!
//! Width precedence:
//! 1. ASCII fast path (control characters are zero width).
//! 2. Classifier (semantic kind -> width mapping).
//! 3. Conservative widen fallback (pictographic signal but width == 1).
//!
//! The classifier favors over-estimation for emoji composites; an extra
//! blank cell is harmless while under-estimation drifts the cursor column.

const ZWJ: char = '\u{200D}';
const VS16: char = '\u{FE0F}';
const KEYCAP_COMBINING: char = '\u{20E3}';

/// Semantic classification of a single grapheme cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EgcKind {
    Narrow,
    Wide,
    Emoji,
    Combining { wide_base: bool },
    ZeroWidth,
}

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

fn is_extended_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
        || ('\u{1AB0}'..='\u{1AFF}').contains(&c)
        || ('\u{1DC0}'..='\u{1DFF}').contains(&c)
        || ('\u{20D0}'..='\u{20FF}').contains(&c)
        || ('\u{FE20}'..='\u{FE2F}').contains(&c)
}

fn char_width(c: char) -> usize {
    unicode_width::UnicodeWidthChar::width(c).unwrap_or(0)
}

fn classify(egc: &str) -> EgcKind {
    let mut chars = egc.chars();
    let Some(first) = chars.next() else {
        return EgcKind::ZeroWidth;
    };

    if chars.next().is_none() {
        if is_extended_pictographic(first) {
            return EgcKind::Emoji;
        }
        return match char_width(first) {
            0 => EgcKind::ZeroWidth,
            2 => EgcKind::Wide,
            _ => EgcKind::Narrow,
        };
    }

    let mut count_pictographic = 0usize;
    let mut count_regional = 0usize;
    let mut has_zwj = false;
    let mut has_vs16 = false;
    let mut has_keycap = false;
    let mut has_combining = false;
    let mut any_wide = false;
    for c in egc.chars() {
        if is_extended_pictographic(c) {
            count_pictographic += 1;
        }
        if is_regional_indicator(c) {
            count_regional += 1;
        }
        has_zwj |= c == ZWJ;
        has_vs16 |= c == VS16;
        has_keycap |= c == KEYCAP_COMBINING;
        has_combining |= is_combining_mark(c);
        any_wide |= char_width(c) == 2;
    }

    if has_keycap || count_regional == 2 || (has_zwj && count_pictographic >= 2) {
        return EgcKind::Emoji;
    }
    if count_pictographic >= 1 || has_vs16 {
        return EgcKind::Emoji;
    }
    if has_combining {
        let wide_base = is_extended_pictographic(first) || char_width(first) == 2;
        return EgcKind::Combining { wide_base };
    }
    if any_wide {
        return EgcKind::Wide;
    }
    EgcKind::Narrow
}

/// Display width in terminal cells of a single grapheme cluster.
///
/// The caller is responsible for segmentation; a multi-cluster string is
/// measured as if it were one cluster.
pub fn egc_width(egc: &str) -> usize {
    if egc.len() == 1 {
        let b = egc.as_bytes()[0];
        return if b.is_ascii_control() { 0 } else { 1 };
    }

    let mut width = match classify(egc) {
        EgcKind::ZeroWidth => 0,
        EgcKind::Narrow => 1,
        EgcKind::Wide | EgcKind::Emoji => 2,
        EgcKind::Combining { wide_base } => {
            if wide_base {
                2
            } else {
                1
            }
        }
    };

    if width == 1
        && egc
            .chars()
            .any(|c| is_extended_pictographic(c) || is_regional_indicator(c))
    {
        width = 2;
    }
    width
}

/// Width of a grapheme cluster drawn `offset` cells from the start of its line.
///
/// A tab advances to the next multiple of `tab_size`; `\n` and `\r\n` occupy
/// no cells.
pub fn cell_width(egc: &str, offset: usize, tab_size: usize) -> usize {
    match egc {
        "\t" => {
            let tab_size = tab_size.max(1);
            tab_size - offset % tab_size
        }
        "\n" | "\r\n" => 0,
        _ => egc_width(egc),
    }
}

//! Unicode display-width calculation.
//!
//! This is a pure, from-scratch width table — not a wrapper around the
//! `unicode-width` crate — because the spec's rules diverge from that
//! crate's behavior in a few places that matter here: control characters
//! (including TAB) measure as width 1, not 0, and a specific set of emoji
//! ranges are forced to width 2 regardless of the underlying East Asian
//! Width property. No grapheme-cluster segmentation is performed; a
//! ZWJ-joined sequence is measured as the sum of its parts.

/// Display width of a single Unicode codepoint, in terminal cells: 0, 1, or 2.
pub fn rune_width(cp: u32) -> u8 {
    if is_zero_width(cp) {
        return 0;
    }
    if is_wide(cp) {
        return 2;
    }
    1
}

/// Sum of [`rune_width`] over every codepoint in `s`.
///
/// No grapheme clustering: a ZWJ-joined family emoji sums the width of each
/// component codepoint (including the ZWJ itself, which is zero-width), so
/// it measures as >= 2 cells but not necessarily the single cell a strict
/// grapheme-aware renderer might use. This is intentional (see spec Open
/// Questions).
pub fn string_width(s: &str) -> usize {
    s.chars().map(|c| rune_width(c as u32) as usize).sum()
}

fn is_zero_width(cp: u32) -> bool {
    matches!(cp,
        0x0300..=0x036F // combining diacritical marks
        | 0x200B..=0x200D // ZWSP, ZWNJ, ZWJ
        | 0xFE00..=0xFE0F // variation selectors
        | 0x1AB0..=0x1AFF // combining diacritical marks extended
        | 0x20D0..=0x20FF // combining diacritical marks for symbols
        | 0xFE20..=0xFE2F // combining half marks
    )
}

fn is_wide(cp: u32) -> bool {
    matches!(cp,
        // CJK Unified Ideographs
        0x4E00..=0x9FFF
        // Hangul syllables
        | 0xAC00..=0xD7A3
        // Hangul Jamo
        | 0x1100..=0x115F
        // CJK Radicals / Kangxi / CJK symbols and punctuation / Hiragana / Katakana
        | 0x2E80..=0x303E
        // Enclosed CJK letters and months, CJK compatibility
        | 0x3041..=0x33FF
        // CJK Unified Ideographs Extension A
        | 0x3400..=0x4DBF
        // CJK compatibility ideographs
        | 0xF900..=0xFAFF
        // Vertical forms, CJK compatibility forms
        | 0xFE30..=0xFE4F
        // Fullwidth / halfwidth forms
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        // Misc Symbols, with presentation (e.g. weather, hands)
        | 0x2600..=0x26FF
        // Dingbats
        | 0x2700..=0x27BF
        // Misc Symbols and Arrows (emoji subset)
        | 0x2B00..=0x2BFF
        // Supplementary Multilingual Plane emoji block
        | 0x1F000..=0x1FFFF
        // CJK Unified Ideographs Extension B and beyond, CJK compatibility supplement
        | 0x20000..=0x3FFFD
    )
}

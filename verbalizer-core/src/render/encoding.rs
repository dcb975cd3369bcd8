//! WinAnsi character safety and Helvetica text metrics.
//!
//! The builtin PDF faces are WinAnsi-encoded, so every string headed for
//! the page is filtered here first: unencodable characters become a visible
//! `?` placeholder instead of corrupting the content stream. Rendering must
//! always succeed, whatever the transcription engine produced.

/// Placeholder for characters outside the WinAnsi set.
pub const REPLACEMENT: char = '?';

/// CP1252 additions in the 0x80–0x9F range (curly quotes, dashes, euro, …).
/// Whisper output uses the curly forms constantly, so these stay renderable.
const CP1252_EXTRAS: [char; 27] = [
    '\u{20AC}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017D}', '\u{2018}',
    '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02DC}',
    '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{017E}', '\u{0178}',
];

fn is_win_ansi(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}') || CP1252_EXTRAS.contains(&c)
}

/// Replace every character the output encoding cannot represent.
///
/// Whitespace of any flavour collapses to a plain space (the grouper has
/// already normalised inter-segment spacing; anything left is stray tabs or
/// newlines inside a segment).
pub fn sanitize_win_ansi(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_whitespace() {
                ' '
            } else if is_win_ansi(c) {
                c
            } else {
                REPLACEMENT
            }
        })
        .collect()
}

/// Helvetica advance widths for ASCII 0x20–0x7E, in 1/1000 em units
/// (Adobe core-14 AFM values).
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Width outside the ASCII table — the dominant Helvetica letter width.
const DEFAULT_WIDTH: u16 = 556;

fn char_width_milliem(c: char) -> u16 {
    let code = c as u32;
    if (0x20..=0x7E).contains(&code) {
        HELVETICA_WIDTHS[(code - 0x20) as usize]
    } else {
        DEFAULT_WIDTH
    }
}

/// Millimetres per typographic point.
const MM_PER_PT: f32 = 25.4 / 72.0;

/// Approximate rendered width of `text` in Helvetica at `font_size_pt`.
pub fn text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    let milliem: u32 = text.chars().map(|c| char_width_milliem(c) as u32).sum();
    milliem as f32 / 1000.0 * font_size_pt * MM_PER_PT
}

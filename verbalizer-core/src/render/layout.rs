//! Pure layout pass: positioned text/rule operations per page.
//!
//! The renderer is split in two so pagination is testable without parsing
//! PDF bytes: this module turns a title plus topic blocks into absolute
//! page positions (top-down millimetres), and `render::mod` replays those
//! operations through `printpdf`.

use crate::render::encoding::text_width_mm;
use crate::render::RenderOptions;
use crate::transcript::TopicBlock;

/// Builtin face used for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
}

/// Named ink colours of the document theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    /// Near-black title ink.
    Heading,
    /// Muted gray for the generation date line.
    Muted,
    /// Accent blue for timestamp gutter labels.
    Accent,
    /// Near-black body ink.
    Body,
}

/// One string placed on a page. Coordinates are millimetres from the top
/// left; `baseline` measures down from the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub x: f32,
    pub baseline: f32,
    pub size: f32,
    pub face: Face,
    pub ink: Ink,
    pub text: String,
}

/// A thin horizontal rule at `y` mm from the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOp {
    pub y: f32,
    pub x0: f32,
    pub x1: f32,
}

/// All operations of one page.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub texts: Vec<TextOp>,
    pub rules: Vec<RuleOp>,
}

/// The fully paginated document.
#[derive(Debug, Clone)]
pub struct DocumentLayout {
    pub pages: Vec<PageLayout>,
}

/// Header cell heights (mm), matching the 24 pt title and 10 pt date line.
const TITLE_CELL_H: f32 = 15.0;
const DATE_CELL_H: f32 = 8.0;
/// Gap above the rule and below it before the first block.
const RULE_GAP_ABOVE: f32 = 5.0;
const RULE_GAP_BELOW: f32 = 10.0;

/// Baseline position for text set inside a cell of height `cell_h` whose
/// top edge is at `top`.
fn baseline(top: f32, cell_h: f32) -> f32 {
    top + cell_h * 0.75
}

/// Format a block start time as `H:MM:SS` (hours unpadded, always shown).
///
/// Fractional seconds truncate; negative inputs clamp to zero.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Greedy word wrap against Helvetica metrics.
///
/// A single word wider than the column is hard-broken at character
/// granularity. Always returns at least one (possibly empty) line so a
/// block with empty text still occupies a row next to its gutter label.
pub fn wrap_text(text: &str, max_width_mm: f32, font_size_pt: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        for piece in break_word(word, max_width_mm, font_size_pt) {
            if current.is_empty() {
                current = piece;
                continue;
            }
            let candidate = format!("{current} {piece}");
            if text_width_mm(&candidate, font_size_pt) <= max_width_mm {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current = piece;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Split an over-wide word into column-width pieces.
fn break_word(word: &str, max_width_mm: f32, font_size_pt: f32) -> Vec<String> {
    if text_width_mm(word, font_size_pt) <= max_width_mm {
        return vec![word.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        let mut candidate = current.clone();
        candidate.push(c);
        if !current.is_empty() && text_width_mm(&candidate, font_size_pt) > max_width_mm {
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Lay out the document header and all topic blocks.
///
/// Strings must already be WinAnsi-sanitized — measurement here has to see
/// exactly what will be drawn. The gutter label of a block and its first
/// body line always land on the same page at the same baseline; overflow
/// happens between lines only, never between a label and its first line.
pub fn lay_out(
    title: &str,
    date_line: &str,
    blocks: &[TopicBlock],
    opts: &RenderOptions,
) -> DocumentLayout {
    let mut pages: Vec<PageLayout> = Vec::new();
    let mut page = PageLayout::default();
    let mut y = opts.margin_top;

    let limit = opts.page_height - opts.margin_bottom;
    let body_x = opts.margin_left + opts.gutter_width;
    let column_width = opts.page_width - opts.margin_right - body_x;

    // ── Header ───────────────────────────────────────────────────────────
    page.texts.push(TextOp {
        x: opts.margin_left,
        baseline: baseline(y, TITLE_CELL_H),
        size: opts.title_size,
        face: Face::Bold,
        ink: Ink::Heading,
        text: title.to_string(),
    });
    y += TITLE_CELL_H;

    page.texts.push(TextOp {
        x: opts.margin_left,
        baseline: baseline(y, DATE_CELL_H),
        size: opts.date_size,
        face: Face::Regular,
        ink: Ink::Muted,
        text: date_line.to_string(),
    });
    y += DATE_CELL_H + RULE_GAP_ABOVE;

    page.rules.push(RuleOp {
        y,
        x0: opts.margin_left,
        x1: opts.page_width - opts.margin_right,
    });
    y += RULE_GAP_BELOW;

    // ── Blocks ───────────────────────────────────────────────────────────
    for block in blocks {
        let lines = wrap_text(&block.text, column_width, opts.body_size);

        // Gutter label and first line share one cursor position.
        if y + opts.line_height > limit {
            pages.push(std::mem::take(&mut page));
            y = opts.margin_top;
        }
        page.texts.push(TextOp {
            x: opts.margin_left,
            baseline: baseline(y, opts.line_height),
            size: opts.label_size,
            face: Face::Bold,
            ink: Ink::Accent,
            text: format!("[{}]", format_timestamp(block.start)),
        });
        page.texts.push(TextOp {
            x: body_x,
            baseline: baseline(y, opts.line_height),
            size: opts.body_size,
            face: Face::Regular,
            ink: Ink::Body,
            text: lines[0].clone(),
        });
        y += opts.line_height;

        // Continuation lines may flow onto following pages.
        for line in &lines[1..] {
            if y + opts.line_height > limit {
                pages.push(std::mem::take(&mut page));
                y = opts.margin_top;
            }
            page.texts.push(TextOp {
                x: body_x,
                baseline: baseline(y, opts.line_height),
                size: opts.body_size,
                face: Face::Regular,
                ink: Ink::Body,
                text: line.clone(),
            });
            y += opts.line_height;
        }

        y += opts.block_gap;
    }

    pages.push(page);
    DocumentLayout { pages }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(start: f64, text: &str) -> TopicBlock {
        TopicBlock {
            start,
            text: text.to_string(),
        }
    }

    #[test]
    fn timestamp_pads_minutes_and_seconds_only() {
        assert_eq!(format_timestamp(0.0), "0:00:00");
        assert_eq!(format_timestamp(5.9), "0:00:05");
        assert_eq!(format_timestamp(65.0), "0:01:05");
        assert_eq!(format_timestamp(3661.2), "1:01:01");
        assert_eq!(format_timestamp(36_000.0), "10:00:00");
    }

    #[test]
    fn negative_timestamp_clamps_to_zero() {
        assert_eq!(format_timestamp(-3.0), "0:00:00");
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_text("a few words", 165.0, 11.0);
        assert_eq!(lines, vec!["a few words"]);
    }

    #[test]
    fn wrap_fills_lines_greedily() {
        let text = "word ".repeat(60);
        let lines = wrap_text(&text, 40.0, 11.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, 11.0) <= 40.0, "line too wide: {line:?}");
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.trim());
    }

    #[test]
    fn oversized_word_is_hard_broken() {
        let word = "x".repeat(400);
        let lines = wrap_text(&word, 40.0, 11.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, 11.0) <= 40.0);
        }
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        assert_eq!(wrap_text("", 165.0, 11.0), vec![String::new()]);
        assert_eq!(wrap_text("   ", 165.0, 11.0), vec![String::new()]);
    }

    #[test]
    fn header_only_layout_is_one_page() {
        let layout = lay_out("Weekly Sync", "Date: March 01, 2026", &[], &RenderOptions::default());
        assert_eq!(layout.pages.len(), 1);
        assert_eq!(layout.pages[0].texts.len(), 2);
        assert_eq!(layout.pages[0].rules.len(), 1);
        assert_eq!(layout.pages[0].texts[0].text, "Weekly Sync");
        assert_eq!(layout.pages[0].texts[0].face, Face::Bold);
        assert_eq!(layout.pages[0].texts[1].ink, Ink::Muted);
    }

    #[test]
    fn single_block_lays_out_label_and_body() {
        let blocks = [block(5.0, "New topic")];
        let layout = lay_out("T", "D", &blocks, &RenderOptions::default());
        let page = &layout.pages[0];

        let label = page.texts.iter().find(|t| t.ink == Ink::Accent).expect("label");
        assert_eq!(label.text, "[0:00:05]");
        let body = page.texts.iter().find(|t| t.ink == Ink::Body).expect("body");
        assert_eq!(body.text, "New topic");
        assert_eq!(label.baseline, body.baseline);
        assert!(body.x > label.x);
    }

    #[test]
    fn block_with_empty_text_still_gets_a_row() {
        let blocks = [block(1.0, "")];
        let layout = lay_out("T", "D", &blocks, &RenderOptions::default());
        let page = &layout.pages[0];
        assert!(page.texts.iter().any(|t| t.ink == Ink::Accent));
        assert!(page.texts.iter().any(|t| t.ink == Ink::Body && t.text.is_empty()));
    }

    #[test]
    fn many_blocks_overflow_onto_new_pages() {
        let text = "meeting discussion point ".repeat(12);
        let blocks: Vec<TopicBlock> = (0..40).map(|i| block(i as f64 * 10.0, &text)).collect();
        let layout = lay_out("Long Meeting", "Date", &blocks, &RenderOptions::default());
        assert!(layout.pages.len() > 1, "expected overflow, got 1 page");
    }

    #[test]
    fn label_never_separated_from_first_body_line() {
        let opts = RenderOptions::default();
        let text = "alpha beta gamma delta ".repeat(10);
        let blocks: Vec<TopicBlock> = (0..80).map(|i| block(i as f64, &text)).collect();
        let layout = lay_out("T", "D", &blocks, &opts);
        assert!(layout.pages.len() > 2);

        // Every gutter label must have a body line at the same baseline on
        // the same page.
        for page in &layout.pages {
            for label in page.texts.iter().filter(|t| t.ink == Ink::Accent) {
                assert!(
                    page.texts
                        .iter()
                        .any(|t| t.ink == Ink::Body && t.baseline == label.baseline),
                    "label {:?} has no body line on its page",
                    label.text
                );
            }
        }
    }

    #[test]
    fn all_ops_respect_page_margins() {
        let opts = RenderOptions::default();
        let text = "lorem ipsum dolor sit amet ".repeat(20);
        let blocks: Vec<TopicBlock> = (0..30).map(|i| block(i as f64, &text)).collect();
        let layout = lay_out("T", "D", &blocks, &opts);

        for page in &layout.pages {
            for op in &page.texts {
                assert!(op.baseline < opts.page_height - opts.margin_bottom + opts.line_height);
                assert!(op.x >= opts.margin_left);
            }
        }
    }
}

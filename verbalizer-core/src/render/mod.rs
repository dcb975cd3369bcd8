//! Paginated PDF rendering of topic blocks.
//!
//! ## Pipeline
//!
//! ```text
//! title + Vec<TopicBlock>
//!        │ sanitize (WinAnsi filter)
//!        ▼
//! lay_out() — pure pagination/wrapping pass
//!        │
//!        ▼
//! printpdf draw + save → PDF bytes → sink
//! ```
//!
//! Every layout decision (wrapping, pagination, encoding fallback) is
//! self-healing; only the terminal sink write can fail.

pub mod encoding;
pub mod layout;

use std::io::Write;
use std::path::Path;

use chrono::Local;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};
use tracing::info;

use crate::error::{Result, VerbalizerError};
use crate::render::encoding::sanitize_win_ansi;
use crate::render::layout::{lay_out, Face, Ink, PageLayout};
use crate::transcript::TopicBlock;

/// Page geometry and typography. Defaults are A4 portrait with a 25 mm
/// timestamp gutter.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page width in mm. Default: 210 (A4).
    pub page_width: f32,
    /// Page height in mm. Default: 297 (A4).
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    /// Bottom margin preserved by the page-break rule. Default: 15.
    pub margin_bottom: f32,
    /// Width of the timestamp gutter; body text starts past it. Default: 25.
    pub gutter_width: f32,
    /// Title face size in pt. Default: 24.
    pub title_size: f32,
    /// Date line size in pt. Default: 10.
    pub date_size: f32,
    /// Gutter label size in pt. Default: 10.
    pub label_size: f32,
    /// Body text size in pt. Default: 11.
    pub body_size: f32,
    /// Body leading in mm. Default: 6.
    pub line_height: f32,
    /// Vertical gap after each block in mm. Default: 4.
    pub block_gap: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_left: 10.0,
            margin_right: 10.0,
            margin_top: 15.0,
            margin_bottom: 15.0,
            gutter_width: 25.0,
            title_size: 24.0,
            date_size: 10.0,
            label_size: 10.0,
            body_size: 11.0,
            line_height: 6.0,
            block_gap: 4.0,
        }
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Renders grouped topic blocks into a paginated PDF.
#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer {
    options: RenderOptions,
}

impl DocumentRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a complete document and return the PDF bytes.
    ///
    /// An empty block list produces a valid header-only document.
    pub fn render_to_bytes(&self, title: &str, blocks: &[TopicBlock]) -> Result<Vec<u8>> {
        let title = sanitize_win_ansi(title.trim());
        let date_line = format!("Date: {}", Local::now().format("%B %d, %Y"));
        let sanitized: Vec<TopicBlock> = blocks
            .iter()
            .map(|b| TopicBlock {
                start: b.start,
                text: sanitize_win_ansi(&b.text),
            })
            .collect();

        let layout = lay_out(&title, &date_line, &sanitized, &self.options);

        let (doc, first_page, first_layer) = PdfDocument::new(
            &title,
            Mm(self.options.page_width),
            Mm(self.options.page_height),
            "content",
        );
        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| VerbalizerError::Render(e.to_string()))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| VerbalizerError::Render(e.to_string()))?,
        };

        for (i, page) in layout.pages.iter().enumerate() {
            let layer = if i == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page_idx, layer_idx) = doc.add_page(
                    Mm(self.options.page_width),
                    Mm(self.options.page_height),
                    "content",
                );
                doc.get_page(page_idx).get_layer(layer_idx)
            };
            self.draw_page(&layer, page, &fonts);
        }

        info!(
            blocks = blocks.len(),
            pages = layout.pages.len(),
            "document rendered"
        );
        doc.save_to_bytes()
            .map_err(|e| VerbalizerError::Render(e.to_string()))
    }

    /// Render into any writable sink.
    pub fn render_to_writer<W: Write>(
        &self,
        title: &str,
        blocks: &[TopicBlock],
        mut writer: W,
    ) -> Result<()> {
        let bytes = self.render_to_bytes(title, blocks)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Render to a file path. On a failed write the partial file is removed
    /// — a file at `path` after success is always a complete document.
    pub fn render_to_file(&self, title: &str, blocks: &[TopicBlock], path: &Path) -> Result<()> {
        let bytes = self.render_to_bytes(title, blocks)?;
        if let Err(e) = std::fs::write(path, &bytes) {
            let _ = std::fs::remove_file(path);
            return Err(e.into());
        }
        Ok(())
    }

    fn draw_page(&self, layer: &PdfLayerReference, page: &PageLayout, fonts: &Fonts) {
        for op in &page.texts {
            let font = match op.face {
                Face::Regular => &fonts.regular,
                Face::Bold => &fonts.bold,
            };
            layer.set_fill_color(ink_color(op.ink));
            layer.use_text(
                op.text.clone(),
                op.size,
                Mm(op.x),
                // printpdf measures from the bottom-left corner.
                Mm(self.options.page_height - op.baseline),
                font,
            );
        }

        for rule in &page.rules {
            let y = Mm(self.options.page_height - rule.y);
            layer.set_outline_color(rgb(200, 200, 200));
            layer.set_outline_thickness(0.2);
            layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(rule.x0), y), false),
                    (Point::new(Mm(rule.x1), y), false),
                ],
                is_closed: false,
            });
        }
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

fn ink_color(ink: Ink) -> Color {
    match ink {
        Ink::Heading => rgb(33, 33, 33),
        Ink::Muted => rgb(100, 100, 100),
        Ink::Accent => rgb(52, 152, 219),
        Ink::Body => rgb(20, 20, 20),
    }
}

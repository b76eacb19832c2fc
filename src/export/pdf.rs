//! Styled PDF output via `printpdf`.
//!
//! Text is set in embedded DejaVu Sans so Cyrillic and symbols such as the
//! replacement arrow survive; the PDF base-14 fonts only cover WinAnsi.

use std::ops::Range;

use chrono::Local;
use printpdf::path::PaintMode;
use printpdf::{
    Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point, Rect, Rgb,
};
use tracing::warn;

use super::renderer::{DocumentRenderer, ExportDocument};
use crate::errors::SynapseError;

// US Letter
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 25.4;

const TITLE_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 10.0;
const TABLE_HEADER_SIZE: f32 = 12.0;

const REGULAR_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const BOLD_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

const PT_TO_MM: f32 = 0.3528;
// Average DejaVu Sans glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.55;
const LINE_SPACING: f32 = 1.3;

const COLUMN_WIDTH: f32 = 50.8;
const COLUMNS: usize = 3;
const CELL_PADDING: f32 = 1.5;

fn accent() -> Color {
    // #0EA5E9
    Color::Rgb(Rgb::new(14.0 / 255.0, 165.0 / 255.0, 233.0 / 255.0, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn white() -> Color {
    Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None))
}

fn beige() -> Color {
    // #F5F5DC
    Color::Rgb(Rgb::new(245.0 / 255.0, 245.0 / 255.0, 220.0 / 255.0, None))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRenderer;

impl PdfRenderer {
    /// Renders a throwaway document once so a broken PDF backend is caught
    /// at startup instead of on a user request.
    #[must_use]
    pub fn probe() -> Option<Self> {
        let renderer = Self;
        let doc = ExportDocument::new("probe", &[], Local::now().naive_local());
        match renderer.render(&doc) {
            Ok(_) => Some(renderer),
            Err(e) => {
                warn!("PDF renderer unavailable, falling back to plain text: {}", e);
                None
            }
        }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn name(&self) -> &'static str {
        "printpdf"
    }

    fn render(&self, doc: &ExportDocument<'_>) -> Result<Vec<u8>, SynapseError> {
        let mut writer = PageWriter::new(doc.title)?;

        writer.write_line(doc.title, TITLE_SIZE, true, accent());
        writer.space(8.0);

        writer.write_line("Main Text", HEADING_SIZE, true, black());
        writer.space(2.5);

        for para in doc.paragraphs() {
            writer.write_wrapped(para, BODY_SIZE, PAGE_WIDTH - 2.0 * MARGIN);
            writer.space(2.5);
        }

        if !doc.replacements.is_empty() {
            writer.space(7.5);
            writer.write_line("Replacement History", HEADING_SIZE, true, black());
            writer.space(2.5);

            writer.table_row(["Original", "Replacement", "Timestamp"], true);
            for rep in doc.replacements {
                writer.table_row(
                    [
                        rep.original.as_str(),
                        rep.replacement.as_str(),
                        rep.timestamp.as_str(),
                    ],
                    false,
                );
            }
        }

        writer
            .doc
            .save_to_bytes()
            .map_err(|e| SynapseError::RenderError(format!("PDF serialisation failed: {e}")))
    }
}

/// Top-down cursor over a growing sequence of pages.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, SynapseError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_external_font(REGULAR_TTF)
            .map_err(|e| SynapseError::RenderError(format!("DejaVu Sans unavailable: {e}")))?;
        let bold = doc
            .add_external_font(BOLD_TTF)
            .map_err(|e| SynapseError::RenderError(format!("DejaVu Sans Bold unavailable: {e}")))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
        })
    }

    fn line_height(size: f32) -> f32 {
        size * PT_TO_MM * LINE_SPACING
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            self.new_page();
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn space(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn write_line(&mut self, text: &str, size: f32, bold: bool, color: Color) {
        let height = Self::line_height(size);
        self.ensure_room(height);
        self.y -= height;
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.set_fill_color(color);
        self.layer.use_text(text, size, Mm(MARGIN), Mm(self.y), font);
    }

    fn write_wrapped(&mut self, text: &str, size: f32, width: f32) {
        for line in wrap(text, chars_per_line(size, width)) {
            self.write_line(&line, size, false, black());
        }
    }

    /// Draws one table row. A row taller than the space left is carried
    /// over to following pages, each slice with its own cell borders.
    fn table_row(&mut self, cells: [&str; COLUMNS], header: bool) {
        let size = if header { TABLE_HEADER_SIZE } else { BODY_SIZE };
        let per_line = chars_per_line(size, COLUMN_WIDTH - 2.0 * CELL_PADDING);
        let wrapped: Vec<Vec<String>> = cells.iter().map(|c| wrap(c, per_line)).collect();
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let line_height = Self::line_height(size);

        let (font, background, ink) = if header {
            (self.bold.clone(), accent(), white())
        } else {
            (self.regular.clone(), beige(), black())
        };

        for slice in plan_row(lines, line_height, self.y) {
            if slice.new_page {
                self.new_page();
            }
            let top = self.y;
            let bottom = top - slice.lines.len() as f32 * line_height - 2.0 * CELL_PADDING;

            self.layer.set_fill_color(background.clone());
            self.layer.add_rect(
                Rect::new(Mm(MARGIN), Mm(bottom), Mm(table_right()), Mm(top))
                    .with_mode(PaintMode::Fill),
            );

            self.layer.set_fill_color(ink.clone());
            for (col, cell_lines) in wrapped.iter().enumerate() {
                let x = MARGIN + col as f32 * COLUMN_WIDTH + CELL_PADDING;
                let shown = cell_lines
                    .iter()
                    .enumerate()
                    .skip(slice.lines.start)
                    .take(slice.lines.len());
                for (i, line) in shown {
                    let row = (i - slice.lines.start) as f32 + 1.0;
                    let y = top - CELL_PADDING - row * line_height;
                    self.layer.use_text(line.as_str(), size, Mm(x), Mm(y), &font);
                }
            }

            self.grid(top, bottom, header);
            self.y = bottom;
        }
    }

    fn grid(&self, top: f32, bottom: f32, header: bool) {
        let right = table_right();
        self.layer.set_outline_color(black());
        self.layer.set_outline_thickness(if header { 1.0 } else { 0.5 });

        let mut segments = vec![((MARGIN, top), (right, top)), ((MARGIN, bottom), (right, bottom))];
        for col in 0..=COLUMNS {
            let x = MARGIN + col as f32 * COLUMN_WIDTH;
            segments.push(((x, top), (x, bottom)));
        }

        for ((x1, y1), (x2, y2)) in segments {
            self.layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(x1), Mm(y1)), false),
                    (Point::new(Mm(x2), Mm(y2)), false),
                ],
                is_closed: false,
            });
        }
    }
}

fn table_right() -> f32 {
    MARGIN + COLUMNS as f32 * COLUMN_WIDTH
}

/// Lines of one table row that go on the same page.
#[derive(Debug, Clone, PartialEq)]
struct RowSlice {
    lines: Range<usize>,
    new_page: bool,
}

/// Lays out a row of `lines` text lines whose top edge starts at `top`.
///
/// A row that fits on a fresh page is never split; it moves to the next
/// page whole. Longer rows fill the current page and continue on new ones.
fn plan_row(lines: usize, line_height: f32, top: f32) -> Vec<RowSlice> {
    let capacity = |y: f32| {
        let room = y - MARGIN - 2.0 * CELL_PADDING;
        if room < line_height {
            0
        } else {
            (room / line_height).floor() as usize
        }
    };
    let fresh = capacity(PAGE_HEIGHT - MARGIN).max(1);

    let mut slices = Vec::new();
    let mut y = top;
    let mut start = 0;
    while start < lines {
        let mut room = capacity(y);
        let remaining = lines - start;
        let new_page = room == 0 || (start == 0 && remaining <= fresh && remaining > room);
        if new_page {
            room = fresh;
            y = PAGE_HEIGHT - MARGIN;
        }
        let count = room.min(remaining);
        slices.push(RowSlice {
            lines: start..start + count,
            new_page,
        });
        y -= count as f32 * line_height + 2.0 * CELL_PADDING;
        start += count;
    }
    slices
}

fn chars_per_line(size: f32, width: f32) -> usize {
    let glyph = size * PT_TO_MM * AVG_GLYPH_WIDTH;
    ((width / glyph).floor() as usize).max(1)
}

/// Greedy word wrap on character counts; overlong words are split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

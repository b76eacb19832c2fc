//! Word documents via `docx-rs`.

use std::io::Cursor;

use anyhow::anyhow;
use chrono::Local;
use docx_rs::{
    AlignmentType, BreakType, Docx, Paragraph, Run, Shading, ShdType, Style, StyleType, Table,
    TableCell, TableRow,
};
use tracing::warn;

use super::renderer::{DocumentRenderer, ExportDocument};
use crate::errors::SynapseError;

// Sizes are in half-points.
const TITLE_SIZE: usize = 52;
const HEADING_SIZE: usize = 32;
const ACCENT: &str = "0EA5E9";
const HEADER_TEXT: &str = "FFFFFF";
const BODY_FILL: &str = "F5F5DC";

const TITLE_STYLE: &str = "Title";
const HEADING_STYLE: &str = "Heading1";

#[derive(Debug, Default, Clone, Copy)]
pub struct DocxRenderer;

impl DocxRenderer {
    /// Packs a throwaway document once so a broken backend is caught at startup.
    #[must_use]
    pub fn probe() -> Option<Self> {
        let renderer = Self;
        let doc = ExportDocument::new("probe", &[], Local::now().naive_local());
        match renderer.render(&doc) {
            Ok(_) => Some(renderer),
            Err(e) => {
                warn!("DOCX renderer unavailable, falling back to plain text: {}", e);
                None
            }
        }
    }
}

fn styles(docx: Docx) -> Docx {
    docx.add_style(
        Style::new(TITLE_STYLE, StyleType::Paragraph)
            .name("Title")
            .bold()
            .size(TITLE_SIZE)
            .color(ACCENT)
            .align(AlignmentType::Center),
    )
    .add_style(
        Style::new(HEADING_STYLE, StyleType::Paragraph)
            .name("Heading 1")
            .bold()
            .size(HEADING_SIZE)
            .outline_lvl(0),
    )
}

fn heading(text: &str) -> Paragraph {
    Paragraph::new()
        .style(HEADING_STYLE)
        .add_run(Run::new().add_text(text))
}

fn cell(text: &str, header: bool) -> TableCell {
    let run = Run::new().add_text(text);
    let (run, fill) = if header {
        (run.bold().color(HEADER_TEXT), ACCENT)
    } else {
        (run, BODY_FILL)
    };
    TableCell::new()
        .shading(Shading::new().shd_type(ShdType::Clear).fill(fill))
        .add_paragraph(Paragraph::new().add_run(run))
}

fn row(cells: [&str; 3], header: bool) -> TableRow {
    TableRow::new(cells.iter().map(|c| cell(c, header)).collect())
}

impl DocumentRenderer for DocxRenderer {
    fn name(&self) -> &'static str {
        "docx-rs"
    }

    fn render(&self, doc: &ExportDocument<'_>) -> Result<Vec<u8>, SynapseError> {
        let mut buffer = Cursor::new(Vec::new());
        compose(doc)
            .build()
            .pack(&mut buffer)
            .map_err(|e| anyhow!("DOCX packaging failed: {e}"))?;
        Ok(buffer.into_inner())
    }
}

fn compose(doc: &ExportDocument<'_>) -> Docx {
    let title = Paragraph::new()
        .style(TITLE_STYLE)
        .add_run(Run::new().add_text(doc.title));

    let mut docx = styles(Docx::new())
        .add_paragraph(title)
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(doc.generated_label())))
        .add_paragraph(Paragraph::new())
        .add_paragraph(heading("Main Text"));

    for para in doc.paragraphs() {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(para)));
    }

    if !doc.replacements.is_empty() {
        docx = docx
            .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
            .add_paragraph(heading("Replacement History"));

        let mut rows = vec![row(["Original", "Replacement", "Timestamp"], true)];
        rows.extend(doc.replacements.iter().map(|rep| {
            row(
                [
                    rep.original.as_str(),
                    rep.replacement.as_str(),
                    rep.timestamp.as_str(),
                ],
                false,
            )
        }));
        docx = docx.add_table(Table::new(rows));
    }

    docx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Replacement;
    use chrono::NaiveDate;

    fn at() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .and_then(|d| d.and_hms_opt(7, 8, 9))
            .unwrap()
    }

    #[test]
    fn renders_zip_container() {
        let doc = ExportDocument::new("Hello", &[], at());
        let bytes = DocxRenderer.render(&doc).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    fn document_xml(doc: &ExportDocument<'_>) -> String {
        String::from_utf8(compose(doc).build().document).unwrap()
    }

    #[test]
    fn title_and_headings_use_paragraph_styles() {
        let reps = vec![Replacement {
            original: "happy".into(),
            replacement: "joyful".into(),
            timestamp: "t".into(),
        }];
        let xml = document_xml(&ExportDocument::new("A happy day", &reps, at()));
        assert_eq!(xml.matches(r#"<w:pStyle w:val="Title" />"#).count(), 1);
        assert_eq!(xml.matches(r#"<w:pStyle w:val="Heading1" />"#).count(), 2);

        let styles = String::from_utf8(
            compose(&ExportDocument::new("x", &[], at())).build().styles,
        )
        .unwrap();
        assert!(styles.contains(r#"w:styleId="Heading1""#));
        assert!(styles.contains(r#"w:styleId="Title""#));
    }

    #[test]
    fn table_cells_are_shaded() {
        let reps = vec![Replacement {
            original: "happy".into(),
            replacement: "joyful".into(),
            timestamp: "t".into(),
        }];
        let xml = document_xml(&ExportDocument::new("A happy day", &reps, at()));
        assert_eq!(xml.matches(r#"w:fill="0EA5E9""#).count(), 3);
        assert_eq!(xml.matches(r#"w:fill="F5F5DC""#).count(), 3);
    }

    #[test]
    fn replacement_table_adds_bytes() {
        let reps = vec![
            Replacement {
                original: "happy".into(),
                replacement: "joyful".into(),
                timestamp: "2024-05-06 07:08:09".into(),
            },
            Replacement {
                original: "sad".into(),
                replacement: "gloomy".into(),
                timestamp: "2024-05-06 07:09:10".into(),
            },
        ];
        let without = DocxRenderer
            .render(&ExportDocument::new("A happy day", &[], at()))
            .unwrap();
        let with = DocxRenderer
            .render(&ExportDocument::new("A happy day", &reps, at()))
            .unwrap();
        assert!(with.len() > without.len());
    }
}

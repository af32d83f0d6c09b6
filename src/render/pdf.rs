//! PDF rendering of period reports.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::error::EngineResult;
use crate::models::PeriodReport;

use super::ReportRenderer;
use super::table::{NO_RECORDS_NOTICE, ReportTable};

// A4 landscape, in points
const PAGE_W: f32 = 842.0;
const PAGE_H: f32 = 595.0;
const MARGIN: f32 = 42.0;
const ROW_H: f32 = 18.0;
const LINE_H: f32 = 15.0;

const TITLE_SIZE: f32 = 14.0;
const HEADER_SIZE: f32 = 11.0;
const TABLE_HEADER_SIZE: f32 = 9.0;
const BODY_SIZE: f32 = 8.0;

const FONT: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

/// Renders a [`PeriodReport`] as an A4 landscape PDF.
///
/// The first page carries the employee header block. The day table repeats
/// its heading row on every page, and the record-count footer follows the
/// last row. An empty period prints a notice instead of the table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl ReportRenderer for PdfRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn render(&self, report: &PeriodReport) -> EngineResult<Vec<u8>> {
        let table = ReportTable::from_report(report);
        let mut doc = PdfDocument::new();
        doc.write_report(&table, report.is_empty());
        Ok(doc.finish())
    }
}

struct PdfDocument {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    bold_id: Ref,
    page_refs: Vec<Ref>,
    next_id: i32,
}

impl PdfDocument {
    fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_id = Ref::new(4);

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            bold_id,
            page_refs: Vec::new(),
            next_id: 5,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn write_page(&mut self, content: Content) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
                .contents(content_id);
            page.resources()
                .fonts()
                .pair(FONT, self.font_id)
                .pair(BOLD, self.bold_id);
        }

        self.pdf.stream(content_id, &content.finish());
    }

    fn write_report(&mut self, table: &ReportTable, empty: bool) {
        let mut content = Content::new();
        let mut y = PAGE_H - MARGIN;

        draw_text(&mut content, BOLD, TITLE_SIZE, MARGIN, y, &table.title);
        y -= LINE_H * 1.5;
        for line in &table.header_lines {
            draw_text(&mut content, FONT, HEADER_SIZE, MARGIN, y, line);
            y -= LINE_H;
        }
        y -= LINE_H;

        if empty {
            draw_text(&mut content, BOLD, HEADER_SIZE, MARGIN, y, NO_RECORDS_NOTICE);
            self.write_page(content);
            return;
        }

        let widths = column_widths(table.columns.len());
        y = draw_heading_row(&mut content, &widths, &table.columns, y);

        for (i, row) in table.rows.iter().enumerate() {
            if y - ROW_H < MARGIN {
                self.write_page(content);
                content = Content::new();
                y = draw_heading_row(&mut content, &widths, &table.columns, PAGE_H - MARGIN);
            }
            if i % 2 == 1 {
                fill_rect(&mut content, MARGIN, y - ROW_H, widths.iter().sum(), ROW_H, 0.94);
            }
            draw_row(&mut content, &widths, row, y, FONT, BODY_SIZE);
            y -= ROW_H;
        }

        if y - LINE_H * 2.0 < MARGIN {
            self.write_page(content);
            content = Content::new();
            y = PAGE_H - MARGIN;
        }
        draw_text(&mut content, BOLD, HEADER_SIZE, MARGIN, y - LINE_H, &table.footer);
        self.write_page(content);
    }

    fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let count = self.page_refs.len() as i32;
        self.pdf
            .pages(self.pages_id)
            .kids(self.page_refs.iter().copied())
            .count(count);
        self.pdf.finish()
    }
}

/// Date column wider than the rest; all columns together fill the page width.
fn column_widths(columns: usize) -> Vec<f32> {
    let available = PAGE_W - 2.0 * MARGIN;
    let date_w = 62.0;
    let rest = columns.saturating_sub(1).max(1) as f32;
    let other_w = (available - date_w) / rest;

    let mut widths = vec![other_w; columns];
    if let Some(first) = widths.first_mut() {
        *first = date_w;
    }
    widths
}

fn draw_heading_row(content: &mut Content, widths: &[f32], columns: &[String], y: f32) -> f32 {
    fill_rect(content, MARGIN, y - ROW_H, widths.iter().sum(), ROW_H, 0.80);
    draw_row(content, widths, columns, y, BOLD, TABLE_HEADER_SIZE);
    y - ROW_H
}

fn draw_row(content: &mut Content, widths: &[f32], cells: &[String], top: f32, font: Name, size: f32) {
    let mut x = MARGIN;
    for (cell, w) in cells.iter().zip(widths) {
        draw_text(content, font, size, x + 3.0, top - ROW_H + 5.0, cell);

        content.save_state();
        content.set_stroke_gray(0.6);
        content.rect(x, top - ROW_H, *w, ROW_H);
        content.stroke();
        content.restore_state();

        x += w;
    }
}

fn fill_rect(content: &mut Content, x: f32, y: f32, w: f32, h: f32, gray: f32) {
    content.save_state();
    content.set_fill_gray(gray);
    content.rect(x, y, w, h);
    content.fill_nonzero();
    content.restore_state();
}

fn draw_text(content: &mut Content, font: Name, size: f32, x: f32, y: f32, text: &str) {
    let encoded = win_ansi(text);
    content.begin_text();
    content.set_font(font, size);
    content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
    content.show(Str(&encoded));
    content.end_text();
}

/// Maps text onto single-byte WinAnsi codes; characters outside Latin-1 become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::ReportEngine;
    use crate::models::{Employee, PunchEvent, PunchType};
    use chrono::{DateTime, Duration, NaiveDate};

    fn employee() -> Employee {
        Employee {
            id: 1,
            username: "jsouza".to_string(),
            full_name: Some("João Souza".to_string()),
            cpf: None,
            role: Some("Operator".to_string()),
        }
    }

    fn report(events: &[PunchEvent]) -> PeriodReport {
        ReportEngine::default().build_report_at(
            &employee(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            events,
            DateTime::parse_from_rfc3339("2025-04-01T09:00:00-04:00").unwrap(),
        )
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_empty_report_renders_notice() {
        let bytes = PdfRenderer.render(&report(&[])).unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, NO_RECORDS_NOTICE.as_bytes()));
        assert!(!contains(&bytes, b"Total records in period"));
    }

    #[test]
    fn test_report_with_rows_renders_table_and_footer() {
        let start = DateTime::parse_from_rfc3339("2025-03-10T08:00:00-04:00").unwrap();
        let events = vec![
            PunchEvent { id: 1, employee_id: 1, punch_type: PunchType::Entry, timestamp: start },
            PunchEvent {
                id: 2,
                employee_id: 1,
                punch_type: PunchType::Exit,
                timestamp: start + Duration::hours(9),
            },
        ];

        let bytes = PdfRenderer.render(&report(&events)).unwrap();

        assert!(contains(&bytes, b"10/03/2025"));
        assert!(contains(&bytes, b"+1:00"));
        assert!(contains(&bytes, b"Total records in period: 2"));
    }

    #[test]
    fn test_win_ansi_keeps_latin1_and_replaces_the_rest() {
        assert_eq!(win_ansi("João"), vec![b'J', b'o', 0xE3, b'o']);
        assert_eq!(win_ansi("a→b"), b"a?b".to_vec());
    }

    #[test]
    fn test_long_period_spans_multiple_pages() {
        let start = DateTime::parse_from_rfc3339("2025-01-01T08:00:00-04:00").unwrap();
        let events: Vec<PunchEvent> = (0..90)
            .flat_map(|day| {
                let entry = start + Duration::days(day);
                [
                    PunchEvent { id: (day * 2) as u64, employee_id: 1, punch_type: PunchType::Entry, timestamp: entry },
                    PunchEvent {
                        id: (day * 2 + 1) as u64,
                        employee_id: 1,
                        punch_type: PunchType::Exit,
                        timestamp: entry + Duration::hours(8),
                    },
                ]
            })
            .collect();

        let report = report(&events);
        let table = ReportTable::from_report(&report);
        let mut doc = PdfDocument::new();
        doc.write_report(&table, report.is_empty());

        assert!(doc.page_refs.len() > 1);
        let bytes = doc.finish();
        assert!(contains(&bytes, b"Total records in period: 180"));
    }

    #[test]
    fn test_column_widths_fill_page() {
        let widths = column_widths(11);
        let total: f32 = widths.iter().sum();
        assert!((total - (PAGE_W - 2.0 * MARGIN)).abs() < 0.01);
        assert_eq!(widths[0], 62.0);
    }
}

//! Page layout for the exported quote.
//!
//! Positions are in millimetres from the bottom-left corner of an A4 page,
//! which is what the PDF renderer expects.

use serde::Serialize;

use super::export_model::QuoteDocument;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

const MARGIN_LEFT: f32 = 20.0;
const TOP_Y: f32 = 277.0;
/// Lowest baseline content may use; below it sits the footer.
const CONTENT_BOTTOM_Y: f32 = 25.0;
const FOOTER_Y: f32 = 12.0;
const ROW_HEIGHT: f32 = 7.0;
const BLOCK_GAP: f32 = 5.0;
const COLUMN_X: [f32; 5] = [20.0, 98.0, 128.0, 143.0, 172.0];
const MAX_SERVICE_CHARS: usize = 42;
const MAX_NOTES_CHARS: usize = 95;

pub const TITLE_SIZE: f32 = 16.0;
pub const TEXT_SIZE: f32 = 10.0;
pub const FOOTER_SIZE: f32 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextItem {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub size: f32,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub number: usize,
    pub items: Vec<TextItem>,
}

impl PageLayout {
    fn new(number: usize) -> Self {
        Self {
            number,
            items: Vec::new(),
        }
    }

    fn text(&mut self, text: impl Into<String>, x_mm: f32, y_mm: f32, size: f32, bold: bool) {
        self.items.push(TextItem {
            text: text.into(),
            x_mm,
            y_mm,
            size,
            bold,
        });
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.items.iter().any(|item| item.text == needle)
    }
}

struct PageCursor {
    pages: Vec<PageLayout>,
    y: f32,
}

impl PageCursor {
    fn new() -> Self {
        Self {
            pages: vec![PageLayout::new(1)],
            y: TOP_Y,
        }
    }

    fn page(&mut self) -> &mut PageLayout {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn fits(&self, height: f32) -> bool {
        self.y - height >= CONTENT_BOTTOM_Y
    }

    fn new_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(PageLayout::new(number));
        self.y = TOP_Y;
    }

    fn table_header(&mut self, header: &[String; 5]) {
        let y = self.y;
        for (cell, x) in header.iter().zip(COLUMN_X) {
            self.page().text(cell.clone(), x, y, TEXT_SIZE, true);
        }
        self.y -= ROW_HEIGHT;
    }
}

/// Lays the document out on as many A4 pages as it needs.
///
/// The table header is repeated on every page that carries rows, the totals
/// block is never split, and each page ends with a `Página n de N` footer.
pub fn paginate(document: &QuoteDocument) -> Vec<PageLayout> {
    let mut cursor = PageCursor::new();

    cursor
        .page()
        .text(document.title.clone(), MARGIN_LEFT, TOP_Y, TITLE_SIZE, true);
    cursor.y -= ROW_HEIGHT + 3.0;
    let y = cursor.y;
    cursor
        .page()
        .text(document.date_line.clone(), MARGIN_LEFT, y, TEXT_SIZE, false);
    cursor
        .page()
        .text(document.reference_line.clone(), 140.0, y, TEXT_SIZE, false);
    cursor.y -= ROW_HEIGHT;
    let y = cursor.y;
    cursor
        .page()
        .text(document.patient_line.clone(), MARGIN_LEFT, y, TEXT_SIZE, true);
    cursor.y -= ROW_HEIGHT;
    if let Some(notes) = &document.notes_line {
        for line in wrap(notes, MAX_NOTES_CHARS) {
            if !cursor.fits(ROW_HEIGHT) {
                cursor.new_page();
            }
            let y = cursor.y;
            cursor.page().text(line, MARGIN_LEFT, y, TEXT_SIZE, false);
            cursor.y -= ROW_HEIGHT;
        }
    }
    cursor.y -= BLOCK_GAP;

    if !cursor.fits(ROW_HEIGHT * 2.0) {
        cursor.new_page();
    }
    cursor.table_header(&document.table_header);
    for row in &document.rows {
        if !cursor.fits(ROW_HEIGHT) {
            cursor.new_page();
            cursor.table_header(&document.table_header);
        }
        let y = cursor.y;
        for (index, (cell, x)) in row.cells.iter().zip(COLUMN_X).enumerate() {
            let text = if index == 0 {
                truncate(cell, MAX_SERVICE_CHARS)
            } else {
                cell.clone()
            };
            cursor.page().text(text, x, y, TEXT_SIZE, false);
        }
        cursor.y -= ROW_HEIGHT;
    }

    let totals_height = BLOCK_GAP + ROW_HEIGHT * (document.totals.len() as f32 + 1.0);
    if !cursor.fits(totals_height) {
        cursor.new_page();
    }
    cursor.y -= BLOCK_GAP;
    for line in &document.totals {
        let y = cursor.y;
        let page = cursor.page();
        page.text(line.label.clone(), COLUMN_X[1], y, TEXT_SIZE, line.emphasized);
        page.text(line.value.clone(), COLUMN_X[3], y, TEXT_SIZE, line.emphasized);
        page.text(line.secondary.clone(), COLUMN_X[4], y, TEXT_SIZE, line.emphasized);
        cursor.y -= ROW_HEIGHT;
    }
    let y = cursor.y;
    cursor
        .page()
        .text(document.rate_line.clone(), MARGIN_LEFT, y, TEXT_SIZE, false);

    let total_pages = cursor.pages.len();
    for page in cursor.pages.iter_mut() {
        let footer = format!("Página {} de {}", page.number, total_pages);
        page.text(footer, 95.0, FOOTER_Y, FOOTER_SIZE, false);
    }
    cursor.pages
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
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
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::export_model::{DocumentRow, TotalLine, TABLE_HEADER};

    fn document(rows: usize) -> QuoteDocument {
        QuoteDocument {
            title: "Cotización de Servicios Dentales".to_string(),
            date_line: "Fecha: 05/03/2024".to_string(),
            reference_line: "Ref: a1b2c3d4".to_string(),
            patient_line: "Paciente: Ana".to_string(),
            notes_line: None,
            table_header: TABLE_HEADER.map(str::to_string),
            rows: (0..rows)
                .map(|i| DocumentRow {
                    cells: [
                        format!("Servicio {}", i),
                        "$ 1.000".to_string(),
                        "1".to_string(),
                        "$ 1.000".to_string(),
                        "$0.29".to_string(),
                    ],
                })
                .collect(),
            totals: vec![
                TotalLine {
                    label: "Total egresos".to_string(),
                    value: "$ 1.000".to_string(),
                    secondary: "$0.29".to_string(),
                    emphasized: false,
                },
                TotalLine {
                    label: "Total Cotización".to_string(),
                    value: "$ 1.000".to_string(),
                    secondary: "$0.29".to_string(),
                    emphasized: true,
                },
            ],
            rate_line: "Tipo de cambio: 1 USD = $ 3.500 COP".to_string(),
        }
    }

    #[test]
    fn test_short_quote_fits_one_page() {
        let pages = paginate(&document(3));
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains_text("Página 1 de 1"));
        assert!(pages[0].contains_text("Total Cotización"));
    }

    #[test]
    fn test_long_quote_repeats_header_and_numbers_pages() {
        let pages = paginate(&document(80));
        assert!(pages.len() >= 3);
        let total = pages.len();
        for page in &pages {
            assert!(page.contains_text(&format!("Página {} de {}", page.number, total)));
            assert!(page.items.iter().all(|item| item.y_mm >= FOOTER_Y));
        }
        let is_row =
            |item: &TextItem| item.text.starts_with("Servicio ") && item.x_mm == COLUMN_X[0];
        for page in pages.iter().filter(|page| page.items.iter().any(is_row)) {
            assert!(page.contains_text("Servicio"), "page {} lost its header", page.number);
        }

        let rows: usize = pages
            .iter()
            .flat_map(|page| page.items.iter())
            .filter(|item| is_row(item))
            .count();
        assert_eq!(rows, 80);
        assert!(pages.last().unwrap().contains_text("Total Cotización"));
    }

    #[test]
    fn test_totals_block_is_not_split() {
        for rows in 25..40 {
            let pages = paginate(&document(rows));
            let holding: Vec<usize> = pages
                .iter()
                .filter(|page| {
                    page.contains_text("Total egresos")
                        || page.contains_text("Total Cotización")
                        || page.items.iter().any(|item| item.text.starts_with("Tipo de cambio"))
                })
                .map(|page| page.number)
                .collect();
            assert_eq!(holding.len(), 1, "totals split with {} rows", rows);
        }
    }

    #[test]
    fn test_long_notes_flow_onto_next_pages() {
        let mut doc = document(5);
        doc.notes_line = Some(format!("Notas: {}", vec!["sensibilidad"; 3000].join(" ")));
        let pages = paginate(&doc);
        assert!(pages.len() > 2);
        for page in &pages {
            assert!(page
                .items
                .iter()
                .all(|item| item.y_mm >= FOOTER_Y && item.y_mm <= TOP_Y));
        }
        let header_pages: Vec<usize> = pages
            .iter()
            .filter(|page| page.contains_text("Servicio"))
            .map(|page| page.number)
            .collect();
        assert_eq!(header_pages.len(), 1);
        assert!(header_pages[0] > 2);
        assert!(pages.last().unwrap().contains_text("Total Cotización"));
    }

    #[test]
    fn test_long_names_are_truncated() {
        let long = "Rehabilitación oral completa con implantes y prótesis fija superior";
        let cut = truncate(long, MAX_SERVICE_CHARS);
        assert!(cut.chars().count() <= MAX_SERVICE_CHARS);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate("Corona", MAX_SERVICE_CHARS), "Corona");
    }

    #[test]
    fn test_wrap_keeps_words() {
        let lines = wrap("uno dos tres cuatro", 9);
        assert_eq!(lines, vec!["uno dos", "tres", "cuatro"]);
    }
}

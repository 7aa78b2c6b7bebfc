use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::BufWriter;

use super::layout::{PageLayout, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::{Error, Result};

/// Renders laid-out pages into PDF bytes with the built-in Helvetica fonts.
pub fn render_pdf(pages: &[PageLayout], title: &str) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| Error::Export(format!("PDF font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| Error::Export(format!("PDF font error: {e}")))?;

    for (index, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1")
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);
        for item in &page.items {
            let face = if item.bold { &bold } else { &font };
            layer.use_text(item.text.as_str(), item.size, Mm(item.x_mm), Mm(item.y_mm), face);
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| Error::Export(format!("PDF save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| Error::Export(format!("PDF buffer error: {e}")))
}

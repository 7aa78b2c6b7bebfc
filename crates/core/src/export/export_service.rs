use chrono::{DateTime, Utc};
use log::{debug, info};

use super::export_model::{ExportedDocument, QuoteDocument};
use super::file_name::export_file_name;
use super::layout::paginate;
use super::pdf_renderer::render_pdf;
use crate::quotes::{QuoteDetailView, QuoteWithItems};
use crate::Result;

/// Turns a stored quote into one PDF document.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteExporter;

impl QuoteExporter {
    pub fn new() -> Self {
        Self
    }

    /// The document model for a quote, built from its detail view.
    pub fn document_for(&self, quote: &QuoteWithItems) -> QuoteDocument {
        QuoteDocument::from_view(&QuoteDetailView::from_quote(quote))
    }

    pub fn export(
        &self,
        quote: &QuoteWithItems,
        exported_at: DateTime<Utc>,
    ) -> Result<ExportedDocument> {
        let document = self.document_for(quote);
        let pages = paginate(&document);
        debug!(
            "Rendering quote {} on {} page(s)",
            quote.quote.id,
            pages.len()
        );
        let bytes = render_pdf(&pages, &document.title)?;
        let exported = ExportedDocument {
            file_name: export_file_name(&quote.quote.patient_name, exported_at),
            bytes,
            page_count: pages.len(),
        };
        info!(
            "Exported quote {} as {}",
            quote.quote.id, exported.file_name
        );
        Ok(exported)
    }
}

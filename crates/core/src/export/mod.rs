//! Export module - renders a stored quote into a PDF document whose numbers
//! match the on-screen detail view.

mod export_model;
mod export_service;
mod file_name;
mod layout;
mod pdf_renderer;

pub use export_model::{
    DocumentRow, ExportedDocument, QuoteDocument, TotalLine, DOCUMENT_TITLE, TABLE_HEADER,
};
pub use export_service::QuoteExporter;
pub use file_name::export_file_name;
pub use layout::{paginate, PageLayout, TextItem, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
pub use pdf_renderer::render_pdf;

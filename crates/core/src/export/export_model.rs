use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::currency::MoneyView;
use crate::quotes::QuoteDetailView;
use crate::Result;

pub const DOCUMENT_TITLE: &str = "Cotización de Servicios Dentales";

pub const TABLE_HEADER: [&str; 5] = [
    "Servicio",
    "Precio Unit.",
    "Cant.",
    "Subtotal (COP)",
    "Subtotal (USD)",
];

/// One row of the services table, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRow {
    pub cells: [String; 5],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalLine {
    pub label: String,
    /// Base currency amount.
    pub value: String,
    /// The same amount in the secondary currency at the quote's rate.
    pub secondary: String,
    pub emphasized: bool,
}

impl TotalLine {
    fn new(label: &str, money: &MoneyView, emphasized: bool) -> Self {
        Self {
            label: label.to_string(),
            value: money.base_display.clone(),
            secondary: money.secondary_display.clone(),
            emphasized,
        }
    }
}

/// The exported document before layout.
///
/// Every amount is a string copied from [`QuoteDetailView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDocument {
    pub title: String,
    pub date_line: String,
    pub reference_line: String,
    pub patient_line: String,
    pub notes_line: Option<String>,
    pub table_header: [String; 5],
    pub rows: Vec<DocumentRow>,
    pub totals: Vec<TotalLine>,
    pub rate_line: String,
}

impl QuoteDocument {
    pub fn from_view(view: &QuoteDetailView) -> Self {
        let rows = view
            .lines
            .iter()
            .map(|line| DocumentRow {
                cells: [
                    line.name.clone(),
                    line.unit_price.base_display.clone(),
                    line.quantity.to_string(),
                    line.subtotal.base_display.clone(),
                    line.subtotal.secondary_display.clone(),
                ],
            })
            .collect();

        let mut totals = vec![TotalLine::new("Total egresos", &view.expenses_total, false)];
        if let Some(profit) = &view.operational_profit {
            totals.push(TotalLine::new("Ganancia operacional", profit, false));
        }
        totals.push(TotalLine::new("Total Cotización", &view.grand_total, true));

        Self {
            title: DOCUMENT_TITLE.to_string(),
            date_line: format!("Fecha: {}", view.date),
            reference_line: format!("Ref: {}", view.short_id()),
            patient_line: format!("Paciente: {}", view.patient_name),
            notes_line: view.notes.as_ref().map(|notes| format!("Notas: {}", notes)),
            table_header: TABLE_HEADER.map(str::to_string),
            rows,
            totals,
            rate_line: format!("Tipo de cambio: {}", view.exchange_rate_display),
        }
    }

    /// Looks up a totals row by label.
    pub fn total_value(&self, label: &str) -> Option<&str> {
        self.totals
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }

    /// Secondary currency amount of a totals row.
    pub fn total_secondary(&self, label: &str) -> Option<&str> {
        self.totals
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.secondary.as_str())
    }
}

/// A rendered document ready to be saved or sent.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

impl ExportedDocument {
    /// Writes the document into `dir` under its file name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

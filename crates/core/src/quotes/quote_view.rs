use rust_decimal::Decimal;
use serde::Serialize;

use super::quotes_model::QuoteWithItems;
use crate::currency::{format_base, MoneyView};

/// Date shown on the detail view and the exported document.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// One line of the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLineView {
    pub name: String,
    pub category: String,
    pub unit_price: MoneyView,
    pub quantity: i64,
    pub subtotal: MoneyView,
}

/// Everything the quote detail screen displays, already rounded and
/// formatted.
///
/// The exported document is built from this view, which is what keeps the
/// two in agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDetailView {
    pub quote_id: String,
    pub patient_name: String,
    pub date: String,
    pub notes: Option<String>,
    pub lines: Vec<QuoteLineView>,
    pub expenses_total: MoneyView,
    /// Absent when the quote carries no operational profit.
    pub operational_profit: Option<MoneyView>,
    pub grand_total: MoneyView,
    pub exchange_rate: Decimal,
    /// `"1 USD = $ 3.500 COP"`.
    pub exchange_rate_display: String,
}

impl QuoteDetailView {
    /// Builds the view from a stored quote using its own exchange rate.
    pub fn from_quote(quote: &QuoteWithItems) -> Self {
        let rate = quote.quote.exchange_rate;
        let lines = quote
            .items
            .iter()
            .map(|line| QuoteLineView {
                name: line.item_name.clone(),
                category: line.group_type.label().to_string(),
                unit_price: MoneyView::new(line.item.price_snapshot, rate),
                quantity: line.item.quantity,
                subtotal: MoneyView::new(line.item.subtotal, rate),
            })
            .collect();

        let operational_profit = (!quote.quote.operational_profit.is_zero())
            .then(|| MoneyView::new(quote.quote.operational_profit, rate));

        Self {
            quote_id: quote.quote.id.clone(),
            patient_name: quote.quote.patient_name.clone(),
            date: quote
                .quote
                .created_at
                .format(DISPLAY_DATE_FORMAT)
                .to_string(),
            notes: quote.quote.notes.clone(),
            lines,
            expenses_total: MoneyView::new(quote.expenses_total(), rate),
            operational_profit,
            grand_total: MoneyView::new(quote.quote.total, rate),
            exchange_rate: rate,
            exchange_rate_display: format!("1 USD = {} COP", format_base(rate)),
        }
    }

    /// First eight characters of the id, used as a human reference.
    pub fn short_id(&self) -> String {
        self.quote_id.chars().take(8).collect()
    }
}

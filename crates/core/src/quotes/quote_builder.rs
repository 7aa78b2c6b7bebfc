use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::quotes_model::{NewQuote, NewQuoteLine};
use super::valuation::{expenses_total, grand_total, line_subtotal};
use crate::catalog::{GroupType, PriceItem};
use crate::constants::DEFAULT_EXCHANGE_RATE;
use crate::currency::normalize_base_amount;
use crate::{errors::ValidationError, Error, Result};

/// A catalog entry picked into the quote being built.
///
/// `price_snapshot` starts as the catalog price at selection time and is
/// never re-read from the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLineSelection {
    pub price_item_id: String,
    pub name: String,
    pub group_type: GroupType,
    pub price_snapshot: Decimal,
    pub quantity: i64,
}

impl QuoteLineSelection {
    pub fn subtotal(&self) -> Decimal {
        line_subtotal(self.price_snapshot, self.quantity)
    }
}

/// In-memory quote under construction.
///
/// Owned by a single session; nothing here is persisted until
/// [`QuoteBuilder::to_new_quote`] is handed to the quote service.
#[derive(Debug, Clone)]
pub struct QuoteBuilder {
    selections: Vec<QuoteLineSelection>,
    patient_name: String,
    notes: String,
    operational_profit: Decimal,
    exchange_rate: Decimal,
    submission_token: String,
}

impl Default for QuoteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteBuilder {
    pub fn new() -> Self {
        Self {
            selections: Vec::new(),
            patient_name: String::new(),
            notes: String::new(),
            operational_profit: Decimal::ZERO,
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            submission_token: Uuid::new_v4().to_string(),
        }
    }

    /// Adds the entry with quantity 1, or bumps the quantity if it is already
    /// selected. An existing snapshot is left alone.
    pub fn add_or_increment(&mut self, item: &PriceItem) {
        if let Some(selection) = self.find_mut(&item.id) {
            selection.quantity = selection.quantity.saturating_add(1);
            return;
        }
        self.selections.push(QuoteLineSelection {
            price_item_id: item.id.clone(),
            name: item.name.clone(),
            group_type: item.group_type,
            price_snapshot: normalize_base_amount(item.price),
            quantity: 1,
        });
    }

    /// Sets the quantity; zero or less removes the selection.
    pub fn set_quantity(&mut self, price_item_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(price_item_id);
            return;
        }
        if let Some(selection) = self.find_mut(price_item_id) {
            selection.quantity = quantity;
        }
    }

    /// Overrides the unit price of one selection for this quote only.
    ///
    /// Returns `false`, leaving the selection unchanged, for a negative price
    /// or an id that is not selected.
    pub fn set_price_snapshot(&mut self, price_item_id: &str, price: Decimal) -> bool {
        if price < Decimal::ZERO {
            return false;
        }
        match self.find_mut(price_item_id) {
            Some(selection) => {
                selection.price_snapshot = normalize_base_amount(price);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, price_item_id: &str) {
        self.selections
            .retain(|selection| selection.price_item_id != price_item_id);
    }

    pub fn subtotal_for_expenses(&self) -> Decimal {
        expenses_total(
            self.selections
                .iter()
                .map(|selection| (selection.price_snapshot, selection.quantity)),
        )
    }

    pub fn grand_total(&self) -> Decimal {
        grand_total(self.subtotal_for_expenses(), self.operational_profit)
    }

    /// Rejects negative amounts and keeps the previous value.
    pub fn set_operational_profit(&mut self, amount: Decimal) -> bool {
        if amount < Decimal::ZERO {
            return false;
        }
        self.operational_profit = normalize_base_amount(amount);
        true
    }

    /// Rejects zero or negative rates and keeps the previous value.
    pub fn set_exchange_rate(&mut self, rate: Decimal) -> bool {
        if rate <= Decimal::ZERO {
            return false;
        }
        self.exchange_rate = rate;
        true
    }

    pub fn set_patient_name(&mut self, patient_name: impl Into<String>) {
        self.patient_name = patient_name.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn selections(&self) -> &[QuoteLineSelection] {
        &self.selections
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    pub fn operational_profit(&self) -> Decimal {
        self.operational_profit
    }

    pub fn exchange_rate(&self) -> Decimal {
        self.exchange_rate
    }

    pub fn submission_token(&self) -> &str {
        &self.submission_token
    }

    /// Builds the commit payload for the current session.
    pub fn to_new_quote(&self) -> Result<NewQuote> {
        if self.selections.is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Select at least one service before saving".to_string(),
            )));
        }
        let patient_name = self.patient_name.trim();
        if patient_name.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "patientName".to_string(),
            )));
        }
        let notes = self.notes.trim();
        let new_quote = NewQuote {
            patient_name: patient_name.to_string(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            lines: self
                .selections
                .iter()
                .map(|selection| NewQuoteLine {
                    price_item_id: selection.price_item_id.clone(),
                    price_snapshot: selection.price_snapshot,
                    quantity: selection.quantity,
                })
                .collect(),
            operational_profit: self.operational_profit,
            exchange_rate: self.exchange_rate,
            submission_token: Some(self.submission_token.clone()),
        };
        new_quote.validate()?;
        Ok(new_quote)
    }

    /// Discards the session; the next commit gets a fresh submission token.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn find_mut(&mut self, price_item_id: &str) -> Option<&mut QuoteLineSelection> {
        self.selections
            .iter_mut()
            .find(|selection| selection.price_item_id == price_item_id)
    }
}

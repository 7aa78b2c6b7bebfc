//! Quote domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::valuation::{checked_grand_total, expenses_total, grand_total, line_subtotal};
use crate::catalog::GroupType;
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a committed quote header.
///
/// Quotes are immutable once persisted; a wrong quote is deleted and
/// recreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub patient_name: String,
    pub notes: Option<String>,
    /// Sum of line subtotals plus operational profit.
    pub total: Decimal,
    pub operational_profit: Decimal,
    /// Base units per secondary unit, fixed at creation time.
    pub exchange_rate: Decimal,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

/// A committed line of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLineItem {
    pub id: String,
    pub quote_id: String,
    pub price_item_id: String,
    pub price_snapshot: Decimal,
    pub quantity: i64,
    /// `price_snapshot * quantity`, computed by the gateway.
    pub subtotal: Decimal,
}

/// A committed line joined with the catalog entry's display data.
///
/// Carries the entry's current name and category only. The catalog's current
/// price is intentionally absent: a committed line is valued by its snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLineItemDetails {
    #[serde(flatten)]
    pub item: QuoteLineItem,
    pub item_name: String,
    pub group_type: GroupType,
}

/// A quote header with all of its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteWithItems {
    #[serde(flatten)]
    pub quote: Quote,
    pub items: Vec<QuoteLineItemDetails>,
}

impl QuoteWithItems {
    /// Sum of the stored line subtotals.
    pub fn expenses_total(&self) -> Decimal {
        self.items
            .iter()
            .map(|line| line.item.subtotal)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Checks `total == Σ subtotal + profit` and
    /// `subtotal == snapshot * quantity` for every line.
    pub fn verify_totals(&self) -> Result<()> {
        for line in &self.items {
            let expected = line_subtotal(line.item.price_snapshot, line.item.quantity);
            if line.item.subtotal != expected {
                return Err(Error::Unexpected(format!(
                    "Line {} of quote {} stores subtotal {} but snapshot x quantity is {}",
                    line.item.id, self.quote.id, line.item.subtotal, expected
                )));
            }
        }
        let expected_total = grand_total(self.expenses_total(), self.quote.operational_profit);
        if self.quote.total != expected_total {
            return Err(Error::Unexpected(format!(
                "Quote {} stores total {} but its lines add up to {}",
                self.quote.id, self.quote.total, expected_total
            )));
        }
        Ok(())
    }
}

/// One line of a quote about to be committed.
///
/// There is no subtotal field: the gateway computes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuoteLine {
    pub price_item_id: String,
    pub price_snapshot: Decimal,
    pub quantity: i64,
}

/// Input model for committing a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuote {
    pub patient_name: String,
    pub notes: Option<String>,
    pub lines: Vec<NewQuoteLine>,
    pub operational_profit: Decimal,
    pub exchange_rate: Decimal,
    /// Identifies one quote-building session; a repeated submit with the same
    /// token does not create a second quote.
    pub submission_token: Option<String>,
}

impl NewQuote {
    /// Validates the commit preconditions.
    pub fn validate(&self) -> Result<()> {
        if self.patient_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "patientName".to_string(),
            )));
        }
        if self.lines.is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "A quote needs at least one service".to_string(),
            )));
        }
        for line in &self.lines {
            if line.quantity < 1 {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Quantity for {} must be at least 1",
                    line.price_item_id
                ))));
            }
            if line.price_snapshot < Decimal::ZERO {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Price for {} cannot be negative",
                    line.price_item_id
                ))));
            }
        }
        if self.operational_profit < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Operational profit cannot be negative".to_string(),
            )));
        }
        if self.exchange_rate <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Exchange rate must be greater than zero".to_string(),
            )));
        }
        let lines = self
            .lines
            .iter()
            .map(|line| (line.price_snapshot, line.quantity));
        if checked_grand_total(lines, self.operational_profit).is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Quote total is too large".to_string(),
            )));
        }
        Ok(())
    }

    /// Notes with blank text collapsed to `None`.
    pub fn normalized_notes(&self) -> Option<String> {
        self.notes
            .as_ref()
            .map(|notes| notes.trim())
            .filter(|notes| !notes.is_empty())
            .map(str::to_string)
    }

    pub fn expenses_total(&self) -> Decimal {
        expenses_total(
            self.lines
                .iter()
                .map(|line| (line.price_snapshot, line.quantity)),
        )
    }

    pub fn total(&self) -> Decimal {
        grand_total(self.expenses_total(), self.operational_profit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_quote() -> NewQuote {
        NewQuote {
            patient_name: "Ana Gómez".to_string(),
            notes: Some("  ".to_string()),
            lines: vec![
                NewQuoteLine {
                    price_item_id: "1".to_string(),
                    price_snapshot: dec!(80000),
                    quantity: 1,
                },
                NewQuoteLine {
                    price_item_id: "2".to_string(),
                    price_snapshot: dec!(50000),
                    quantity: 2,
                },
            ],
            operational_profit: dec!(20000),
            exchange_rate: dec!(3500),
            submission_token: None,
        }
    }

    #[test]
    fn test_new_quote_total() {
        let quote = new_quote();
        assert_eq!(quote.expenses_total(), dec!(180000));
        assert_eq!(quote.total(), dec!(200000));
        assert_eq!(quote.normalized_notes(), None);
    }

    #[test]
    fn test_validation_rejects_blank_patient_and_empty_lines() {
        let mut quote = new_quote();
        quote.patient_name = " ".to_string();
        assert!(matches!(
            quote.validate(),
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));

        let mut quote = new_quote();
        quote.lines.clear();
        assert!(matches!(quote.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_validation_rejects_bad_numbers() {
        let mut quote = new_quote();
        quote.lines[0].quantity = 0;
        assert!(quote.validate().is_err());

        let mut quote = new_quote();
        quote.lines[1].price_snapshot = dec!(-1);
        assert!(quote.validate().is_err());

        let mut quote = new_quote();
        quote.operational_profit = dec!(-1);
        assert!(quote.validate().is_err());

        let mut quote = new_quote();
        quote.exchange_rate = Decimal::ZERO;
        assert!(quote.validate().is_err());

        let mut quote = new_quote();
        quote.lines[0].price_snapshot = Decimal::MAX;
        assert!(matches!(
            quote.validate(),
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
        assert_eq!(quote.total(), Decimal::MAX);
    }

    #[test]
    fn test_verify_totals_detects_drift() {
        let now = Utc::now();
        let mut quote = QuoteWithItems {
            quote: Quote {
                id: "q1".to_string(),
                patient_name: "Ana".to_string(),
                notes: None,
                total: dec!(100000),
                operational_profit: dec!(20000),
                exchange_rate: dec!(3500),
                created_at: now,
                created_by: "u1".to_string(),
            },
            items: vec![QuoteLineItemDetails {
                item: QuoteLineItem {
                    id: "l1".to_string(),
                    quote_id: "q1".to_string(),
                    price_item_id: "1".to_string(),
                    price_snapshot: dec!(40000),
                    quantity: 2,
                    subtotal: dec!(80000),
                },
                item_name: "Limpieza".to_string(),
                group_type: GroupType::Clinic,
            }],
        };
        assert!(quote.verify_totals().is_ok());

        quote.quote.total = dec!(90000);
        assert!(quote.verify_totals().is_err());

        quote.quote.total = dec!(100000);
        quote.items[0].item.subtotal = dec!(70000);
        assert!(quote.verify_totals().is_err());
    }
}

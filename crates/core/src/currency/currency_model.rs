use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency_service::{convert, format_base, format_secondary, round_base, round_secondary};

/// A base currency amount together with its secondary conversion, rounded
/// and formatted once.
///
/// Every amount shown to the operator (detail view, exported document) goes
/// through this type, so both surfaces apply the same rounding rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyView {
    pub base: Decimal,
    pub secondary: Decimal,
    pub base_display: String,
    pub secondary_display: String,
}

impl MoneyView {
    pub fn new(amount_in_base: Decimal, exchange_rate: Decimal) -> Self {
        let secondary = convert(amount_in_base, exchange_rate);
        Self {
            base: round_base(amount_in_base),
            secondary: round_secondary(secondary),
            base_display: format_base(amount_in_base),
            secondary_display: format_secondary(secondary),
        }
    }

    /// `"$ 200.000 ($57.14)"`, the combined label used in totals rows.
    pub fn combined_display(&self) -> String {
        format!("{} ({})", self.base_display, self.secondary_display)
    }
}

//! Quote arithmetic shared by the builder, both repositories and the views.
//!
//! Keeping these in one place is what makes the builder's preview, the
//! stored totals and the exported numbers agree.

use rust_decimal::Decimal;

/// `price_snapshot * quantity`, saturating at `Decimal::MAX`.
///
/// Use [`checked_grand_total`] to refuse amounts that would saturate.
pub fn line_subtotal(price_snapshot: Decimal, quantity: i64) -> Decimal {
    price_snapshot.saturating_mul(Decimal::from(quantity))
}

/// Σ `price_snapshot * quantity` over `(price_snapshot, quantity)` pairs.
pub fn expenses_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, i64)>,
{
    lines
        .into_iter()
        .map(|(price, quantity)| line_subtotal(price, quantity))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Expenses plus operational profit.
pub fn grand_total(expenses: Decimal, operational_profit: Decimal) -> Decimal {
    expenses.saturating_add(operational_profit)
}

/// The grand total, or `None` when any step overflows.
pub fn checked_grand_total<I>(lines: I, operational_profit: Decimal) -> Option<Decimal>
where
    I: IntoIterator<Item = (Decimal, i64)>,
{
    lines
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, (price, quantity)| {
            acc.checked_add(price.checked_mul(Decimal::from(quantity))?)
        })?
        .checked_add(operational_profit)
}

//! Static dataset served when no backend is configured.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::catalog::{GroupType, PriceItem};
use crate::constants::{DEFAULT_EXCHANGE_RATE, FIXTURE_USER_ID};
use crate::quotes::valuation::line_subtotal;
use crate::quotes::{Quote, QuoteLineItem};

fn fixture_timestamp(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

fn price_item(
    id: &str,
    name: &str,
    price: Decimal,
    group_type: GroupType,
    is_active: bool,
) -> PriceItem {
    let created = fixture_timestamp(1, 9);
    PriceItem {
        id: id.to_string(),
        name: name.to_string(),
        price,
        group_type,
        is_active,
        created_at: created,
        updated_at: created,
    }
}

/// The fixture catalog, including one inactive entry.
pub fn fixture_price_items() -> Vec<PriceItem> {
    vec![
        price_item("1", "Limpieza dental", dec!(80000), GroupType::Clinic, true),
        price_item("2", "Examen dental", dec!(50000), GroupType::Clinic, true),
        price_item("3", "Radiografía", dec!(25000), GroupType::Clinic, true),
        price_item("4", "Resina", dec!(120000), GroupType::Clinic, true),
        price_item("5", "Corona", dec!(1200000), GroupType::Laboratory, true),
        price_item("6", "Puente", dec!(2500000), GroupType::Laboratory, true),
        price_item("7", "Prótesis total", dec!(1800000), GroupType::Laboratory, true),
        price_item("8", "Envío urgente", dec!(50000), GroupType::Logistics, true),
        price_item("9", "Consulta de urgencia", dec!(100000), GroupType::Extra, true),
        price_item(
            "10",
            "Blanqueamiento (descontinuado)",
            dec!(400000),
            GroupType::Clinic,
            false,
        ),
    ]
}

fn quote_line(
    quote_id: &str,
    line_no: u32,
    item_id: &str,
    price: Decimal,
    qty: i64,
) -> QuoteLineItem {
    QuoteLineItem {
        id: format!("{}-{}", quote_id, line_no),
        quote_id: quote_id.to_string(),
        price_item_id: item_id.to_string(),
        price_snapshot: price,
        quantity: qty,
        subtotal: line_subtotal(price, qty),
    }
}

/// Lines of the fixture quotes.
pub fn fixture_quote_lines() -> Vec<QuoteLineItem> {
    vec![
        quote_line("101", 1, "1", dec!(80000), 1),
        quote_line("101", 2, "2", dec!(50000), 1),
        quote_line("102", 1, "5", dec!(1200000), 1),
        quote_line("102", 2, "8", dec!(50000), 1),
    ]
}

/// Fixture quote headers, newest first.
pub fn fixture_quotes() -> Vec<Quote> {
    vec![
        Quote {
            id: "101".to_string(),
            patient_name: "Juan Pérez".to_string(),
            notes: Some("Control semestral".to_string()),
            total: dec!(130000),
            operational_profit: Decimal::ZERO,
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            created_at: fixture_timestamp(14, 15),
            created_by: FIXTURE_USER_ID.to_string(),
        },
        Quote {
            id: "102".to_string(),
            patient_name: "María López".to_string(),
            notes: None,
            total: dec!(1250000),
            operational_profit: Decimal::ZERO,
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            created_at: fixture_timestamp(13, 10),
            created_by: FIXTURE_USER_ID.to_string(),
        },
    ]
}

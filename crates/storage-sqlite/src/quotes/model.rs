//! Database models for quotes and their line items.

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use dentquote_core::catalog::GroupType;
use dentquote_core::errors::{Error, ValidationError};
use dentquote_core::quotes::{Quote, QuoteLineItem, QuoteLineItemDetails};

fn parse_decimal(value: &str) -> Result<Decimal, Error> {
    Decimal::from_str(value).map_err(|e| Error::Validation(ValidationError::DecimalParse(e)))
}

/// Database model for quote headers
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::quotes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct QuoteDB {
    pub id: String,
    pub patient_name: String,
    pub notes: Option<String>,
    pub total: String,
    pub operational_profit: String,
    pub exchange_rate: String,
    pub submission_token: Option<String>,
    pub created_at: NaiveDateTime,
    pub created_by: String,
}

impl TryFrom<QuoteDB> for Quote {
    type Error = Error;

    fn try_from(db: QuoteDB) -> Result<Self, Self::Error> {
        Ok(Self {
            total: parse_decimal(&db.total)?,
            operational_profit: parse_decimal(&db.operational_profit)?,
            exchange_rate: parse_decimal(&db.exchange_rate)?,
            id: db.id,
            patient_name: db.patient_name,
            notes: db.notes,
            created_at: Utc.from_utc_datetime(&db.created_at),
            created_by: db.created_by,
        })
    }
}

/// Database model for quote line items
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    Associations,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(QuoteDB, foreign_key = quote_id))]
#[diesel(table_name = crate::schema::quote_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct QuoteItemDB {
    pub id: String,
    pub quote_id: String,
    pub price_item_id: String,
    pub price_snapshot: String,
    pub quantity: i64,
    pub subtotal: String,
    /// Position of the line in the quote as it was built.
    pub sort_order: i32,
}

impl TryFrom<QuoteItemDB> for QuoteLineItem {
    type Error = Error;

    fn try_from(db: QuoteItemDB) -> Result<Self, Self::Error> {
        Ok(Self {
            price_snapshot: parse_decimal(&db.price_snapshot)?,
            subtotal: parse_decimal(&db.subtotal)?,
            id: db.id,
            quote_id: db.quote_id,
            price_item_id: db.price_item_id,
            quantity: db.quantity,
        })
    }
}

/// A line joined with its catalog entry's display columns.
pub(crate) fn line_details(
    (item, item_name, group_type): (QuoteItemDB, String, String),
) -> Result<QuoteLineItemDetails, Error> {
    Ok(QuoteLineItemDetails {
        group_type: GroupType::from_str(&group_type)?,
        item: item.try_into()?,
        item_name,
    })
}

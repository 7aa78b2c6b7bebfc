//! Database models for the price catalog.

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use dentquote_core::catalog::{GroupType, NewPriceItem, PriceItem};
use dentquote_core::errors::{Error, ValidationError};

/// Database model for catalog entries
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
#[diesel(table_name = crate::schema::price_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PriceItemDB {
    pub id: String,
    pub name: String,
    pub price: String,
    pub group_type: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<PriceItemDB> for PriceItem {
    type Error = Error;

    fn try_from(db: PriceItemDB) -> Result<Self, Self::Error> {
        Ok(Self {
            price: Decimal::from_str(&db.price).map_err(ValidationError::DecimalParse)?,
            group_type: GroupType::from_str(&db.group_type)?,
            id: db.id,
            name: db.name,
            is_active: db.is_active,
            created_at: Utc.from_utc_datetime(&db.created_at),
            updated_at: Utc.from_utc_datetime(&db.updated_at),
        })
    }
}

impl PriceItemDB {
    pub fn from_new(id: String, new_item: NewPriceItem, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: new_item.name.trim().to_string(),
            price: new_item.price.to_string(),
            group_type: new_item.group_type.as_str().to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

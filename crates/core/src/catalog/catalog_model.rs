//! Catalog domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{errors::ValidationError, Error, Result};

/// Category a catalog entry belongs to.
///
/// The specialist variants are optional sub-roles of clinic work that some
/// practices price separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupType {
    Clinic,
    Laboratory,
    Logistics,
    Extra,
    #[serde(rename = "specialist_endodontics")]
    Endodontics,
    #[serde(rename = "specialist_orthodontics")]
    Orthodontics,
    #[serde(rename = "specialist_periodontics")]
    Periodontics,
    #[serde(rename = "specialist_oral_surgery")]
    OralSurgery,
}

impl GroupType {
    pub const ALL: [GroupType; 8] = [
        GroupType::Clinic,
        GroupType::Laboratory,
        GroupType::Logistics,
        GroupType::Extra,
        GroupType::Endodontics,
        GroupType::Orthodontics,
        GroupType::Periodontics,
        GroupType::OralSurgery,
    ];

    /// Storage representation, also the catalog sort key.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Clinic => "clinic",
            GroupType::Laboratory => "laboratory",
            GroupType::Logistics => "logistics",
            GroupType::Extra => "extra",
            GroupType::Endodontics => "specialist_endodontics",
            GroupType::Orthodontics => "specialist_orthodontics",
            GroupType::Periodontics => "specialist_periodontics",
            GroupType::OralSurgery => "specialist_oral_surgery",
        }
    }

    /// Label shown to the operator.
    pub fn label(&self) -> &'static str {
        match self {
            GroupType::Clinic => "Clínica",
            GroupType::Laboratory => "Laboratorio",
            GroupType::Logistics => "Logística",
            GroupType::Extra => "Extras",
            GroupType::Endodontics => "Especialista: Endodoncia",
            GroupType::Orthodontics => "Especialista: Ortodoncia",
            GroupType::Periodontics => "Especialista: Periodoncia",
            GroupType::OralSurgery => "Especialista: Cirugía oral",
        }
    }

    pub fn is_specialist(&self) -> bool {
        matches!(
            self,
            GroupType::Endodontics
                | GroupType::Orthodontics
                | GroupType::Periodontics
                | GroupType::OralSurgery
        )
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        GroupType::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Unknown catalog group '{}'",
                    s
                )))
            })
    }
}

/// Domain model representing a priced service in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceItem {
    pub id: String,
    pub name: String,
    /// Unit price in whole base currency units.
    pub price: Decimal,
    pub group_type: GroupType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPriceItem {
    pub name: String,
    pub price: Decimal,
    pub group_type: GroupType,
}

impl NewPriceItem {
    /// Validates the new catalog entry.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Service name cannot be empty".to_string(),
            )));
        }
        validate_price(self.price)
    }
}

/// Input model for editing a catalog entry. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceItemUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub group_type: Option<GroupType>,
    pub is_active: Option<bool>,
}

impl PriceItemUpdate {
    /// Validates the catalog update.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Service name cannot be empty".to_string(),
                )));
            }
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Applies the update on top of an existing entry.
    pub fn apply_to(&self, item: &PriceItem, now: DateTime<Utc>) -> PriceItem {
        PriceItem {
            id: item.id.clone(),
            name: self.name.clone().unwrap_or_else(|| item.name.clone()),
            price: self.price.unwrap_or(item.price),
            group_type: self.group_type.unwrap_or(item.group_type),
            is_active: self.is_active.unwrap_or(item.is_active),
            created_at: item.created_at,
            updated_at: now,
        }
    }
}

fn validate_price(price: Decimal) -> Result<()> {
    if price <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Price must be greater than zero".to_string(),
        )));
    }
    Ok(())
}

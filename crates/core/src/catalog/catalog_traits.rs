//! Catalog repository and service traits.
//!
//! These traits define the contract for catalog operations without any
//! database-specific types, allowing for the live and the fixture source.

use async_trait::async_trait;

use super::catalog_model::{GroupType, NewPriceItem, PriceItem, PriceItemUpdate};
use crate::errors::Result;

/// Trait defining the contract for catalog repository operations.
///
/// Entries are never hard-deleted: quotes keep referencing them for display.
#[async_trait]
pub trait CatalogRepositoryTrait: Send + Sync {
    /// Active entries ordered by category, then name.
    async fn list_active(&self) -> Result<Vec<PriceItem>>;

    /// Active entries of one category ordered by name.
    async fn list_by_group_type(&self, group_type: GroupType) -> Result<Vec<PriceItem>>;

    /// Retrieves an entry by id, active or not.
    async fn get_by_id(&self, price_item_id: &str) -> Result<PriceItem>;

    async fn create(&self, new_item: NewPriceItem) -> Result<PriceItem>;

    async fn update(&self, price_item_id: &str, update: PriceItemUpdate) -> Result<PriceItem>;

    /// Flips the active flag to false.
    async fn soft_delete(&self, price_item_id: &str) -> Result<()>;
}

/// Trait defining the contract for catalog service operations.
#[async_trait]
pub trait CatalogServiceTrait: Send + Sync {
    async fn list_active(&self) -> Result<Vec<PriceItem>>;

    /// Active entries grouped by category, groups in catalog order.
    async fn list_active_grouped(&self) -> Result<Vec<(GroupType, Vec<PriceItem>)>>;

    async fn list_by_group_type(&self, group_type: GroupType) -> Result<Vec<PriceItem>>;

    async fn get_price_item(&self, price_item_id: &str) -> Result<PriceItem>;

    async fn create_price_item(&self, new_item: NewPriceItem) -> Result<PriceItem>;

    async fn update_price_item(
        &self,
        price_item_id: &str,
        update: PriceItemUpdate,
    ) -> Result<PriceItem>;

    async fn deactivate_price_item(&self, price_item_id: &str) -> Result<()>;
}

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::catalog_model::{GroupType, NewPriceItem, PriceItem, PriceItemUpdate};
use super::catalog_traits::{CatalogRepositoryTrait, CatalogServiceTrait};
use crate::currency::normalize_base_amount;
use crate::errors::Result;

/// Service for reading the catalog and forwarding catalog edits.
pub struct CatalogService {
    repository: Arc<dyn CatalogRepositoryTrait>,
}

impl CatalogService {
    /// Creates a new CatalogService instance
    pub fn new(repository: Arc<dyn CatalogRepositoryTrait>) -> Self {
        Self { repository }
    }
}

/// Groups an already ordered list, keeping first-seen group order.
fn group_in_order(items: Vec<PriceItem>) -> Vec<(GroupType, Vec<PriceItem>)> {
    let mut groups: Vec<(GroupType, Vec<PriceItem>)> = Vec::new();
    for item in items {
        match groups.last_mut() {
            Some((group, members)) if *group == item.group_type => members.push(item),
            _ => groups.push((item.group_type, vec![item])),
        }
    }
    groups
}

#[async_trait]
impl CatalogServiceTrait for CatalogService {
    async fn list_active(&self) -> Result<Vec<PriceItem>> {
        let items = self.repository.list_active().await?;
        debug!("Loaded {} active catalog entries", items.len());
        Ok(items)
    }

    async fn list_active_grouped(&self) -> Result<Vec<(GroupType, Vec<PriceItem>)>> {
        let items = self.list_active().await?;
        Ok(group_in_order(items))
    }

    async fn list_by_group_type(&self, group_type: GroupType) -> Result<Vec<PriceItem>> {
        self.repository.list_by_group_type(group_type).await
    }

    async fn get_price_item(&self, price_item_id: &str) -> Result<PriceItem> {
        self.repository.get_by_id(price_item_id).await
    }

    async fn create_price_item(&self, mut new_item: NewPriceItem) -> Result<PriceItem> {
        new_item.validate()?;
        new_item.price = normalize_base_amount(new_item.price);
        new_item.validate()?;
        debug!(
            "Creating catalog entry '{}' in {}",
            new_item.name, new_item.group_type
        );
        self.repository.create(new_item).await
    }

    async fn update_price_item(
        &self,
        price_item_id: &str,
        mut update: PriceItemUpdate,
    ) -> Result<PriceItem> {
        update.price = update.price.map(normalize_base_amount);
        update.validate()?;
        self.repository.update(price_item_id, update).await
    }

    async fn deactivate_price_item(&self, price_item_id: &str) -> Result<()> {
        debug!("Deactivating catalog entry {}", price_item_id);
        self.repository.soft_delete(price_item_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{fixture_price_items, FixtureCatalogRepository};
    use crate::Error;
    use rust_decimal_macros::dec;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(FixtureCatalogRepository::new()))
    }

    #[tokio::test]
    async fn test_grouped_listing_keeps_catalog_order() {
        let grouped = service().list_active_grouped().await.unwrap();
        let groups: Vec<GroupType> = grouped.iter().map(|(group, _)| *group).collect();
        let mut sorted = groups.clone();
        sorted.sort_by_key(|group| group.as_str());
        assert_eq!(groups, sorted);

        let total: usize = grouped.iter().map(|(_, items)| items.len()).sum();
        let active = fixture_price_items()
            .into_iter()
            .filter(|item| item.is_active)
            .count();
        assert_eq!(total, active);
    }

    #[tokio::test]
    async fn test_create_rejects_price_rounding_to_zero() {
        let result = service()
            .create_price_item(NewPriceItem {
                name: "Ajuste".to_string(),
                price: dec!(0.4),
                group_type: GroupType::Extra,
            })
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let result = service()
            .update_price_item(
                "1",
                PriceItemUpdate {
                    name: Some(" ".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}

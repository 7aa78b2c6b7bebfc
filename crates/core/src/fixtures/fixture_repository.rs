use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use std::time::Duration;
use uuid::Uuid;

use super::fixture_data::{fixture_price_items, fixture_quote_lines, fixture_quotes};
use crate::catalog::{CatalogRepositoryTrait, GroupType, NewPriceItem, PriceItem, PriceItemUpdate};
use crate::constants::{
    FIXTURE_CREATE_DELAY_MS, FIXTURE_DELETE_DELAY_MS, FIXTURE_NEW_QUOTE_ID, FIXTURE_USER_ID,
};
use crate::errors::{Error, Result};
use crate::quotes::{NewQuote, Quote, QuoteLineItemDetails, QuoteRepositoryTrait, QuoteWithItems};

/// Simulated latency of fixture-mode writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureLatency {
    pub create: Duration,
    pub delete: Duration,
}

impl FixtureLatency {
    pub fn from_millis(create_ms: u64, delete_ms: u64) -> Self {
        Self {
            create: Duration::from_millis(create_ms),
            delete: Duration::from_millis(delete_ms),
        }
    }

    pub fn none() -> Self {
        Self::from_millis(0, 0)
    }
}

impl Default for FixtureLatency {
    fn default() -> Self {
        Self::from_millis(FIXTURE_CREATE_DELAY_MS, FIXTURE_DELETE_DELAY_MS)
    }
}

fn sorted_active(mut items: Vec<PriceItem>) -> Vec<PriceItem> {
    items.retain(|item| item.is_active);
    items.sort_by(|a, b| {
        a.group_type
            .as_str()
            .cmp(b.group_type.as_str())
            .then_with(|| a.name.cmp(&b.name))
    });
    items
}

/// Catalog served from the static dataset. Writes are answered but not kept.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalogRepository;

impl FixtureCatalogRepository {
    pub fn new() -> Self {
        Self
    }

    fn find(&self, price_item_id: &str) -> Result<PriceItem> {
        fixture_price_items()
            .into_iter()
            .find(|item| item.id == price_item_id)
            .ok_or_else(|| Error::NotFound(format!("Price item {}", price_item_id)))
    }
}

#[async_trait]
impl CatalogRepositoryTrait for FixtureCatalogRepository {
    async fn list_active(&self) -> Result<Vec<PriceItem>> {
        Ok(sorted_active(fixture_price_items()))
    }

    async fn list_by_group_type(&self, group_type: GroupType) -> Result<Vec<PriceItem>> {
        Ok(sorted_active(fixture_price_items())
            .into_iter()
            .filter(|item| item.group_type == group_type)
            .collect())
    }

    async fn get_by_id(&self, price_item_id: &str) -> Result<PriceItem> {
        self.find(price_item_id)
    }

    async fn create(&self, new_item: NewPriceItem) -> Result<PriceItem> {
        let now = Utc::now();
        Ok(PriceItem {
            id: Uuid::new_v4().to_string(),
            name: new_item.name,
            price: new_item.price,
            group_type: new_item.group_type,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(&self, price_item_id: &str, update: PriceItemUpdate) -> Result<PriceItem> {
        let existing = self.find(price_item_id)?;
        Ok(update.apply_to(&existing, Utc::now()))
    }

    async fn soft_delete(&self, price_item_id: &str) -> Result<()> {
        self.find(price_item_id).map(|_| ())
    }
}

/// Quote store served from the static dataset.
///
/// Creates and deletes wait for the configured latency and then report
/// success without changing anything. Nothing here needs an identity.
#[derive(Debug, Clone, Default)]
pub struct FixtureQuoteRepository {
    latency: FixtureLatency,
}

impl FixtureQuoteRepository {
    pub fn new(latency: FixtureLatency) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl QuoteRepositoryTrait for FixtureQuoteRepository {
    async fn create(&self, new_quote: NewQuote) -> Result<Quote> {
        tokio::time::sleep(self.latency.create).await;
        let total = new_quote.total();
        debug!(
            "Fixture mode: fabricated quote for '{}' (total {}), nothing stored",
            new_quote.patient_name, total
        );
        Ok(Quote {
            id: FIXTURE_NEW_QUOTE_ID.to_string(),
            patient_name: new_quote.patient_name,
            notes: new_quote.notes,
            total,
            operational_profit: new_quote.operational_profit,
            exchange_rate: new_quote.exchange_rate,
            created_at: Utc::now(),
            created_by: FIXTURE_USER_ID.to_string(),
        })
    }

    async fn get_all(&self) -> Result<Vec<Quote>> {
        let mut quotes = fixture_quotes();
        quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quotes)
    }

    async fn get_by_id(&self, quote_id: &str) -> Result<QuoteWithItems> {
        let quote = fixture_quotes()
            .into_iter()
            .find(|quote| quote.id == quote_id)
            .ok_or_else(|| Error::NotFound(format!("Quote {}", quote_id)))?;
        let catalog = fixture_price_items();
        let items = fixture_quote_lines()
            .into_iter()
            .filter(|line| line.quote_id == quote_id)
            .map(|line| {
                let entry = catalog.iter().find(|item| item.id == line.price_item_id);
                QuoteLineItemDetails {
                    item_name: entry
                        .map(|item| item.name.clone())
                        .unwrap_or_else(|| line.price_item_id.clone()),
                    group_type: entry.map(|item| item.group_type).unwrap_or(GroupType::Extra),
                    item: line,
                }
            })
            .collect();
        Ok(QuoteWithItems { quote, items })
    }

    async fn delete(&self, quote_id: &str) -> Result<()> {
        tokio::time::sleep(self.latency.delete).await;
        debug!("Fixture mode: pretended to delete quote {}", quote_id);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::{NewQuoteLine, QuoteService, QuoteServiceTrait};
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::time::Instant;

    fn reference_new_quote() -> NewQuote {
        NewQuote {
            patient_name: "Ana Gómez".to_string(),
            notes: None,
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

    #[tokio::test]
    async fn test_catalog_is_active_only_and_ordered() {
        let items = FixtureCatalogRepository::new().list_active().await.unwrap();
        assert_eq!(items.len(), 9);
        assert!(items.iter().all(|item| item.is_active));
        assert_eq!(items[0].group_type, GroupType::Clinic);
        assert_eq!(items[0].name, "Examen dental");
        assert_eq!(items.last().unwrap().group_type, GroupType::Logistics);

        let lab = FixtureCatalogRepository::new()
            .list_by_group_type(GroupType::Laboratory)
            .await
            .unwrap();
        let names: Vec<&str> = lab.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Corona", "Prótesis total", "Puente"]);
    }

    #[tokio::test]
    async fn test_fixture_quotes_are_exact() {
        let repository = FixtureQuoteRepository::new(FixtureLatency::none());
        let quotes = repository.get_all().await.unwrap();
        let ids: Vec<&str> = quotes.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["101", "102"]);

        let first = repository.get_by_id("101").await.unwrap();
        assert_eq!(first.quote.total, dec!(130000));
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.items[0].item_name, "Limpieza dental");
        assert!(first.verify_totals().is_ok());

        let second = repository.get_by_id("102").await.unwrap();
        assert_eq!(second.quote.total, dec!(1250000));
        assert_eq!(second.items[0].group_type, GroupType::Laboratory);
        assert!(second.verify_totals().is_ok());

        assert!(matches!(
            repository.get_by_id("999").await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_waits_and_fabricates() {
        let latency = FixtureLatency::from_millis(40, 20);
        let service = QuoteService::new(Arc::new(FixtureQuoteRepository::new(latency)));

        let started = Instant::now();
        let quote = service.create_quote(reference_new_quote()).await.unwrap();
        assert!(started.elapsed() >= latency.create);
        assert_eq!(quote.id, FIXTURE_NEW_QUOTE_ID);
        assert_eq!(quote.created_by, FIXTURE_USER_ID);
        assert_eq!(quote.total, dec!(200000));

        // Nothing was stored.
        assert!(matches!(
            service.get_quote(FIXTURE_NEW_QUOTE_ID).await,
            Err(Error::NotFound(_))
        ));
        assert_eq!(service.list_quotes().await.unwrap().len(), 2);

        let started = Instant::now();
        service.delete_quote("101").await.unwrap();
        assert!(started.elapsed() >= latency.delete);
        assert_eq!(service.list_quotes().await.unwrap().len(), 2);
    }

    #[test]
    fn test_default_latency() {
        let latency = FixtureLatency::default();
        assert_eq!(latency.create, Duration::from_millis(1000));
        assert_eq!(latency.delete, Duration::from_millis(500));
    }
}

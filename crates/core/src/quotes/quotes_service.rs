use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use super::quotes_model::{NewQuote, Quote, QuoteWithItems};
use super::quotes_traits::{QuoteRepositoryTrait, QuoteServiceTrait};
use crate::currency::normalize_base_amount;
use crate::errors::Result;

/// Service for committing, listing, reading and deleting quotes.
///
/// Validation happens here, before the repository is touched. Failures are
/// returned as they come; nothing is retried.
pub struct QuoteService {
    repository: Arc<dyn QuoteRepositoryTrait>,
}

impl QuoteService {
    /// Creates a new QuoteService instance
    pub fn new(repository: Arc<dyn QuoteRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    async fn create_quote(&self, mut new_quote: NewQuote) -> Result<Quote> {
        new_quote.validate()?;
        new_quote.patient_name = new_quote.patient_name.trim().to_string();
        new_quote.notes = new_quote.normalized_notes();
        new_quote.operational_profit = normalize_base_amount(new_quote.operational_profit);
        for line in new_quote.lines.iter_mut() {
            line.price_snapshot = normalize_base_amount(line.price_snapshot);
        }

        debug!(
            "Committing quote for '{}' with {} line(s)",
            new_quote.patient_name,
            new_quote.lines.len()
        );
        let expected_total = new_quote.total();
        let quote = self.repository.create(new_quote).await?;
        if quote.total != expected_total {
            warn!(
                "Quote {} was stored with total {} but the lines add up to {}",
                quote.id, quote.total, expected_total
            );
        }
        info!("Created quote {} (total {})", quote.id, quote.total);
        Ok(quote)
    }

    async fn list_quotes(&self) -> Result<Vec<Quote>> {
        let quotes = self.repository.get_all().await?;
        debug!("Loaded {} quote(s)", quotes.len());
        Ok(quotes)
    }

    async fn get_quote(&self, quote_id: &str) -> Result<QuoteWithItems> {
        let quote = self.repository.get_by_id(quote_id).await?;
        if let Err(e) = quote.verify_totals() {
            warn!("{}", e);
        }
        Ok(quote)
    }

    async fn delete_quote(&self, quote_id: &str) -> Result<()> {
        debug!("Deleting quote {}", quote_id);
        self.repository.delete(quote_id).await?;
        info!("Deleted quote {}", quote_id);
        Ok(())
    }
}

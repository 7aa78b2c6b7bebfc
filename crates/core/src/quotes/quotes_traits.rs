//! Quote repository and service traits.
//!
//! The live and the fixture data source both implement
//! [`QuoteRepositoryTrait`]; nothing above it knows which one is active.

use async_trait::async_trait;

use super::quotes_model::{NewQuote, Quote, QuoteWithItems};
use crate::errors::Result;

/// Trait defining the contract for quote persistence.
#[async_trait]
pub trait QuoteRepositoryTrait: Send + Sync {
    /// Commits the header and all lines as one unit. Subtotals and the total
    /// are computed here, not taken from the caller.
    async fn create(&self, new_quote: NewQuote) -> Result<Quote>;

    /// All quote headers, newest first.
    async fn get_all(&self) -> Result<Vec<Quote>>;

    /// One quote with its lines. `Error::NotFound` when absent.
    async fn get_by_id(&self, quote_id: &str) -> Result<QuoteWithItems>;

    /// Removes the quote and its lines together.
    async fn delete(&self, quote_id: &str) -> Result<()>;
}

/// Trait defining the contract for quote service operations.
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    async fn create_quote(&self, new_quote: NewQuote) -> Result<Quote>;

    async fn list_quotes(&self) -> Result<Vec<Quote>>;

    async fn get_quote(&self, quote_id: &str) -> Result<QuoteWithItems>;

    async fn delete_quote(&self, quote_id: &str) -> Result<()>;
}

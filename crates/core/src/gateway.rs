//! Data-source selection.
//!
//! One catalog repository and one quote repository are chosen at startup,
//! either live or fixture, and handed to the services. Nothing downstream
//! asks which one it got.

use log::info;
use std::fmt;
use std::sync::Arc;

use crate::catalog::{CatalogRepositoryTrait, CatalogService};
use crate::fixtures::{FixtureCatalogRepository, FixtureLatency, FixtureQuoteRepository};
use crate::quotes::{QuoteRepositoryTrait, QuoteService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    Live,
    Fixture,
}

impl fmt::Display for DataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataMode::Live => f.write_str("live"),
            DataMode::Fixture => f.write_str("fixture"),
        }
    }
}

#[derive(Clone)]
pub struct DataSource {
    pub mode: DataMode,
    pub catalog: Arc<dyn CatalogRepositoryTrait>,
    pub quotes: Arc<dyn QuoteRepositoryTrait>,
}

impl DataSource {
    pub fn fixture(latency: FixtureLatency) -> Self {
        info!("No backend configured, serving fixture data");
        Self {
            mode: DataMode::Fixture,
            catalog: Arc::new(FixtureCatalogRepository::new()),
            quotes: Arc::new(FixtureQuoteRepository::new(latency)),
        }
    }

    pub fn live(
        catalog: Arc<dyn CatalogRepositoryTrait>,
        quotes: Arc<dyn QuoteRepositoryTrait>,
    ) -> Self {
        Self {
            mode: DataMode::Live,
            catalog,
            quotes,
        }
    }

    pub fn catalog_service(&self) -> CatalogService {
        CatalogService::new(self.catalog.clone())
    }

    pub fn quote_service(&self) -> QuoteService {
        QuoteService::new(self.quotes.clone())
    }
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSource")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

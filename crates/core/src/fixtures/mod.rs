//! Fixture data source - the static dataset used when no backend is
//! configured.

mod fixture_data;
mod fixture_repository;

pub use fixture_data::{fixture_price_items, fixture_quote_lines, fixture_quotes};
pub use fixture_repository::{FixtureCatalogRepository, FixtureLatency, FixtureQuoteRepository};

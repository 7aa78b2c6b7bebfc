//! SQLite storage implementation for Dentquote.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `dentquote-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations (schema plus the starting catalog)
//! - Repository implementations for the catalog and for quotes
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain, fixtures)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod catalog;
pub mod db;
pub mod errors;
pub mod quotes;
pub mod schema;

use log::info;
use std::sync::Arc;

use dentquote_core::auth::IdentityProviderTrait;
use dentquote_core::DataSource;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use catalog::CatalogRepository;
pub use quotes::QuoteRepository;

// Re-export from dentquote-core for convenience
pub use dentquote_core::errors::{DatabaseError, Error, Result};

/// Opens the live backend and wraps it as a data source.
///
/// Prepares the file, runs pending migrations and starts the single writer,
/// so it must be called from within a Tokio runtime. Failures surface as
/// `Error::BackendUnavailable` (or a migration error); there is no fallback
/// to fixture data.
pub fn open_data_source(
    database_url: &str,
    identity: Arc<dyn IdentityProviderTrait>,
) -> Result<DataSource> {
    let db_path = init(database_url)?;
    info!("Database path in use: {}", db_path);
    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    Ok(DataSource::live(
        Arc::new(CatalogRepository::new(Arc::clone(&pool), writer.clone())),
        Arc::new(QuoteRepository::new(pool, writer, identity)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dentquote_core::auth::{Identity, StaticIdentityProvider};
    use dentquote_core::catalog::CatalogServiceTrait;
    use dentquote_core::quotes::{QuoteBuilder, QuoteServiceTrait};
    use dentquote_core::DataMode;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_live_source_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("dentquote.db");
        let identity = Arc::new(StaticIdentityProvider::new(Some(Identity::new("op"))));
        let source = open_data_source(&url.to_string_lossy(), identity).unwrap();
        assert_eq!(source.mode, DataMode::Live);

        let catalog = source.catalog_service().list_active().await.unwrap();
        let cleaning = catalog.iter().find(|i| i.id == "1").unwrap();
        let exam = catalog.iter().find(|i| i.id == "2").unwrap();

        let mut builder = QuoteBuilder::new();
        builder.add_or_increment(cleaning);
        builder.add_or_increment(exam);
        builder.set_quantity("2", 2);
        builder.set_operational_profit(dec!(20000));
        builder.set_patient_name("Ana Gómez");
        assert_eq!(builder.grand_total(), dec!(200000));

        let service = source.quote_service();
        let quote = service
            .create_quote(builder.to_new_quote().unwrap())
            .await
            .unwrap();
        assert_eq!(quote.total, builder.grand_total());

        // A double submit of the same session does not duplicate.
        service
            .create_quote(builder.to_new_quote().unwrap())
            .await
            .unwrap();
        assert_eq!(service.list_quotes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a database file.
        let result = open_data_source(
            &dir.path().to_string_lossy(),
            Arc::new(StaticIdentityProvider::anonymous()),
        );
        assert!(matches!(result, Err(Error::BackendUnavailable(_))));
    }
}

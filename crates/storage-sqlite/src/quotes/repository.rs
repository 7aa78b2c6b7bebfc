use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use dentquote_core::auth::IdentityProviderTrait;
use dentquote_core::quotes::valuation::line_subtotal;
use dentquote_core::quotes::{NewQuote, Quote, QuoteRepositoryTrait, QuoteWithItems};
use dentquote_core::errors::ValidationError;
use dentquote_core::{Error, Result};

use super::model::{line_details, QuoteDB, QuoteItemDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{price_items, quote_items, quotes};

/// Live quote store.
///
/// Writes go through the single writer so a quote and its lines are
/// committed, or removed, as one transaction.
pub struct QuoteRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    identity: Arc<dyn IdentityProviderTrait>,
}

impl QuoteRepository {
    pub fn new(
        pool: Arc<DbPool>,
        writer: WriteHandle,
        identity: Arc<dyn IdentityProviderTrait>,
    ) -> Self {
        QuoteRepository {
            pool,
            writer,
            identity,
        }
    }

    fn find_by_token(conn: &mut SqliteConnection, token: &str) -> Result<Option<QuoteDB>> {
        quotes::table
            .filter(quotes::submission_token.eq(token))
            .select(QuoteDB::as_select())
            .first::<QuoteDB>(conn)
            .optional()
            .into_core()
    }
}

fn line_position(position: usize) -> Result<i32> {
    i32::try_from(position).map_err(|_| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "A quote cannot hold more than {} lines",
            i32::MAX
        )))
    })
}

#[async_trait]
impl QuoteRepositoryTrait for QuoteRepository {
    async fn create(&self, new_quote: NewQuote) -> Result<Quote> {
        let identity = self
            .identity
            .current_identity()
            .ok_or(Error::Unauthenticated)?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Quote> {
                if let Some(token) = new_quote.submission_token.as_deref() {
                    if let Some(existing) = Self::find_by_token(conn, token)? {
                        info!(
                            "Quote {} already committed for this submission, returning it",
                            existing.id
                        );
                        return existing.try_into();
                    }
                }

                let quote_id = Uuid::new_v4().to_string();
                let lines: Vec<QuoteItemDB> = new_quote
                    .lines
                    .iter()
                    .enumerate()
                    .map(|(position, line)| -> Result<QuoteItemDB> {
                        Ok(QuoteItemDB {
                            id: Uuid::new_v4().to_string(),
                            quote_id: quote_id.clone(),
                            price_item_id: line.price_item_id.clone(),
                            price_snapshot: line.price_snapshot.to_string(),
                            quantity: line.quantity,
                            subtotal: line_subtotal(line.price_snapshot, line.quantity)
                                .to_string(),
                            sort_order: line_position(position)?,
                        })
                    })
                    .collect::<Result<_>>()?;

                let header = QuoteDB {
                    id: quote_id,
                    patient_name: new_quote.patient_name.clone(),
                    notes: new_quote.notes.clone(),
                    total: new_quote.total().to_string(),
                    operational_profit: new_quote.operational_profit.to_string(),
                    exchange_rate: new_quote.exchange_rate.to_string(),
                    submission_token: new_quote.submission_token.clone(),
                    created_at: Utc::now().naive_utc(),
                    created_by: identity.id,
                };

                diesel::insert_into(quotes::table)
                    .values(&header)
                    .execute(conn)
                    .into_core()?;
                diesel::insert_into(quote_items::table)
                    .values(&lines)
                    .execute(conn)
                    .into_core()?;
                debug!(
                    "Inserted quote {} with {} line(s)",
                    header.id,
                    lines.len()
                );
                header.try_into()
            })
            .await
    }

    async fn get_all(&self) -> Result<Vec<Quote>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = quotes::table
            .order((quotes::created_at.desc(), quotes::id.desc()))
            .select(QuoteDB::as_select())
            .load::<QuoteDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(Quote::try_from).collect()
    }

    async fn get_by_id(&self, quote_id: &str) -> Result<QuoteWithItems> {
        let mut conn = get_connection(&self.pool)?;
        let header = quotes::table
            .find(quote_id)
            .select(QuoteDB::as_select())
            .first::<QuoteDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::NotFound(format!("Quote {}", quote_id)))?;

        let items = quote_items::table
            .inner_join(price_items::table)
            .filter(quote_items::quote_id.eq(quote_id))
            .order(quote_items::sort_order.asc())
            .select((
                QuoteItemDB::as_select(),
                price_items::name,
                price_items::group_type,
            ))
            .load::<(QuoteItemDB, String, String)>(&mut conn)
            .into_core()?
            .into_iter()
            .map(line_details)
            .collect::<Result<Vec<_>>>()?;

        Ok(QuoteWithItems {
            quote: header.try_into()?,
            items,
        })
    }

    async fn delete(&self, quote_id: &str) -> Result<()> {
        let quote_id = quote_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let lines = diesel::delete(
                    quote_items::table.filter(quote_items::quote_id.eq(&quote_id)),
                )
                .execute(conn)
                .into_core()?;
                let headers = diesel::delete(quotes::table.find(&quote_id))
                    .execute(conn)
                    .into_core()?;
                if headers == 0 {
                    return Err(Error::NotFound(format!("Quote {}", quote_id)));
                }
                debug!("Deleted quote {} and {} line(s)", quote_id, lines);
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRepository;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use dentquote_core::auth::{Identity, StaticIdentityProvider};
    use dentquote_core::catalog::{CatalogRepositoryTrait, PriceItemUpdate};
    use dentquote_core::confirmation::{ConfirmationOutcome, DeleteConfirmation};
    use dentquote_core::errors::DatabaseError;
    use dentquote_core::export::QuoteExporter;
    use dentquote_core::quotes::{NewQuoteLine, QuoteListState, QuoteService, QuoteServiceTrait};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    struct TestStore {
        quotes: QuoteRepository,
        catalog: CatalogRepository,
        pool: Arc<DbPool>,
        _dir: tempfile::TempDir,
    }

    fn create_test_store(identity: Option<Identity>) -> TestStore {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        TestStore {
            quotes: QuoteRepository::new(
                Arc::clone(&pool),
                writer.clone(),
                Arc::new(StaticIdentityProvider::new(identity)),
            ),
            catalog: CatalogRepository::new(Arc::clone(&pool), writer),
            pool,
            _dir: temp_dir,
        }
    }

    fn operator() -> Option<Identity> {
        Some(Identity::new("operator-1"))
    }

    fn reference_quote(token: Option<&str>) -> NewQuote {
        NewQuote {
            patient_name: "Ana Gómez".to_string(),
            notes: Some("Control anual".to_string()),
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
            submission_token: token.map(str::to_string),
        }
    }

    fn count_lines(pool: &DbPool) -> i64 {
        let mut conn = get_connection(pool).unwrap();
        quote_items::table
            .count()
            .get_result::<i64>(&mut conn)
            .unwrap()
    }

    #[test]
    fn test_line_position_refuses_out_of_range() {
        assert_eq!(line_position(0).unwrap(), 0);
        assert_eq!(line_position(i32::MAX as usize).unwrap(), i32::MAX);
        assert!(matches!(
            line_position(i32::MAX as usize + 1),
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
    }

    #[tokio::test]
    async fn test_round_trip_keeps_totals() {
        let store = create_test_store(operator());
        let created = store.quotes.create(reference_quote(None)).await.unwrap();
        assert_eq!(created.total, dec!(200000));
        assert_eq!(created.created_by, "operator-1");

        let stored = store.quotes.get_by_id(&created.id).await.unwrap();
        assert!(stored.verify_totals().is_ok());
        assert_eq!(stored.quote.operational_profit, dec!(20000));
        assert_eq!(stored.quote.notes.as_deref(), Some("Control anual"));
        let names: Vec<&str> = stored.items.iter().map(|l| l.item_name.as_str()).collect();
        assert_eq!(names, vec!["Limpieza dental", "Examen dental"]);
        assert_eq!(stored.items[1].item.subtotal, dec!(100000));

        let document = QuoteExporter::new().document_for(&stored);
        assert_eq!(document.total_value("Total Cotización"), Some("$ 200.000"));
    }

    #[tokio::test]
    async fn test_base_total_survives_any_rate() {
        let store = create_test_store(operator());
        for rate in [dec!(1), dec!(3500), dec!(4187.25)] {
            let mut input = reference_quote(None);
            input.exchange_rate = rate;
            let created = store.quotes.create(input).await.unwrap();
            let stored = store.quotes.get_by_id(&created.id).await.unwrap();
            assert_eq!(stored.quote.exchange_rate, rate);
            let document = QuoteExporter::new().document_for(&stored);
            assert_eq!(document.total_value("Total Cotización"), Some("$ 200.000"));
        }
    }

    #[tokio::test]
    async fn test_repeated_submission_is_stored_once() {
        let store = create_test_store(operator());
        let first = store
            .quotes
            .create(reference_quote(Some("session-1")))
            .await
            .unwrap();
        let second = store
            .quotes
            .create(reference_quote(Some("session-1")))
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.quotes.get_all().await.unwrap().len(), 1);
        assert_eq!(count_lines(&store.pool), 2);
    }

    #[tokio::test]
    async fn test_create_requires_identity() {
        let store = create_test_store(None);
        let result = store.quotes.create(reference_quote(None)).await;
        assert!(matches!(result, Err(Error::Unauthenticated)));
        assert!(store.quotes.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_line_insert_rolls_back_header() {
        let store = create_test_store(operator());
        let mut input = reference_quote(None);
        input.lines[1].price_item_id = "missing".to_string();
        let result = store.quotes.create(input).await;
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::ForeignKeyViolation(_)))
        ));
        assert!(store.quotes.get_all().await.unwrap().is_empty());
        assert_eq!(count_lines(&store.pool), 0);
    }

    #[tokio::test]
    async fn test_snapshot_ignores_later_catalog_edits() {
        let store = create_test_store(operator());
        let created = store.quotes.create(reference_quote(None)).await.unwrap();

        store
            .catalog
            .update(
                "1",
                PriceItemUpdate {
                    price: Some(dec!(95000)),
                    name: Some("Limpieza profunda".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store.catalog.soft_delete("2").await.unwrap();

        let stored = store.quotes.get_by_id(&created.id).await.unwrap();
        assert_eq!(stored.items[0].item.price_snapshot, dec!(80000));
        assert_eq!(stored.items[0].item_name, "Limpieza profunda");
        assert_eq!(stored.items.len(), 2);
        assert_eq!(stored.quote.total, dec!(200000));
        assert!(stored.verify_totals().is_ok());
    }

    #[tokio::test]
    async fn test_delete_removes_lines_and_header() {
        let store = create_test_store(operator());
        let created = store.quotes.create(reference_quote(None)).await.unwrap();
        assert_eq!(count_lines(&store.pool), 2);

        store.quotes.delete(&created.id).await.unwrap();
        assert_eq!(count_lines(&store.pool), 0);
        assert!(matches!(
            store.quotes.get_by_id(&created.id).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            store.quotes.delete(&created.id).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_confirmed_delete_and_reload() {
        let store = create_test_store(operator());
        let service = QuoteService::new(Arc::new(store.quotes));
        let keep = service.create_quote(reference_quote(Some("a"))).await.unwrap();
        let target = service.create_quote(reference_quote(Some("b"))).await.unwrap();

        let mut list = QuoteListState::new();
        assert_eq!(list.reload(&service).await.len(), 2);

        let mut dialog = DeleteConfirmation::new();
        dialog.open(target.id.clone(), target.patient_name.clone());
        dialog.input("ELIMINAR");
        assert_eq!(
            dialog.confirm(&service).await,
            ConfirmationOutcome::Deleted {
                quote_id: target.id.clone()
            }
        );

        let remaining = list.reload(&service).await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = create_test_store(operator());
        let older = store.quotes.create(reference_quote(None)).await.unwrap();
        let mut input = reference_quote(None);
        input.patient_name = "Luis Ortiz".to_string();
        input.operational_profit = Decimal::ZERO;
        let newer = store.quotes.create(input).await.unwrap();

        let all = store.quotes.get_all().await.unwrap();
        assert_eq!(all[0].id, newer.id);
        assert_eq!(all[1].id, older.id);
        assert_eq!(all[0].total, dec!(180000));
    }
}

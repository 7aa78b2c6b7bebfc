use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use dentquote_core::catalog::{
    CatalogRepositoryTrait, GroupType, NewPriceItem, PriceItem, PriceItemUpdate,
};
use dentquote_core::{Error, Result};

use super::model::PriceItemDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::price_items;

pub struct CatalogRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CatalogRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CatalogRepository { pool, writer }
    }

    fn load_active(&self, group_type: Option<GroupType>) -> Result<Vec<PriceItem>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = price_items::table
            .filter(price_items::is_active.eq(true))
            .into_boxed();
        if let Some(group_type) = group_type {
            query = query.filter(price_items::group_type.eq(group_type.as_str()));
        }
        let rows = query
            .order((price_items::group_type.asc(), price_items::name.asc()))
            .select(PriceItemDB::as_select())
            .load::<PriceItemDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(PriceItem::try_from).collect()
    }
}

fn find_price_item(conn: &mut SqliteConnection, price_item_id: &str) -> Result<PriceItemDB> {
    price_items::table
        .find(price_item_id)
        .select(PriceItemDB::as_select())
        .first::<PriceItemDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::NotFound(format!("Price item {}", price_item_id)))
}

#[async_trait]
impl CatalogRepositoryTrait for CatalogRepository {
    async fn list_active(&self) -> Result<Vec<PriceItem>> {
        self.load_active(None)
    }

    async fn list_by_group_type(&self, group_type: GroupType) -> Result<Vec<PriceItem>> {
        self.load_active(Some(group_type))
    }

    async fn get_by_id(&self, price_item_id: &str) -> Result<PriceItem> {
        let mut conn = get_connection(&self.pool)?;
        find_price_item(&mut conn, price_item_id)?.try_into()
    }

    async fn create(&self, new_item: NewPriceItem) -> Result<PriceItem> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PriceItem> {
                let row = PriceItemDB::from_new(
                    Uuid::new_v4().to_string(),
                    new_item,
                    Utc::now().naive_utc(),
                );
                diesel::insert_into(price_items::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                debug!("Inserted catalog entry {}", row.id);
                row.try_into()
            })
            .await
    }

    async fn update(&self, price_item_id: &str, update: PriceItemUpdate) -> Result<PriceItem> {
        let price_item_id = price_item_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PriceItem> {
                let existing: PriceItem = find_price_item(conn, &price_item_id)?.try_into()?;
                let updated = update.apply_to(&existing, Utc::now());
                diesel::update(price_items::table.find(&price_item_id))
                    .set((
                        price_items::name.eq(&updated.name),
                        price_items::price.eq(updated.price.to_string()),
                        price_items::group_type.eq(updated.group_type.as_str()),
                        price_items::is_active.eq(updated.is_active),
                        price_items::updated_at.eq(updated.updated_at.naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                Ok(updated)
            })
            .await
    }

    async fn soft_delete(&self, price_item_id: &str) -> Result<()> {
        let price_item_id = price_item_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::update(price_items::table.find(&price_item_id))
                    .set((
                        price_items::is_active.eq(false),
                        price_items::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("Price item {}", price_item_id)));
                }
                Ok(())
            })
            .await
    }
}

//! Catalog module - priced services offered by the practice.

mod catalog_model;
mod catalog_service;
mod catalog_traits;

pub use catalog_model::{GroupType, NewPriceItem, PriceItem, PriceItemUpdate};
pub use catalog_service::CatalogService;
pub use catalog_traits::{CatalogRepositoryTrait, CatalogServiceTrait};

mod model;
mod repository;

pub use model::PriceItemDB;
pub use repository::CatalogRepository;

mod model;
mod repository;

pub use model::{QuoteDB, QuoteItemDB};
pub use repository::QuoteRepository;

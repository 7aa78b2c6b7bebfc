//! Quotes module - building, valuing, committing and displaying patient
//! quotes.

mod quote_builder;
mod quote_list;
mod quote_view;
mod quotes_model;
mod quotes_service;
mod quotes_traits;
pub mod valuation;


pub use quote_builder::{QuoteBuilder, QuoteLineSelection};
pub use quote_list::QuoteListState;
pub use quote_view::{QuoteDetailView, QuoteLineView, DISPLAY_DATE_FORMAT};
pub use quotes_model::{
    NewQuote, NewQuoteLine, Quote, QuoteLineItem, QuoteLineItemDetails, QuoteWithItems,
};
pub use quotes_service::QuoteService;
pub use quotes_traits::{QuoteRepositoryTrait, QuoteServiceTrait};

use log::error;

use super::quotes_model::Quote;
use super::quotes_traits::QuoteServiceTrait;
use crate::Error;

/// State behind the quote list view.
///
/// `reload` is the only way the list refreshes: after the initial load and
/// after a successful delete.
#[derive(Debug, Default)]
pub struct QuoteListState {
    quotes: Vec<Quote>,
    last_error: Option<Error>,
    loaded: bool,
}

impl QuoteListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-fetches the list. On failure the previous list is kept and the
    /// error is recorded for display.
    pub async fn reload(&mut self, service: &dyn QuoteServiceTrait) -> &[Quote] {
        match service.list_quotes().await {
            Ok(quotes) => {
                self.quotes = quotes;
                self.last_error = None;
                self.loaded = true;
            }
            Err(e) => {
                error!("Failed to load quotes: {}", e);
                self.last_error = Some(e);
            }
        }
        &self.quotes
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

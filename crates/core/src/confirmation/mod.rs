//! Confirmation gate for destructive actions.
//!
//! A delete only runs after the operator has typed the confirmation phrase
//! exactly. The state machine is:
//!
//! ```text
//! Idle --open--> AwaitingConfirmation --begin_confirm--> Confirming
//!   ^                 |  ^                                  |
//!   +-----close-------+  +-------finish(Err)----------------+
//!   ^                                                       |
//!   +------------------------finish(Ok)---------------------+
//! ```

use log::{debug, warn};
use serde::Serialize;

use crate::constants::DELETE_CONFIRMATION_PHRASE;
use crate::quotes::QuoteServiceTrait;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfirmationState {
    Idle,
    AwaitingConfirmation,
    Confirming,
}

/// What happened to a confirmed delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    /// The quote is gone; the caller should reload its list.
    Deleted { quote_id: String },
    /// The delete failed; the dialog stays open with the message.
    Failed { message: String },
    /// Nothing ran: the dialog was not ready to confirm.
    NotReady,
}

#[derive(Debug, Clone)]
pub struct DeleteConfirmation {
    state: ConfirmationState,
    target_id: Option<String>,
    target_label: Option<String>,
    input: String,
    error: Option<String>,
}

impl Default for DeleteConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

impl DeleteConfirmation {
    pub fn new() -> Self {
        Self {
            state: ConfirmationState::Idle,
            target_id: None,
            target_label: None,
            input: String::new(),
            error: None,
        }
    }

    /// Opens the dialog for one quote. Ignored unless idle.
    pub fn open(&mut self, quote_id: impl Into<String>, patient_name: impl Into<String>) {
        if self.state != ConfirmationState::Idle {
            return;
        }
        self.state = ConfirmationState::AwaitingConfirmation;
        self.target_id = Some(quote_id.into());
        self.target_label = Some(patient_name.into());
        self.input.clear();
        self.error = None;
    }

    pub fn input(&mut self, text: impl Into<String>) {
        if self.state == ConfirmationState::AwaitingConfirmation {
            self.input = text.into();
        }
    }

    /// True only when the typed text is the phrase, byte for byte.
    pub fn can_confirm(&self) -> bool {
        self.state == ConfirmationState::AwaitingConfirmation
            && self.input == DELETE_CONFIRMATION_PHRASE
    }

    /// Moves to `Confirming` and hands back the id to delete. A message left
    /// by a previous attempt is cleared.
    pub fn begin_confirm(&mut self) -> Option<String> {
        if !self.can_confirm() {
            return None;
        }
        self.state = ConfirmationState::Confirming;
        self.error = None;
        self.target_id.clone()
    }

    /// Records the result of the delete started by `begin_confirm`.
    pub fn finish(&mut self, result: Result<()>) -> ConfirmationOutcome {
        if self.state != ConfirmationState::Confirming {
            return ConfirmationOutcome::NotReady;
        }
        match result {
            Ok(()) => {
                let quote_id = self.target_id.clone().unwrap_or_default();
                self.reset();
                ConfirmationOutcome::Deleted { quote_id }
            }
            Err(e) => {
                let message = e.to_string();
                self.state = ConfirmationState::AwaitingConfirmation;
                self.error = Some(message.clone());
                ConfirmationOutcome::Failed { message }
            }
        }
    }

    /// Runs the delete through the service if the phrase was typed.
    pub async fn confirm(&mut self, service: &dyn QuoteServiceTrait) -> ConfirmationOutcome {
        let Some(quote_id) = self.begin_confirm() else {
            debug!("Delete confirmation attempted without the confirmation phrase");
            return ConfirmationOutcome::NotReady;
        };
        let result = service.delete_quote(&quote_id).await;
        if let Err(e) = &result {
            warn!("Delete of quote {} failed: {}", quote_id, e);
        }
        self.finish(result)
    }

    /// Dismisses the dialog. Ignored while a delete is in flight.
    pub fn close(&mut self) {
        if self.state == ConfirmationState::Confirming {
            return;
        }
        self.reset();
    }

    pub fn state(&self) -> ConfirmationState {
        self.state
    }

    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    pub fn target_label(&self) -> Option<&str> {
        self.target_label.as_deref()
    }

    pub fn current_input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

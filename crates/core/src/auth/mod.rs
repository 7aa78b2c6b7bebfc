//! Auth collaborator seam.
//!
//! Session management lives outside this crate; the quote gateway only asks
//! who is operating right now.

use serde::{Deserialize, Serialize};

/// The authenticated operator creating quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }
}

/// Trait answering "current identity or none".
pub trait IdentityProviderTrait: Send + Sync {
    fn current_identity(&self) -> Option<Identity>;
}

/// Identity provider backed by a value fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    identity: Option<Identity>,
}

impl StaticIdentityProvider {
    pub fn new(identity: Option<Identity>) -> Self {
        Self { identity }
    }

    pub fn anonymous() -> Self {
        Self { identity: None }
    }
}

impl IdentityProviderTrait for StaticIdentityProvider {
    fn current_identity(&self) -> Option<Identity> {
        self.identity.clone()
    }
}

//! Who is using the CLI.
//!
//! The store only ever sees a user id; this module decides which one.

pub mod client;

use crate::state::State;
use anyhow::Result;
use std::path::PathBuf;

pub use client::{ClerkClient, IdentityUser};

pub trait IdentityProvider {
    /// Id of the signed-in user, `None` when signed out.
    fn current_user_id(&self) -> Result<Option<String>>;
}

/// Identity backed by the session persisted in the state file
pub struct SessionIdentity {
    state_path: PathBuf,
}

impl SessionIdentity {
    pub fn new(state_path: PathBuf) -> Self {
        Self { state_path }
    }
}

impl IdentityProvider for SessionIdentity {
    fn current_user_id(&self) -> Result<Option<String>> {
        // Read-only: a stale read is fine, no lock needed
        let state = State::load(&self.state_path)?;
        Ok(state.session.map(|s| s.user_id))
    }
}

/// Fixed identity, for embedding and tests
pub struct StaticIdentity(pub Option<String>);

impl IdentityProvider for StaticIdentity {
    fn current_user_id(&self) -> Result<Option<String>> {
        Ok(self.0.clone())
    }
}

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::IdentityProvider;
use crate::models::Identity;
use crate::storage::{Storage, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

/// Holds the signed-in identity, mirrored into durable storage under one key.
pub struct SessionStore {
    identity: Option<Identity>,
    storage: Arc<dyn Storage>,
    key: String,
}

impl SessionStore {
    /// A store that starts unauthenticated; call [`SessionStore::restore`] to
    /// pick up a persisted session.
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            identity: None,
            storage,
            key: key.into(),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn state(&self) -> SessionState {
        match self.identity {
            Some(_) => SessionState::Authenticated,
            None => SessionState::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Sets the current identity and overwrites the stored copy.
    ///
    /// The in-memory session is updated even when persisting fails; the
    /// error only means the next process start will not see it.
    pub fn login(&mut self, identity: Identity) -> Result<(), StorageError> {
        info!(
            event_name = "session.login",
            event_domain = "session",
            sub = identity.sub.as_str(),
            "session authenticated"
        );
        let serialized = identity.to_stored()?;
        self.identity = Some(identity);
        self.storage.set(&self.key, &serialized)
    }

    /// Clears the identity and the stored copy. Safe to call when signed out.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        if let Some(identity) = self.identity.take() {
            info!(
                event_name = "session.logout",
                event_domain = "session",
                sub = identity.sub.as_str(),
                "session cleared"
            );
        }
        self.storage.remove(&self.key)
    }

    /// Rehydrates the session from storage. Anything missing, unreadable or
    /// malformed leaves the store unauthenticated without an error.
    pub fn restore(&mut self) -> SessionState {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored session under '{}'", self.key);
                return self.state();
            }
            Err(e) => {
                warn!("Could not read stored session: {}", e);
                return self.state();
            }
        };

        match Identity::from_stored(&raw) {
            Ok(identity) => {
                debug!(
                    event_name = "session.restore",
                    event_domain = "session",
                    sub = identity.sub.as_str(),
                    "restoring stored session"
                );
                if let Err(e) = self.login(identity) {
                    warn!("Restored session could not be written back: {}", e);
                }
            }
            Err(e) => warn!("Ignoring stored session: {}", e),
        }
        self.state()
    }

    /// Runs the provider's sign-in flow and logs in with the decoded token.
    ///
    /// A provider that yields nothing, or a token that does not decode, is a
    /// no-op: the session keeps whatever state it had. Only a storage failure
    /// is reported.
    pub async fn sign_in(
        &mut self,
        provider: &dyn IdentityProvider,
    ) -> Result<SessionState, StorageError> {
        let Some(token) = provider.sign_in().await else {
            info!("Provider '{}' returned no token", provider.get_name());
            return Ok(self.state());
        };

        match Identity::from_id_token(&token) {
            Ok(identity) => self.login(identity)?,
            Err(e) => warn!(
                "Provider '{}' returned an undecodable token: {}",
                provider.get_name(),
                e
            ),
        }
        Ok(self.state())
    }
}

//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards and user-aware views (header menu, comment box, recipe form)
//! read the current `Session` and call the four mutating operations here.
//! Nothing else writes the session key in the durable store.
//!
//! DESIGN
//! ======
//! The session moves `Restoring -> Authenticated | Unauthenticated` once at
//! startup, then only on explicit sign-in/sign-up/sign-out calls. State is
//! published through a `watch` channel so consumers observe every mutation
//! and always see the latest value.
//!
//! TRADE-OFFS
//! ==========
//! Sign-in and sign-up persist before touching memory: a failed write leaves
//! the previous session in place. Sign-out clears memory first and still
//! reports a failed removal, so a signed-out user never stays signed in.
//!
//! Mutating operations take `&mut self` even though `watch::Sender` only needs
//! `&self`: one owner drives the session, and the borrow checker serializes
//! restore and the sign-in/out calls without a lock.

use tokio::sync::watch;

use crate::config::SessionConfig;
use crate::identity::Identity;
use crate::store::{self, KeyValueStore, StoreError};
use crate::verifier::{AuthError, IdentityVerifier, MockVerifier};

/// Current identity and restoration flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub identity: Option<Identity>,
    pub loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self { identity: None, loading: true }
    }
}

impl Session {
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match (&self.identity, self.loading) {
            (_, true) => SessionPhase::Restoring,
            (Some(_), false) => SessionPhase::Authenticated,
            (None, false) => SessionPhase::Unauthenticated,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Restoring,
    Unauthenticated,
    Authenticated,
}

/// True once restoration has finished and nobody is signed in.
#[must_use]
pub fn should_redirect_unauth(session: &Session) -> bool {
    !session.loading && session.identity.is_none()
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("failed to persist session: {0}")]
    Persistence(#[from] StoreError),
    #[error("session restore has not completed")]
    RestorePending,
    #[error("sign in required")]
    SignInRequired,
}

// =============================================================================
// SESSION MANAGER
// =============================================================================

pub struct SessionManager<S, V = MockVerifier> {
    store: S,
    verifier: V,
    session_key: String,
    state: watch::Sender<Session>,
}

impl SessionManager<Box<dyn KeyValueStore>, MockVerifier> {
    /// Build the demo manager described by `config`: its durable store,
    /// session key, and placeholder account.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.open_store(), config.demo_verifier(), config.session_key.clone())
    }
}

impl<S, V> SessionManager<S, V>
where
    S: KeyValueStore,
    V: IdentityVerifier,
{
    /// Create a manager in the `Restoring` phase. Call [`Self::restore`]
    /// before accepting any other operation.
    #[must_use]
    pub fn new(store: S, verifier: V, session_key: impl Into<String>) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self { store, verifier, session_key: session_key.into(), state }
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn current_session(&self) -> Session {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase()
    }

    /// Receiver that observes every session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    /// Repopulate the session from the durable store.
    ///
    /// Reads the session key once. A missing, unreadable, or malformed entry
    /// leaves the user signed out. Runs only once per manager; later calls
    /// return without touching the store.
    pub fn restore(&mut self) {
        if !self.state.borrow().loading {
            tracing::debug!(key = %self.session_key, "session already restored");
            return;
        }

        let identity = match store::load_json::<Identity, _>(&self.store, &self.session_key) {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(key = %self.session_key, error = %e, "ignoring unreadable persisted session");
                None
            }
        };

        match &identity {
            Some(identity) => tracing::info!(user_id = %identity.id, "session restored"),
            None => tracing::debug!("no persisted session"),
        }
        self.state.send_replace(Session { identity, loading: false });
    }

    /// Sign in with `email` and `password`, replacing any current identity.
    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<Identity, SessionError> {
        self.ensure_restored()?;
        let identity = self.verifier.verify(email, password)?;
        self.establish(identity)
    }

    /// Create an account and sign in as it, replacing any current identity.
    pub fn sign_up(&mut self, name: &str, email: &str, password: &str) -> Result<Identity, SessionError> {
        self.ensure_restored()?;
        let identity = self.verifier.register(name, email, password)?;
        self.establish(identity)
    }

    /// Clear the identity and remove it from the durable store. Signing out
    /// while signed out is a no-op with the same end state.
    pub fn sign_out(&mut self) -> Result<(), SessionError> {
        self.ensure_restored()?;

        let previous = self.state.send_replace(Session { identity: None, loading: false });
        if let Some(identity) = previous.identity {
            tracing::info!(user_id = %identity.id, "signed out");
        }

        self.store.remove(&self.session_key).map_err(|e| {
            tracing::warn!(key = %self.session_key, error = %e, "failed to remove persisted session");
            SessionError::from(e)
        })
    }

    /// The signed-in identity, for views that only work with a user.
    pub fn require_identity(&self) -> Result<Identity, SessionError> {
        let state = self.state.borrow();
        if state.loading {
            return Err(SessionError::RestorePending);
        }
        state.identity.clone().ok_or(SessionError::SignInRequired)
    }

    fn ensure_restored(&self) -> Result<(), SessionError> {
        if self.state.borrow().loading {
            return Err(SessionError::RestorePending);
        }
        Ok(())
    }

    fn establish(&mut self, identity: Identity) -> Result<Identity, SessionError> {
        if let Err(e) = store::save_json(&self.store, &self.session_key, &identity) {
            tracing::warn!(key = %self.session_key, error = %e, "failed to persist session");
            return Err(e.into());
        }
        tracing::info!(user_id = %identity.id, "signed in");
        self.state.send_replace(Session { identity: Some(identity.clone()), loading: false });
        Ok(identity)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

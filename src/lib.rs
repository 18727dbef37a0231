//! Session core for the recipebox front-end.
//!
//! SYSTEM CONTEXT
//! ==============
//! Recipe, contest, and dashboard views are leaf consumers: they read the
//! current `Session` and call `SessionManager` operations. Everything with
//! lifecycle or persistence semantics lives here.

pub mod config;
pub mod identity;
pub mod session;
pub mod store;
pub mod verifier;

pub use config::SessionConfig;
pub use identity::Identity;
pub use session::{Session, SessionError, SessionManager, SessionPhase, should_redirect_unauth};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use verifier::{AuthError, IdentityVerifier, MockVerifier};

//! Identity verification capability.
//!
//! DESIGN
//! ======
//! `SessionManager` never inspects credentials itself. A real identity
//! provider plugs in behind `IdentityVerifier` and reports failures as
//! `AuthError`; the demo build uses `MockVerifier`, which accepts anything.

use crate::identity::Identity;

pub const DEFAULT_DEMO_USER_ID: &str = "user-1";
pub const DEFAULT_DEMO_USER_NAME: &str = "Demo User";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Turns submitted credentials into an identity.
pub trait IdentityVerifier {
    /// Check `email`/`password` and return the matching identity.
    fn verify(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Create an account and return its identity.
    ///
    /// The default verifies the credentials and takes the display name from
    /// the sign-up form.
    fn register(&self, name: &str, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = self.verify(email, password)?;
        Ok(Identity { name: name.to_owned(), ..identity })
    }
}

/// Accepts every credential pair and returns a fixed placeholder account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockVerifier {
    pub user_id: String,
    pub user_name: String,
}

impl MockVerifier {
    #[must_use]
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), user_name: user_name.into() }
    }
}

impl Default for MockVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_DEMO_USER_ID, DEFAULT_DEMO_USER_NAME)
    }
}

impl IdentityVerifier for MockVerifier {
    fn verify(&self, email: &str, _password: &str) -> Result<Identity, AuthError> {
        Ok(Identity::new(self.user_id.clone(), self.user_name.clone(), email))
    }
}

#[cfg(test)]
#[path = "verifier_test.rs"]
mod tests;

//! Signed-in user identity and its persisted JSON form.

/// The record identifying a signed-in user.
///
/// Persisted as a JSON object under the session key. `id`, `name`, and
/// `email` are required on read, so a stored value either yields a complete
/// identity or none at all.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), email: email.into(), image: None }
    }

    /// Attach an avatar image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// First character of the display name, used as the avatar fallback.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;

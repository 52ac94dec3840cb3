//! Authenticated user identity supplied by the session layer.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// User id plus bearer credential.
///
/// The token is wrapped in [`SecretString`] so it never shows up in `Debug`
/// output or log fields.
pub struct Identity {
    user_id: String,
    token: SecretString,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: SecretString::from(token.into()),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }
}

impl Clone for Identity {
    fn clone(&self) -> Self {
        Self::new(self.user_id.clone(), self.token.expose_secret().to_string())
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("user_id", &self.user_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

//! Request DTOs for the cache REST API
//!
//! Defines the structure of incoming query strings and form bodies.

use serde::Deserialize;

/// Query string carrying the target key (`?key=...`)
///
/// SET also accepts the value as a query parameter when the body carries
/// neither JSON nor a form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyQuery {
    /// The cache key; absent when the parameter is missing
    #[serde(default)]
    pub key: Option<String>,
    /// Plain string value for SET
    #[serde(default)]
    pub value: Option<String>,
}

impl KeyQuery {
    /// Returns the key if present and non-empty.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref().filter(|key| !key.is_empty())
    }

    /// Returns the value parameter if present and non-empty.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|value| !value.is_empty())
    }
}

/// Form body for SET when the client does not send JSON (`value=...`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetForm {
    /// The value to store, as a plain string
    #[serde(default)]
    pub value: Option<String>,
}

impl SetForm {
    /// Returns the value if present and non-empty.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|value| !value.is_empty())
    }
}

//! Email Address Value Object
//!
//! Immutable, validated at construction; the rest of the crate never
//! touches a raw address string.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Validated email address, trimmed and lowercased.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("email address is empty")]
    Empty,
    #[error("email address is malformed")]
    InvalidFormat,
}

impl EmailAddress {
    pub fn new(value: impl Into<String>) -> Result<Self, EmailError> {
        let value = value.into().trim().to_lowercase();

        if value.is_empty() {
            return Err(EmailError::Empty);
        }
        if !Self::is_valid_format(&value) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid_format(email: &str) -> bool {
        // local@domain, domain carries at least one interior dot
        let mut parts = email.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            }
            _ => false,
        }
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

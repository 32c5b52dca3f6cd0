use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Addressable identity on the messaging transport, in `<localpart>@<domain>` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SenderId(String);

/// Rejected sender identity
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sender identity: {0:?}")]
pub struct InvalidSenderId(pub String);

impl SenderId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidSenderId> {
        let raw = raw.into();
        let valid = match raw.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !raw.chars().any(char::is_whitespace)
            }
            None => false,
        };

        if valid {
            Ok(Self(raw))
        } else {
            Err(InvalidSenderId(raw))
        }
    }

    /// The part before `@`
    pub fn localpart(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }

    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SenderId {
    type Err = InvalidSenderId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SenderId {
    type Error = InvalidSenderId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SenderId> for String {
    fn from(id: SenderId) -> Self {
        id.0
    }
}

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

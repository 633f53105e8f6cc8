//! Member ID - the identity-provider subject a member logs in with
//!
//! Providers hand out numeric subjects (Kakao) but the value is opaque to us,
//! so it is stored and compared as a string. JSON input may carry it either
//! as a string or as a bare integer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Stable member identifier (OAuth subject)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(String);

impl MemberId {
    /// Maximum accepted length for a subject
    pub const MAX_LEN: usize = 64;

    /// Create a MemberId, trimming surrounding whitespace
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.len() == id.len() {
            Self(id)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Parse and validate a subject coming from an untrusted source
    pub fn parse(s: &str) -> Result<Self, MemberIdParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MemberIdParseError::Empty);
        }
        if s.len() > Self::MAX_LEN {
            return Err(MemberIdParseError::TooLong);
        }
        if s.chars().any(char::is_control) {
            return Err(MemberIdParseError::InvalidCharacter);
        }
        Ok(Self(s.to_string()))
    }

    /// Borrow the inner string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Error when parsing a MemberId
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MemberIdParseError {
    #[error("member id is empty")]
    Empty,

    #[error("member id is too long")]
    TooLong,

    #[error("member id contains control characters")]
    InvalidCharacter,
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MemberId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<i64> for MemberId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for MemberId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for MemberId {
    type Err = MemberIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MemberId::parse(s)
    }
}

impl Serialize for MemberId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

// Deserialize from string or number
impl<'de> Deserialize<'de> for MemberId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct MemberIdVisitor;

        impl Visitor<'_> for MemberIdVisitor {
            type Value = MemberId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer member id")
            }

            fn visit_i64<E>(self, value: i64) -> Result<MemberId, E>
            where
                E: de::Error,
            {
                Ok(MemberId(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<MemberId, E>
            where
                E: de::Error,
            {
                Ok(MemberId(value.to_string()))
            }

            fn visit_str<E>(self, value: &str) -> Result<MemberId, E>
            where
                E: de::Error,
            {
                MemberId::parse(value).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(MemberIdVisitor)
    }
}

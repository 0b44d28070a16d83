//! Server-side date stamps.
//!
//! Documents carry creation, modification and publication dates that are
//! written by the server, never by the submitter. A `ServerDate` is a UTC
//! instant with second precision, serialized as RFC 3339.

use chrono::{DateTime, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A UTC instant stamped by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerDate(DateTime<Utc>);

impl ServerDate {
    /// Creates a date stamp at the current time, truncated to whole seconds.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(0))
    }

    /// Creates a date stamp from seconds since the Unix epoch.
    pub fn from_unix(secs: i64) -> crate::Result<Self> {
        Utc.timestamp_opt(secs, 0)
            .single()
            .map(Self)
            .ok_or_else(|| crate::Error::InvalidDate(format!("timestamp out of range: {secs}")))
    }

    /// Parses an RFC 3339 date string.
    pub fn parse(s: &str) -> crate::Result<Self> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| crate::Error::InvalidDate(format!("{s}: {e}")))
    }

    /// Seconds since the Unix epoch.
    #[must_use]
    pub fn unix_timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    /// Returns the underlying chrono value.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl Default for ServerDate {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for ServerDate {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for ServerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl FromStr for ServerDate {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

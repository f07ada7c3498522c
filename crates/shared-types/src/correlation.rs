//! Correlation ID for pairing bridge replies with the calls that caused them.
//!
//! Uses UUID v7 so IDs minted by one process never collide and sort by
//! creation time in logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque per-call token carried as `callbackId` on the wire.
///
/// The host treats it as an uninterpreted string and echoes it back with
/// the reply. On our side it is the key of the pending-call table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    /// Mint a fresh correlation ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse the string form the host echoes back.
    ///
    /// Returns `None` for anything that is not one of our IDs; callers treat
    /// that exactly like an unknown ID.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for CorrelationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl From<Uuid> for CorrelationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Category of state a store instance is responsible for.
///
/// Stores declare their categories so a host can route each kind of state to
/// the backend that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreType {
    /// Deployment topology and runtime state.
    Deployment,
    /// Deployment logs.
    Log,
    /// Deployment events.
    Event,
}

impl StoreType {
    /// All known store categories.
    pub const ALL: [StoreType; 3] = [StoreType::Deployment, StoreType::Log, StoreType::Event];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreType::Deployment => "deployment",
            StoreType::Log => "log",
            StoreType::Event => "event",
        }
    }
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StoreType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownStoreType(s.to_string()))
    }
}

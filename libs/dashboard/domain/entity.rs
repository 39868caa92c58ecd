//! Trading entities (locations)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of locations, `All` stands for the aggregate view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    #[default]
    All,
    Zurich,
    NewYork,
}

/// Order of the entity selector
pub const ENTITY_OPTIONS: [Entity; 3] = [Entity::All, Entity::Zurich, Entity::NewYork];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid entity '{0}' (use 'zurich' or 'new_york')")]
pub struct ParseEntityError(pub String);

impl Entity {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::All => "all",
            Entity::Zurich => "zurich",
            Entity::NewYork => "new_york",
        }
    }

    /// Selector label
    pub fn label(&self) -> &'static str {
        match self {
            Entity::All => "All",
            Entity::Zurich => "Zurich",
            Entity::NewYork => "New York",
        }
    }

    /// Value for an `entity` query parameter, `None` means no filter
    pub fn filter(&self) -> Option<&'static str> {
        match self {
            Entity::All => None,
            other => Some(other.as_str()),
        }
    }

    /// Next option in selector order, wrapping around
    pub fn next(&self) -> Entity {
        let index = ENTITY_OPTIONS.iter().position(|e| e == self).unwrap_or(0);
        ENTITY_OPTIONS[(index + 1) % ENTITY_OPTIONS.len()]
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = ParseEntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Entity::All),
            "zurich" => Ok(Entity::Zurich),
            "new_york" => Ok(Entity::NewYork),
            other => Err(ParseEntityError(other.to_string())),
        }
    }
}

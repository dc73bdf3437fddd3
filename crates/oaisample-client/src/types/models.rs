//! Model listing types.

use serde::{Deserialize, Serialize};

/// A model available to the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    #[serde(default)]
    pub object: String,
    /// Unix timestamp (seconds).
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub owned_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub object: String,
    pub data: Vec<Model>,
}

impl ModelList {
    /// Model ids in ascending order.
    pub fn sorted_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.data.iter().map(|m| m.id.as_str()).collect();
        ids.sort_unstable();
        ids
    }
}

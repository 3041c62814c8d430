//! Location Model

use serde::{Deserialize, Serialize};

/// Restaurant branch owned by an operator (read-only on the dashboard)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
}

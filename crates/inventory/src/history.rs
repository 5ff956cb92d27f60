use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, HistoryEntryId, ProductId};

/// Direction of a stock change; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChangeType {
    Increase,
    Decrease,
    Other(String),
}

impl ChangeType {
    pub fn as_str(&self) -> &str {
        match self {
            ChangeType::Increase => "INCREASE",
            ChangeType::Decrease => "DECREASE",
            ChangeType::Other(s) => s,
        }
    }

    /// Timeline marker.
    pub fn symbol(&self) -> char {
        match self {
            ChangeType::Increase => '+',
            ChangeType::Decrease => '-',
            ChangeType::Other(_) => '•',
        }
    }
}

impl From<String> for ChangeType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "INCREASE" => ChangeType::Increase,
            "DECREASE" => ChangeType::Decrease,
            _ => ChangeType::Other(s),
        }
    }
}

impl From<ChangeType> for String {
    fn from(c: ChangeType) -> Self {
        c.as_str().to_string()
    }
}

/// One entry of an inventory change log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryEntryId,
    /// Present on global log entries; per-product history omits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    pub change_type: ChangeType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub changed_by: String,
    #[serde(default)]
    pub formatted_timestamp: String,
}

impl Entity for HistoryEntry {
    type Id = HistoryEntryId;

    fn id(&self) -> HistoryEntryId {
        self.id
    }
}

/// Body of `GET /inventory/{id}/history`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

use serde::{Deserialize, Serialize};

/// Result of a bulk CSV import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub added: u64,
    pub skipped: u64,
}

impl core::fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Added: {}, Skipped: {}", self.added, self.skipped)
    }
}

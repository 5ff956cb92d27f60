//! Inventory change-log module.
//!
//! Types for the per-product history timeline, the global change log and
//! bulk CSV import results, as the backend reports them. No IO.

pub mod history;
pub mod import;

pub use history::{ChangeType, HistoryEntry, HistoryResponse};
pub use import::ImportSummary;

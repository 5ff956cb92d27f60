//! Turns any failed Gateway call into one human-readable message.

use crate::error::GatewayError;

/// A controller-level operation, carrying its generic failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    FetchOne,
    Search,
    Create,
    Update,
    Delete,
    Import,
    Export,
    History,
    Log,
    Stats,
    Health,
}

impl Operation {
    pub fn fallback(&self) -> &'static str {
        match self {
            Operation::Fetch => "Failed to fetch products",
            Operation::FetchOne => "Failed to fetch product",
            Operation::Search => "Failed to search products",
            Operation::Create => "Failed to create product",
            Operation::Update => "Failed to update product",
            Operation::Delete => "Failed to delete product",
            Operation::Import => "Failed to import products",
            Operation::Export => "Failed to export products",
            Operation::History => "Failed to fetch inventory history",
            Operation::Log => "Failed to fetch inventory log",
            Operation::Stats => "Failed to fetch inventory stats",
            Operation::Health => "Failed to check inventory health",
        }
    }
}

/// Pick the message shown to the user.
///
/// Precedence: the backend's structured `error` field, then the
/// transport-level message, then the operation's fallback. Never fails.
pub fn normalize(err: &GatewayError, operation: Operation) -> String {
    let message = match err {
        GatewayError::Remote {
            error: Some(error), ..
        } => Some(error.clone()),
        GatewayError::Remote { .. } | GatewayError::Transport { .. } => Some(err.to_string()),
        GatewayError::Decode(_) | GatewayError::Build(_) => None,
    };

    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| operation.fallback().to_string())
}

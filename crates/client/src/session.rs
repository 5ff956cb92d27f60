//! Session-level state the UI observes.

use serde::Serialize;

/// Backend reachability, decided once per session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Untested,
    Testing,
    Connected,
    Failed,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Untested => "untested",
            ConnectionState::Testing => "testing",
            ConnectionState::Connected => "connected",
            ConnectionState::Failed => "failed",
        }
    }

    /// `Connected` and `Failed` are never left.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConnectionState::Connected | ConnectionState::Failed)
    }
}

impl core::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shown for the whole session once the probe fails.
pub const CONNECTIVITY_ERROR: &str =
    "Cannot connect to backend server. Please make sure the backend is running.";

/// Snapshot of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub(crate) connection: ConnectionState,
    pub(crate) fetches_in_flight: usize,
    pub(crate) connectivity_error: Option<String>,
    pub(crate) fetch_error: Option<String>,
}

impl Session {
    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    /// True once the probe has resolved either way.
    pub fn connection_tested(&self) -> bool {
        self.connection.is_terminal()
    }

    /// True while at least one list fetch is outstanding.
    pub fn loading(&self) -> bool {
        self.fetches_in_flight > 0
    }

    pub fn connectivity_error(&self) -> Option<&str> {
        self.connectivity_error.as_deref()
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    /// The banner message: a connectivity failure outranks fetch failures.
    pub fn error(&self) -> Option<&str> {
        self.connectivity_error().or(self.fetch_error())
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.fetches_in_flight += 1;
        self.fetch_error = None;
    }

    pub(crate) fn end_fetch(&mut self, error: Option<String>) {
        self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);
        if error.is_some() {
            self.fetch_error = error;
        }
    }
}

//! Tagged result of a controller operation.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// `Success(payload)` or `Failure(message)`; returned instead of an error so
/// the caller decides how to present a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(message) => Some(message),
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(message) => Err(message),
        }
    }
}

/// `{"success": true, "data": ...}` / `{"success": false, "error": "..."}`.
impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 2)?;
        match self {
            Outcome::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Outcome::Failure(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

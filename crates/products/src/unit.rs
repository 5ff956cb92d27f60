use serde::{Deserialize, Serialize};

/// Units offered by the product form.
///
/// The backend stores the unit as free text, so records may carry values
/// outside this list; those are kept as-is on [`crate::Product`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    Piece,
    Box,
    Pack,
    Kg,
    Liter,
    Meter,
}

impl Unit {
    pub const ALL: [Unit; 6] = [
        Unit::Piece,
        Unit::Box,
        Unit::Pack,
        Unit::Kg,
        Unit::Liter,
        Unit::Meter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Piece => "Piece",
            Unit::Box => "Box",
            Unit::Pack => "Pack",
            Unit::Kg => "Kg",
            Unit::Liter => "Liter",
            Unit::Meter => "Meter",
        }
    }

    /// Case-insensitive lookup; `None` for units outside the form's list.
    pub fn parse(s: &str) -> Option<Unit> {
        let s = s.trim();
        Unit::ALL
            .into_iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(s))
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

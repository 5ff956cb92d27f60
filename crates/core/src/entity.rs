//! Entity trait: identity that survives field changes.

/// Entity marker + minimal interface.
///
/// Records held by the client are keyed by this identity; every other field
/// may be replaced by a server response.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

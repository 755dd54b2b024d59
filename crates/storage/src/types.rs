//! Storage types shared across modules

/// Result of writing one record under a unique natural key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new row was written.
    Inserted,
    /// A concurrent request already cached a row under the same key.
    AlreadyCached,
}

impl SaveOutcome {
    #[must_use]
    pub const fn is_inserted(self) -> bool {
        matches!(self, Self::Inserted)
    }
}

/// A stored record together with how it got there.
#[derive(Debug, Clone, PartialEq)]
pub struct Saved<T> {
    pub record: T,
    pub outcome: SaveOutcome,
}

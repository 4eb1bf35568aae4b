//! Result of an idempotent create.

/// Either a freshly created entity or the entity that already occupied the
/// requested identity.
///
/// Inbound adapters render `Created` as success and `Existing` as a conflict
/// whose body carries the existing entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome<T, E = T> {
    /// The entity was stored by this request.
    Created(T),
    /// A conflicting entity already existed and was left untouched.
    Existing(E),
}

impl<T, E> CreateOutcome<T, E> {
    /// True when this request stored the entity.
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

//! Combinators over [`Option`] that the standard library does not provide.
//!
//! Optional fields are always modelled as `Option<T>`; these helpers cover the
//! "apply only if every input is present" and "are these jointly present"
//! questions that come up when handling grouped metadata such as a tag's
//! vocabulary, URI and version.

/// Apply `f` only if both inputs are present.
#[must_use]
pub fn lift2<A, B, R>(f: impl FnOnce(A, B) -> R, a: Option<A>, b: Option<B>) -> Option<R> {
    Some(f(a?, b?))
}

/// Apply `f` only if all three inputs are present.
#[must_use]
pub fn lift3<A, B, C, R>(
    f: impl FnOnce(A, B, C) -> R,
    a: Option<A>,
    b: Option<B>,
    c: Option<C>,
) -> Option<R> {
    Some(f(a?, b?, c?))
}

/// How many of a group of optionals are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    /// Every member of the group is present.
    All,
    /// No member of the group is present.
    Absent,
    /// Some, but not all, members are present.
    Partial,
}

impl Presence {
    /// Classify a group from the presence flags of its members.
    #[must_use]
    pub fn of(flags: &[bool]) -> Self {
        if flags.iter().all(|present| *present) {
            Self::All
        } else if flags.iter().all(|present| !present) {
            Self::Absent
        } else {
            Self::Partial
        }
    }
}

/// Classify three optionals as jointly present, jointly absent, or partial.
#[must_use]
pub fn presence3<A, B, C>(a: Option<&A>, b: Option<&B>, c: Option<&C>) -> Presence {
    Presence::of(&[a.is_some(), b.is_some(), c.is_some()])
}

//! Set-algebra helpers that operate on many sets at once.
//!
//! All helpers accept any iterator of borrowed sets, so both a set of sets
//! (`&ImmutableSet<ImmutableSet<T>>`) and a plain slice of sets work.

use std::collections::HashSet;
use std::hash::Hash;

use indexmap::IndexSet;
use tracing::trace;

use crate::set::ImmutableSet;

/// Union any number of sets, treating members with equal derived keys as the
/// same element. The first member seen for a key wins.
///
/// Idempotent and associative, with the empty set as identity.
#[must_use]
pub fn union_with<'a, T, K, I>(key: impl Fn(&T) -> K, sets: I) -> ImmutableSet<T>
where
    T: Eq + Hash + Clone + 'a,
    K: Eq + Hash,
    I: IntoIterator<Item = &'a ImmutableSet<T>>,
{
    let mut seen = HashSet::new();
    let mut members = IndexSet::new();
    for set in sets {
        for member in set {
            if seen.insert(key(member)) {
                members.insert(member.clone());
            }
        }
    }
    ImmutableSet::from(members)
}

/// Flatten a collection of sets by repeated union.
///
/// The result has at most as many members as the inputs combined.
#[must_use]
pub fn flatten_with_union<'a, T, I>(sets: I) -> ImmutableSet<T>
where
    T: Eq + Hash + Clone + 'a,
    I: IntoIterator<Item = &'a ImmutableSet<T>>,
{
    sets.into_iter()
        .fold(ImmutableSet::new(), |acc, set| acc.union(set))
}

/// Flatten a collection of sets by repeated intersection.
///
/// The result has at most as many members as the largest input. There is no
/// universal set to start from, so flattening nothing yields the empty set.
#[must_use]
pub fn flatten_with_intersection<'a, T, I>(sets: I) -> ImmutableSet<T>
where
    T: Eq + Hash + Clone + 'a,
    I: IntoIterator<Item = &'a ImmutableSet<T>>,
{
    let mut sets = sets.into_iter();
    let Some(first) = sets.next() else {
        trace!("flatten_with_intersection: no input sets");
        return ImmutableSet::new();
    };
    sets.fold(first.clone(), |acc, set| acc.intersection(set))
}

/// [`flatten_with_intersection`] comparing members with `eq`.
///
/// A member of the first set survives if every other set holds an
/// `eq`-equal member.
#[must_use]
pub fn flatten_with_intersection_with_eq<'a, T, I>(
    sets: I,
    eq: impl Fn(&T, &T) -> bool,
) -> ImmutableSet<T>
where
    T: Eq + Hash + Clone + 'a,
    I: IntoIterator<Item = &'a ImmutableSet<T>>,
{
    let mut sets = sets.into_iter();
    let Some(first) = sets.next() else {
        trace!("flatten_with_intersection_with_eq: no input sets");
        return ImmutableSet::new();
    };
    sets.fold(first.clone(), |acc, set| {
        acc.filter(|member| set.has_with_eq(member, &eq))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(items: &[u32]) -> ImmutableSet<u32> {
        items.iter().copied().collect()
    }

    #[test]
    fn union_with_deduplicates_by_key() {
        let a: ImmutableSet<(u32, &str)> = [(1, "first"), (2, "first")].into();
        let b: ImmutableSet<(u32, &str)> = [(1, "second"), (3, "second")].into();
        let merged = union_with(|(id, _)| *id, [&a, &b]);
        assert_eq!(merged.to_vec(), [(1, "first"), (2, "first"), (3, "second")]);
    }

    #[test]
    fn union_with_nothing_is_empty() {
        let none: [&ImmutableSet<u32>; 0] = [];
        assert!(union_with(|n: &u32| *n, none).is_empty());
    }

    #[test]
    fn flatten_set_of_sets_with_union() {
        let outer: ImmutableSet<ImmutableSet<u32>> = [nums(&[1, 2]), nums(&[2, 3]), nums(&[])].into();
        assert_eq!(flatten_with_union(&outer), nums(&[1, 2, 3]));
    }

    #[test]
    fn flatten_with_intersection_keeps_common_members() {
        let sets = [nums(&[1, 2, 3]), nums(&[2, 3, 4]), nums(&[3, 2])];
        assert_eq!(flatten_with_intersection(&sets), nums(&[2, 3]));
        assert!(flatten_with_intersection(&[] as &[ImmutableSet<u32>]).is_empty());
    }

    #[test]
    fn flatten_with_intersection_with_eq_uses_predicate() {
        let sets = [nums(&[10, 21]), nums(&[11, 30])];
        let same_tens = |a: &u32, b: &u32| a / 10 == b / 10;
        assert_eq!(flatten_with_intersection_with_eq(&sets, same_tens), nums(&[10]));
    }
}

//! Persistent, insertion-ordered set with a value-semantics algebra.
//!
//! [`ImmutableSet`] is the collection the inventory client uses wherever it
//! needs unique, order-irrelevant membership with provable combination rules:
//! selections, deduplicated listings and tag collections.
//!
//! # Persistence
//!
//! Members live behind an [`Arc`], so cloning a set is O(1) and every
//! operation takes `&self` and hands back a fresh set. Nothing can mutate a
//! set once it has been built. Operations that turn out to be no-ops (adding
//! a present member, subtracting the empty set) return a set that shares the
//! receiver's storage.
//!
//! # Ordering
//!
//! Iteration follows insertion order. Binary operations keep the receiver's
//! members first, in the receiver's order, followed by any new members from
//! the argument in the argument's order. [`ImmutableSet::first`],
//! [`ImmutableSet::last`], [`ImmutableSet::reduce`] and
//! [`ImmutableSet::to_vec`] all observe this order. Equality and hashing are
//! order-insensitive.
//!
//! # Custom equality
//!
//! The `*_with_eq` and `*_map` variants compare members through a caller
//! supplied predicate or derived key, for cases where two structurally
//! different values denote the same logical element (two tags with the same
//! value but different metadata).

use std::collections::HashSet;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, DefaultHasher, Hash, Hasher};
use std::ops::{BitAnd, BitOr, BitXor, Sub};
use std::sync::Arc;

use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Narrow a heterogeneous element to one of its concrete variant types.
///
/// Implemented by element enums so that [`ImmutableSet::filter_class`] can
/// keep only the members of a given kind.
pub trait Narrow<U> {
    /// Returns the inner value if `self` is of kind `U`.
    fn narrow(&self) -> Option<&U>;
}

/// An immutable set whose operations always return new sets.
pub struct ImmutableSet<T> {
    members: Arc<IndexSet<T>>,
}

// ---------------------------------------------------------------------------
// Construction and introspection
// ---------------------------------------------------------------------------

impl<T> ImmutableSet<T> {
    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate members in insertion order.
    pub fn iter(&self) -> indexmap::set::Iter<'_, T> {
        self.members.iter()
    }

    /// The earliest inserted member.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.members.first()
    }

    /// The most recently inserted member.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.members.last()
    }

    fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.members, &other.members)
    }
}

impl<T: Eq + Hash> ImmutableSet<T> {
    /// The empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: Arc::new(IndexSet::new()),
        }
    }

    /// Returns `true` if `value` is a member under `T`'s own equality.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.members.contains(value)
    }

    /// Returns `true` if some member is equal to `value` under `eq`.
    ///
    /// An always-true `eq` matches any non-empty set; an always-false `eq`
    /// never matches.
    #[must_use]
    pub fn has_with_eq(&self, value: &T, eq: impl Fn(&T, &T) -> bool) -> bool {
        self.members.iter().any(|member| eq(value, member))
    }

    /// Every member of `self` is a member of `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.members.iter().all(|m| other.contains(m))
    }

    /// Every member of `other` is a member of `self`.
    #[must_use]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        other.is_subset_of(self)
    }

    /// Mutual subset check.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        self.shares_storage_with(other) || (self.len() == other.len() && self.is_subset_of(other))
    }
}

impl<T: Eq + Hash + Clone> ImmutableSet<T> {
    /// A set containing the members of `self` and `value`.
    #[must_use]
    pub fn add(&self, value: T) -> Self {
        if self.contains(&value) {
            return self.clone();
        }
        let mut members = IndexSet::clone(&self.members);
        members.insert(value);
        Self::from(members)
    }

    /// A set containing the members of `self` except `value`.
    #[must_use]
    pub fn remove(&self, value: &T) -> Self {
        if !self.contains(value) {
            return self.clone();
        }
        self.filter(|member| member != value)
    }

    /// Members of `self` that are not in `other`.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        self.filter(|member| !other.contains(member))
    }

    /// Members of `self` with no `eq`-equal counterpart in `other`.
    #[must_use]
    pub fn subtract_with_eq(&self, other: &Self, eq: impl Fn(&T, &T) -> bool) -> Self {
        self.filter(|member| !other.has_with_eq(member, &eq))
    }

    /// Members of `self` whose derived key is not in `other`.
    #[must_use]
    pub fn subtract_map<K: Eq + Hash>(&self, key: impl Fn(&T) -> K, other: &ImmutableSet<K>) -> Self {
        self.filter(|member| !other.contains(&key(member)))
    }

    /// Members of either set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() || self.shares_storage_with(other) {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let mut members = IndexSet::clone(&self.members);
        members.extend(other.iter().cloned());
        Self::from(members)
    }

    /// Members of both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        if self.shares_storage_with(other) {
            return self.clone();
        }
        self.filter(|member| other.contains(member))
    }

    /// Members of `self` whose derived key is in `other`.
    #[must_use]
    pub fn intersection_map<K: Eq + Hash>(
        &self,
        key: impl Fn(&T) -> K,
        other: &ImmutableSet<K>,
    ) -> Self {
        self.filter(|member| other.contains(&key(member)))
    }

    /// Members of exactly one of the two sets.
    #[must_use]
    pub fn disjunctive_union(&self, other: &Self) -> Self {
        self.subtract(other).union(&other.subtract(self))
    }

    /// Members satisfying `predicate`.
    #[must_use]
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Self {
        self.members
            .iter()
            .filter(|member| predicate(member))
            .cloned()
            .collect()
    }

    /// Apply `f` to every member. Members that map to equal values collapse.
    #[must_use]
    pub fn map<U: Eq + Hash>(&self, f: impl Fn(&T) -> U) -> ImmutableSet<U> {
        self.members.iter().map(f).collect()
    }

    /// Apply `f` to every member, keeping only the present results.
    #[must_use]
    pub fn map_optional<U: Eq + Hash>(&self, f: impl Fn(&T) -> Option<U>) -> ImmutableSet<U> {
        self.members.iter().filter_map(f).collect()
    }

    /// Keep only the members that narrow to kind `U`.
    #[must_use]
    pub fn filter_class<U>(&self) -> ImmutableSet<U>
    where
        T: Narrow<U>,
        U: Eq + Hash + Clone,
    {
        self.members
            .iter()
            .filter_map(<T as Narrow<U>>::narrow)
            .cloned()
            .collect()
    }

    /// Fold members in insertion order, starting from `identity`.
    ///
    /// `op` is expected to be associative with `identity` as its neutral
    /// element; this is not checked. Reducing the empty set returns
    /// `identity`.
    #[must_use]
    pub fn reduce(&self, op: impl Fn(T, T) -> T, identity: T) -> T {
        self.members.iter().cloned().fold(identity, op)
    }

    /// Materialise the members in insertion order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.members.iter().cloned().collect()
    }
}

impl<T> Clone for ImmutableSet<T> {
    fn clone(&self) -> Self {
        Self {
            members: Arc::clone(&self.members),
        }
    }
}

impl<T: Eq + Hash> Default for ImmutableSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ImmutableSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.members.iter()).finish()
    }
}

// ---------------------------------------------------------------------------
// Equality and hashing
// ---------------------------------------------------------------------------

impl<T: Eq + Hash> PartialEq for ImmutableSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other)
    }
}

impl<T: Eq + Hash> Eq for ImmutableSet<T> {}

/// Order-insensitive: member hashes are combined commutatively with a fixed
/// hasher so that equal sets hash equally regardless of insertion order.
impl<T: Hash> Hash for ImmutableSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let fixed = BuildHasherDefault::<DefaultHasher>::default();
        let combined = self
            .members
            .iter()
            .map(|member| fixed.hash_one(member))
            .fold(0_u64, u64::wrapping_add);
        state.write_usize(self.members.len());
        state.write_u64(combined);
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl<T: Eq + Hash> From<IndexSet<T>> for ImmutableSet<T> {
    fn from(members: IndexSet<T>) -> Self {
        Self {
            members: Arc::new(members),
        }
    }
}

impl<T: Eq + Hash> From<Vec<T>> for ImmutableSet<T> {
    fn from(members: Vec<T>) -> Self {
        members.into_iter().collect()
    }
}

impl<T: Eq + Hash, const N: usize> From<[T; N]> for ImmutableSet<T> {
    fn from(members: [T; N]) -> Self {
        members.into_iter().collect()
    }
}

impl<T: Eq + Hash> From<HashSet<T>> for ImmutableSet<T> {
    fn from(members: HashSet<T>) -> Self {
        members.into_iter().collect()
    }
}

impl<T: Eq + Hash> FromIterator<T> for ImmutableSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<IndexSet<T>>())
    }
}

impl<'a, T> IntoIterator for &'a ImmutableSet<T> {
    type Item = &'a T;
    type IntoIter = indexmap::set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<T: Clone> IntoIterator for ImmutableSet<T> {
    type Item = T;
    type IntoIter = indexmap::set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        Arc::unwrap_or_clone(self.members).into_iter()
    }
}

impl<T: Serialize> Serialize for ImmutableSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.members.iter())
    }
}

impl<'de, T> Deserialize<'de> for ImmutableSet<T>
where
    T: Deserialize<'de> + Eq + Hash,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IndexSet::<T>::deserialize(deserializer).map(Self::from)
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

impl<T: Eq + Hash + Clone> BitOr for &ImmutableSet<T> {
    type Output = ImmutableSet<T>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl<T: Eq + Hash + Clone> BitAnd for &ImmutableSet<T> {
    type Output = ImmutableSet<T>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl<T: Eq + Hash + Clone> BitXor for &ImmutableSet<T> {
    type Output = ImmutableSet<T>;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.disjunctive_union(rhs)
    }
}

impl<T: Eq + Hash + Clone> Sub for &ImmutableSet<T> {
    type Output = ImmutableSet<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(rhs)
    }
}

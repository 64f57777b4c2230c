use proptest::prelude::*;
use rspace_set::{
    ImmutableSet, flatten_with_intersection, flatten_with_intersection_with_eq, flatten_with_union,
    union_with,
};

use generators::*;

fn empty() -> ImmutableSet<u8> {
    ImmutableSet::new()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    // Subtract

    #[test]
    fn subtract_idempotent(a in arb_set(), b in arb_set()) {
        prop_assert_eq!(a.subtract(&b).subtract(&b), a.subtract(&b));
    }

    #[test]
    fn subtract_identity_and_bounds(a in arb_set(), b in arb_set()) {
        prop_assert_eq!(a.subtract(&empty()), a.clone());
        let diff = a.subtract(&b);
        prop_assert!(diff.is_subset_of(&a));
        prop_assert!(diff.intersection(&b).is_empty());
    }

    // Union

    #[test]
    fn union_commutative(a in arb_set(), b in arb_set()) {
        prop_assert_eq!(a.union(&b), b.union(&a));
    }

    #[test]
    fn union_associative(a in arb_set(), b in arb_set(), c in arb_set()) {
        prop_assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
    }

    #[test]
    fn union_idempotent_with_identity(a in arb_set()) {
        prop_assert_eq!(a.union(&a), a.clone());
        prop_assert_eq!(a.union(&empty()), a.clone());
        prop_assert_eq!(empty().union(&a), a);
    }

    #[test]
    fn union_is_superset_of_both(a in arb_set(), b in arb_set()) {
        let u = a.union(&b);
        prop_assert!(u.is_superset_of(&a));
        prop_assert!(u.is_superset_of(&b));
    }

    #[test]
    fn union_distributes_over_intersection(a in arb_set(), b in arb_set(), c in arb_set()) {
        prop_assert_eq!(
            a.union(&b.intersection(&c)),
            a.union(&b).intersection(&a.union(&c))
        );
    }

    // Intersection

    #[test]
    fn intersection_commutative(a in arb_set(), b in arb_set()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn intersection_associative(a in arb_set(), b in arb_set(), c in arb_set()) {
        prop_assert_eq!(
            a.intersection(&b).intersection(&c),
            a.intersection(&b.intersection(&c))
        );
    }

    #[test]
    fn intersection_idempotent_and_absorbing(a in arb_set()) {
        prop_assert_eq!(a.intersection(&a), a.clone());
        prop_assert!(a.intersection(&empty()).is_empty());
    }

    #[test]
    fn intersection_is_subset_of_both(a in arb_set(), b in arb_set()) {
        let i = a.intersection(&b);
        prop_assert!(i.is_subset_of(&a));
        prop_assert!(i.is_subset_of(&b));
    }

    #[test]
    fn intersection_distributes_over_union(a in arb_set(), b in arb_set(), c in arb_set()) {
        prop_assert_eq!(
            a.intersection(&b.union(&c)),
            a.intersection(&b).union(&a.intersection(&c))
        );
    }

    #[test]
    fn intersection_map_idempotent_subset(a in arb_set(), keys in arb_set()) {
        let key = |n: &u8| n / 2;
        let derived = keys.map(key);
        let once = a.intersection_map(key, &derived);
        prop_assert_eq!(once.intersection_map(key, &derived), once.clone());
        prop_assert!(once.is_subset_of(&a));
    }

    #[test]
    fn subtract_map_complements_intersection_map(a in arb_set(), keys in arb_set()) {
        let key = |n: &u8| n % 5;
        let derived = keys.map(key);
        prop_assert_eq!(
            a.subtract_map(key, &derived).union(&a.intersection_map(key, &derived)),
            a
        );
    }

    // Disjunctive union

    #[test]
    fn disjunctive_union_involutive(a in arb_set(), b in arb_set()) {
        prop_assert_eq!(a.disjunctive_union(&b).disjunctive_union(&b), a);
    }

    #[test]
    fn disjunctive_union_commutative_with_identity(a in arb_set(), b in arb_set()) {
        prop_assert_eq!(a.disjunctive_union(&b), b.disjunctive_union(&a));
        prop_assert_eq!(a.disjunctive_union(&empty()), a);
    }

    #[test]
    fn disjunctive_union_of_subset_is_subtract((a, b) in arb_set_with_subset()) {
        prop_assert!(b.is_subset_of(&a));
        prop_assert_eq!(a.disjunctive_union(&b), a.subtract(&b));
    }

    // Filter, map, mapOptional

    #[test]
    fn filter_subset_and_idempotent(a in arb_set(), modulus in 1u8..5) {
        let p = |n: &u8| n % modulus == 0;
        let once = a.filter(p);
        prop_assert!(once.is_subset_of(&a));
        prop_assert_eq!(once.filter(p), once);
    }

    #[test]
    fn map_never_grows(a in arb_set(), divisor in 1u8..8) {
        prop_assert!(a.map(|n| n / divisor).len() <= a.len());
    }

    #[test]
    fn map_optional_degenerate_functions(a in arb_set()) {
        prop_assert_eq!(a.map_optional(|_| None::<u8>).len(), 0);
        prop_assert_eq!(a.map_optional(|n| Some(*n)).len(), a.len());
    }

    #[test]
    fn map_optional_idempotent(a in arb_set()) {
        let keep_odd = |n: &u8| (n % 2 == 1).then_some(*n);
        let once = a.map_optional(keep_odd);
        prop_assert_eq!(once.map_optional(keep_odd), once.clone());
        prop_assert!(once.is_subset_of(&a));
    }

    // Subset relations

    #[test]
    fn subset_reflexive_and_sampled((a, b) in arb_set_with_subset()) {
        prop_assert!(a.is_subset_of(&a));
        prop_assert!(b.is_subset_of(&a));
        prop_assert!(a.is_superset_of(&b));
    }

    #[test]
    fn subset_transitive(a in arb_set(), b in arb_set(), c in arb_set()) {
        let ab = a.union(&b);
        let abc = ab.union(&c);
        prop_assert!(a.is_subset_of(&ab) && ab.is_subset_of(&abc));
        prop_assert!(a.is_subset_of(&abc));
    }

    #[test]
    fn is_same_symmetric(a in arb_set(), b in arb_set()) {
        prop_assert_eq!(a.is_same(&b), b.is_same(&a));
        let reordered: ImmutableSet<u8> = a.to_vec().into_iter().rev().collect();
        prop_assert!(a.is_same(&reordered));
    }

    #[test]
    fn has_with_eq_degenerate_predicates(a in arb_set(), probe in arb_element()) {
        prop_assert_eq!(a.has_with_eq(&probe, |_, _| true), !a.is_empty());
        prop_assert!(!a.has_with_eq(&probe, |_, _| false));
        prop_assert_eq!(a.has_with_eq(&probe, |x, y| x == y), a.contains(&probe));
    }

    // Reduce

    #[test]
    fn reduce_sums_members(a in arb_set()) {
        let total = a.map(|n| u32::from(*n)).reduce(u32::wrapping_add, 0);
        let expected: u32 = a.iter().map(|n| u32::from(*n)).sum();
        prop_assert_eq!(total, expected);
    }

    #[test]
    fn reduce_two_members_applies_op_once(x in arb_element(), y in arb_element()) {
        prop_assume!(x != y);
        let pair: ImmutableSet<u32> = [u32::from(x), u32::from(y)].into();
        let first = pair.first().copied().unwrap_or_default();
        let last = pair.last().copied().unwrap_or_default();
        prop_assert_eq!(pair.reduce(|l, r| l.wrapping_mul(31).wrapping_add(r), 0), first * 31 + last);
    }

    // Multi-set helpers

    #[test]
    fn union_with_laws(a in arb_set(), b in arb_set(), c in arb_set()) {
        let key = |n: &u8| n / 3;
        prop_assert_eq!(union_with(key, [&a, &a]), union_with(key, [&a]));
        let left = union_with(key, [&union_with(key, [&a, &b]), &c]);
        let right = union_with(key, [&a, &union_with(key, [&b, &c])]);
        prop_assert_eq!(left, right);
        prop_assert_eq!(union_with(key, [&a, &empty()]), union_with(key, [&a]));
    }

    #[test]
    fn flatten_with_union_bounds(sets in arb_sets(0)) {
        let flat = flatten_with_union(&sets);
        let total: usize = sets.iter().map(ImmutableSet::len).sum();
        prop_assert!(flat.len() <= total);
        prop_assert!(sets.iter().all(|s| s.is_subset_of(&flat)));
    }

    #[test]
    fn flatten_with_union_distributes_over_intersection(sets in arb_sets(0), x in arb_set()) {
        let restricted: Vec<ImmutableSet<u8>> = sets.iter().map(|s| s.intersection(&x)).collect();
        prop_assert_eq!(flatten_with_union(&sets).intersection(&x), flatten_with_union(&restricted));
    }

    #[test]
    fn flatten_with_intersection_bounds(sets in arb_sets(1)) {
        let flat = flatten_with_intersection(&sets);
        let max = sets.iter().map(ImmutableSet::len).max().unwrap_or_default();
        prop_assert!(flat.len() <= max);
        prop_assert!(sets.iter().all(|s| flat.is_subset_of(s)));
    }

    #[test]
    fn flatten_with_intersection_distributes_over_union(sets in arb_sets(1), x in arb_set()) {
        let widened: Vec<ImmutableSet<u8>> = sets.iter().map(|s| s.union(&x)).collect();
        prop_assert_eq!(
            flatten_with_intersection(&sets).union(&x),
            flatten_with_intersection(&widened)
        );
    }

    #[test]
    fn flatten_with_intersection_with_eq_matches_default_eq(sets in arb_sets(0)) {
        prop_assert_eq!(
            flatten_with_intersection_with_eq(&sets, |a, b| a == b),
            flatten_with_intersection(&sets)
        );
    }

    #[test]
    fn flatten_accepts_set_of_sets(sets in arb_sets(0)) {
        let outer: ImmutableSet<ImmutableSet<u8>> = sets.iter().cloned().collect();
        prop_assert_eq!(flatten_with_union(&outer), flatten_with_union(&sets));
    }

    // Persistence

    #[test]
    fn operations_leave_receiver_untouched(a in arb_set(), b in arb_set(), x in arb_element()) {
        let snapshot = a.to_vec();
        let _ = a.add(x);
        let _ = a.union(&b);
        let _ = a.subtract(&b);
        let _ = a.disjunctive_union(&b);
        prop_assert_eq!(a.to_vec(), snapshot);
    }
}

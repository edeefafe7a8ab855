//! Assertion functions for testing query outputs.
//!
//! Each assertion runs the query once. A query that fails while being
//! traversed fails the assertion with the error in the panic message.

use crate::grouping::Group;
use crate::query::Queryable;
use crate::sequence::Element;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

fn collect_or_panic<T: Element + Debug>(query: &Queryable<T>) -> Vec<T> {
    match query.to_list() {
        Ok(items) => items,
        Err(e) => panic!("Query failed during traversal: {e}"),
    }
}

/// Assert that a query yields exactly `expected`, in order.
///
/// # Panics
///
/// Panics if the traversal fails or differs in length or content.
///
/// # Example
///
/// ```
/// use ironquery::from_vec;
/// use ironquery::testing::assert_sequence_eq;
///
/// assert_sequence_eq(&from_vec(vec![3, 1, 2]).reverse(), &[2, 1, 3]);
/// ```
pub fn assert_sequence_eq<T: Element + Debug + PartialEq>(query: &Queryable<T>, expected: &[T]) {
    let actual = collect_or_panic(query);
    assert_eq!(
        actual.len(),
        expected.len(),
        "Sequence length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Sequence mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that a query yields the elements of `expected` in any order,
/// with the same multiplicities.
///
/// # Panics
///
/// Panics if the traversal fails or the multisets differ.
///
/// # Example
///
/// ```
/// use ironquery::from_vec;
/// use ironquery::testing::assert_sequence_unordered_eq;
///
/// assert_sequence_unordered_eq(&from_vec(vec![3, 1, 3]), &[3, 3, 1]);
/// ```
pub fn assert_sequence_unordered_eq<T>(query: &Queryable<T>, expected: &[T])
where
    T: Element + Debug + Eq + Hash,
{
    let actual = collect_or_panic(query);
    let mut counts: HashMap<&T, isize> = HashMap::new();
    for a in &actual {
        *counts.entry(a).or_default() += 1;
    }
    for e in expected {
        *counts.entry(e).or_default() -= 1;
    }

    let extra: Vec<_> = counts.iter().filter(|(_, n)| **n > 0).map(|(k, _)| *k).collect();
    let missing: Vec<_> = counts.iter().filter(|(_, n)| **n < 0).map(|(k, _)| *k).collect();
    assert!(
        extra.is_empty() && missing.is_empty(),
        "Sequence content mismatch:\n  Missing elements: {missing:?}\n  Extra elements: {extra:?}\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}

/// Assert that a query of groups yields these keys, in this order, each with
/// exactly these elements in this order. Keys are given by their `Display`
/// form, for example `"(X)"`.
///
/// # Panics
///
/// Panics if the traversal fails, or on any key or element mismatch.
///
/// # Example
///
/// ```
/// use ironquery::from_vec;
/// use ironquery::testing::assert_groups_eq;
///
/// let groups = from_vec(vec![1, 2, 3, 4]).group_single(|n: &i32| n % 2 == 0);
/// assert_groups_eq(&groups, &[("(false)", vec![1, 3]), ("(true)", vec![2, 4])]);
/// ```
pub fn assert_groups_eq<T>(query: &Queryable<Group<T>>, expected: &[(&str, Vec<T>)])
where
    T: Element + Debug + PartialEq,
{
    let actual = collect_or_panic(query);
    let summary: Vec<(String, &[T])> = actual
        .iter()
        .map(|g| (g.key().to_string(), g.elements()))
        .collect();
    assert_eq!(
        actual.len(),
        expected.len(),
        "Group count mismatch:\n  Expected: {expected:?}\n  Actual: {summary:?}"
    );

    for (i, ((ak, av), (ek, ev))) in summary.iter().zip(expected.iter()).enumerate() {
        assert_eq!(ak.as_str(), *ek, "Key mismatch at group {i}:\n  Expected: {ek}\n  Actual: {ak}");
        assert_eq!(
            *av,
            ev.as_slice(),
            "Elements mismatch for group {ak}:\n  Expected: {ev:?}\n  Actual: {av:?}"
        );
    }
}

/// Assert that every element of a query satisfies a predicate.
///
/// # Panics
///
/// Panics if the traversal fails or an element fails the predicate.
pub fn assert_all_elements<T: Element + Debug>(query: &Queryable<T>, predicate: impl Fn(&T) -> bool) {
    let actual = collect_or_panic(query);
    for (i, item) in actual.iter().enumerate() {
        assert!(
            predicate(item),
            "Predicate failed for element at index {i}:\n  Element: {item:?}\n  Sequence: {actual:?}"
        );
    }
}

use ironquery::testing::*;
use ironquery::{from_fn, from_vec, Direction, OrderFunc, QueryError};
use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

fn digits() -> Vec<i32> {
    vec![5, 3, 1, 4, 1, 5, 9, 2, 6]
}

#[test]
fn order_by_ascending_and_descending() -> anyhow::Result<()> {
    let q = from_vec(digits());
    assert_sequence_eq(&q.order_by(|x: &i32| *x), &[1, 1, 2, 3, 4, 5, 5, 6, 9]);
    assert_sequence_eq(&q.order_by_descending(|x: &i32| *x), &[9, 6, 5, 5, 4, 3, 2, 1, 1]);
    Ok(())
}

#[test]
fn then_by_breaks_ties_only() -> anyhow::Result<()> {
    let names = from_vec(sample_employees())
        .order_by(|e: &Employee| e.age)
        .then_by_descending(|e: &Employee| e.salary)
        .map(|e: &Employee| e.name.clone());
    assert_eq!(
        names.to_list()?,
        vec!["Frank", "Bob", "Dan", "Alice", "Heidi", "Grace", "Carol", "Erin"]
    );
    Ok(())
}

#[test]
fn sort_is_stable_on_full_ties() -> anyhow::Result<()> {
    let names = from_vec(sample_employees())
        .order_by(|e: &Employee| e.dept.clone())
        .map(|e: &Employee| e.name.clone());
    assert_eq!(
        names.to_list()?,
        vec!["Alice", "Carol", "Frank", "Bob", "Erin", "Heidi", "Dan", "Grace"]
    );

    let by_salary = from_vec(sample_employees())
        .order_by_descending(|e: &Employee| e.salary)
        .then_by(|e: &Employee| e.dept.clone())
        .map(|e: &Employee| e.name.clone());
    assert_eq!(
        by_salary.take(5).to_list()?,
        vec!["Carol", "Alice", "Frank", "Erin", "Bob"]
    );
    Ok(())
}

#[test]
fn three_level_ordering() -> anyhow::Result<()> {
    let words = from_vec(vec!["bb", "a", "ab", "ba", "c", "aa"]);
    let sorted = words
        .order_by(|w: &&str| w.len())
        .then_by_descending(|w: &&str| w.chars().next())
        .then_by(|w: &&str| w.chars().nth(1));
    assert_sequence_eq(&sorted, &["c", "a", "ba", "bb", "aa", "ab"]);
    assert_eq!(sorted.criteria().len(), 3);
    assert_eq!(sorted.criteria()[1].direction(), Direction::Descending);
    Ok(())
}

#[test]
fn source_is_sorted_once_per_ordered_query() -> anyhow::Result<()> {
    let tracker = TouchTracker::from_vec(vec![3, 1, 2]);
    let sorted = tracker.query().order_by(|x: &i32| *x);
    assert_eq!(tracker.touch_count(), 0);

    assert_eq!(sorted.to_list()?, vec![1, 2, 3]);
    assert_eq!(sorted.to_list()?, vec![1, 2, 3]);
    assert_eq!(sorted.first()?, 1);
    assert_eq!(sorted.known_len(), Some(3));
    assert_eq!(tracker.touched(), vec![0, 1, 2]);
    Ok(())
}

#[test]
fn extending_a_clone_leaves_the_original() -> anyhow::Result<()> {
    let base = from_vec(vec![(1, 'b'), (0, 'a'), (1, 'a')]).order_by(|p: &(i32, char)| p.0);
    let refined = base.clone().then_by(|p: &(i32, char)| p.1);
    assert_sequence_eq(&base, &[(0, 'a'), (1, 'b'), (1, 'a')]);
    assert_sequence_eq(&refined, &[(0, 'a'), (1, 'a'), (1, 'b')]);
    Ok(())
}

#[test]
fn nan_keys_fail_with_not_comparable() {
    let q = from_vec(vec![1.0, f64::NAN, 0.5]).order_by(|x: &f64| *x);
    assert!(matches!(q.to_list(), Err(QueryError::NotComparable(_))));
    assert!(matches!(q.first(), Err(QueryError::NotComparable(_))));
}

#[test]
fn nan_keys_fail_large_inputs() {
    let values: Vec<f64> = (0..5000)
        .map(|i| if i % 11 == 4 { f64::NAN } else { f64::from(i % 97) })
        .collect();
    let q = from_vec(values);
    assert!(matches!(q.order_by(|x: &f64| *x).to_list(), Err(QueryError::NotComparable(_))));
    assert!(matches!(
        q.order_by_descending(|x: &f64| *x).to_list(),
        Err(QueryError::NotComparable(_))
    ));

    let tied = from_vec((0..4000).map(|i| (i % 3, if i % 13 == 0 { f64::NAN } else { 1.0 })).collect::<Vec<_>>());
    let by_both = tied.order_by(|p: &(i32, f64)| p.0).then_by(|p: &(i32, f64)| p.1);
    assert!(matches!(by_both.to_list(), Err(QueryError::NotComparable(_))));
}

#[test]
fn key_extractor_calls_stay_within_n_log_n() -> anyhow::Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let values: Vec<i32> = (0..1000).map(|i| (i * 7919) % 1000).collect();
    let sorted = from_vec(values).order_by(move |x: &i32| {
        counter.fetch_add(1, AtomicOrdering::SeqCst);
        *x
    });
    assert_eq!(sorted.to_list()?, (0..1000).collect::<Vec<_>>());
    // ceil(log2 1000) = 10 passes, two extractions per comparison
    assert!(calls.load(AtomicOrdering::SeqCst) <= 2 * 1000 * 10);
    Ok(())
}

#[test]
fn secondary_key_only_runs_on_primary_ties() -> anyhow::Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let secondary = move |p: &(i32, i32)| {
        counter.fetch_add(1, AtomicOrdering::SeqCst);
        p.1
    };

    let distinct = from_vec((0..200).rev().map(|i| (i, -i)).collect::<Vec<_>>());
    let sorted = distinct.order_by(|p: &(i32, i32)| p.0).then_by(secondary.clone());
    assert_eq!(sorted.first()?, (0, 0));
    assert_eq!(calls.load(AtomicOrdering::SeqCst), 0);

    let with_ties = from_vec(vec![(1, 2), (0, 9), (1, 1)]);
    let sorted = with_ties.order_by(|p: &(i32, i32)| p.0).then_by(secondary);
    assert_sequence_eq(&sorted, &[(0, 9), (1, 1), (1, 2)]);
    assert!(calls.load(AtomicOrdering::SeqCst) > 0);
    Ok(())
}

#[test]
fn custom_comparators() -> anyhow::Result<()> {
    let floats = from_vec(vec![2.5, f64::NAN, -1.0]);
    let sorted = floats.order_by_with(|x: &f64| *x, f64::total_cmp);
    let out = sorted.to_list()?;
    assert_eq!(out[..2], [-1.0, 2.5]);
    assert!(out[2].is_nan());

    let words = from_vec(vec!["Pear", "apple", "Fig"]);
    let case_insensitive = words.order_by_with(
        |w: &&str| w.to_lowercase(),
        |a: &String, b: &String| a.cmp(b),
    );
    assert_sequence_eq(&case_insensitive, &["apple", "Fig", "Pear"]);

    let by_len_desc = words
        .order_by_descending_with(|w: &&str| w.len(), usize::cmp)
        .then_by_descending_with(|w: &&str| w.to_string(), |a: &String, b: &String| a.cmp(b));
    assert_sequence_eq(&by_len_desc, &["apple", "Pear", "Fig"]);
    Ok(())
}

#[test]
fn prebuilt_criteria() -> anyhow::Result<()> {
    let by_len = OrderFunc::by_key(|w: &&str| w.len(), Direction::Descending);
    let alpha = OrderFunc::with_comparator(|w: &&str| w.to_string(), |a: &String, b: &String| a.cmp(b), Direction::Ascending);
    let q = from_vec(vec!["kiwi", "fig", "pear", "banana"])
        .order_by_criterion(by_len)
        .then_by_criterion(alpha);
    assert_sequence_eq(&q, &["banana", "kiwi", "pear", "fig"]);
    Ok(())
}

#[test]
fn ordered_query_supports_every_operator() -> anyhow::Result<()> {
    let sorted = from_fn(|| vec![4, 2, 8, 6].into_iter()).order_by(|x: &i32| *x);
    assert_eq!(sorted.last()?, 8);
    assert_eq!(sorted.element_at(1)?, 4);
    assert_sequence_eq(&sorted.reverse(), &[8, 6, 4, 2]);
    assert_sequence_eq(&sorted.skip(1).take(2), &[4, 6]);
    assert_eq!(sorted.sum()?.as_i64(), Some(20));
    Ok(())
}

#[test]
fn ordering_groups_keeps_group_lookups() -> anyhow::Result<()> {
    let groups = from_vec(sample_employees())
        .group_single(|e: &Employee| e.dept.clone())
        .order_by_descending(|g: &ironquery::Group<Employee>| g.len())
        .then_by(|g: &ironquery::Group<Employee>| g.key().to_string());

    let keys: Vec<String> = groups.map(|g: &ironquery::Group<Employee>| g.key().to_string()).to_list()?;
    assert_eq!(keys, vec!["(Engineering)", "(Sales)", "(Support)"]);

    let support = groups.get_single("Support")?.map(|q| q.count()).transpose()?;
    assert_eq!(support, Some(2));
    Ok(())
}

#[test]
fn ordering_an_empty_query() -> anyhow::Result<()> {
    let q = ironquery::empty::<i32>().order_by(|x: &i32| *x);
    assert!(q.is_empty()?);
    assert!(matches!(q.first(), Err(QueryError::NoSuchElement(_))));
    Ok(())
}

#[test]
fn direction_apply_flips_only_descending() {
    assert_eq!(Direction::Ascending.apply(Ordering::Less), Ordering::Less);
    assert_eq!(Direction::Descending.apply(Ordering::Less), Ordering::Greater);
    assert_eq!(Direction::default(), Direction::Ascending);
}

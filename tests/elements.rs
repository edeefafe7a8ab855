use ironquery::testing::*;
use ironquery::{empty, from_fn, from_vec, QueryError};

#[test]
fn first_family() -> anyhow::Result<()> {
    let q = from_vec(vec![4, 7, 10, 13]);
    assert_eq!(q.first()?, 4);
    assert_eq!(q.first_where(|x: &i32| x % 2 == 1)?, 7);
    assert_eq!(q.first_where_or_default(|x: &i32| *x > 100)?, None);
    assert_eq!(q.first_where_or(|x: &i32| *x > 100, -1)?, -1);

    let none = empty::<i32>();
    assert!(matches!(none.first(), Err(QueryError::NoSuchElement(_))));
    assert_eq!(none.first_or_default()?, None);
    assert_eq!(none.first_or(9)?, 9);
    assert!(matches!(q.first_where(|x: &i32| *x < 0), Err(QueryError::NoSuchElement(_))));
    Ok(())
}

#[test]
fn last_family() -> anyhow::Result<()> {
    let q = from_vec(vec![4, 7, 10, 13]);
    assert_eq!(q.last()?, 13);
    assert_eq!(q.last_where(|x: &i32| x % 2 == 0)?, 10);
    assert_eq!(q.last_where_or_default(|x: &i32| *x > 100)?, None);
    assert_eq!(q.last_where_or(|x: &i32| *x > 100, 0)?, 0);

    let streamed = from_fn(|| vec![1, 2, 3].into_iter());
    assert_eq!(streamed.last()?, 3);
    assert_eq!(streamed.filter(|x: &i32| *x < 3).last_or_default()?, Some(2));

    let none = empty::<i32>();
    assert!(matches!(none.last(), Err(QueryError::NoSuchElement(_))));
    assert_eq!(none.last_or(5)?, 5);
    Ok(())
}

#[test]
fn single_requires_exactly_one() -> anyhow::Result<()> {
    assert_eq!(from_vec(vec![42]).single()?, 42);
    assert!(matches!(empty::<i32>().single(), Err(QueryError::NoSuchElement(_))));
    assert!(matches!(from_vec(vec![1, 2]).single(), Err(QueryError::NoSuchElement(_))));

    let q = from_vec(vec![1, 2, 3, 4]);
    assert_eq!(q.single_where(|x: &i32| *x == 3)?, 3);
    assert!(matches!(
        q.single_where(|x: &i32| x % 2 == 0),
        Err(QueryError::NoSuchElement(_))
    ));
    assert_eq!(q.single_where_or_default(|x: &i32| x % 2 == 0)?, None);
    assert_eq!(q.single_where_or_default(|x: &i32| *x > 3)?, Some(4));
    assert_eq!(empty::<i32>().single_or_default()?, None);
    assert_eq!(from_vec(vec![7]).single_or_default()?, Some(7));
    Ok(())
}

#[test]
fn single_stops_at_the_second_match() -> anyhow::Result<()> {
    let tracker = TouchTracker::unbounded(|i| i);
    assert!(tracker.query().single_where_or_default(|n: &usize| n % 2 == 0)?.is_none());
    assert_eq!(tracker.touch_count(), 3);
    Ok(())
}

#[test]
fn element_at_with_and_without_random_access() -> anyhow::Result<()> {
    let indexed = from_vec(vec!['a', 'b', 'c']);
    assert_eq!(indexed.element_at(2)?, 'c');
    assert!(matches!(indexed.element_at(3), Err(QueryError::NoSuchElement(_))));
    assert_eq!(indexed.element_at_or_default(3)?, None);
    assert_eq!(indexed.element_at_or(3, 'z')?, 'z');

    let tracker = TouchTracker::from_vec(vec!['a', 'b', 'c']);
    assert_eq!(tracker.query().element_at(1)?, 'b');
    assert_eq!(tracker.touched(), vec![0, 1]);
    Ok(())
}

#[test]
fn element_at_through_projections() -> anyhow::Result<()> {
    let q = from_vec(vec![1, 2, 3, 4, 5]).map(|x: &i32| x * 100).skip(1).take(3);
    assert_eq!(q.element_at(0)?, 200);
    assert_eq!(q.element_at(2)?, 400);
    assert_eq!(q.element_at_or_default(3)?, None);
    Ok(())
}

#[test]
fn all_exists_contains() -> anyhow::Result<()> {
    let staff = from_vec(sample_employees());
    assert!(staff.all(|e: &Employee| e.age >= 28)?);
    assert!(!staff.all(|e: &Employee| e.dept == "Sales")?);
    assert!(staff.exists(|e: &Employee| e.salary > 130_000)?);
    assert!(!staff.exists(|e: &Employee| e.name.is_empty())?);
    assert!(empty::<Employee>().all(|_| false)?);
    assert!(!empty::<Employee>().exists(|_| true)?);

    let words = from_vec(vec!["Alpha", "beta"]);
    assert!(words.contains(&"beta")?);
    assert!(!words.contains(&"alpha")?);
    assert!(words.contains_by(&"ALPHA", |a: &&str, b: &&str| a.eq_ignore_ascii_case(b))?);
    Ok(())
}

#[test]
fn exists_stops_at_the_first_match() -> anyhow::Result<()> {
    let tracker = TouchTracker::from_vec(vec![1, 2, 3, 4]);
    assert!(tracker.query().exists(|x: &i32| *x == 2)?);
    assert_eq!(tracker.touch_count(), 2);
    tracker.reset();
    assert!(!tracker.query().all(|x: &i32| *x < 2)?);
    assert_eq!(tracker.touch_count(), 2);
    Ok(())
}

#[test]
fn is_empty_pulls_at_most_one() -> anyhow::Result<()> {
    let tracker = TouchTracker::from_vec(vec![1, 2, 3]);
    assert!(!tracker.query().is_empty()?);
    assert_eq!(tracker.touch_count(), 1);
    assert!(from_vec(vec![1]).filter(|_| false).is_empty()?);
    Ok(())
}

#[test]
fn sequence_equality() -> anyhow::Result<()> {
    let q = from_vec(vec![1, 2, 3]);
    assert!(q.sequence_equals(vec![1, 2, 3])?);
    assert!(!q.sequence_equals(vec![1, 2])?);
    assert!(!q.sequence_equals(vec![1, 2, 3, 4])?);
    assert!(!q.sequence_equals(vec![1, 3, 2])?);
    assert!(q.sequence_equals(from_fn(|| 1..=3))?);
    assert!(empty::<i32>().sequence_equals(Vec::new())?);

    let words = from_vec(vec!["a", "B"]);
    assert!(words.sequence_equals_by(vec!["A", "b"], |x: &&str, y: &&str| x.eq_ignore_ascii_case(y))?);
    Ok(())
}

#[test]
fn sequence_equals_against_unknown_length() -> anyhow::Result<()> {
    let tracker = TouchTracker::from_vec(vec![1, 2]);
    let known = from_vec(vec![1, 2]);
    assert!(!known.sequence_equals(vec![1, 2, 3])?);
    assert!(known.sequence_equals(tracker.query())?);
    assert_eq!(tracker.touch_count(), 2);
    Ok(())
}

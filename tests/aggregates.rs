
use ironquery::testing::*;
use ironquery::{empty, from_fn, from_vec, CombineFn, Number, QueryError, Result};

#[test]
fn average_of_integers() -> anyhow::Result<()> {
    assert_approx_eq!(from_vec(vec![2, 4, 3, 6]).average()?, 3.75);
    assert_approx_eq!(from_vec(vec![0.5f32, 1.5]).average()?, 1.0);
    Ok(())
}

#[test]
fn sum_stays_integral_until_a_float_appears() -> anyhow::Result<()> {
    assert_eq!(from_vec(vec![2, 4, 4, 6]).sum()?, Number::Int(16));
    assert!(from_vec(vec![2u8, 4]).sum()?.is_int());

    let mixed = from_vec(vec![1.5, 2.0, 0.5]).sum()?;
    assert!(!mixed.is_int());
    assert_approx_eq!(mixed.as_f64(), 4.0);
    Ok(())
}

#[test]
fn sum_widens_on_overflow() -> anyhow::Result<()> {
    let big = from_vec(vec![i64::MAX, 1]).sum()?;
    assert!(!big.is_int());
    assert!(big.as_f64() > 9.2e18);
    Ok(())
}

#[test]
fn empty_aggregates() {
    assert!(matches!(empty::<i32>().sum(), Ok(Number::Int(0))));
    assert!(matches!(empty::<i32>().average(), Err(QueryError::NoSuchElement(_))));
    assert!(matches!(empty::<i32>().min(), Err(QueryError::NoSuchElement(_))));
    assert!(matches!(empty::<i32>().max(), Err(QueryError::NoSuchElement(_))));
    assert!(matches!(empty::<Employee>().min_by_value(|e: &Employee| e.age), Ok(None)));
    assert!(matches!(empty::<Employee>().max_by_value(|e: &Employee| e.age), Ok(None)));
    assert!(matches!(empty::<i32>().count(), Ok(0)));
}

#[test]
fn min_and_max() -> anyhow::Result<()> {
    let q = from_vec(vec![3, -7, 12, 0]);
    assert_eq!(q.min()?, -7);
    assert_eq!(q.max()?, 12);

    let words = from_vec(vec!["pear", "apple", "fig"]);
    assert_eq!(words.min()?, "apple");
    assert_eq!(words.max()?, "pear");
    Ok(())
}

#[test]
fn min_over_nan_is_not_comparable() {
    let q = from_vec(vec![1.0, f64::NAN]);
    assert!(matches!(q.min(), Err(QueryError::NotComparable(_))));
    assert!(matches!(q.max(), Err(QueryError::NotComparable(_))));
}

#[test]
fn lone_nan_is_not_comparable() {
    let q = from_vec(vec![f64::NAN]);
    assert!(matches!(q.min(), Err(QueryError::NotComparable(_))));
    assert!(matches!(q.max(), Err(QueryError::NotComparable(_))));
    assert!(matches!(
        from_vec(vec![f64::NAN, 1.0]).min(),
        Err(QueryError::NotComparable(_))
    ));
    assert!(matches!(
        from_vec(vec![f64::NAN]).min_by_value(|x: &f64| *x),
        Err(QueryError::NotComparable(_))
    ));
}

#[test]
fn by_value_aggregates_over_employees() -> anyhow::Result<()> {
    let staff = from_vec(sample_employees());
    assert_eq!(staff.min_by_value(|e: &Employee| e.age)?, Some(Number::Int(28)));
    assert_eq!(staff.max_by_value(|e: &Employee| e.salary)?, Some(Number::Int(135_000)));
    assert_eq!(staff.sum_by(|e: &Employee| e.salary)?, Number::Int(673_000));
    assert_approx_eq!(staff.average_by(|e: &Employee| e.age)?, 34.625);
    Ok(())
}

#[test]
fn count_uses_known_length_or_traverses() -> anyhow::Result<()> {
    assert_eq!(from_vec(vec![1, 2, 3]).count()?, 3);
    assert_eq!(from_fn(|| 0..5).count()?, 5);

    let staff = from_vec(sample_employees());
    assert_eq!(staff.count_where(|e: &Employee| e.dept == "Sales")?, 3);
    assert_eq!(staff.count_where(|e: &Employee| e.age > 100)?, 0);
    Ok(())
}

#[test]
fn count_traverses_once_without_known_length() -> anyhow::Result<()> {
    let tracker = TouchTracker::from_vec(vec![1, 2, 3, 4]);
    assert_eq!(tracker.query().count()?, 4);
    assert_eq!(tracker.touch_count(), 4);
    Ok(())
}

/// Joins strings with a separator.
struct Join(&'static str);

impl CombineFn<String, Vec<String>, String> for Join {
    fn create(&self) -> Vec<String> {
        Vec::new()
    }

    fn add_input(&self, acc: &mut Vec<String>, v: String) -> Result<()> {
        acc.push(v);
        Ok(())
    }

    fn finish(&self, acc: Vec<String>) -> Result<String> {
        Ok(acc.join(self.0))
    }
}

/// Fails on the first negative input.
struct NonNegativeSum;

impl CombineFn<i32, i64, i64> for NonNegativeSum {
    fn create(&self) -> i64 {
        0
    }

    fn add_input(&self, acc: &mut i64, v: i32) -> Result<()> {
        if v < 0 {
            return Err(QueryError::InvalidArgument(format!("negative input {v}")));
        }
        *acc += i64::from(v);
        Ok(())
    }

    fn finish(&self, acc: i64) -> Result<i64> {
        Ok(acc)
    }
}

#[test]
fn custom_combiners() -> anyhow::Result<()> {
    let names = from_vec(sample_employees())
        .filter(|e: &Employee| e.dept == "Support")
        .map(|e: &Employee| e.name.clone());
    assert_eq!(names.aggregate(Join(", "))?, "Dan, Grace");
    assert_eq!(empty::<String>().aggregate(Join(", "))?, "");

    assert_eq!(from_vec(vec![1, 2, 3]).aggregate(NonNegativeSum)?, 6);
    assert!(matches!(
        from_vec(vec![1, -2, 3]).aggregate(NonNegativeSum),
        Err(QueryError::InvalidArgument(_))
    ));
    Ok(())
}

#[test]
fn aggregates_surface_traversal_errors() {
    let bad = from_vec(vec![1i64, 1000]).cast::<u8>();
    assert!(matches!(bad.sum(), Err(QueryError::InvalidCast { .. })));
    assert!(matches!(bad.count(), Ok(2)));
    assert!(matches!(bad.to_list(), Err(QueryError::InvalidCast { .. })));
}

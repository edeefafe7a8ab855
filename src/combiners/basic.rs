//! Basic combiners: Count, Sum, Min, Max, MinValue, MaxValue

use crate::combiners::CombineFn;
use crate::error::{QueryError, Result};
use crate::number::Number;
use std::cmp::Ordering;
use std::marker::PhantomData;

/* ===================== Count ===================== */

/// Number of elements.
///
/// - Accumulator: `usize`
/// - Output: `usize`
#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl<V> CombineFn<V, usize, usize> for Count {
    fn create(&self) -> usize {
        0
    }

    fn add_input(&self, acc: &mut usize, _v: V) -> Result<()> {
        *acc += 1;
        Ok(())
    }

    fn finish(&self, acc: usize) -> Result<usize> {
        Ok(acc)
    }
}

/* ===================== Sum ===================== */

/// Sum of values, as a [`Number`].
///
/// - Accumulator: `Number`
/// - Output: `Number` (`Int(0)` for no input)
///
/// Stays `Int` until a float is added or an integer addition overflows.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum;

impl<V: Into<Number>> CombineFn<V, Number, Number> for Sum {
    fn create(&self) -> Number {
        Number::Int(0)
    }

    fn add_input(&self, acc: &mut Number, v: V) -> Result<()> {
        *acc = *acc + v.into();
        Ok(())
    }

    fn finish(&self, acc: Number) -> Result<Number> {
        Ok(acc)
    }
}

/* ===================== Min<T> / Max<T> ===================== */

/// Keep `v` in `acc` if it compares as `keep` against the current value.
fn fold_extreme<T: PartialOrd>(acc: &mut Option<T>, v: T, keep: Ordering) -> Result<()> {
    match acc {
        Some(cur) => match v.partial_cmp(cur) {
            Some(ord) if ord == keep => *cur = v,
            Some(_) => {}
            None => {
                return Err(QueryError::not_comparable(format!(
                    "elements of type {} have no order between them",
                    std::any::type_name::<T>()
                )));
            }
        },
        None => {
            if v.partial_cmp(&v).is_none() {
                return Err(QueryError::not_comparable(format!(
                    "element of type {} has no order with itself",
                    std::any::type_name::<T>()
                )));
            }
            *acc = Some(v);
        }
    }
    Ok(())
}

/// Smallest element in natural order; the first one wins ties.
///
/// - Accumulator: `Option<T>`
/// - Output: `T`, or [`QueryError::NoSuchElement`] for no input
#[derive(Clone, Copy, Debug, Default)]
pub struct Min<T>(pub PhantomData<fn() -> T>);
impl<T> Min<T> {
    /// Convenience constructor (same as `Default`).
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> CombineFn<T, Option<T>, T> for Min<T>
where
    T: PartialOrd + 'static,
{
    fn create(&self) -> Option<T> {
        None
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) -> Result<()> {
        fold_extreme(acc, v, Ordering::Less)
    }

    fn finish(&self, acc: Option<T>) -> Result<T> {
        acc.ok_or_else(|| QueryError::no_such_element("min of an empty sequence"))
    }
}

/// Largest element in natural order; the first one wins ties.
///
/// - Accumulator: `Option<T>`
/// - Output: `T`, or [`QueryError::NoSuchElement`] for no input
#[derive(Clone, Copy, Debug, Default)]
pub struct Max<T>(pub PhantomData<fn() -> T>);
impl<T> Max<T> {
    /// Convenience constructor (same as `Default`).
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> CombineFn<T, Option<T>, T> for Max<T>
where
    T: PartialOrd + 'static,
{
    fn create(&self) -> Option<T> {
        None
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) -> Result<()> {
        fold_extreme(acc, v, Ordering::Greater)
    }

    fn finish(&self, acc: Option<T>) -> Result<T> {
        acc.ok_or_else(|| QueryError::no_such_element("max of an empty sequence"))
    }
}

/* ===================== MinValue / MaxValue ===================== */

/// Smallest numeric value.
///
/// - Accumulator: `Option<Number>`
/// - Output: `Option<Number>` (`None` for no input)
#[derive(Clone, Copy, Debug, Default)]
pub struct MinValue;

impl<V: Into<Number>> CombineFn<V, Option<Number>, Option<Number>> for MinValue {
    fn create(&self) -> Option<Number> {
        None
    }

    fn add_input(&self, acc: &mut Option<Number>, v: V) -> Result<()> {
        fold_extreme(acc, v.into(), Ordering::Less)
    }

    fn finish(&self, acc: Option<Number>) -> Result<Option<Number>> {
        Ok(acc)
    }
}

/// Largest numeric value.
///
/// - Accumulator: `Option<Number>`
/// - Output: `Option<Number>` (`None` for no input)
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxValue;

impl<V: Into<Number>> CombineFn<V, Option<Number>, Option<Number>> for MaxValue {
    fn create(&self) -> Option<Number> {
        None
    }

    fn add_input(&self, acc: &mut Option<Number>, v: V) -> Result<()> {
        fold_extreme(acc, v.into(), Ordering::Greater)
    }

    fn finish(&self, acc: Option<Number>) -> Result<Option<Number>> {
        Ok(acc)
    }
}

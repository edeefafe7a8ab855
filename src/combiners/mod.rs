//! Folds that back the aggregate terminals, and the [`CombineFn`] trait for
//! plugging in your own through [`Queryable::aggregate`](crate::Queryable::aggregate).
//!
//! - [`Count`] -- number of elements.
//! - [`Sum`] -- widening sum as a [`Number`](crate::Number).
//! - [`Min<T>`] / [`Max<T>`] -- natural order; fail on empty input.
//! - [`MinValue`] / [`MaxValue`] -- by numeric value; `None` on empty input.
//! - [`Average`] -- incremental running mean; fails on empty input.
//!
//! Each combiner names its accumulator type (`A`) and output type (`O`).
//!
//! # Examples
//! ```
//! use ironquery::*;
//! use ironquery::combiners::{Average, Max, Sum};
//!
//! let q = from_vec(vec![2, 4, 3, 6]);
//! assert_eq!(q.aggregate(Sum)?, Number::Int(15));
//! assert_eq!(q.aggregate(Max::new())?, 6);
//! assert_eq!(q.aggregate(Average)?, 3.75);
//! # Ok::<(), QueryError>(())
//! ```

mod basic;
mod statistical;

use crate::error::Result;

pub use basic::{Count, Max, MaxValue, Min, MinValue, Sum};
pub use statistical::Average;

/// A fold over the elements of one traversal.
///
/// `create` makes an empty accumulator, `add_input` folds one element in,
/// and `finish` turns the accumulator into the output. `add_input` and
/// `finish` may fail, which ends the aggregation with that error.
pub trait CombineFn<V, A, O>: Send + Sync + 'static {
    fn create(&self) -> A;
    fn add_input(&self, acc: &mut A, v: V) -> Result<()>;
    fn finish(&self, acc: A) -> Result<O>;
}

//! # Ironquery
//!
//! **Lazy, chainable queries** over any re-iterable Rust sequence: filter,
//! map, flatten, sort, group, take/skip, set operations and aggregates,
//! evaluated one element at a time, on demand.
//!
//! ## Key Features
//!
//! - **Lazy operator chains** - building a query evaluates nothing
//! - **Re-iterable** - every terminal call starts a fresh traversal
//! - **Infinite sources** - `take`, `take_while`, `first` and friends stop early
//! - **Multi-key ordering** - `order_by(..).then_by(..)`, stable, sorted once and cached
//! - **Grouping** - composite [`GroupKey`]s, groups in discovery order
//! - **Set operators** - `distinct`, `union`, `intersect`, `except`, with custom equivalences
//! - **Aggregates** - widening `sum`, running-mean `average`, min/max, custom [`CombineFn`]s
//!
//! ## Quick Start
//!
//! ```
//! use ironquery::*;
//!
//! # fn main() -> Result<()> {
//! let words = from_vec(vec!["pear", "fig", "apple", "kiwi", "fig"]);
//!
//! let short = words
//!     .filter(|w: &&str| w.len() <= 4)
//!     .distinct()
//!     .order_by(|w: &&str| w.len())
//!     .then_by(|w: &&str| *w);
//!
//! assert_eq!(short.to_list()?, vec!["fig", "kiwi", "pear"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Sequence and Cursor
//!
//! A [`Sequence`] is a re-iterable producer of elements; each call to
//! [`Sequence::cursor`] returns an independent [`Cursor`]. Operators are
//! sequences that wrap their upstream, and cursors pull from upstream
//! cursors. A cursor yields `Result<T>`: conversion and comparison failures
//! surface when the offending element is pulled.
//!
//! ### Queryable
//!
//! A [`Queryable<T>`] is a cheap, cloneable handle to the outermost sequence
//! of a chain. Sources create one:
//! - [`from_vec`], [`from_slice`], [`from_iter`] - indexed, known length
//! - [`from_fn`] - a generator, possibly infinite
//! - [`range`] - an inclusive `i64` range
//! - [`empty`] - no elements
//!
//! #### Lazy operators
//! - [`filter`](Queryable::filter), [`map`](Queryable::map), [`flat_map`](Queryable::flat_map)
//! - [`take`](Queryable::take), [`take_while`](Queryable::take_while),
//!   [`skip`](Queryable::skip), [`skip_while`](Queryable::skip_while)
//! - [`concat`](Queryable::concat), [`default_if_empty`](Queryable::default_if_empty),
//!   [`cast`](Queryable::cast), [`of_type`](Queryable::of_type), [`reverse`](Queryable::reverse)
//! - [`distinct`](Queryable::distinct), [`union`](Queryable::union),
//!   [`intersect`](Queryable::intersect), [`except`](Queryable::except) and their `_by` forms
//!
//! #### Materializing operators (evaluated once, then cached)
//! - [`order_by`](Queryable::order_by) and friends return an [`OrderedQueryable`]
//! - [`group`](Queryable::group) / [`group_single`](Queryable::group_single) return a
//!   `Queryable<Group<T>>`
//!
//! #### Terminals
//! - `first`, `last`, `single`, `element_at` (each with `_or_default` / `_or` forms)
//! - `count`, `sum`, `average`, `min`, `max`, `aggregate`
//! - `to_list`, `to_set`, `to_array`, `to_map`, `to_primitive_array`
//!
//! ## Errors
//!
//! Every fallible call returns [`Result<T>`](Result) with a [`QueryError`]:
//! `InvalidArgument`, `NoSuchElement`, `InvalidCast` or `NotComparable`.
//!
//! ## Logging
//!
//! Materialization points (sorting, grouping, set-operator lookups) emit
//! `tracing` events. The crate never installs a subscriber.
//!
//! ## Feature Flags
//!
//! - `serde` (default) - `Serialize`/`Deserialize` for [`KeyPart`], [`GroupKey`],
//!   [`Group`] and [`Number`]
//!
//! ## Module Overview
//!
//! - [`cursor`] - the one-shot traversal and its `FindNext` extension point
//! - [`sequence`] - the `Sequence` trait and `IntoSequence` conversions
//! - [`sources`] - entry points wrapping raw data
//! - [`ordering`] - ordering criteria and `OrderedQueryable`
//! - [`grouping`] - keys, groups and grouped lists
//! - [`combiners`] - folds behind the aggregates
//! - [`testing`] - assertions, fixtures and debug operators for tests

pub mod combiners;
pub mod cursor;
pub mod error;
pub mod grouping;
pub mod helpers;
pub mod number;
pub mod ordering;
pub mod primitive;
pub mod query;
pub mod sequence;
pub mod sources;
pub mod testing;
pub mod type_token;

// General re-exports
pub use combiners::{Average, CombineFn, Count, Max, MaxValue, Min, MinValue, Sum};
pub use cursor::{Cursor, FindNext};
pub use error::{QueryError, Result};
pub use grouping::{Group, GroupKey, GroupedList, KeyPart};
pub use number::Number;
pub use ordering::{Direction, OrderFunc, OrderedQueryable};
pub use primitive::{PrimitiveArrays, PrimitiveValue};
pub use query::Queryable;
pub use sequence::{Element, Equivalence, IntoSequence, Predicate, Selector, Sequence};
pub use sources::{empty, from_fn, from_iter, from_slice, from_vec, range};

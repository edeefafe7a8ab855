//! Operators and terminals of [`Queryable`](crate::Queryable), grouped by
//! concern. Each file adds an `impl` block; nothing here is a free function.

pub(crate) mod aggregates;
pub(crate) mod distinct;
pub(crate) mod elements;
pub(crate) mod grouping;
pub(crate) mod materialize;
pub(crate) mod ordering;
pub(crate) mod stateless;
